pub mod api_token_queries;
pub mod product_queries;
