mod api_token;
mod product;

pub use api_token::*;
pub use product::*;
