mod api_tokens;
mod health;
mod products;

use axum::{routing::get, Router};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/product",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/product/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/generate_api",
            get(api_tokens::verify_api_token).post(api_tokens::generate_api_token),
        )
}
