use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Product, ProductRequest},
    queries::product_queries,
    utils::extractors::{JsonBody, JsonOrForm, ProductId},
};

pub async fn create_product(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = product_queries::create_product(&state.db, &payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = product_queries::find_all(&state.db).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<Product>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    JsonBody(payload): JsonBody<ProductRequest>,
) -> Result<Json<Product>> {
    let product = product_queries::update_product(&state.db, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<Product>> {
    let product = product_queries::delete_product(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(product))
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Product {} not found", id))
}
