use sqlx::SqlitePool;

use crate::{
    error::{AppError, Result},
    models::{Product, ProductRequest},
};

pub async fn create_product(pool: &SqlitePool, req: &ProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, description, price, qty)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, name, description, price, qty
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.qty)
    .fetch_one(pool)
    .await
    .map_err(|e| name_conflict(e, &req.name))?;

    tracing::info!(id = product.id, name = %product.name, "Product created");

    Ok(product)
}

pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, qty FROM products",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, qty FROM products WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// Overwrites every column of an existing row. Never inserts.
pub async fn update_product(
    pool: &SqlitePool,
    id: i64,
    req: &ProductRequest,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            name = ?1,
            description = ?2,
            price = ?3,
            qty = ?4
        WHERE id = ?5
        RETURNING id, name, description, price, qty
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.qty)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| name_conflict(e, &req.name))?;

    if product.is_some() {
        tracing::info!(id, name = %req.name, "Product updated");
    }

    Ok(product)
}

/// Removes the row and hands back what it held.
pub async fn delete_product(pool: &SqlitePool, id: i64) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "DELETE FROM products WHERE id = ?1 RETURNING id, name, description, price, qty",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if product.is_some() {
        tracing::info!(id, "Product deleted");
    }

    Ok(product)
}

fn name_conflict(err: sqlx::Error, name: &str) -> AppError {
    match AppError::from(err) {
        AppError::ConstraintViolation(_) => {
            AppError::ConstraintViolation(format!("Product name '{}' already exists", name))
        }
        other => other,
    }
}
