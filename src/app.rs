use axum::{extract::DefaultBodyLimit, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::{config::AppConfig, database, error::Result, routes};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.database).await?;
        Ok(Self { db: pool })
    }

    pub async fn close(&self) {
        self.db.close().await;
        tracing::info!("Database pool closed");
    }
}

pub fn build(state: AppState, max_body_size: usize) -> Router {
    routes::create_router()
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
