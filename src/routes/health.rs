use axum::{extract::State, Json};
use serde::Serialize;

use crate::{database, error::Result, AppState};

#[derive(Debug, Serialize)]
pub struct Liveness {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    status: &'static str,
    database: &'static str,
    sqlite_version: String,
}

pub async fn health_check() -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 200 once the pool answers a query; database failures fall through to a 500.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Readiness>> {
    let sqlite_version = database::check_health(&state.db).await?;

    Ok(Json(Readiness {
        status: "ready",
        database: "connected",
        sqlite_version,
    }))
}
