use sqlx::SqlitePool;

use crate::{
    error::{AppError, Result},
    models::{ApiToken, IssuedToken},
    utils::token::generate_api_token,
};

pub async fn find_by_identity(
    pool: &SqlitePool,
    name: &str,
    email: &str,
) -> Result<Option<ApiToken>> {
    let token = sqlx::query_as::<_, ApiToken>(
        "SELECT id, name, email, api_token FROM api_tokens WHERE name = ?1 AND email = ?2",
    )
    .bind(name)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(token)
}

pub async fn token_exists(pool: &SqlitePool, token: &str) -> Result<bool> {
    let exists: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM api_tokens WHERE api_token = ?1)")
            .bind(token)
            .fetch_one(pool)
            .await?;

    Ok(exists != 0)
}

/// Returns the token already issued to `(name, email)`, minting one on first request.
///
/// Concurrent first requests for the same pair race on the UNIQUE(name, email)
/// constraint; the loser re-reads and returns the winner's token.
pub async fn issue_or_fetch(pool: &SqlitePool, name: &str, email: &str) -> Result<IssuedToken> {
    if let Some(existing) = find_by_identity(pool, name, email).await? {
        tracing::debug!(id = existing.id, "Returning previously issued API token");
        return Ok(IssuedToken {
            token: existing.api_token,
            is_new: false,
        });
    }

    claim_token(pool, name, email).await
}

/// Inserts a fresh token for `(name, email)` unless a row already holds the pair,
/// in which case that row's token is returned with `is_new == false`.
async fn claim_token(pool: &SqlitePool, name: &str, email: &str) -> Result<IssuedToken> {
    let token = generate_api_token();

    let result = sqlx::query(
        r#"
        INSERT INTO api_tokens (name, email, api_token)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (name, email) DO NOTHING
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(&token)
    .execute(pool)
    .await?;

    if result.rows_affected() == 1 {
        tracing::info!(name, email, "Issued new API token");
        return Ok(IssuedToken { token, is_new: true });
    }

    let winner = find_by_identity(pool, name, email).await?.ok_or_else(|| {
        AppError::InternalError("API token row vanished after insert conflict".to_string())
    })?;

    Ok(IssuedToken {
        token: winner.api_token,
        is_new: false,
    })
}
