use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

use crate::{config::DatabaseConfig, error::Result};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let pool = if config.is_in_memory() {
        // Every in-memory connection is its own database, so keep exactly one alive.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?
    } else {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?
    };

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    tracing::info!(
        "Database {} opened with {} max connections",
        config.path,
        config.max_connections
    );

    Ok(pool)
}

/// Creates the `products` and `api_tokens` tables. Safe to run on every boot.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;

    tracing::info!("Schema up to date ({} migrations)", MIGRATOR.migrations.len());

    Ok(())
}

/// Round-trips the pool and reports the SQLite library version behind it.
pub async fn check_health(pool: &SqlitePool) -> Result<String> {
    let version: String = sqlx::query_scalar("SELECT sqlite_version()")
        .fetch_one(pool)
        .await?;

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_pool_is_healthy_and_migrated() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();

        let version = check_health(&pool).await.unwrap();
        assert!(version.starts_with('3'));

        let tables: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name IN ('products', 'api_tokens')
            ORDER BY name
            "#,
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(tables, vec!["api_tokens".to_string(), "products".to_string()]);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();

        run_migrations(&pool).await.unwrap();
    }
}
