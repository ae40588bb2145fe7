pub mod categories;
pub mod models;
pub mod news;
pub mod users;
pub mod videos;

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

/// Build the process-wide connection pool. Owned by `main` and cloned into
/// application state; repository functions borrow it per call.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;
    info!("database pool ready ({} max connections)", config.max_connections);
    Ok(pool)
}

/// Pings the store; used by the health endpoint.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
