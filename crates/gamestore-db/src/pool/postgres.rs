//! PostgreSQL connection pool management

use std::time::Duration;

use gamestore_common::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};

/// Embedded schema migrations from the workspace `migrations/` directory
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Create a new PostgreSQL connection pool
///
/// # Errors
/// Returns an error if no connection can be established within the
/// configured acquire timeout
#[instrument(skip(config), fields(max = config.max_connections))]
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.url)
        .await?;

    info!("Database pool ready");
    Ok(pool)
}

/// Apply pending migrations
///
/// # Errors
/// Returns an error if a migration fails or the applied history diverges
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!(count = MIGRATOR.iter().count(), "Migrations applied");
    Ok(())
}
