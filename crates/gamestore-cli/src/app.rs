//! Application wiring
//!
//! Connects to PostgreSQL and assembles the service context from the
//! PostgreSQL repositories.

use std::sync::Arc;

use anyhow::Context;
use gamestore_common::AppConfig;
use gamestore_core::IdGenerator;
use gamestore_db::{
    create_pool, run_migrations, PgAccountRepository, PgDeveloperRepository, PgGameRepository,
    PgGenreRepository, PgOrderRepository, PgPaymentRepository, PgPool,
};
use gamestore_service::{ServiceContext, ServiceContextBuilder};
use tracing::info;

/// Open the pool and bring the schema up to date
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;

    run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;

    Ok(pool)
}

/// Initialize all dependencies and create the service context
pub fn create_service_context(config: &AppConfig, pool: PgPool) -> anyhow::Result<ServiceContext> {
    let id_generator = Arc::new(
        IdGenerator::new(config.ids.worker_id).context("invalid id worker configuration")?,
    );

    let context = ServiceContextBuilder::new()
        .account_repo(Arc::new(PgAccountRepository::new(pool.clone())))
        .developer_repo(Arc::new(PgDeveloperRepository::new(pool.clone())))
        .game_repo(Arc::new(PgGameRepository::new(pool.clone())))
        .genre_repo(Arc::new(PgGenreRepository::new(pool.clone())))
        .order_repo(Arc::new(PgOrderRepository::new(pool.clone())))
        .payment_repo(Arc::new(PgPaymentRepository::new(pool)))
        .id_generator(id_generator)
        .catalog(config.catalog)
        .build()?;

    Ok(context)
}
