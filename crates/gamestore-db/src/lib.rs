//! # gamestore-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `gamestore-core`. It handles:
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional guards for
//!   carts, checkout and payment settlement
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gamestore_common::AppConfig;
//! use gamestore_core::traits::OrderRepository;
//! use gamestore_db::{create_pool, run_migrations, PgOrderRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!     let orders = PgOrderRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, MIGRATOR};
pub use repositories::{
    PgAccountRepository, PgDeveloperRepository, PgGameRepository, PgGenreRepository,
    PgOrderRepository, PgPaymentRepository,
};
