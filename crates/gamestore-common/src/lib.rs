//! # gamestore-common
//!
//! Shared utilities including configuration, error handling, credential hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{check_password, hash_password, validate_password_strength, verify_password};
pub use config::{
    AppConfig, AppSettings, CatalogConfig, ConfigError, DatabaseConfig, Environment, IdConfig,
    TracingSettings,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
