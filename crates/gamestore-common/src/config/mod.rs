//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CatalogConfig, ConfigError, DatabaseConfig, Environment, IdConfig,
    TracingSettings,
};
