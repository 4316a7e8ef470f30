//! Application configuration structs
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config/gamestore.{toml,yaml,json}` file, then `GAMESTORE__*` environment
//! variables. `DATABASE_URL` overrides `database.url`.

use std::env;

use config::{Config, Environment as EnvSource, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub tracing: TracingSettings,
    pub ids: IdConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

/// Catalog listing configuration
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct TracingSettings {
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Id generator configuration
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "gamestore".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_page_size() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

const CONFIG_FILE: &str = "config/gamestore";
const ENV_PREFIX: &str = "GAMESTORE";

impl AppConfig {
    /// Load configuration from defaults, the optional config file and the environment
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed, a value has the wrong
    /// type, or no database URL is configured
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut builder = Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(EnvSource::with_prefix(ENV_PREFIX).separator("__"));

        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults only, without touching files or the environment
    ///
    /// # Errors
    /// Returns an error if the defaults fail validation
    pub fn from_defaults(database_url: &str) -> Result<Self, ConfigError> {
        let config: Self = Self::builder()?
            .set_override("database.url", database_url)?
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("app.name", default_app_name())?
            .set_default("app.env", "development")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", default_max_connections())?
            .set_default("database.min_connections", default_min_connections())?
            .set_default("database.acquire_timeout_secs", default_acquire_timeout())?
            .set_default("catalog.page_size", default_page_size())?
            .set_default("tracing.json", false)?
            .set_default("tracing.level", default_log_level())?
            .set_default("ids.worker_id", 0)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingVar("DATABASE_URL"));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::InvalidValue(
                "database.min_connections",
                format!(
                    "{} exceeds max_connections {}",
                    self.database.min_connections, self.database.max_connections
                ),
            ));
        }
        if self.catalog.page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "catalog.page_size",
                "must be at least 1".to_string(),
            ));
        }
        if self.ids.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "ids.worker_id",
                format!("{} is not below 1024", self.ids.worker_id),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
