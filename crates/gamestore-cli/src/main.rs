//! Storefront operator entry point
//!
//! Run with:
//! ```bash
//! cargo run -p gamestore-cli -- migrate
//! ```
//!
//! Configuration is loaded from `config/gamestore.*`, `GAMESTORE__*`
//! environment variables and `DATABASE_URL`.

use clap::Parser;
use gamestore_cli::commands::Cli;
use gamestore_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    let tracing_config = TracingConfig::from_settings(&config.tracing, config.app.env);
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(env = ?config.app.env, "Configuration loaded");

    if let Err(e) = gamestore_cli::commands::run(cli, config).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
