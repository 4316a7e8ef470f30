//! Command line definition and handlers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gamestore_common::AppConfig;
use gamestore_core::{DeveloperId, Session};
use gamestore_service::dto::{LoginRequest, RegisterAdminRequest};
use gamestore_service::{AuthService, DeveloperService, PaymentService, ServiceContext};
use tracing::info;

use crate::app::{connect, create_service_context};

#[derive(Debug, Parser)]
#[command(name = "gamestore", about = "Game storefront operator commands", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create an administrator account
    CreateAdmin(CredentialArgs),
    /// Create payment methods that do not exist yet
    SeedPaymentMethods {
        /// Method names
        #[arg(default_values_t = ["Credit Card".to_string(), "Bank Transfer".to_string(), "E-Wallet".to_string()])]
        names: Vec<String>,
    },
    /// Print every settled payment
    Transactions(CredentialArgs),
    /// Print a developer's sales per game
    SalesReport {
        #[command(flatten)]
        admin: CredentialArgs,
        /// Developer id
        #[arg(long)]
        developer: i64,
    },
}

/// Administrator credentials
#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    #[arg(long, env = "GAMESTORE_ADMIN_EMAIL")]
    pub email: String,

    #[arg(long, env = "GAMESTORE_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Execute one command against the configured database
pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let pool = connect(&config).await?;
    if matches!(cli.command, Commands::Migrate) {
        println!("Migrations are up to date");
        return Ok(());
    }

    let ctx = create_service_context(&config, pool)?;
    match cli.command {
        Commands::Migrate => {}
        Commands::CreateAdmin(args) => create_admin(&ctx, args).await?,
        Commands::SeedPaymentMethods { names } => seed_payment_methods(&ctx, &names).await?,
        Commands::Transactions(args) => transactions(&ctx, args).await?,
        Commands::SalesReport { admin, developer } => {
            sales_report(&ctx, admin, DeveloperId::new(developer)).await?;
        }
    }

    Ok(())
}

async fn create_admin(ctx: &ServiceContext, args: CredentialArgs) -> Result<()> {
    let account = AuthService::new(ctx)
        .register_admin(RegisterAdminRequest {
            email: args.email,
            password: args.password,
        })
        .await
        .context("failed to create administrator")?;

    info!(account_id = %account.id, "Administrator created");
    println!("Administrator {} created (id {})", account.email, account.id);
    Ok(())
}

async fn seed_payment_methods(ctx: &ServiceContext, names: &[String]) -> Result<()> {
    let created = PaymentService::new(ctx)
        .seed_payment_methods(names)
        .await
        .context("failed to seed payment methods")?;

    if created.is_empty() {
        println!("All payment methods already exist");
    }
    for method in created {
        println!("Created payment method {} (id {})", method.name, method.id);
    }
    Ok(())
}

async fn transactions(ctx: &ServiceContext, args: CredentialArgs) -> Result<()> {
    let session = login_admin(ctx, args).await?;
    let rows = PaymentService::new(ctx)
        .transactions_report(&session)
        .await
        .context("failed to load transactions")?;

    println!(
        "{:<20} {:<20} {:<17} {:>10}  {:<14} {:<17}",
        "ORDER", "CUSTOMER", "ORDER DATE", "AMOUNT", "METHOD", "PAID AT"
    );
    for row in rows {
        let paid_at = row
            .paid_at
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        println!(
            "{:<20} {:<20} {:<17} {:>10}  {:<14} {:<17}",
            row.order_id,
            row.customer_id,
            row.order_date.format("%Y-%m-%d %H:%M"),
            row.amount,
            row.method_name,
            paid_at
        );
    }
    Ok(())
}

async fn sales_report(ctx: &ServiceContext, args: CredentialArgs, developer: DeveloperId) -> Result<()> {
    let session = login_admin(ctx, args).await?;
    let rows = DeveloperService::new(ctx)
        .developer_sales_report(&session, developer)
        .await
        .context("failed to load sales report")?;

    println!("{:<20} {:<40} {:>8} {:>12}", "GAME", "TITLE", "UNITS", "REVENUE");
    for row in rows {
        println!(
            "{:<20} {:<40} {:>8} {:>12}",
            row.game_id, row.title, row.units_sold, row.revenue
        );
    }
    Ok(())
}

async fn login_admin(ctx: &ServiceContext, args: CredentialArgs) -> Result<Session> {
    let session = AuthService::new(ctx)
        .login(LoginRequest {
            email: args.email,
            password: args.password,
        })
        .await
        .context("administrator login failed")?;
    session.require_admin()?;
    Ok(session)
}
