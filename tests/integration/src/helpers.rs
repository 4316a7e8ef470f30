//! Test helpers for integration tests
//!
//! `TestApp` wires a `ServiceContext` either over the in-memory store or over
//! PostgreSQL, and offers shortcuts for the accounts and catalog entries most
//! scenarios start from.

use std::sync::Arc;

use anyhow::{Context, Result};
use gamestore_cli::app::{connect, create_service_context};
use gamestore_common::{AppConfig, CatalogConfig};
use gamestore_core::entities::{Game, PaymentMethod};
use gamestore_core::{IdGenerator, Session};
use gamestore_service::{
    AuthService, CatalogService, PaymentService, ServiceContext, ServiceContextBuilder,
};

use crate::fixtures::{admin_request, game_request, login_request, register_request};
use crate::memory::MemoryStore;

/// Service context under test, plus the backing store when it is in memory
pub struct TestApp {
    pub ctx: ServiceContext,
    store: Option<Arc<MemoryStore>>,
}

impl TestApp {
    /// Services over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::in_memory_with_page_size(CatalogConfig::default().page_size)
    }

    pub fn in_memory_with_page_size(page_size: u32) -> Self {
        let store = Arc::new(MemoryStore::new());
        let ctx = ServiceContextBuilder::new()
            .account_repo(store.clone())
            .developer_repo(store.clone())
            .game_repo(store.clone())
            .genre_repo(store.clone())
            .order_repo(store.clone())
            .payment_repo(store.clone())
            .id_generator(Arc::new(IdGenerator::new(1).expect("valid worker id")))
            .catalog(CatalogConfig { page_size })
            .build()
            .expect("all repositories are set");

        Self {
            ctx,
            store: Some(store),
        }
    }

    /// Services over PostgreSQL, when `DATABASE_URL` is set
    pub async fn postgres() -> Result<Option<Self>> {
        if !check_test_env() {
            return Ok(None);
        }

        let url = std::env::var("DATABASE_URL").context("DATABASE_URL")?;
        let config = AppConfig::from_defaults(&url)?;
        let pool = connect(&config).await?;
        let ctx = create_service_context(&config, pool)?;
        Ok(Some(Self { ctx, store: None }))
    }

    /// The in-memory store; panics for PostgreSQL-backed apps
    pub fn store(&self) -> &MemoryStore {
        self.store
            .as_deref()
            .expect("store inspection needs an in-memory app")
    }

    pub async fn admin(&self) -> Result<Session> {
        let request = admin_request();
        let email = request.email.clone();
        AuthService::new(&self.ctx).register_admin(request).await?;
        Ok(AuthService::new(&self.ctx).login(login_request(&email)).await?)
    }

    pub async fn customer(&self, name: &str) -> Result<Session> {
        Ok(AuthService::new(&self.ctx)
            .register_customer(register_request(name))
            .await?)
    }

    /// Register a developer through `admin` and log in as them
    pub async fn developer(&self, admin: &Session, name: &str) -> Result<Session> {
        let request = register_request(name);
        let email = request.email.clone();
        AuthService::new(&self.ctx)
            .register_developer(admin, request)
            .await?;
        Ok(AuthService::new(&self.ctx).login(login_request(&email)).await?)
    }

    /// A game owned by the developer behind `developer`
    pub async fn game(&self, developer: &Session, title: &str, price: &str) -> Result<Game> {
        Ok(CatalogService::new(&self.ctx)
            .add_game(developer, game_request(title, price))
            .await?)
    }

    /// The "Credit Card" method, seeded on first use
    pub async fn credit_card(&self) -> Result<PaymentMethod> {
        let payments = PaymentService::new(&self.ctx);
        payments
            .seed_payment_methods(&["Credit Card".to_string()])
            .await?;
        payments
            .list_methods()
            .await?
            .into_iter()
            .find(|m| m.name == "Credit Card")
            .context("credit card method missing after seeding")
    }
}

/// Helper to check if the PostgreSQL test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}
