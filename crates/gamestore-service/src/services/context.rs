//! Service context - dependency container for services
//!
//! Holds the repositories, the id generator and catalog settings needed by services.

use std::sync::Arc;

use gamestore_common::CatalogConfig;
use gamestore_core::traits::{
    AccountRepository, DeveloperRepository, GameRepository, GenreRepository, OrderRepository,
    PaymentRepository,
};
use gamestore_core::IdGenerator;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the container passed to every service. Repositories are trait
/// objects so the same services run over PostgreSQL or in-memory stores.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    account_repo: Arc<dyn AccountRepository>,
    developer_repo: Arc<dyn DeveloperRepository>,
    game_repo: Arc<dyn GameRepository>,
    genre_repo: Arc<dyn GenreRepository>,
    order_repo: Arc<dyn OrderRepository>,
    payment_repo: Arc<dyn PaymentRepository>,

    id_generator: Arc<IdGenerator>,
    catalog: CatalogConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        developer_repo: Arc<dyn DeveloperRepository>,
        game_repo: Arc<dyn GameRepository>,
        genre_repo: Arc<dyn GenreRepository>,
        order_repo: Arc<dyn OrderRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        id_generator: Arc<IdGenerator>,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            account_repo,
            developer_repo,
            game_repo,
            genre_repo,
            order_repo,
            payment_repo,
            id_generator,
            catalog,
        }
    }

    // === Repositories ===

    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    pub fn developer_repo(&self) -> &dyn DeveloperRepository {
        self.developer_repo.as_ref()
    }

    pub fn game_repo(&self) -> &dyn GameRepository {
        self.game_repo.as_ref()
    }

    pub fn genre_repo(&self) -> &dyn GenreRepository {
        self.genre_repo.as_ref()
    }

    pub fn order_repo(&self) -> &dyn OrderRepository {
        self.order_repo.as_ref()
    }

    pub fn payment_repo(&self) -> &dyn PaymentRepository {
        self.payment_repo.as_ref()
    }

    // === Settings ===

    /// Catalog listing settings
    pub fn catalog(&self) -> CatalogConfig {
        self.catalog
    }

    /// Generate a new typed id
    pub fn generate_id<T: From<i64>>(&self) -> T {
        self.id_generator.next()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("id_generator", &self.id_generator)
            .field("catalog", &self.catalog)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    account_repo: Option<Arc<dyn AccountRepository>>,
    developer_repo: Option<Arc<dyn DeveloperRepository>>,
    game_repo: Option<Arc<dyn GameRepository>>,
    genre_repo: Option<Arc<dyn GenreRepository>>,
    order_repo: Option<Arc<dyn OrderRepository>>,
    payment_repo: Option<Arc<dyn PaymentRepository>>,
    id_generator: Option<Arc<IdGenerator>>,
    catalog: Option<CatalogConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn developer_repo(mut self, repo: Arc<dyn DeveloperRepository>) -> Self {
        self.developer_repo = Some(repo);
        self
    }

    pub fn game_repo(mut self, repo: Arc<dyn GameRepository>) -> Self {
        self.game_repo = Some(repo);
        self
    }

    pub fn genre_repo(mut self, repo: Arc<dyn GenreRepository>) -> Self {
        self.genre_repo = Some(repo);
        self
    }

    pub fn order_repo(mut self, repo: Arc<dyn OrderRepository>) -> Self {
        self.order_repo = Some(repo);
        self
    }

    pub fn payment_repo(mut self, repo: Arc<dyn PaymentRepository>) -> Self {
        self.payment_repo = Some(repo);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Catalog settings; defaults apply when not set
    pub fn catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.account_repo
                .ok_or_else(|| ServiceError::validation("account_repo is required"))?,
            self.developer_repo
                .ok_or_else(|| ServiceError::validation("developer_repo is required"))?,
            self.game_repo
                .ok_or_else(|| ServiceError::validation("game_repo is required"))?,
            self.genre_repo
                .ok_or_else(|| ServiceError::validation("genre_repo is required"))?,
            self.order_repo
                .ok_or_else(|| ServiceError::validation("order_repo is required"))?,
            self.payment_repo
                .ok_or_else(|| ServiceError::validation("payment_repo is required"))?,
            self.id_generator
                .ok_or_else(|| ServiceError::validation("id_generator is required"))?,
            self.catalog.unwrap_or_default(),
        ))
    }
}
