//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Unless stated otherwise, lookups ignore
//! soft-deleted rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Account, AccountDetail, CartLine, Customer, Developer, Game, GameDetails, GameSales, Genre,
    Order, OrderHistoryEntry, OrderItem, Payment, PaymentLog, PaymentMethod, Profile,
    SettledTransaction,
};
use crate::error::DomainError;
use crate::value_objects::{
    AccountId, CustomerId, DeveloperId, GameId, GenreId, Money, OrderId, OrderItemId, PaymentId,
    PaymentLogId, PaymentMethodId, PaymentStatus, Role,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID, banned accounts included
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>>;

    /// Find account by email, banned accounts included
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Insert the account and its profile in one transaction
    async fn create(
        &self,
        account: &Account,
        password_hash: &str,
        profile: Option<&Profile>,
    ) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>>;

    /// Customer profile owned by an account
    async fn find_customer(&self, account_id: AccountId) -> RepoResult<Option<Customer>>;

    /// Developer profile owned by an account
    async fn find_developer(&self, account_id: AccountId) -> RepoResult<Option<Developer>>;

    /// All accounts of a role, banned accounts included, oldest first
    async fn list_by_role(&self, role: Role) -> RepoResult<Vec<Account>>;

    /// All accounts with their developer profile when present
    async fn list_details(&self) -> RepoResult<Vec<AccountDetail>>;

    /// Set or clear the ban timestamp of a `user` account
    ///
    /// Fails with `AccountNotFound` when no `user` account has this id.
    async fn set_banned(&self, id: AccountId, banned_at: Option<DateTime<Utc>>) -> RepoResult<()>;
}

// ============================================================================
// Developer Repository
// ============================================================================

#[async_trait]
pub trait DeveloperRepository: Send + Sync {
    /// Find a non-deleted developer profile
    async fn find_by_id(&self, id: DeveloperId) -> RepoResult<Option<Developer>>;

    /// Units and revenue per game over finalized orders, highest revenue first
    async fn sales_report(&self, id: DeveloperId) -> RepoResult<Vec<GameSales>>;
}

// ============================================================================
// Game Repository
// ============================================================================

#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Find game by ID
    async fn find_by_id(&self, id: GameId) -> RepoResult<Option<Game>>;

    /// Game with developer name and genre names
    async fn find_details(&self, id: GameId) -> RepoResult<Option<GameDetails>>;

    /// Count games, optionally restricted to one developer
    async fn count(&self, developer_id: Option<DeveloperId>) -> RepoResult<i64>;

    /// List games ordered by id, optionally restricted to one developer
    async fn list(
        &self,
        developer_id: Option<DeveloperId>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Game>>;

    /// Create a new game
    async fn create(&self, game: &Game) -> RepoResult<()>;

    /// Update title, price and release date
    async fn update(&self, game: &Game) -> RepoResult<()>;

    /// Soft delete a game
    async fn delete(&self, id: GameId) -> RepoResult<()>;

    /// Replace the genre set of a game in one transaction
    ///
    /// Fails with `GenreNotFound` and leaves the previous set intact when any
    /// genre is missing or deleted.
    async fn replace_genres(&self, game_id: GameId, genre_ids: &[GenreId]) -> RepoResult<()>;
}

// ============================================================================
// Genre Repository
// ============================================================================

#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Find genre by ID
    async fn find_by_id(&self, id: GenreId) -> RepoResult<Option<Genre>>;

    /// Count genres
    async fn count(&self) -> RepoResult<i64>;

    /// List genres ordered by id
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<Genre>>;

    /// Create a new genre
    async fn create(&self, genre: &Genre) -> RepoResult<()>;

    /// Soft delete a genre
    async fn delete(&self, id: GenreId) -> RepoResult<()>;
}

// ============================================================================
// Order Repository
// ============================================================================

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// The customer's zero-total, non-deleted order
    async fn find_active_cart(&self, customer_id: CustomerId) -> RepoResult<Option<Order>>;

    /// Insert an empty cart
    ///
    /// Fails with `Conflict` when the customer already has an active cart.
    async fn create_cart(&self, order: &Order) -> RepoResult<()>;

    /// Find order by ID
    async fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>>;

    /// Find a line item by ID, soft-deleted lines included
    async fn find_item(&self, id: OrderItemId) -> RepoResult<Option<OrderItem>>;

    /// Append a line item
    async fn add_item(&self, item: &OrderItem) -> RepoResult<()>;

    /// Non-deleted lines joined with game titles, in insertion order
    async fn list_lines(&self, order_id: OrderId) -> RepoResult<Vec<CartLine>>;

    /// Change the quantity of a non-deleted line
    async fn update_item_quantity(&self, id: OrderItemId, quantity: u32) -> RepoResult<()>;

    /// Soft delete one line; a no-op when already deleted
    async fn remove_item(&self, id: OrderItemId) -> RepoResult<()>;

    /// Soft delete every line of an order
    async fn clear_items(&self, order_id: OrderId) -> RepoResult<u64>;

    /// Write the total of an active cart, turning it into a finalized order
    ///
    /// Fails with `Conflict` when the order is no longer an active cart.
    async fn finalize(&self, order_id: OrderId, total: Money) -> RepoResult<()>;

    /// Finalized orders of a customer with their latest payment, oldest first
    async fn history(&self, customer_id: CustomerId) -> RepoResult<Vec<OrderHistoryEntry>>;
}

// ============================================================================
// Payment Repository
// ============================================================================

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// All payment methods ordered by id
    async fn list_methods(&self) -> RepoResult<Vec<PaymentMethod>>;

    /// Find payment method by ID
    async fn find_method(&self, id: PaymentMethodId) -> RepoResult<Option<PaymentMethod>>;

    /// Create a payment method
    async fn create_method(&self, method: &PaymentMethod) -> RepoResult<()>;

    /// Insert a pending payment
    async fn create(&self, payment: &Payment) -> RepoResult<()>;

    /// Find payment by ID
    async fn find_by_id(&self, id: PaymentId) -> RepoResult<Option<Payment>>;

    /// Move a payment to `next` and append the audit row in one transaction
    ///
    /// The current status is read under a row lock and validated with
    /// [`PaymentStatus::check_transition`]. `paid_at` is stamped with `at`
    /// when `next` is `Paid`. Returns the updated payment.
    async fn transition(
        &self,
        id: PaymentId,
        next: PaymentStatus,
        log_id: PaymentLogId,
        at: DateTime<Utc>,
    ) -> RepoResult<Payment>;

    /// Payment attempts of an order, newest first
    async fn list_for_order(&self, order_id: OrderId) -> RepoResult<Vec<Payment>>;

    /// Audit trail of a payment, oldest first
    async fn list_logs(&self, payment_id: PaymentId) -> RepoResult<Vec<PaymentLog>>;

    /// Every paid payment with its order, by order date ascending
    async fn settled_transactions(&self) -> RepoResult<Vec<SettledTransaction>>;
}
