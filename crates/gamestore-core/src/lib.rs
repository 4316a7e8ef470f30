//! # gamestore-core
//!
//! Domain layer containing entities, value objects, the authorization gate,
//! session identity and repository traits.
//! This crate has zero dependencies on infrastructure (database, terminal, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod session;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Account, AccountDetail, Cart, CartLine, CheckoutReceipt, Customer, Developer, Game,
    GameDetails, GameSales, Genre, Order, OrderHistoryEntry, OrderItem, Payment, PaymentLog,
    PaymentMethod, Profile, SettledTransaction,
};
pub use error::{DomainError, ErrorKind};
pub use session::Session;
pub use traits::{
    AccountRepository, DeveloperRepository, GameRepository, GenreRepository, OrderRepository,
    PaymentRepository, RepoResult,
};
pub use value_objects::{
    AccountId, CustomerId, DeveloperId, GameId, GenreId, IdGenerator, IdParseError, Money,
    MoneyError, OrderId, OrderItemId, Page, PageWindow, PaymentId, PaymentLogId, PaymentMethodId,
    PaymentStatus, Role,
};
