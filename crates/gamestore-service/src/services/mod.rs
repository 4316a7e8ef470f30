//! Storefront services
//!
//! Each service borrows the shared `ServiceContext` and implements one area
//! of the storefront: authentication, account moderation, catalog, genres,
//! developer reports, the cart/order ledger and payments.

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod context;
pub mod developer;
pub mod error;
pub mod genre;
pub mod payment;

// Re-export all services for convenience
pub use account::AccountService;
pub use auth::AuthService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use developer::DeveloperService;
pub use error::{ServiceError, ServiceResult};
pub use genre::GenreService;
pub use payment::PaymentService;
