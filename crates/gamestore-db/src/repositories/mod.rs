//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in gamestore-core.
//! Each repository handles database operations for a specific domain entity.

mod account;
mod developer;
mod error;
mod game;
mod genre;
mod order;
mod payment;

pub use account::PgAccountRepository;
pub use developer::PgDeveloperRepository;
pub use game::PgGameRepository;
pub use genre::PgGenreRepository;
pub use order::PgOrderRepository;
pub use payment::PgPaymentRepository;
