//! Repository ports

mod repositories;

pub use repositories::{
    AccountRepository, DeveloperRepository, GameRepository, GenreRepository, OrderRepository,
    PaymentRepository, RepoResult,
};
