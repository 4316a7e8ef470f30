//! Database models - SQLx-compatible structs for PostgreSQL tables

mod account;
mod game;
mod order;
mod payment;

pub use account::{AccountDetailModel, AccountModel, CustomerModel, DeveloperModel};
pub use game::{GameModel, GameSalesModel, GameWithDeveloperModel, GenreModel};
pub use order::{CartLineModel, OrderHistoryModel, OrderItemModel, OrderModel};
pub use payment::{PaymentLogModel, PaymentMethodModel, PaymentModel, SettledTransactionModel};
