//! Domain entities - core business objects

mod account;
mod game;
mod order;
mod payment;

pub use account::{Account, AccountDetail, Customer, Developer, Profile};
pub use game::{Game, GameDetails, GameSales, Genre};
pub use order::{Cart, CartLine, CheckoutReceipt, Order, OrderHistoryEntry, OrderItem};
pub use payment::{Payment, PaymentLog, PaymentMethod, SettledTransaction};
