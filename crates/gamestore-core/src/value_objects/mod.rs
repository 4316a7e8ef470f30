//! Value objects - immutable types that represent domain concepts

mod id;
mod money;
mod page;
mod payment_status;
mod role;

pub use id::{
    AccountId, CustomerId, DeveloperId, GameId, GenreId, IdGenerator, IdParseError,
    InvalidWorkerId, OrderId, OrderItemId, PaymentId, PaymentLogId, PaymentMethodId,
};
pub use money::{Money, MoneyError};
pub use page::{Page, PageWindow};
pub use payment_status::PaymentStatus;
pub use role::Role;
