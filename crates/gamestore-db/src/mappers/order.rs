//! Order ledger entity <-> model mapper

use gamestore_core::entities::{CartLine, Order, OrderHistoryEntry, OrderItem};
use gamestore_core::error::DomainError;
use gamestore_core::value_objects::{CustomerId, GameId, Money, OrderId, OrderItemId};

use crate::models::{CartLineModel, OrderHistoryModel, OrderItemModel, OrderModel};

use super::payment::status_from_str;

/// Convert OrderModel to Order entity
impl From<OrderModel> for Order {
    fn from(model: OrderModel) -> Self {
        Order {
            id: OrderId::new(model.id),
            customer_id: CustomerId::new(model.customer_id),
            total_price: Money::from_stored(model.total_price),
            order_date: model.order_date,
            deleted_at: model.deleted_at,
        }
    }
}

/// Convert OrderItemModel to OrderItem entity
impl TryFrom<OrderItemModel> for OrderItem {
    type Error = DomainError;

    fn try_from(model: OrderItemModel) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(model.quantity).map_err(|_| {
            DomainError::DatabaseError(format!("stored quantity {} is negative", model.quantity))
        })?;
        Ok(OrderItem {
            id: OrderItemId::new(model.id),
            order_id: OrderId::new(model.order_id),
            game_id: GameId::new(model.game_id),
            quantity,
            price_at_purchase: Money::from_stored(model.price_at_purchase),
            deleted_at: model.deleted_at,
        })
    }
}

impl TryFrom<CartLineModel> for CartLine {
    type Error = DomainError;

    fn try_from(model: CartLineModel) -> Result<Self, Self::Error> {
        Ok(CartLine {
            item: OrderItem::try_from(model.item)?,
            title: model.title,
        })
    }
}

impl TryFrom<OrderHistoryModel> for OrderHistoryEntry {
    type Error = DomainError;

    fn try_from(model: OrderHistoryModel) -> Result<Self, Self::Error> {
        Ok(OrderHistoryEntry {
            order_id: OrderId::new(model.order_id),
            order_date: model.order_date,
            total_price: Money::from_stored(model.total_price),
            payment_status: model.payment_status.as_deref().map(status_from_str).transpose()?,
            paid_at: model.paid_at,
        })
    }
}

/// Quantity as stored in the INTEGER column
pub fn quantity_to_db(quantity: u32) -> Result<i32, DomainError> {
    i32::try_from(quantity).map_err(|_| DomainError::InvalidQuantity(i64::from(quantity)))
}
