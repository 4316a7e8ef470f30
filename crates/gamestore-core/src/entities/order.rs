//! Order ledger entities
//!
//! An order with a zero total is the customer's active cart. Checkout writes
//! the positive total and the order becomes a finalized purchase.

use chrono::{DateTime, Utc};

use crate::value_objects::{CustomerId, GameId, Money, OrderId, OrderItemId, PaymentStatus};

/// Cart or finalized purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub total_price: Money,
    pub order_date: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Create an empty cart for a customer
    pub fn new_cart(id: OrderId, customer_id: CustomerId) -> Self {
        Self {
            id,
            customer_id,
            total_price: Money::ZERO,
            order_date: Utc::now(),
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Zero total and not deleted
    #[inline]
    pub fn is_active_cart(&self) -> bool {
        self.total_price.is_zero() && !self.is_deleted()
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        !self.total_price.is_zero()
    }
}

/// Line item of an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub game_id: GameId,
    pub quantity: u32,
    /// Game price captured when the line was added
    pub price_at_purchase: Money,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl OrderItem {
    pub fn new(
        id: OrderItemId,
        order_id: OrderId,
        game_id: GameId,
        quantity: u32,
        price_at_purchase: Money,
    ) -> Self {
        Self {
            id,
            order_id,
            game_id,
            quantity,
            price_at_purchase,
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        self.price_at_purchase.times(self.quantity)
    }
}

/// Non-deleted line joined with the game title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: OrderItem,
    pub title: String,
}

/// Lines of an order with their recomputed total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub order_id: OrderId,
    pub lines: Vec<CartLine>,
    pub total: Money,
}

impl Cart {
    /// Build a cart, summing `quantity * price_at_purchase` over the lines
    pub fn from_lines(order_id: OrderId, lines: Vec<CartLine>) -> Self {
        let total = lines.iter().map(|l| l.item.line_total()).sum();
        Self {
            order_id,
            lines,
            total,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result of a successful checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub total: Money,
}

/// Finalized order with its most recent payment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHistoryEntry {
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    pub total_price: Money,
    /// `None` when no payment was attempted
    pub payment_status: Option<PaymentStatus>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl OrderHistoryEntry {
    /// Status label, "Unpaid" when there is no attempt
    pub fn status_label(&self) -> &'static str {
        self.payment_status.map_or("Unpaid", |s| s.as_str())
    }
}
