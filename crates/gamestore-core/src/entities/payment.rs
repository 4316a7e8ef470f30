//! Payment entities

use chrono::{DateTime, Utc};

use crate::value_objects::{
    CustomerId, Money, OrderId, PaymentId, PaymentLogId, PaymentMethodId, PaymentStatus,
};

/// One settlement attempt for an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub payment_method_id: PaymentMethodId,
    pub amount: Money,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Create a pending payment
    pub fn new(
        id: PaymentId,
        order_id: OrderId,
        payment_method_id: PaymentMethodId,
        amount: Money,
    ) -> Self {
        Self {
            id,
            order_id,
            payment_method_id,
            amount,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    #[inline]
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub name: String,
}

/// Audit row written with every status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLog {
    pub id: PaymentLogId,
    pub payment_id: PaymentId,
    pub old_status: PaymentStatus,
    pub new_status: PaymentStatus,
    pub changed_at: DateTime<Utc>,
}

/// Paid payment joined with its order, for the transactions ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledTransaction {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    pub total_price: Money,
    pub payment_id: PaymentId,
    pub method_name: String,
    pub amount: Money,
    pub paid_at: Option<DateTime<Utc>>,
}
