//! Payment entity <-> model mapper

use gamestore_core::entities::{Payment, PaymentLog, PaymentMethod, SettledTransaction};
use gamestore_core::error::DomainError;
use gamestore_core::value_objects::{
    CustomerId, Money, OrderId, PaymentId, PaymentLogId, PaymentMethodId, PaymentStatus,
};

use crate::models::{PaymentLogModel, PaymentMethodModel, PaymentModel, SettledTransactionModel};

/// Parse the stored status column
pub fn status_from_str(s: &str) -> Result<PaymentStatus, DomainError> {
    PaymentStatus::parse(s)
        .ok_or_else(|| DomainError::DatabaseError(format!("unknown payment status '{s}'")))
}

/// Convert PaymentModel to Payment entity
impl TryFrom<PaymentModel> for Payment {
    type Error = DomainError;

    fn try_from(model: PaymentModel) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::new(model.id),
            order_id: OrderId::new(model.order_id),
            payment_method_id: PaymentMethodId::new(model.payment_method_id),
            amount: Money::from_stored(model.amount),
            status: status_from_str(&model.status)?,
            created_at: model.created_at,
            paid_at: model.paid_at,
        })
    }
}

impl From<PaymentMethodModel> for PaymentMethod {
    fn from(model: PaymentMethodModel) -> Self {
        PaymentMethod {
            id: PaymentMethodId::new(model.id),
            name: model.name,
        }
    }
}

impl TryFrom<PaymentLogModel> for PaymentLog {
    type Error = DomainError;

    fn try_from(model: PaymentLogModel) -> Result<Self, Self::Error> {
        Ok(PaymentLog {
            id: PaymentLogId::new(model.id),
            payment_id: PaymentId::new(model.payment_id),
            old_status: status_from_str(&model.old_status)?,
            new_status: status_from_str(&model.new_status)?,
            changed_at: model.changed_at,
        })
    }
}

impl From<SettledTransactionModel> for SettledTransaction {
    fn from(model: SettledTransactionModel) -> Self {
        SettledTransaction {
            order_id: OrderId::new(model.order_id),
            customer_id: CustomerId::new(model.customer_id),
            order_date: model.order_date,
            total_price: Money::from_stored(model.total_price),
            payment_id: PaymentId::new(model.payment_id),
            method_name: model.method_name,
            amount: Money::from_stored(model.amount),
            paid_at: model.paid_at,
        }
    }
}
