//! Payment database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for payments table
#[derive(Debug, Clone, FromRow)]
pub struct PaymentModel {
    pub id: i64,
    pub order_id: i64,
    pub payment_method_id: i64,
    pub amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Database model for payment_methods table
#[derive(Debug, Clone, FromRow)]
pub struct PaymentMethodModel {
    pub id: i64,
    pub name: String,
}

/// Database model for payment_logs table
#[derive(Debug, Clone, FromRow)]
pub struct PaymentLogModel {
    pub id: i64,
    pub payment_id: i64,
    pub old_status: String,
    pub new_status: String,
    pub changed_at: DateTime<Utc>,
}

/// Paid payment joined with its order and method name
#[derive(Debug, Clone, FromRow)]
pub struct SettledTransactionModel {
    pub order_id: i64,
    pub customer_id: i64,
    pub order_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub payment_id: i64,
    pub method_name: String,
    pub amount: Decimal,
    pub paid_at: Option<DateTime<Utc>>,
}
