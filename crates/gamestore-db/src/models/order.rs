//! Order ledger database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for orders table
#[derive(Debug, Clone, FromRow)]
pub struct OrderModel {
    pub id: i64,
    pub customer_id: i64,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for order_items table
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemModel {
    pub id: i64,
    pub order_id: i64,
    pub game_id: i64,
    pub quantity: i32,
    pub price_at_purchase: Decimal,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Order item joined with the game title
#[derive(Debug, Clone, FromRow)]
pub struct CartLineModel {
    #[sqlx(flatten)]
    pub item: OrderItemModel,
    pub title: String,
}

/// Finalized order with its latest payment attempt
#[derive(Debug, Clone, FromRow)]
pub struct OrderHistoryModel {
    pub order_id: i64,
    pub order_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub payment_status: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}
