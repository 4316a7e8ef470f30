//! Account and profile database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for accounts table (hash excluded)
#[derive(Debug, Clone, FromRow)]
pub struct AccountModel {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for customers table
#[derive(Debug, Clone, FromRow)]
pub struct CustomerModel {
    pub id: i64,
    pub account_id: i64,
    pub display_name: String,
}

/// Database model for developers table
#[derive(Debug, Clone, FromRow)]
pub struct DeveloperModel {
    pub id: i64,
    pub account_id: i64,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Account left-joined with its developer profile
#[derive(Debug, Clone, FromRow)]
pub struct AccountDetailModel {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub developer_id: Option<i64>,
    pub developer_name: Option<String>,
    pub developer_created_at: Option<DateTime<Utc>>,
    pub developer_deleted_at: Option<DateTime<Utc>>,
}
