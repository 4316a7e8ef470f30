//! Catalog database models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for games table
#[derive(Debug, Clone, FromRow)]
pub struct GameModel {
    pub id: i64,
    pub developer_id: i64,
    pub title: String,
    pub price: Decimal,
    pub release_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl GameModel {
    /// Check if game is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Game joined with its developer's display name
#[derive(Debug, Clone, FromRow)]
pub struct GameWithDeveloperModel {
    #[sqlx(flatten)]
    pub game: GameModel,
    pub developer_name: String,
}

/// Database model for genres table
#[derive(Debug, Clone, FromRow)]
pub struct GenreModel {
    pub id: i64,
    pub name: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Aggregated sales per game
#[derive(Debug, Clone, FromRow)]
pub struct GameSalesModel {
    pub game_id: i64,
    pub title: String,
    pub units_sold: i64,
    pub revenue: Decimal,
}
