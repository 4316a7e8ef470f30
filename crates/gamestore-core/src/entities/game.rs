//! Catalog entities - games and genres

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{DeveloperId, GameId, GenreId, Money};

/// Catalog entry owned by exactly one developer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub developer_id: DeveloperId,
    pub title: String,
    pub price: Money,
    pub release_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Create a new game
    pub fn new(
        id: GameId,
        developer_id: DeveloperId,
        title: String,
        price: Money,
        release_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            developer_id,
            title,
            price,
            release_date,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    #[inline]
    pub fn is_owned_by(&self, developer_id: DeveloperId) -> bool {
        self.developer_id == developer_id
    }
}

/// Game with its developer name and genre names, for the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDetails {
    pub game: Game,
    pub developer_name: String,
    pub genres: Vec<String>,
}

/// Genre tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Genre {
    pub fn new(id: GenreId, name: String) -> Self {
        Self {
            id,
            name,
            deleted_at: None,
        }
    }
}

/// Per-game sales figures for a developer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSales {
    pub game_id: GameId,
    pub title: String,
    pub units_sold: i64,
    pub revenue: Money,
}
