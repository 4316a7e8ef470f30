//! Catalog entity <-> model mapper

use gamestore_core::entities::{Game, GameDetails, GameSales, Genre};
use gamestore_core::value_objects::{DeveloperId, GameId, GenreId, Money};

use crate::models::{GameModel, GameSalesModel, GameWithDeveloperModel, GenreModel};

/// Convert GameModel to Game entity
impl From<GameModel> for Game {
    fn from(model: GameModel) -> Self {
        Game {
            id: GameId::new(model.id),
            developer_id: DeveloperId::new(model.developer_id),
            title: model.title,
            price: Money::from_stored(model.price),
            release_date: model.release_date,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        }
    }
}

/// Combine the game row with its genre names
pub fn game_details(model: GameWithDeveloperModel, genres: Vec<String>) -> GameDetails {
    GameDetails {
        game: Game::from(model.game),
        developer_name: model.developer_name,
        genres,
    }
}

/// Convert GenreModel to Genre entity
impl From<GenreModel> for Genre {
    fn from(model: GenreModel) -> Self {
        Genre {
            id: GenreId::new(model.id),
            name: model.name,
            deleted_at: model.deleted_at,
        }
    }
}

/// Convert GameSalesModel to GameSales
impl From<GameSalesModel> for GameSales {
    fn from(model: GameSalesModel) -> Self {
        GameSales {
            game_id: GameId::new(model.game_id),
            title: model.title,
            units_sold: model.units_sold,
            revenue: Money::from_stored(model.revenue),
        }
    }
}

/// Game values bound on insert and update
pub struct GameWrite<'a> {
    pub id: i64,
    pub developer_id: i64,
    pub title: &'a str,
    pub price: rust_decimal::Decimal,
    pub release_date: Option<chrono::NaiveDate>,
}

impl<'a> GameWrite<'a> {
    /// Prices are persisted rounded to cents
    pub fn new(game: &'a Game) -> Self {
        Self {
            id: game.id.into_inner(),
            developer_id: game.developer_id.into_inner(),
            title: &game.title,
            price: game.price.rounded(),
            release_date: game.release_date,
        }
    }
}
