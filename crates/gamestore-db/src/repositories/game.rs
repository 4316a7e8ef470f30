//! PostgreSQL implementation of GameRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gamestore_core::entities::{Game, GameDetails};
use gamestore_core::error::DomainError;
use gamestore_core::traits::{GameRepository, RepoResult};
use gamestore_core::value_objects::{DeveloperId, GameId, GenreId};

use crate::mappers::{game_details, GameWrite};
use crate::models::{GameModel, GameWithDeveloperModel};

use super::error::map_db_error;

/// PostgreSQL implementation of GameRepository
#[derive(Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    /// Create a new PgGameRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: GameId) -> RepoResult<Option<Game>> {
        let result = sqlx::query_as::<_, GameModel>(
            r"
            SELECT id, developer_id, title, price, release_date, created_at, deleted_at
            FROM games
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Game::from))
    }

    #[instrument(skip(self))]
    async fn find_details(&self, id: GameId) -> RepoResult<Option<GameDetails>> {
        let Some(row) = sqlx::query_as::<_, GameWithDeveloperModel>(
            r"
            SELECT g.id, g.developer_id, g.title, g.price, g.release_date, g.created_at,
                   g.deleted_at, d.display_name AS developer_name
            FROM games g
            JOIN developers d ON d.id = g.developer_id
            WHERE g.id = $1 AND g.deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        else {
            return Ok(None);
        };

        let genres = sqlx::query_scalar::<_, String>(
            r"
            SELECT ge.name
            FROM game_genres gg
            JOIN genres ge ON ge.id = gg.genre_id
            WHERE gg.game_id = $1 AND ge.deleted_at IS NULL
            ORDER BY ge.name
            ",
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Some(game_details(row, genres)))
    }

    #[instrument(skip(self))]
    async fn count(&self, developer_id: Option<DeveloperId>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM games
            WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR developer_id = $1)
            ",
        )
        .bind(developer_id.map(DeveloperId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        developer_id: Option<DeveloperId>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Game>> {
        let rows = sqlx::query_as::<_, GameModel>(
            r"
            SELECT id, developer_id, title, price, release_date, created_at, deleted_at
            FROM games
            WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR developer_id = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(developer_id.map(DeveloperId::into_inner))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Game::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, game: &Game) -> RepoResult<()> {
        let write = GameWrite::new(game);
        sqlx::query(
            r"
            INSERT INTO games (id, developer_id, title, price, release_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(write.id)
        .bind(write.developer_id)
        .bind(write.title)
        .bind(write.price)
        .bind(write.release_date)
        .bind(game.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, game: &Game) -> RepoResult<()> {
        let write = GameWrite::new(game);
        let result = sqlx::query(
            r"
            UPDATE games
            SET title = $2, price = $3, release_date = $4
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(write.id)
        .bind(write.title)
        .bind(write.price)
        .bind(write.release_date)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GameNotFound(game.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: GameId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE games
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GameNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn replace_genres(&self, game_id: GameId, genre_ids: &[GenreId]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the game so concurrent replacements serialize
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM games WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(game_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if exists.is_none() {
            return Err(DomainError::GameNotFound(game_id));
        }

        sqlx::query("DELETE FROM game_genres WHERE game_id = $1")
            .bind(game_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        for genre_id in genre_ids {
            let result = sqlx::query(
                r"
                INSERT INTO game_genres (game_id, genre_id)
                SELECT $1, id FROM genres WHERE id = $2 AND deleted_at IS NULL
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(game_id.into_inner())
            .bind(genre_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            // Duplicates in the input hit ON CONFLICT; only a missing genre
            // inserts nothing on its first occurrence
            if result.rows_affected() == 0 {
                let known = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM genres WHERE id = $1 AND deleted_at IS NULL)",
                )
                .bind(genre_id.into_inner())
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;
                if !known {
                    return Err(DomainError::GenreNotFound(*genre_id));
                }
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
