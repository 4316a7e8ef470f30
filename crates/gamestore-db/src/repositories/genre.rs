//! PostgreSQL implementation of GenreRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gamestore_core::entities::Genre;
use gamestore_core::error::DomainError;
use gamestore_core::traits::{GenreRepository, RepoResult};
use gamestore_core::value_objects::GenreId;

use crate::models::GenreModel;

use super::error::map_db_error;

/// PostgreSQL implementation of GenreRepository
#[derive(Clone)]
pub struct PgGenreRepository {
    pool: PgPool,
}

impl PgGenreRepository {
    /// Create a new PgGenreRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        let result = sqlx::query_as::<_, GenreModel>(
            "SELECT id, name, deleted_at FROM genres WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Genre::from))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreModel>(
            r"
            SELECT id, name, deleted_at
            FROM genres
            WHERE deleted_at IS NULL
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Genre::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, genre: &Genre) -> RepoResult<()> {
        sqlx::query("INSERT INTO genres (id, name) VALUES ($1, $2)")
            .bind(genre.id.into_inner())
            .bind(&genre.name)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: GenreId) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE genres SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GenreNotFound(id));
        }

        Ok(())
    }
}
