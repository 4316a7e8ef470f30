//! PostgreSQL implementation of DeveloperRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gamestore_core::entities::{Developer, GameSales};
use gamestore_core::traits::{DeveloperRepository, RepoResult};
use gamestore_core::value_objects::DeveloperId;

use crate::models::{DeveloperModel, GameSalesModel};

use super::error::map_db_error;

/// PostgreSQL implementation of DeveloperRepository
#[derive(Clone)]
pub struct PgDeveloperRepository {
    pool: PgPool,
}

impl PgDeveloperRepository {
    /// Create a new PgDeveloperRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeveloperRepository for PgDeveloperRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: DeveloperId) -> RepoResult<Option<Developer>> {
        let result = sqlx::query_as::<_, DeveloperModel>(
            r"
            SELECT id, account_id, display_name, created_at, deleted_at
            FROM developers
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Developer::from))
    }

    #[instrument(skip(self))]
    async fn sales_report(&self, id: DeveloperId) -> RepoResult<Vec<GameSales>> {
        // Cart lines (total_price = 0) are not sales
        let rows = sqlx::query_as::<_, GameSalesModel>(
            r"
            SELECT g.id AS game_id,
                   g.title,
                   COALESCE(SUM(s.quantity), 0)::BIGINT AS units_sold,
                   COALESCE(SUM(s.quantity * s.price_at_purchase), 0) AS revenue
            FROM games g
            LEFT JOIN (
                SELECT oi.game_id, oi.quantity, oi.price_at_purchase
                FROM order_items oi
                JOIN orders o ON o.id = oi.order_id
                WHERE oi.deleted_at IS NULL
                  AND o.deleted_at IS NULL
                  AND o.total_price > 0
            ) s ON s.game_id = g.id
            WHERE g.developer_id = $1 AND g.deleted_at IS NULL
            GROUP BY g.id, g.title
            ORDER BY revenue DESC, g.id
            ",
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(GameSales::from).collect())
    }
}
