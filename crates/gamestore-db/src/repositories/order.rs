//! PostgreSQL implementation of OrderRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gamestore_core::entities::{CartLine, Order, OrderHistoryEntry, OrderItem};
use gamestore_core::error::DomainError;
use gamestore_core::traits::{OrderRepository, RepoResult};
use gamestore_core::value_objects::{CustomerId, Money, OrderId, OrderItemId};

use crate::mappers::quantity_to_db;
use crate::models::{CartLineModel, OrderHistoryModel, OrderItemModel, OrderModel};

use super::error::{map_db_error, map_guard_violation};

/// PostgreSQL implementation of OrderRepository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new PgOrderRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    #[instrument(skip(self))]
    async fn find_active_cart(&self, customer_id: CustomerId) -> RepoResult<Option<Order>> {
        let result = sqlx::query_as::<_, OrderModel>(
            r"
            SELECT id, customer_id, total_price, order_date, deleted_at
            FROM orders
            WHERE customer_id = $1 AND total_price = 0 AND deleted_at IS NULL
            ",
        )
        .bind(customer_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Order::from))
    }

    #[instrument(skip(self))]
    async fn create_cart(&self, order: &Order) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO orders (id, customer_id, total_price, order_date)
            VALUES ($1, $2, 0, $3)
            ",
        )
        .bind(order.id.into_inner())
        .bind(order.customer_id.into_inner())
        .bind(order.order_date)
        .execute(&self.pool)
        .await
        .map_err(|e| map_guard_violation(e, "customer already has an active cart"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let result = sqlx::query_as::<_, OrderModel>(
            r"
            SELECT id, customer_id, total_price, order_date, deleted_at
            FROM orders
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Order::from))
    }

    #[instrument(skip(self))]
    async fn find_item(&self, id: OrderItemId) -> RepoResult<Option<OrderItem>> {
        let result = sqlx::query_as::<_, OrderItemModel>(
            r"
            SELECT id, order_id, game_id, quantity, price_at_purchase, deleted_at
            FROM order_items
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(OrderItem::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn add_item(&self, item: &OrderItem) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO order_items (id, order_id, game_id, quantity, price_at_purchase)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(item.id.into_inner())
        .bind(item.order_id.into_inner())
        .bind(item.game_id.into_inner())
        .bind(quantity_to_db(item.quantity)?)
        .bind(item.price_at_purchase.rounded())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_lines(&self, order_id: OrderId) -> RepoResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLineModel>(
            r"
            SELECT oi.id, oi.order_id, oi.game_id, oi.quantity, oi.price_at_purchase,
                   oi.deleted_at, g.title
            FROM order_items oi
            JOIN games g ON g.id = oi.game_id
            WHERE oi.order_id = $1 AND oi.deleted_at IS NULL
            ORDER BY oi.id
            ",
        )
        .bind(order_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(CartLine::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn update_item_quantity(&self, id: OrderItemId, quantity: u32) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE order_items
            SET quantity = $2
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(quantity_to_db(quantity)?)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::OrderItemNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, id: OrderItemId) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE order_items
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_items(&self, order_id: OrderId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE order_items
            SET deleted_at = NOW()
            WHERE order_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(order_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn finalize(&self, order_id: OrderId, total: Money) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET total_price = $2
            WHERE id = $1 AND total_price = 0 AND deleted_at IS NULL
            ",
        )
        .bind(order_id.into_inner())
        .bind(total.rounded())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Conflict(format!(
                "order {order_id} is no longer an active cart"
            )));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn history(&self, customer_id: CustomerId) -> RepoResult<Vec<OrderHistoryEntry>> {
        // A settled attempt wins over later failed retries
        let rows = sqlx::query_as::<_, OrderHistoryModel>(
            r"
            SELECT o.id AS order_id, o.order_date, o.total_price,
                   p.status AS payment_status, p.paid_at
            FROM orders o
            LEFT JOIN LATERAL (
                SELECT status, paid_at
                FROM payments
                WHERE order_id = o.id
                ORDER BY (status = 'Paid') DESC, created_at DESC, id DESC
                LIMIT 1
            ) p ON TRUE
            WHERE o.customer_id = $1 AND o.total_price > 0 AND o.deleted_at IS NULL
            ORDER BY o.order_date, o.id
            ",
        )
        .bind(customer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(OrderHistoryEntry::try_from).collect()
    }
}
