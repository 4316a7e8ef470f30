//! PostgreSQL implementation of PaymentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use gamestore_core::entities::{Payment, PaymentLog, PaymentMethod, SettledTransaction};
use gamestore_core::error::DomainError;
use gamestore_core::traits::{PaymentRepository, RepoResult};
use gamestore_core::value_objects::{
    OrderId, PaymentId, PaymentLogId, PaymentMethodId, PaymentStatus,
};

use crate::models::{PaymentLogModel, PaymentMethodModel, PaymentModel, SettledTransactionModel};

use super::error::{map_db_error, map_guard_violation};

/// PostgreSQL implementation of PaymentRepository
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new PgPaymentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    #[instrument(skip(self))]
    async fn list_methods(&self) -> RepoResult<Vec<PaymentMethod>> {
        let rows = sqlx::query_as::<_, PaymentMethodModel>(
            "SELECT id, name FROM payment_methods ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PaymentMethod::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_method(&self, id: PaymentMethodId) -> RepoResult<Option<PaymentMethod>> {
        let result = sqlx::query_as::<_, PaymentMethodModel>(
            "SELECT id, name FROM payment_methods WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PaymentMethod::from))
    }

    #[instrument(skip(self))]
    async fn create_method(&self, method: &PaymentMethod) -> RepoResult<()> {
        sqlx::query("INSERT INTO payment_methods (id, name) VALUES ($1, $2)")
            .bind(method.id.into_inner())
            .bind(&method.name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_guard_violation(e, "payment method name already exists"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn create(&self, payment: &Payment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO payments (id, order_id, payment_method_id, amount, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(payment.id.into_inner())
        .bind(payment.order_id.into_inner())
        .bind(payment.payment_method_id.into_inner())
        .bind(payment.amount.rounded())
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PaymentId) -> RepoResult<Option<Payment>> {
        let result = sqlx::query_as::<_, PaymentModel>(
            r"
            SELECT id, order_id, payment_method_id, amount, status, created_at, paid_at
            FROM payments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Payment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn transition(
        &self,
        id: PaymentId,
        next: PaymentStatus,
        log_id: PaymentLogId,
        at: DateTime<Utc>,
    ) -> RepoResult<Payment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock: a concurrent transition waits and then sees our status
        let current = sqlx::query_as::<_, PaymentModel>(
            r"
            SELECT id, order_id, payment_method_id, amount, status, created_at, paid_at
            FROM payments
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::PaymentNotFound(id))?;
        let mut payment = Payment::try_from(current)?;

        payment.status.check_transition(id, next)?;
        let old_status = payment.status;
        payment.status = next;
        if next == PaymentStatus::Paid {
            payment.paid_at = Some(at);
        }

        sqlx::query(
            r"
            UPDATE payments
            SET status = $2, paid_at = $3
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(next.as_str())
        .bind(payment.paid_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_guard_violation(e, "order already has a settled payment"))?;

        sqlx::query(
            r"
            INSERT INTO payment_logs (id, payment_id, old_status, new_status, changed_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(log_id.into_inner())
        .bind(id.into_inner())
        .bind(old_status.as_str())
        .bind(next.as_str())
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(payment)
    }

    #[instrument(skip(self))]
    async fn list_for_order(&self, order_id: OrderId) -> RepoResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentModel>(
            r"
            SELECT id, order_id, payment_method_id, amount, status, created_at, paid_at
            FROM payments
            WHERE order_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(order_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_logs(&self, payment_id: PaymentId) -> RepoResult<Vec<PaymentLog>> {
        let rows = sqlx::query_as::<_, PaymentLogModel>(
            r"
            SELECT id, payment_id, old_status, new_status, changed_at
            FROM payment_logs
            WHERE payment_id = $1
            ORDER BY changed_at, id
            ",
        )
        .bind(payment_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(PaymentLog::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn settled_transactions(&self) -> RepoResult<Vec<SettledTransaction>> {
        let rows = sqlx::query_as::<_, SettledTransactionModel>(
            r"
            SELECT o.id AS order_id, o.customer_id, o.order_date, o.total_price,
                   p.id AS payment_id, m.name AS method_name, p.amount, p.paid_at
            FROM payments p
            JOIN orders o ON o.id = p.order_id
            JOIN payment_methods m ON m.id = p.payment_method_id
            WHERE p.status = 'Paid'
            ORDER BY o.order_date, o.id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(SettledTransaction::from).collect())
    }
}
