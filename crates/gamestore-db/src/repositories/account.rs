//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use gamestore_core::entities::{Account, AccountDetail, Customer, Developer, Profile};
use gamestore_core::error::DomainError;
use gamestore_core::traits::{AccountRepository, RepoResult};
use gamestore_core::value_objects::{AccountId, Role};

use crate::models::{AccountDetailModel, AccountModel, CustomerModel, DeveloperModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of AccountRepository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, role, created_at, deleted_at
            FROM accounts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, role, created_at, deleted_at
            FROM accounts
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(
        &self,
        account: &Account,
        password_hash: &str,
        profile: Option<&Profile>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO accounts (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(account.id.into_inner())
        .bind(&account.email)
        .bind(password_hash)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        match profile {
            Some(Profile::Customer(customer)) => {
                sqlx::query(
                    r"
                    INSERT INTO customers (id, account_id, display_name)
                    VALUES ($1, $2, $3)
                    ",
                )
                .bind(customer.id.into_inner())
                .bind(account.id.into_inner())
                .bind(&customer.display_name)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            Some(Profile::Developer(developer)) => {
                sqlx::query(
                    r"
                    INSERT INTO developers (id, account_id, display_name, created_at)
                    VALUES ($1, $2, $3, $4)
                    ",
                )
                .bind(developer.id.into_inner())
                .bind(account.id.into_inner())
                .bind(&developer.display_name)
                .bind(developer.created_at)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            None => {}
        }

        // Dropping the transaction on any error above rolls the account back
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM accounts WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_customer(&self, account_id: AccountId) -> RepoResult<Option<Customer>> {
        let result = sqlx::query_as::<_, CustomerModel>(
            "SELECT id, account_id, display_name FROM customers WHERE account_id = $1",
        )
        .bind(account_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Customer::from))
    }

    #[instrument(skip(self))]
    async fn find_developer(&self, account_id: AccountId) -> RepoResult<Option<Developer>> {
        let result = sqlx::query_as::<_, DeveloperModel>(
            r"
            SELECT id, account_id, display_name, created_at, deleted_at
            FROM developers
            WHERE account_id = $1
            ",
        )
        .bind(account_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Developer::from))
    }

    #[instrument(skip(self))]
    async fn list_by_role(&self, role: Role) -> RepoResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, role, created_at, deleted_at
            FROM accounts
            WHERE role = $1
            ORDER BY created_at, id
            ",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Account::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_details(&self) -> RepoResult<Vec<AccountDetail>> {
        let rows = sqlx::query_as::<_, AccountDetailModel>(
            r"
            SELECT a.id, a.email, a.role, a.created_at, a.deleted_at,
                   d.id AS developer_id, d.display_name AS developer_name,
                   d.created_at AS developer_created_at, d.deleted_at AS developer_deleted_at
            FROM accounts a
            LEFT JOIN developers d ON d.account_id = a.id
            ORDER BY a.created_at, a.id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(AccountDetail::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn set_banned(&self, id: AccountId, banned_at: Option<DateTime<Utc>>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET deleted_at = $2
            WHERE id = $1 AND role = 'user'
            ",
        )
        .bind(id.into_inner())
        .bind(banned_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AccountNotFound(id));
        }

        Ok(())
    }
}
