//! Authentication service
//!
//! Handles registration for every role and login. Login returns the explicit
//! `Session` that later calls authorize against.

use chrono::Utc;
use gamestore_common::auth::{hash_password, validate_password_strength, verify_password};
use gamestore_common::AppError;
use gamestore_core::entities::{Account, Customer, Developer, Profile};
use gamestore_core::{AccountId, DomainError, Role, Session};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginRequest, RegisterAdminRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a customer account with its profile
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register_customer(&self, request: RegisterRequest) -> ServiceResult<Session> {
        request.validate()?;
        let account_id: AccountId = self.ctx.generate_id();
        let customer = Customer {
            id: self.ctx.generate_id(),
            account_id,
            display_name: request.display_name.trim().to_string(),
        };
        let account = self
            .create_account(
                account_id,
                &request.email,
                &request.password,
                Role::User,
                Some(&Profile::Customer(customer.clone())),
            )
            .await?;

        info!(account_id = %account.id, customer_id = %customer.id, "Customer registered");
        Ok(Session::customer(&account, &customer))
    }

    /// Register a developer account; only administrators add developers
    #[instrument(skip(self, session, request), fields(email = %request.email))]
    pub async fn register_developer(
        &self,
        session: &Session,
        request: RegisterRequest,
    ) -> ServiceResult<Developer> {
        session.require_admin()?;
        request.validate()?;
        let account_id: AccountId = self.ctx.generate_id();
        let developer = Developer {
            id: self.ctx.generate_id(),
            account_id,
            display_name: request.display_name.trim().to_string(),
            created_at: Utc::now(),
            deleted_at: None,
        };
        self.create_account(
            account_id,
            &request.email,
            &request.password,
            Role::Developer,
            Some(&Profile::Developer(developer.clone())),
        )
        .await?;

        info!(account_id = %account_id, developer_id = %developer.id, "Developer registered");
        Ok(developer)
    }

    /// Register an administrator account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register_admin(&self, request: RegisterAdminRequest) -> ServiceResult<Account> {
        request.validate()?;
        let account = self
            .create_account(
                self.ctx.generate_id(),
                &request.email,
                &request.password,
                Role::Admin,
                None,
            )
            .await?;

        info!(account_id = %account.id, "Administrator registered");
        Ok(account)
    }

    /// Login with email and password
    ///
    /// Unknown, banned and wrong-password attempts all fail with the same
    /// `InvalidCredentials` error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<Session> {
        let email = normalize_email(&request.email);
        let account = self
            .ctx
            .account_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: account not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if account.is_banned() {
            warn!(account_id = %account.id, "Login failed: account is banned");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let password_hash = self
            .ctx
            .account_repo()
            .get_password_hash(account.id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(account_id = %account.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let session = self.open_session(&account).await?;
        info!(account_id = %account.id, role = %account.role, "Logged in");
        Ok(session)
    }

    /// Build the session for an authenticated account
    async fn open_session(&self, account: &Account) -> ServiceResult<Session> {
        match account.role {
            Role::Admin => Ok(Session::admin(account)),
            Role::User => {
                let customer = self
                    .ctx
                    .account_repo()
                    .find_customer(account.id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::internal(format!("account {} has no customer profile", account.id))
                    })?;
                Ok(Session::customer(account, &customer))
            }
            Role::Developer => {
                let developer = self
                    .ctx
                    .account_repo()
                    .find_developer(account.id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::internal(format!("account {} has no developer profile", account.id))
                    })?;
                Ok(Session::developer(account, &developer))
            }
        }
    }

    async fn create_account(
        &self,
        id: AccountId,
        email: &str,
        password: &str,
        role: Role,
        profile: Option<&Profile>,
    ) -> ServiceResult<Account> {
        validate_password_strength(password)?;

        let email = normalize_email(email);
        if self.ctx.account_repo().email_exists(&email).await? {
            warn!(%email, "Registration rejected: email taken");
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(password)?;
        let account = Account::new(id, email, role);
        self.ctx
            .account_repo()
            .create(&account, &password_hash, profile)
            .await?;

        Ok(account)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
