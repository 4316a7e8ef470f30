//! Account administration service
//!
//! Listing and moderation of accounts. Every operation requires an admin
//! session; ban and unban only apply to `user` accounts.

use chrono::Utc;
use gamestore_core::entities::{Account, AccountDetail};
use gamestore_core::policy::{can_moderate, check_ban_target};
use gamestore_core::{AccountId, DomainError, Role, Session};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Account administration service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All `user` accounts, banned ones included
    #[instrument(skip(self, session))]
    pub async fn list_users(&self, session: &Session) -> ServiceResult<Vec<Account>> {
        session.require_admin()?;
        Ok(self.ctx.account_repo().list_by_role(Role::User).await?)
    }

    /// Every account with its developer profile when it has one
    #[instrument(skip(self, session))]
    pub async fn list_accounts(&self, session: &Session) -> ServiceResult<Vec<AccountDetail>> {
        session.require_admin()?;
        Ok(self.ctx.account_repo().list_details().await?)
    }

    #[instrument(skip(self, session))]
    pub async fn get_account(&self, session: &Session, id: AccountId) -> ServiceResult<Account> {
        session.require_admin()?;
        self.find(id).await
    }

    /// Ban a `user` account; banned accounts cannot log in
    #[instrument(skip(self, session), fields(admin = %session.account_id))]
    pub async fn ban(&self, session: &Session, id: AccountId) -> ServiceResult<()> {
        let target = self.moderation_target(session, id).await?;
        if target.is_banned() {
            return Ok(());
        }

        self.ctx
            .account_repo()
            .set_banned(id, Some(Utc::now()))
            .await?;

        info!(account_id = %id, "Account banned");
        Ok(())
    }

    /// Lift a ban, restoring login
    #[instrument(skip(self, session), fields(admin = %session.account_id))]
    pub async fn unban(&self, session: &Session, id: AccountId) -> ServiceResult<()> {
        let target = self.moderation_target(session, id).await?;
        if !target.is_banned() {
            return Ok(());
        }

        self.ctx.account_repo().set_banned(id, None).await?;

        info!(account_id = %id, "Account unbanned");
        Ok(())
    }

    async fn moderation_target(&self, session: &Session, id: AccountId) -> ServiceResult<Account> {
        if !can_moderate(session.role) {
            warn!(role = %session.role, "Moderation denied");
            return Err(DomainError::PermissionDenied(format!(
                "{} accounts cannot ban or unban",
                session.role
            ))
            .into());
        }

        let target = self.find(id).await?;
        if let Err(e) = check_ban_target(&target) {
            warn!(account_id = %id, role = %target.role, "Moderation target not supported");
            return Err(e.into());
        }
        Ok(target)
    }

    async fn find(&self, id: AccountId) -> ServiceResult<Account> {
        self.ctx
            .account_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::AccountNotFound(id).into())
    }
}
