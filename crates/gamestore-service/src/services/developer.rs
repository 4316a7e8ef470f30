//! Developer service

use gamestore_core::entities::GameSales;
use gamestore_core::{DeveloperId, DomainError, Role, Session};
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Developer-facing reports
pub struct DeveloperService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DeveloperService<'a> {
    /// Create a new DeveloperService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Units sold and revenue per live game, highest revenue first
    ///
    /// Developers see their own report; admins may read any developer's.
    #[instrument(skip(self, session))]
    pub async fn developer_sales_report(
        &self,
        session: &Session,
        developer_id: DeveloperId,
    ) -> ServiceResult<Vec<GameSales>> {
        let allowed = match session.role {
            Role::Admin => true,
            Role::Developer => session.developer_id == Some(developer_id),
            Role::User => false,
        };
        if !allowed {
            warn!(developer_id = %developer_id, role = %session.role, "Sales report denied");
            return Err(DomainError::PermissionDenied(
                "sales reports are private to their developer".to_string(),
            )
            .into());
        }

        if self
            .ctx
            .developer_repo()
            .find_by_id(developer_id)
            .await?
            .is_none()
        {
            return Err(DomainError::DeveloperNotFound(developer_id).into());
        }

        Ok(self.ctx.developer_repo().sales_report(developer_id).await?)
    }
}
