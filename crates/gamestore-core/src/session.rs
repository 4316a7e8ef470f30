//! Authenticated identity passed explicitly to every authorizing call

use serde::{Deserialize, Serialize};

use crate::entities::{Account, Customer, Developer};
use crate::error::DomainError;
use crate::value_objects::{AccountId, CustomerId, DeveloperId, Role};

/// Logged-in identity for one interactive session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: AccountId,
    pub role: Role,
    pub display_name: String,
    pub customer_id: Option<CustomerId>,
    pub developer_id: Option<DeveloperId>,
}

impl Session {
    /// Admins have no profile; they are shown by email
    pub fn admin(account: &Account) -> Self {
        Self {
            account_id: account.id,
            role: Role::Admin,
            display_name: account.email.clone(),
            customer_id: None,
            developer_id: None,
        }
    }

    pub fn customer(account: &Account, customer: &Customer) -> Self {
        Self {
            account_id: account.id,
            role: Role::User,
            display_name: customer.display_name.clone(),
            customer_id: Some(customer.id),
            developer_id: None,
        }
    }

    pub fn developer(account: &Account, developer: &Developer) -> Self {
        Self {
            account_id: account.id,
            role: Role::Developer,
            display_name: developer.display_name.clone(),
            customer_id: None,
            developer_id: Some(developer.id),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail unless the session belongs to an admin
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::PermissionDenied(format!(
                "{} accounts cannot perform administration",
                self.role
            )))
        }
    }

    /// The customer profile, or PermissionDenied for other roles
    pub fn require_customer(&self) -> Result<CustomerId, DomainError> {
        self.customer_id.ok_or_else(|| {
            DomainError::PermissionDenied(format!("{} accounts have no cart", self.role))
        })
    }

    /// The developer profile, or PermissionDenied for other roles
    pub fn require_developer(&self) -> Result<DeveloperId, DomainError> {
        self.developer_id.ok_or_else(|| {
            DomainError::PermissionDenied(format!("{} accounts own no games", self.role))
        })
    }
}
