//! Account entity and role-specific profiles

use chrono::{DateTime, Utc};

use crate::value_objects::{AccountId, CustomerId, DeveloperId, Role};

/// Authentication record shared by every role
///
/// A non-null `deleted_at` means the account is banned; banned accounts
/// cannot log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new, active account
    pub fn new(id: AccountId, email: String, role: Role) -> Self {
        Self {
            id,
            email,
            role,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_banned(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Customer profile, owned by a `user` account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub account_id: AccountId,
    pub display_name: String,
}

/// Developer profile, owned by a `developer` account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    pub id: DeveloperId,
    pub account_id: AccountId,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Developer {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Profile written together with its account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    Customer(Customer),
    Developer(Developer),
}

impl Profile {
    /// The role an account must have to own this profile
    pub fn role(&self) -> Role {
        match self {
            Self::Customer(_) => Role::User,
            Self::Developer(_) => Role::Developer,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Customer(c) => &c.display_name,
            Self::Developer(d) => &d.display_name,
        }
    }
}

/// Account joined with its developer profile, for administration views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetail {
    pub account: Account,
    pub developer: Option<Developer>,
}
