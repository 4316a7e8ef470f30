//! Account role

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of an account; fixed at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Developer,
    /// A customer account
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Developer, Role::User];

    /// Storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Developer => "developer",
            Self::User => "user",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "developer" => Some(Self::Developer),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// Whether accounts of this role carry a profile row
    #[inline]
    pub const fn has_profile(&self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
