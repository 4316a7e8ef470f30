//! Authorization gate
//!
//! Pure decisions over (role, identity, owner). Services consult these before
//! any mutation of catalog or account data.
//!
//! | action        | admin | owning developer | other developer | user |
//! |---------------|-------|------------------|-----------------|------|
//! | remove game   | yes   | yes              | no              | no   |
//! | edit game     | no    | yes              | no              | no   |
//! | ban / unban   | yes   | no               | no              | no   |
//!
//! Admins may remove any game but may not edit one.

use crate::entities::Account;
use crate::error::DomainError;
use crate::value_objects::{DeveloperId, Role};

/// Whether `role` acting as `requester` may remove a game owned by `owner`
pub fn can_mutate_game(role: Role, requester: Option<DeveloperId>, owner: DeveloperId) -> bool {
    match role {
        Role::Admin => true,
        Role::Developer => requester == Some(owner),
        Role::User => false,
    }
}

/// Whether `role` acting as `requester` may edit a game owned by `owner`
pub fn can_edit_game(role: Role, requester: Option<DeveloperId>, owner: DeveloperId) -> bool {
    role == Role::Developer && requester == Some(owner)
}

/// Whether `role` may ban or unban accounts
pub fn can_moderate(role: Role) -> bool {
    role == Role::Admin
}

/// Only `user` accounts can be banned or unbanned
pub fn check_ban_target(target: &Account) -> Result<(), DomainError> {
    if target.role == Role::User {
        Ok(())
    } else {
        Err(DomainError::UnsupportedForRole { role: target.role })
    }
}
