//! Account entity <-> model mapper

use gamestore_core::entities::{Account, AccountDetail, Customer, Developer};
use gamestore_core::error::DomainError;
use gamestore_core::value_objects::{AccountId, CustomerId, DeveloperId, Role};

use crate::models::{AccountDetailModel, AccountModel, CustomerModel, DeveloperModel};

/// Parse the stored role column
pub fn role_from_str(s: &str) -> Result<Role, DomainError> {
    Role::parse(s).ok_or_else(|| DomainError::DatabaseError(format!("unknown role '{s}'")))
}

/// Convert AccountModel to Account entity
impl TryFrom<AccountModel> for Account {
    type Error = DomainError;

    fn try_from(model: AccountModel) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::new(model.id),
            email: model.email,
            role: role_from_str(&model.role)?,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        })
    }
}

/// Convert CustomerModel to Customer entity
impl From<CustomerModel> for Customer {
    fn from(model: CustomerModel) -> Self {
        Customer {
            id: CustomerId::new(model.id),
            account_id: AccountId::new(model.account_id),
            display_name: model.display_name,
        }
    }
}

/// Convert DeveloperModel to Developer entity
impl From<DeveloperModel> for Developer {
    fn from(model: DeveloperModel) -> Self {
        Developer {
            id: DeveloperId::new(model.id),
            account_id: AccountId::new(model.account_id),
            display_name: model.display_name,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        }
    }
}

/// Convert the joined row; the profile is present only when the join matched
impl TryFrom<AccountDetailModel> for AccountDetail {
    type Error = DomainError;

    fn try_from(model: AccountDetailModel) -> Result<Self, Self::Error> {
        let developer = match (model.developer_id, model.developer_name, model.developer_created_at) {
            (Some(id), Some(display_name), Some(created_at)) => Some(Developer {
                id: DeveloperId::new(id),
                account_id: AccountId::new(model.id),
                display_name,
                created_at,
                deleted_at: model.developer_deleted_at,
            }),
            _ => None,
        };

        Ok(AccountDetail {
            account: Account {
                id: AccountId::new(model.id),
                email: model.email,
                role: role_from_str(&model.role)?,
                created_at: model.created_at,
                deleted_at: model.deleted_at,
            },
            developer,
        })
    }
}
