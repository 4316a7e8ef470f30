//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and `Validate`; services validate
//! them before touching any repository.

use chrono::NaiveDate;
use gamestore_core::DeveloperId;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Customer or developer registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 20, message = "Display name must be 1-20 characters"))]
    pub display_name: String,
}

/// Administrator registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAdminRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// Catalog Requests
// ============================================================================

/// Add game request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddGameRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Decimal price, e.g. "19.99"
    #[validate(length(min = 1, max = 16, message = "Price is required"))]
    pub price: String,

    pub release_date: Option<NaiveDate>,

    /// Owning developer; required when an admin adds the game
    #[serde(default)]
    pub developer_id: Option<DeveloperId>,
}

/// Update game request, absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGameRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 16, message = "Price is required"))]
    pub price: Option<String>,

    pub release_date: Option<NaiveDate>,
}

/// Add genre request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddGenreRequest {
    #[validate(length(min = 1, max = 50, message = "Genre name must be 1-50 characters"))]
    pub name: String,
}
