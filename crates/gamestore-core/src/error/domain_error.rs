//! Domain errors - error types for the domain layer

use std::fmt;

use thiserror::Error;

use crate::value_objects::{
    AccountId, CustomerId, DeveloperId, GameId, GenreId, OrderId, OrderItemId, PaymentId,
    PaymentMethodId, Role,
};

/// Coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    InvalidInput,
    EmptyCart,
    AlreadyPaid,
    Conflict,
    Unsupported,
    Unrecoverable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::InvalidInput => "invalid input",
            Self::EmptyCart => "empty cart",
            Self::AlreadyPaid => "already paid",
            Self::Conflict => "conflict",
            Self::Unsupported => "unsupported",
            Self::Unrecoverable => "unrecoverable",
        };
        f.write_str(name)
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Developer not found: {0}")]
    DeveloperNotFound(DeveloperId),

    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Genre not found: {0}")]
    GenreNotFound(GenreId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Order item not found: {0}")]
    OrderItemNotFound(OrderItemId),

    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    #[error("Payment method not found: {0}")]
    PaymentMethodNotFound(PaymentMethodId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not the owner of game {0}")]
    NotGameOwner(GameId),

    // =========================================================================
    // Order / Payment Rules
    // =========================================================================
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Order {0} is already finalized")]
    OrderFinalized(OrderId),

    #[error("Payment {0} is already paid")]
    AlreadyPaid(PaymentId),

    #[error("Invalid payment transition: {from} -> {to}")]
    InvalidPaymentTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Operation not supported for {role} accounts")]
    UnsupportedForRole { role: Role },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Conflict: {0}")]
    Conflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get a stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::CustomerNotFound(_) => "UNKNOWN_CUSTOMER",
            Self::DeveloperNotFound(_) => "UNKNOWN_DEVELOPER",
            Self::GameNotFound(_) => "UNKNOWN_GAME",
            Self::GenreNotFound(_) => "UNKNOWN_GENRE",
            Self::OrderNotFound(_) => "UNKNOWN_ORDER",
            Self::OrderItemNotFound(_) => "UNKNOWN_ORDER_ITEM",
            Self::PaymentNotFound(_) => "UNKNOWN_PAYMENT",
            Self::PaymentMethodNotFound(_) => "UNKNOWN_PAYMENT_METHOD",

            // Validation
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",

            // Authorization
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::NotGameOwner(_) => "NOT_GAME_OWNER",

            // Order / Payment
            Self::EmptyCart => "EMPTY_CART",
            Self::OrderFinalized(_) => "ORDER_FINALIZED",
            Self::AlreadyPaid(_) => "ALREADY_PAID",
            Self::InvalidPaymentTransition { .. } => "INVALID_PAYMENT_TRANSITION",
            Self::UnsupportedForRole { .. } => "UNSUPPORTED_FOR_ROLE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccountNotFound(_)
            | Self::CustomerNotFound(_)
            | Self::DeveloperNotFound(_)
            | Self::GameNotFound(_)
            | Self::GenreNotFound(_)
            | Self::OrderNotFound(_)
            | Self::OrderItemNotFound(_)
            | Self::PaymentNotFound(_)
            | Self::PaymentMethodNotFound(_) => ErrorKind::NotFound,
            Self::InvalidInput(_) | Self::InvalidQuantity(_) | Self::InvalidPaymentTransition { .. } => {
                ErrorKind::InvalidInput
            }
            Self::PermissionDenied(_) | Self::NotGameOwner(_) => ErrorKind::PermissionDenied,
            Self::EmptyCart => ErrorKind::EmptyCart,
            Self::AlreadyPaid(_) => ErrorKind::AlreadyPaid,
            Self::OrderFinalized(_) | Self::EmailAlreadyExists | Self::Conflict(_) => {
                ErrorKind::Conflict
            }
            Self::UnsupportedForRole { .. } => ErrorKind::Unsupported,
            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Unrecoverable,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::PermissionDenied
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
