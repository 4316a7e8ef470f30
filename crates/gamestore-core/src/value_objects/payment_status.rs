//! Payment status and its transition rules
//!
//! ```text
//! Pending ──confirm──▶ Paid
//!    │
//!    └─────fail──────▶ Failed
//! ```
//!
//! Confirmation is refused only when the payment is already `Paid`.
//! Failing is permitted from any status, including `Paid`; callers that
//! need a stricter rule must check `is_terminal` themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::PaymentId;

/// Status of a single payment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// Storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Paid" => Some(Self::Paid),
            "Failed" => Some(Self::Failed),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }

    /// Validate a transition from `self` to `next`
    pub fn check_transition(self, payment_id: PaymentId, next: PaymentStatus) -> Result<(), DomainError> {
        match (self, next) {
            (Self::Paid, Self::Paid) => Err(DomainError::AlreadyPaid(payment_id)),
            (_, Self::Paid | Self::Failed) => Ok(()),
            (from, Self::Pending) => Err(DomainError::InvalidPaymentTransition {
                from: from.as_str(),
                to: Self::Pending.as_str(),
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
