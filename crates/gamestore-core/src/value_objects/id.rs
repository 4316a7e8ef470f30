//! Typed identifiers and the time-ordered id generator
//!
//! Every entity gets its own newtype over a 64-bit id so that an `OrderId`
//! can never be passed where a `PaymentId` is expected. Ids are laid out
//! snowflake-style:
//! - Bits 63-22: Timestamp (milliseconds since custom epoch)
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Sequence number (0-4095)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Error when parsing an identifier from user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,

    #[error("identifier must be positive")]
    NotPositive,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database value
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Parse a user-supplied identifier
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| IdParseError::InvalidFormat)?;
                if raw <= 0 {
                    return Err(IdParseError::NotPositive);
                }
                Ok(Self(raw))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(
    /// Authentication record identifier
    AccountId
);
define_id!(
    /// Customer profile identifier (distinct from the owning account)
    CustomerId
);
define_id!(
    /// Developer profile identifier
    DeveloperId
);
define_id!(GameId);
define_id!(GenreId);
define_id!(
    /// Order identifier; also identifies the active cart
    OrderId
);
define_id!(OrderItemId);
define_id!(PaymentId);
define_id!(PaymentMethodId);
define_id!(PaymentLogId);

/// Error returned when the generator is misconfigured
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("worker id must be < 1024, got {0}")]
pub struct InvalidWorkerId(pub u16);

/// Thread-safe, time-ordered id generator
///
/// Generates unique ids at up to 4096 per millisecond per worker.
pub struct IdGenerator {
    worker_id: u16,
    sequence: AtomicI64,
    last_timestamp: AtomicI64,
}

impl IdGenerator {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    /// Create a new generator for the given worker
    pub fn new(worker_id: u16) -> Result<Self, InvalidWorkerId> {
        if worker_id >= 1024 {
            return Err(InvalidWorkerId(worker_id));
        }
        Ok(Self {
            worker_id,
            sequence: AtomicI64::new(0),
            last_timestamp: AtomicI64::new(0),
        })
    }

    /// Generate the next raw id
    pub fn next_raw(&self) -> i64 {
        loop {
            let mut timestamp = Self::current_timestamp();
            let last = self.last_timestamp.load(Ordering::Acquire);

            if timestamp < last {
                // Clock moved backwards
                std::thread::sleep(std::time::Duration::from_millis((last - timestamp) as u64));
                timestamp = Self::current_timestamp();
            }

            let sequence = if timestamp == last {
                let seq = self.sequence.fetch_add(1, Ordering::Relaxed) & 0xFFF;
                if seq == 0 {
                    while Self::current_timestamp() <= last {
                        std::hint::spin_loop();
                    }
                    timestamp = Self::current_timestamp();
                    self.sequence.store(1, Ordering::Relaxed);
                    0
                } else {
                    seq
                }
            } else {
                self.sequence.store(1, Ordering::Relaxed);
                0
            };

            if self
                .last_timestamp
                .compare_exchange(last, timestamp, Ordering::Release, Ordering::Relaxed)
                .is_ok()
            {
                return ((timestamp - Self::EPOCH) << 22)
                    | (i64::from(self.worker_id) << 12)
                    | sequence;
            }
        }
    }

    /// Generate a typed id
    pub fn next<T: From<i64>>(&self) -> T {
        T::from(self.next_raw())
    }

    /// Get the worker ID of this generator
    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    #[inline]
    fn current_timestamp() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("worker_id", &self.worker_id)
            .finish_non_exhaustive()
    }
}
