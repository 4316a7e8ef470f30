//! Money - non-negative decimal amount in whole cents

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Error when constructing a money amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),

    #[error("invalid amount: {0}")]
    InvalidFormat(String),

    #[error("amount has more than two decimal places: {0}")]
    TooPrecise(Decimal),

    #[error("amount out of range: {0}")]
    OutOfRange(Decimal),
}

/// A non-negative monetary amount
///
/// Constructed amounts carry at most two decimal places and stay below
/// [`Money::LIMIT`], the range of a `NUMERIC(12,2)` column. Products and
/// sums may exceed the limit; [`Money::check_range`] guards them before
/// they are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Exclusive upper bound of a storable amount (10^10)
    pub const LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

    /// Create a money amount, rejecting negatives, sub-cent precision and
    /// amounts at or above [`Money::LIMIT`]
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        if amount.normalize().scale() > 2 {
            return Err(MoneyError::TooPrecise(amount));
        }
        Self(amount).check_range()
    }

    /// Parse a user-supplied amount such as "19.99"
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| MoneyError::InvalidFormat(s.to_string()))?;
        Self::new(amount)
    }

    /// Wrap a value read back from storage
    #[inline]
    pub const fn from_stored(amount: Decimal) -> Self {
        Self(amount)
    }

    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Amount rounded to cents
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Fails with `OutOfRange` when the amount does not fit storage
    pub fn check_range(self) -> Result<Self, MoneyError> {
        if self.0 >= Self::LIMIT {
            return Err(MoneyError::OutOfRange(self.0));
        }
        Ok(self)
    }

    /// `self × quantity`
    pub fn times(&self, quantity: u32) -> Money {
        Money(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.rounded()))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}
