//! Amount - positive, cent-precision money value for transfers.
//!
//! The service receives amounts as JSON numbers; internally they stay
//! `Decimal` so cent-level validation is exact.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Maximum number of fractional digits accepted for a transfer amount.
pub const MAX_SCALE: u32 = 2;

/// A strictly positive amount with at most two fractional digits.
///
/// # Example
/// ```
/// use tg_core::Amount;
///
/// let amount = Amount::parse("50.00").unwrap();
/// assert_eq!(amount.to_string(), "50.00");
///
/// assert!(Amount::parse("0").is_err());
/// assert!(Amount::parse("1.005").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the value is zero, negative, or has
    /// sub-cent precision.
    pub fn new(value: Decimal) -> Result<Self, CoreError> {
        if value <= Decimal::ZERO {
            return Err(CoreError::validation(format!(
                "amount must be positive, got {value}"
            )));
        }
        if value.normalize().scale() > MAX_SCALE {
            return Err(CoreError::validation(format!(
                "amount {value} has more than {MAX_SCALE} decimal places"
            )));
        }
        Ok(Self(value))
    }

    /// Parse user input such as `"50"`, `"50.5"` or `"50.00"`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the input is not a decimal number or
    /// fails [`Amount::new`].
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        let value = Decimal::from_str(trimmed)
            .map_err(|_| CoreError::validation(format!("'{trimmed}' is not a valid amount")))?;
        Self::new(value)
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
