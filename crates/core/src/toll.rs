//! Toll - Non-negative currency amount with cent precision
//!
//! Tolls travel as plain JSON numbers (see the Decision output contract),
//! but are held as `Decimal` so that rounding is exact.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of fractional digits kept on every toll
pub const TOLL_SCALE: u32 = 2;

/// Errors that can occur when working with tolls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TollError {
    #[error("Toll cannot be negative: {0}")]
    Negative(Decimal),

    #[error("Toll is not a finite number: {0}")]
    NotFinite(f64),
}

/// A non-negative toll, rounded to cents.
///
/// # Invariant
/// The inner value is always >= 0 and has at most two fractional digits.
///
/// # Example
/// ```
/// use tollchain_core::Toll;
/// use rust_decimal::Decimal;
///
/// let toll = Toll::new(Decimal::new(2199, 3)).unwrap(); // 2.199
/// assert_eq!(toll.value(), Decimal::new(220, 2));
///
/// assert!(Toll::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Toll(Decimal);

impl Toll {
    /// Zero toll constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Toll, rounding half-to-even to cents.
    ///
    /// Returns an error if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, TollError> {
        if value < Decimal::ZERO {
            Err(TollError::Negative(value))
        } else {
            Ok(Self(value.round_dp(TOLL_SCALE)))
        }
    }

    /// Create a Toll, clamping negative values to zero.
    #[inline]
    pub fn saturating(value: Decimal) -> Self {
        Self(value.max(Decimal::ZERO).round_dp(TOLL_SCALE))
    }

    /// Create a Toll from a floating point amount.
    pub fn from_f64(value: f64) -> Result<Self, TollError> {
        if !value.is_finite() {
            return Err(TollError::NotFinite(value));
        }
        let decimal = Decimal::from_f64(value).ok_or(TollError::NotFinite(value))?;
        Self::new(decimal)
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Lossy conversion for the JSON export shape
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Toll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Toll {
    type Error = TollError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<Toll> for f64 {
    fn from(toll: Toll) -> Self {
        toll.as_f64()
    }
}

impl Default for Toll {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_toll_rounds_to_cents() {
        let toll = Toll::new(dec!(1.4049)).unwrap();
        assert_eq!(toll.value(), dec!(1.40));
    }

    #[test]
    fn test_toll_negative_rejected() {
        let result = Toll::new(dec!(-0.01));
        assert!(matches!(result, Err(TollError::Negative(_))));
    }

    #[test]
    fn test_saturating_clamps_negative() {
        assert_eq!(Toll::saturating(dec!(-3.5)), Toll::ZERO);
        assert_eq!(Toll::saturating(dec!(1.005)).value(), dec!(1.00));
    }

    #[test]
    fn test_toll_from_nan_rejected() {
        assert!(matches!(Toll::from_f64(f64::NAN), Err(TollError::NotFinite(_))));
    }

    #[test]
    fn test_toll_serializes_as_number() {
        let toll = Toll::new(dec!(2.2)).unwrap();
        let json = serde_json::to_string(&toll).unwrap();
        assert_eq!(json, "2.2");

        let parsed: Toll = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, toll);
    }

    #[test]
    fn test_display_keeps_two_digits() {
        let toll = Toll::new(dec!(3)).unwrap();
        assert_eq!(toll.to_string(), "3.00");
    }
}
