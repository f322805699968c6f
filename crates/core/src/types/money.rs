//! Monetary amounts with decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount in the marketplace's currency.
///
/// Wraps [`Decimal`] so prices never go through binary floating point
/// arithmetic. The backend's wire format is a plain JSON number
/// (`129.5`, not `"129.5"`), so serde goes through the decimal float
/// representation in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a scaled integer, e.g. `Amount::new(12950, 2)`
    /// for 129.50.
    #[must_use]
    pub fn new(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero. Prices and totals never are;
    /// the backend is the authority and this is only used for display
    /// sanity checks.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0.is_sign_negative()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_is_a_number() {
        let json = serde_json::to_string(&Amount::new(12950, 2)).unwrap();
        assert_eq!(json, "129.5");

        let amount: Amount = serde_json::from_str("129.5").unwrap();
        assert_eq!(amount, Amount::new(12950, 2));
    }

    #[test]
    fn test_sum_and_display() {
        let total: Amount = [Amount::new(100, 2), Amount::new(250, 2)]
            .into_iter()
            .sum();
        assert_eq!(total, Amount::new(350, 2));
        assert_eq!(total.to_string(), "3.50");
    }

    #[test]
    fn test_zero_default() {
        assert_eq!(Amount::default(), Amount::ZERO);
        assert!(!Amount::ZERO.is_negative());
    }
}
