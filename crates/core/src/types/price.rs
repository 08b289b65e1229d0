//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are currency-agnostic unit amounts. They are stored as
//! [`Decimal`] to keep cart totals exact, but persisted as plain JSON
//! numbers so records written by earlier versions of the storefront (and by
//! the browser build) read back unchanged.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount accepted as a product or variant price.
    ///
    /// Prices are persisted as JSON numbers; amounts within this bound and
    /// [`Self::MAX_SCALE`] decimal places read back unchanged.
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Most decimal places accepted in a product or variant price.
    pub const MAX_SCALE: u32 = 2;

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a line quantity, saturating at the decimal range.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Amount rounded to [`Self::MAX_SCALE`] decimal places.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(self.0.round_dp(Self::MAX_SCALE))
    }

    /// Whether the amount is within [`Self::MAX`] and [`Self::MAX_SCALE`].
    #[must_use]
    pub fn is_within_limits(&self) -> bool {
        self.0.abs() <= Self::MAX.0 && self.0.normalize().scale() <= Self::MAX_SCALE
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at the decimal range instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    /// Formats as `$599` or `$19.99` (trailing zeros dropped).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from(599_u32).times(3), Price::from(999_u32).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from(2796_u32));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Price = core::iter::empty().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Price::from(599_u32)).unwrap();
        assert_eq!(json.parse::<f64>().unwrap(), 599.0);
        assert!(!json.starts_with('"'));
    }

    #[test]
    fn test_deserializes_integer_and_float() {
        let whole: Price = serde_json::from_str("1499").unwrap();
        assert_eq!(whole, Price::from(1499_u32));

        let fractional: Price = serde_json::from_str("19.5").unwrap();
        assert_eq!(fractional, Price::new(Decimal::new(195, 1)));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge: Price = "10000000000000000000000000000".parse().unwrap();
        assert_eq!(huge.times(8), Price::new(Decimal::MAX));
        assert_eq!(Price::new(Decimal::MAX) + huge, Price::new(Decimal::MAX));

        let total: Price = [huge.times(8), Price::from(1_u32)].into_iter().sum();
        assert_eq!(total, Price::new(Decimal::MAX));
    }

    #[test]
    fn test_limits() {
        assert!(Price::MAX.is_within_limits());
        assert!("19.9900".parse::<Price>().unwrap().is_within_limits());
        assert!(!"19.999".parse::<Price>().unwrap().is_within_limits());
        assert!(!"1000000000.01".parse::<Price>().unwrap().is_within_limits());
        assert!(!"0.001".parse::<Price>().unwrap().is_within_limits());
        assert!(
            !"79228162514264337593543950335"
                .parse::<Price>()
                .unwrap()
                .is_within_limits()
        );
    }

    #[test]
    fn test_rounded() {
        let price: Price = "12.345".parse().unwrap();
        assert_eq!(price.rounded(), "12.34".parse().unwrap());
        assert!(price.rounded().is_within_limits());
    }

    #[test]
    fn test_max_survives_json() {
        for raw in ["1000000000", "349.99", "0.01"] {
            let price: Price = raw.parse().unwrap();
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "{raw}");
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("599.00".parse::<Price>().unwrap(), Price::from(599_u32));
        assert!("abc".parse::<Price>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from(599_u32).to_string(), "$599");
        assert_eq!("19.90".parse::<Price>().unwrap().to_string(), "$19.9");
    }
}
