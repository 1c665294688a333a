//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount.
///
/// Wraps [`Decimal`] so money math stays exact; binary floats would drift on
/// the tax and discount calculations. Display formatting (two decimal places,
/// `$` prefix) lives here so calling code never formats amounts by hand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., `$19.99`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from(210).display(), "$210.00");
        assert_eq!(
            Price::new(Decimal::new(5670, 2)).display(),
            "$56.70"
        );
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_arithmetic_is_exact() {
        // 0.1 + 0.2 == 0.3 holds for decimals, unlike binary floats
        let a = Price::new(Decimal::new(1, 1));
        let b = Price::new(Decimal::new(2, 1));
        assert_eq!(a + b, Price::new(Decimal::new(3, 1)));
    }

    #[test]
    fn test_mul_by_rate() {
        let price = Price::from(420);
        let rate = Decimal::new(10, 2); // 0.10
        assert_eq!(price * rate, Price::from(42));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from(1), Price::from(2), Price::from(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from(6));
    }

    #[test]
    fn test_serde_string_amount() {
        // serde-with-str keeps decimal amounts as strings on disk
        let price = Price::from(300);
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
