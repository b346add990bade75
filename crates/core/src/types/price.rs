//! Type-safe price representation using decimal arithmetic.
//!
//! All prices in the store are in Brazilian reais. Amounts are kept as
//! [`Decimal`] so that cart totals never accumulate floating point error.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in Brazilian reais (BRL).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Currency symbol used when formatting.
    pub const SYMBOL: &'static str = "R$";

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in centavos.
    ///
    /// ```
    /// use loja_core::Price;
    ///
    /// assert_eq!(Price::from_cents(4990).to_string(), "R$ 49.90");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", Self::SYMBOL, self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(4990).to_string(), "R$ 49.90");
        assert_eq!(Price::from_cents(100).to_string(), "R$ 1.00");
        assert_eq!(Price::ZERO.to_string(), "R$ 0.00");
    }

    #[test]
    fn test_sum_is_exact() {
        let prices = [
            Price::from_cents(4990),
            Price::from_cents(8990),
            Price::from_cents(14990),
        ];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::from_cents(28970));
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let total: Price = std::iter::empty::<Price>().sum();
        assert_eq!(total, Price::ZERO);
    }
}
