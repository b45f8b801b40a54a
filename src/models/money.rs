//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Source records carry plain floating-point numbers, which are
//! converted once at ingestion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Addition and subtraction saturate at the `i64` bounds instead of
/// overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use subsplit::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use subsplit::models::Money;
    /// assert_eq!(Money::from_units(75).cents(), 7500);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Convert a floating-point amount (as stored in source records),
    /// rounding to the nearest cent
    ///
    /// Returns `None` for NaN, infinite values, and amounts whose cents do
    /// not fit in an `i64`.
    pub fn from_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
            Some(Self(cents as i64))
        } else {
            None
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divide into `parts` equal shares, rounded to whole currency units
    ///
    /// Halves round toward positive infinity, so 12.5 becomes 13 and -12.5
    /// becomes -12. Returns `None` when `parts` is not positive or the
    /// rounding step overflows.
    ///
    /// # Examples
    /// ```
    /// use subsplit::models::Money;
    /// assert_eq!(Money::from_units(300).split_rounded(4), Some(Money::from_units(75)));
    /// assert_eq!(Money::from_units(50).split_rounded(4), Some(Money::from_units(13)));
    /// ```
    pub fn split_rounded(&self, parts: i64) -> Option<Self> {
        if parts <= 0 {
            return None;
        }
        let divisor = parts.checked_mul(100)?;
        let units = self.0.checked_add(divisor / 2)?.div_euclid(divisor);
        units.checked_mul(100).map(Self)
    }

    /// How many whole multiples of `unit` fit into this amount (floor division)
    ///
    /// Returns `None` when `unit` is zero or negative.
    pub fn whole_multiples_of(&self, unit: Money) -> Option<i64> {
        if unit.0 <= 0 {
            return None;
        }
        Some(self.0.div_euclid(unit.0))
    }

    /// Multiply by a whole count; `None` on overflow
    pub fn checked_times(&self, count: i64) -> Option<Self> {
        self.0.checked_mul(count).map(Self)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }

    /// Format as a signed amount, with an explicit `+` when positive
    pub fn format_signed(&self) -> String {
        if self.is_positive() {
            format!("+{}", self)
        } else {
            self.to_string()
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(149.5), Some(Money::from_cents(14950)));
        assert_eq!(Money::from_f64(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_f64(f64::NAN), None);
        assert_eq!(Money::from_f64(1e17), None);
        assert_eq!(Money::from_f64(-1e17), None);
        assert_eq!(Money::from_f64(9e16), Some(Money::from_cents(9_000_000_000_000_000_000)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_units(75).format_with_symbol("฿"), "฿75.00");
        assert_eq!(Money::from_units(-75).format_with_symbol("฿"), "-฿75.00");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(Money::from_units(150).format_signed(), "+150.00");
        assert_eq!(Money::from_units(-150).format_signed(), "-150.00");
        assert_eq!(Money::zero().format_signed(), "0.00");
    }

    #[test]
    fn test_split_rounded() {
        let price = Money::from_units(300);
        assert_eq!(price.split_rounded(4), Some(Money::from_units(75)));
        assert_eq!(Money::from_units(100).split_rounded(3), Some(Money::from_units(33)));
        assert_eq!(Money::from_units(50).split_rounded(4), Some(Money::from_units(13)));
        assert_eq!(Money::from_cents(14950).split_rounded(2), Some(Money::from_units(75)));
        assert_eq!(Money::from_units(-50).split_rounded(4), Some(Money::from_units(-12)));
        assert_eq!(price.split_rounded(0), None);
        assert_eq!(Money::from_cents(i64::MAX).split_rounded(2), None);
        assert_eq!(Money::from_cents(i64::MAX - 10).split_rounded(1), None);
    }

    #[test]
    fn test_whole_multiples_of() {
        let unit = Money::from_units(75);
        assert_eq!(Money::from_units(150).whole_multiples_of(unit), Some(2));
        assert_eq!(Money::from_units(149).whole_multiples_of(unit), Some(1));
        assert_eq!(Money::zero().whole_multiples_of(unit), Some(0));
        assert_eq!(Money::from_units(-1).whole_multiples_of(unit), Some(-1));
        assert_eq!(Money::from_units(10).whole_multiples_of(Money::zero()), None);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!(b.checked_times(4), Some(Money::from_cents(2000)));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));
        assert_eq!(-Money::from_cents(i64::MIN), max);
        assert_eq!(max.checked_times(2), None);
        assert_eq!(Money::from_units(i64::MAX), max);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
