//! Precision-safe monetary types.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors in reconciliation amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// Minor units per major currency unit, as used by the ledger service
/// (milliunits: 1 GBP == 1000).
pub const MINOR_UNITS_PER_UNIT: i64 = 1000;

/// An amount in the ledger currency (GBP).
///
/// Wraps `Decimal` to keep ledger-currency amounts distinct from
/// source-currency prices and FX rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert a ledger-service minor-unit amount into a major-unit amount.
    pub fn from_minor_units(minor: i64) -> Self {
        Self(Decimal::from(minor) / Decimal::from(MINOR_UNITS_PER_UNIT))
    }

    /// Convert to minor units, rounding to the nearest unit.
    ///
    /// Used for cash-difference postings.
    pub fn to_minor_units_rounded(&self) -> i64 {
        let scaled = self.0 * Decimal::from(MINOR_UNITS_PER_UNIT);
        scaled
            .round()
            .to_i64()
            .expect("minor-unit amount exceeds i64 range")
    }

    /// Convert to minor units, truncating toward zero.
    ///
    /// Used for holding-effect postings, which drop the sub-milliunit
    /// remainder rather than rounding it.
    pub fn to_minor_units_truncated(&self) -> i64 {
        let scaled = self.0 * Decimal::from(MINOR_UNITS_PER_UNIT);
        scaled
            .trunc()
            .to_i64()
            .expect("minor-unit amount exceeds i64 range")
    }

    /// Whether the magnitude of this amount reaches `threshold`.
    ///
    /// The boundary is inclusive: an amount exactly equal to the
    /// threshold is postable.
    #[inline]
    pub fn meets_threshold(&self, threshold: Decimal) -> bool {
        self.0.abs() >= threshold
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// A per-share price in the source currency (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// An FX rate quoted as source-currency units per target-currency unit
/// (USD per GBP). Dividing a USD amount by the rate yields GBP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FxRate(pub Decimal);

impl FxRate {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert a source-currency amount into the ledger currency.
    ///
    /// Returns `None` for a zero rate.
    #[inline]
    pub fn to_target(&self, source_amount: Decimal) -> Option<Money> {
        if self.0.is_zero() {
            return None;
        }
        Some(Money(source_amount / self.0))
    }
}

impl fmt::Display for FxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FxRate {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for FxRate {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minor_units_round_trip() {
        let m = Money::from_minor_units(1234);
        assert_eq!(m.inner(), dec!(1.234));
        assert_eq!(m.to_minor_units_rounded(), 1234);
    }

    #[test]
    fn test_minor_units_rounding_vs_truncation() {
        let m = Money::new(dec!(8.4375));
        assert_eq!(m.to_minor_units_rounded(), 8438);
        assert_eq!(m.to_minor_units_truncated(), 8437);

        let n = Money::new(dec!(-6.4904));
        assert_eq!(n.to_minor_units_rounded(), -6490);
        assert_eq!(n.to_minor_units_truncated(), -6490);
    }

    #[test]
    fn test_truncation_is_toward_zero() {
        assert_eq!(Money::new(dec!(-0.0019)).to_minor_units_truncated(), -1);
        assert_eq!(Money::new(dec!(0.0019)).to_minor_units_truncated(), 1);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        let threshold = dec!(0.01);
        assert!(Money::new(dec!(0.01)).meets_threshold(threshold));
        assert!(Money::new(dec!(-0.01)).meets_threshold(threshold));
        assert!(!Money::new(dec!(0.009999)).meets_threshold(threshold));
    }

    #[test]
    fn test_fx_to_target() {
        let rate = FxRate::new(dec!(1.28));
        let gbp = rate.to_target(dec!(550.80)).unwrap();
        assert_eq!(gbp.inner(), dec!(430.3125));
        assert!(FxRate::new(Decimal::ZERO).to_target(dec!(1)).is_none());
    }
}
