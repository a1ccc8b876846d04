//! Prices

use std::ops::Deref;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors converting a major-unit amount into a [`Price`].
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Prices can't be negative.
    #[error("price {0} is negative")]
    Negative(Decimal),

    /// The amount doesn't fit into minor units.
    #[error("price {0} overflows minor units")]
    Overflow(Decimal),
}

/// Represents a price in pence/cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self::new(0);

    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Converts a major-unit amount (e.g. `12.34`) into minor units for `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the amount is negative or too large.
    pub fn from_major(amount: Decimal, currency: &Currency) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        let scale = Decimal::from(10_u64.pow(currency.exponent));

        amount
            .checked_mul(scale)
            .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|minor| minor.to_u64())
            .map(Self::new)
            .ok_or(PriceError::Overflow(amount))
    }

    /// Returns the price as a major-unit decimal for `currency`.
    pub fn to_major(self, currency: &Currency) -> Decimal {
        Decimal::from(self.value) / Decimal::from(10_u64.pow(currency.exponent))
    }

    /// Minor units as a signed value, saturating at `i64::MAX`.
    pub fn to_minor_i64(self) -> i64 {
        i64::try_from(self.value).unwrap_or(i64::MAX)
    }

    /// Returns the price as money in the given currency.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(self.to_minor_i64(), currency)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{JPY, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn price_derefs_to_u64() {
        let price = Price::new(100);

        assert_eq!(*price, 100);
    }

    #[test]
    fn from_major_scales_by_currency_exponent() -> TestResult {
        assert_eq!(Price::from_major(Decimal::new(1234, 2), USD)?, Price::new(1234));
        assert_eq!(Price::from_major(Decimal::new(500, 0), JPY)?, Price::new(500));

        Ok(())
    }

    #[test]
    fn from_major_rounds_half_cents_away_from_zero() -> TestResult {
        assert_eq!(Price::from_major(Decimal::new(10_005, 3), USD)?, Price::new(1001));

        Ok(())
    }

    #[test]
    fn from_major_rejects_negative_amounts() {
        let result = Price::from_major(Decimal::new(-1, 0), USD);

        assert_eq!(result, Err(PriceError::Negative(Decimal::new(-1, 0))));
    }

    #[test]
    fn to_major_round_trips_display_value() {
        assert_eq!(Price::new(29_500).to_major(USD), Decimal::new(29_500, 2));
    }

    #[test]
    fn to_money_uses_minor_units() {
        assert_eq!(Price::new(250).to_money(USD), Money::from_minor(250, USD));
    }
}
