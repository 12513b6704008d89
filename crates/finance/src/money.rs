//! Currency-typed monetary amounts.

use core::cmp::Ordering;
use core::ops::{Add, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use holdco_core::{DomainError, ValueObject, ensure_non_negative, ensure_positive};

use crate::error::{FinanceError, FinanceResult};

/// Decimal places kept after a division.
pub const DIVISION_SCALE: u32 = 5;

/// Closed set of supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Byn,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Byn];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Byn => "BYN",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Immutable non-negative amount in a single currency.
///
/// Arithmetic only works between equal currencies; anything else is a
/// [`FinanceError::CurrencyMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> FinanceResult<Self> {
        ensure_non_negative("money amount", amount)?;
        Ok(Self { amount, currency })
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn ensure_same_currency(&self, other: &Money) -> FinanceResult<()> {
        if self.currency != other.currency {
            return Err(FinanceError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }

    pub fn try_add(&self, other: &Money) -> FinanceResult<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| DomainError::validation("money amount overflow"))?;
        Money::new(amount, self.currency)
    }

    /// Subtracts `other`; a result below zero is rejected.
    pub fn try_sub(&self, other: &Money) -> FinanceResult<Money> {
        self.ensure_same_currency(other)?;
        Money::new(self.amount - other.amount, self.currency)
    }

    pub fn mul(&self, factor: Decimal) -> FinanceResult<Money> {
        ensure_non_negative("multiplier", factor)?;
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| DomainError::validation("money amount overflow"))?;
        Money::new(amount, self.currency)
    }

    /// Divides and rounds to [`DIVISION_SCALE`] places, half away from zero.
    pub fn div(&self, divisor: Decimal) -> FinanceResult<Money> {
        ensure_positive("divisor", divisor)?;
        let amount = self
            .amount
            .checked_div(divisor)
            .ok_or_else(|| DomainError::validation("money amount overflow"))?
            .round_dp_with_strategy(DIVISION_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Money::new(amount, self.currency)
    }

    /// Orders two amounts of the same currency.
    pub fn try_cmp(&self, other: &Money) -> FinanceResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }
}

impl ValueObject for Money {}

impl Add for Money {
    type Output = FinanceResult<Money>;

    fn add(self, rhs: Money) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl Sub for Money {
    type Output = FinanceResult<Money>;

    fn sub(self, rhs: Money) -> Self::Output {
        self.try_sub(&rhs)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: Currency,
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawMoney::deserialize(deserializer)?;
        Money::new(raw.amount, raw.currency).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::Usd).unwrap()
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = Money::new(dec!(-10), Currency::Usd).unwrap_err();
        assert!(matches!(err, FinanceError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(usd(dec!(100)), usd(dec!(100.00)));
        assert_ne!(usd(dec!(100)), usd(dec!(200)));
        assert_ne!(usd(dec!(100)), Money::new(dec!(100), Currency::Eur).unwrap());
    }

    #[test]
    fn arithmetic_within_one_currency() {
        let a = usd(dec!(100));
        let b = usd(dec!(50));
        assert_eq!((a + b).unwrap(), usd(dec!(150)));
        assert_eq!((a - b).unwrap(), usd(dec!(50)));
        assert_eq!(a.mul(dec!(2)).unwrap(), usd(dec!(200)));
        assert_eq!(a.mul(dec!(0.5)).unwrap(), usd(dec!(50)));
    }

    #[test]
    fn adding_different_currencies_is_an_error() {
        let err = (usd(dec!(10)) + Money::new(dec!(10), Currency::Eur).unwrap()).unwrap_err();
        assert_eq!(
            err,
            FinanceError::CurrencyMismatch {
                left: Currency::Usd,
                right: Currency::Eur,
            }
        );
    }

    #[test]
    fn comparison_requires_same_currency() {
        let a = usd(dec!(50));
        assert_eq!(a.try_cmp(&usd(dec!(100))).unwrap(), Ordering::Less);
        assert_eq!(a.try_cmp(&usd(dec!(50))).unwrap(), Ordering::Equal);
        assert!(a.try_cmp(&Money::new(dec!(100), Currency::Eur).unwrap()).is_err());
    }

    #[test]
    fn subtraction_below_zero_is_rejected() {
        assert!(usd(dec!(10)).try_sub(&usd(dec!(11))).is_err());
    }

    #[test]
    fn division_rounds_half_up_to_five_places() {
        assert_eq!(usd(dec!(1)).div(dec!(3)).unwrap().amount(), dec!(0.33333));
        assert_eq!(usd(dec!(2)).div(dec!(3)).unwrap().amount(), dec!(0.66667));
        assert_eq!(usd(dec!(0.000005)).div(dec!(1)).unwrap().amount(), dec!(0.00001));
        assert!(usd(dec!(1)).div(Decimal::ZERO).is_err());
    }

    #[test]
    fn display_and_serde() {
        let m = usd(dec!(12.5));
        assert_eq!(m.to_string(), "12.5 USD");

        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        assert!(serde_json::from_str::<Money>(r#"{"amount":"-1","currency":"EUR"}"#).is_err());
    }
}
