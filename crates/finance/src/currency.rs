//! Currency conversion against a fixed rate table.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use holdco_core::{DomainError, ensure_positive};

use crate::error::{FinanceError, FinanceResult};
use crate::money::{Currency, Money};

/// Rates relative to a common base currency.
pub type RateTable = BTreeMap<Currency, Decimal>;

/// Converts money using rates captured at construction.
///
/// The table never changes afterwards; build a new service to model a rate
/// change.
#[derive(Debug, Clone)]
pub struct CurrencyService {
    rates: RateTable,
    created_at: DateTime<Utc>,
}

impl CurrencyService {
    pub fn new(rates: impl IntoIterator<Item = (Currency, Decimal)>) -> FinanceResult<Self> {
        let rates: RateTable = rates.into_iter().collect();
        for (currency, rate) in &rates {
            ensure_positive(&format!("{currency} rate"), *rate)?;
        }
        Ok(Self {
            rates,
            created_at: Utc::now(),
        })
    }

    /// Parses a table such as `{"USD": "1.0", "EUR": "1.1"}`.
    pub fn from_json(json: &str) -> FinanceResult<Self> {
        let rates: RateTable = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("rate table: {e}")))?;
        Self::new(rates)
    }

    pub fn rates(&self) -> RateTable {
        self.rates.clone()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn rate(&self, currency: Currency) -> FinanceResult<Decimal> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or(FinanceError::UnknownRate(currency))
    }

    /// `amount * rate[source] / rate[target]`, rounded like any money division.
    pub fn convert(&self, money: &Money, target: Currency) -> FinanceResult<Money> {
        if money.currency() == target {
            return Ok(*money);
        }
        let source_rate = self.rate(money.currency())?;
        let target_rate = self.rate(target)?;

        Money::new(money.amount(), target)?
            .mul(source_rate)?
            .div(target_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service() -> CurrencyService {
        CurrencyService::new([
            (Currency::Usd, dec!(1.0)),
            (Currency::Eur, dec!(1.1)),
            (Currency::Byn, dec!(0.3)),
        ])
        .unwrap()
    }

    #[test]
    fn same_currency_is_identity() {
        let m = Money::new(dec!(100), Currency::Usd).unwrap();
        assert_eq!(service().convert(&m, Currency::Usd).unwrap(), m);
    }

    #[test]
    fn usd_to_eur() {
        let m = Money::new(dec!(110), Currency::Usd).unwrap();
        let converted = service().convert(&m, Currency::Eur).unwrap();
        assert_eq!(converted, Money::new(dec!(100), Currency::Eur).unwrap());
    }

    #[test]
    fn eur_to_usd() {
        let m = Money::new(dec!(100), Currency::Eur).unwrap();
        let converted = service().convert(&m, Currency::Usd).unwrap();
        assert_eq!(converted.currency(), Currency::Usd);
        assert_eq!(converted.amount(), dec!(110));
    }

    #[test]
    fn usd_to_byn() {
        let m = Money::new(dec!(30), Currency::Usd).unwrap();
        let converted = service().convert(&m, Currency::Byn).unwrap();
        assert_eq!(converted.amount(), dec!(100));
    }

    #[test]
    fn missing_rate_is_reported() {
        let svc = CurrencyService::new([(Currency::Usd, dec!(1))]).unwrap();
        let m = Money::new(dec!(1), Currency::Usd).unwrap();
        assert_eq!(
            svc.convert(&m, Currency::Byn).unwrap_err(),
            FinanceError::UnknownRate(Currency::Byn)
        );
    }

    #[test]
    fn non_positive_rates_are_rejected() {
        assert!(CurrencyService::new([(Currency::Usd, dec!(0))]).is_err());
        assert!(CurrencyService::new([(Currency::Eur, dec!(-1.1))]).is_err());
    }

    #[test]
    fn rates_snapshot_is_a_copy() {
        let svc = service();
        let mut snapshot = svc.rates();
        snapshot.insert(Currency::Usd, dec!(42));
        assert_eq!(svc.rates()[&Currency::Usd], dec!(1.0));
    }

    #[test]
    fn table_loads_from_json() {
        let svc = CurrencyService::from_json(r#"{"USD": "1.0", "EUR": "1.1"}"#).unwrap();
        assert_eq!(svc.rates().len(), 2);
        assert!(CurrencyService::from_json(r#"{"GBP": "1.3"}"#).is_err());
    }
}
