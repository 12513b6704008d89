//! Environment-driven settings.
//!
//! Reading the environment is kept apart from parsing so the parsing rules can
//! be tested without touching process state.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;

use holdco_finance::{Currency, CurrencyService};
use holdco_logistics::DEFAULT_FILL_RATE;

pub const RATES_FILE_VAR: &str = "HOLDCO_RATES_FILE";
pub const FILL_RATE_VAR: &str = "HOLDCO_FILL_RATE";

#[derive(Debug, Clone)]
pub struct Settings {
    pub rates: CurrencyService,
    pub fill_rate: Decimal,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let rates = match std::env::var(RATES_FILE_VAR) {
            Ok(path) => load_rates(Path::new(&path))?,
            Err(_) => {
                tracing::warn!("{RATES_FILE_VAR} not set; using built-in USD/EUR/BYN rates");
                default_rates()?
            }
        };
        let fill_rate = parse_fill_rate(std::env::var(FILL_RATE_VAR).ok().as_deref())?;
        Ok(Self { rates, fill_rate })
    }
}

/// USD 1.0, EUR 1.1, BYN 0.3.
pub fn default_rates() -> anyhow::Result<CurrencyService> {
    CurrencyService::new([
        (Currency::Usd, Decimal::ONE),
        (Currency::Eur, Decimal::new(11, 1)),
        (Currency::Byn, Decimal::new(3, 1)),
    ])
    .context("built-in rate table")
}

pub fn load_rates(path: &Path) -> anyhow::Result<CurrencyService> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading rate table {}", path.display()))?;
    CurrencyService::from_json(&json)
        .with_context(|| format!("parsing rate table {}", path.display()))
}

/// `None` or a blank value means [`DEFAULT_FILL_RATE`].
pub fn parse_fill_rate(value: Option<&str>) -> anyhow::Result<Decimal> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_FILL_RATE);
    };
    let rate = Decimal::from_str(raw).with_context(|| format!("{FILL_RATE_VAR}={raw:?}"))?;
    anyhow::ensure!(
        rate >= Decimal::ZERO,
        "{FILL_RATE_VAR} must be non-negative, got {rate}"
    );
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fill_rate_defaults_and_parses() {
        assert_eq!(parse_fill_rate(None).unwrap(), dec!(0.9));
        assert_eq!(parse_fill_rate(Some("  ")).unwrap(), dec!(0.9));
        assert_eq!(parse_fill_rate(Some("0.75")).unwrap(), dec!(0.75));
        assert_eq!(parse_fill_rate(Some("1.2")).unwrap(), dec!(1.2));
    }

    #[test]
    fn fill_rate_rejects_garbage_and_negatives() {
        assert!(parse_fill_rate(Some("lots")).is_err());
        assert!(parse_fill_rate(Some("-0.5")).is_err());
    }

    #[test]
    fn default_rate_table() {
        let rates = default_rates().unwrap().rates();
        assert_eq!(rates[&Currency::Usd], dec!(1));
        assert_eq!(rates[&Currency::Eur], dec!(1.1));
        assert_eq!(rates[&Currency::Byn], dec!(0.3));
    }

    #[test]
    fn rate_file_is_read() {
        let path = std::env::temp_dir().join(format!("holdco-rates-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"USD": "1", "EUR": "1.25"}"#).unwrap();
        let rates = load_rates(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(rates.rates()[&Currency::Eur], dec!(1.25));

        assert!(load_rates(Path::new("/definitely/not/here.json")).is_err());
    }
}
