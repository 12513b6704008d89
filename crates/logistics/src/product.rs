//! Physical goods that cargo holds carry.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use holdco_core::{DomainResult, ValueObject, ensure_non_negative, ensure_not_blank};

/// A kind of product, identified by value.
///
/// Two products with the same name, unit volume and unit mass are the same
/// manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Product {
    name: String,
    volume: Decimal,
    mass: Decimal,
}

impl Product {
    pub fn new(name: impl Into<String>, volume: Decimal, mass: Decimal) -> DomainResult<Self> {
        let name = name.into();
        ensure_not_blank("product name", &name)?;
        Ok(Self {
            name,
            volume: ensure_non_negative("product volume", volume)?,
            mass: ensure_non_negative("product mass", mass)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Volume of one unit.
    pub fn volume(&self) -> Decimal {
        self.volume
    }

    /// Mass of one unit.
    pub fn mass(&self) -> Decimal {
        self.mass
    }
}

impl ValueObject for Product {}

/// Product to quantity. Quantities are always positive.
pub type Manifest = BTreeMap<Product, u64>;

#[derive(Deserialize)]
struct RawProduct {
    name: String,
    volume: Decimal,
    mass: Decimal,
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawProduct::deserialize(deserializer)?;
        Product::new(raw.name, raw.volume, raw.mass).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn equal_by_value() {
        let a = Product::new("Box", dec!(1), dec!(10)).unwrap();
        let b = Product::new("Box", dec!(1.0), dec!(10)).unwrap();
        let mut manifest = Manifest::new();
        *manifest.entry(a).or_default() += 2;
        *manifest.entry(b).or_default() += 3;
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.values().sum::<u64>(), 5);
    }

    #[test]
    fn rejects_negative_dimensions_and_blank_name() {
        assert!(Product::new("Box", dec!(-1), dec!(1)).is_err());
        assert!(Product::new("Box", dec!(1), dec!(-0.1)).is_err());
        assert!(Product::new(" ", dec!(1), dec!(1)).is_err());
        assert!(Product::new("Feather", dec!(0), dec!(0)).is_ok());
    }

    #[test]
    fn deserialization_validates() {
        let p: Product =
            serde_json::from_str(r#"{"name": "Crate", "volume": "2.5", "mass": "40"}"#).unwrap();
        assert_eq!(p.volume(), dec!(2.5));
        assert!(
            serde_json::from_str::<Product>(r#"{"name": "Crate", "volume": "-2", "mass": "1"}"#)
                .is_err()
        );
    }
}
