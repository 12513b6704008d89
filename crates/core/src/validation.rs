//! Shared validation checks used by constructors and setters.

use core::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Fails if `value` is below zero (or not comparable to zero, e.g. NaN).
pub fn ensure_non_negative<T>(field: &str, value: T) -> DomainResult<T>
where
    T: PartialOrd + Default + Display + Copy,
{
    match value.partial_cmp(&T::default()) {
        Some(core::cmp::Ordering::Less) => Err(DomainError::validation(format!(
            "{field} must be non-negative, got {value}"
        ))),
        None => Err(DomainError::validation(format!(
            "{field} must be a number, got {value}"
        ))),
        Some(_) => Ok(value),
    }
}

/// Fails if `value` is not strictly above zero.
pub fn ensure_positive<T>(field: &str, value: T) -> DomainResult<T>
where
    T: PartialOrd + Default + Display + Copy,
{
    match value.partial_cmp(&T::default()) {
        Some(core::cmp::Ordering::Greater) => Ok(value),
        _ => Err(DomainError::validation(format!(
            "{field} must be positive, got {value}"
        ))),
    }
}

/// Fails if `value` is empty or whitespace-only.
pub fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// A number that is never negative.
///
/// The only ways in are [`NonNegative::new`], [`NonNegative::set`] and
/// deserialization, all of which run the check.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NonNegative<T>(T);

impl<T> NonNegative<T>
where
    T: PartialOrd + Default + Display + Copy,
{
    pub fn new(field: &str, value: T) -> DomainResult<Self> {
        ensure_non_negative(field, value).map(Self)
    }

    pub fn get(&self) -> T {
        self.0
    }

    pub fn set(&mut self, field: &str, value: T) -> DomainResult<()> {
        self.0 = ensure_non_negative(field, value)?;
        Ok(())
    }
}

impl<'de, T> Deserialize<'de> for NonNegative<T>
where
    T: Deserialize<'de> + PartialOrd + Default + Display + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = T::deserialize(deserializer)?;
        NonNegative::new("value", raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_and_positive_pass() {
        assert_eq!(ensure_non_negative("x", 0u32).unwrap(), 0);
        assert_eq!(ensure_non_negative("x", dec!(1.5)).unwrap(), dec!(1.5));
        assert_eq!(ensure_non_negative("x", 2.0f64).unwrap(), 2.0);
    }

    #[test]
    fn negative_is_rejected_with_field_name() {
        let err = ensure_non_negative("capacity", dec!(-1)).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("capacity must be non-negative, got -1")
        );
    }

    #[test]
    fn nan_is_rejected() {
        assert!(ensure_non_negative("speed", f64::NAN).is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(ensure_positive("rate", Decimal::ZERO).is_err());
        assert!(ensure_positive("rate", dec!(0.3)).is_ok());
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(ensure_not_blank("name", "  ").is_err());
        assert!(ensure_not_blank("name", "Anna").is_ok());
    }

    #[test]
    fn setter_keeps_old_value_on_failure() {
        let mut value = NonNegative::new("experience", 3i64).unwrap();
        assert!(value.set("experience", -1).is_err());
        assert_eq!(value.get(), 3);
        value.set("experience", 7).unwrap();
        assert_eq!(value.get(), 7);
    }

    #[test]
    fn deserialization_runs_the_check() {
        let ok: NonNegative<i64> = serde_json::from_str("4").unwrap();
        assert_eq!(ok.get(), 4);
        assert!(serde_json::from_str::<NonNegative<i64>>("-4").is_err());
    }
}
