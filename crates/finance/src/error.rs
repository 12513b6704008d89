//! Finance error model.

use rust_decimal::Decimal;
use thiserror::Error;

use holdco_core::{DomainError, TransactionId};

use crate::money::Currency;

pub type FinanceResult<T> = Result<T, FinanceError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinanceError {
    /// Malformed input (negative amount, non-positive rate, ...).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An operation mixed two currencies; the caller must convert first.
    #[error("operation between {left} and {right} is impossible, convert first")]
    CurrencyMismatch { left: Currency, right: Currency },

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// A transaction broke a structural rule (missing party, refund of a
    /// non-transfer, ...). Transfers record these as `Failed` entries.
    #[error("transaction forbidden: {0}")]
    TransactionPolicy(String),

    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),

    #[error("no exchange rate for {0}")]
    UnknownRate(Currency),

    /// Failure reported by an account implementation outside this crate.
    #[error("account error: {0}")]
    Account(String),

    /// The compensating deposit of a failed transfer failed too.
    #[error("rollback failed after `{cause}`: {rollback}")]
    RollbackFailed {
        cause: Box<FinanceError>,
        rollback: Box<FinanceError>,
    },
}

impl FinanceError {
    pub fn policy(msg: impl Into<String>) -> Self {
        Self::TransactionPolicy(msg.into())
    }

    pub fn account(msg: impl Into<String>) -> Self {
        Self::Account(msg.into())
    }

    /// Policy violations are recorded in the ledger; everything else propagates.
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::TransactionPolicy(_))
    }
}
