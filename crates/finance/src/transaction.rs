//! Immutable ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use holdco_core::{AccountId, TransactionId};

use crate::error::{FinanceError, FinanceResult};
use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Transfer,
    Deposit,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// One ledger entry.
///
/// `source_money` is what left the source (or arrived from outside for a
/// deposit); `target_money` is the same value converted into the target's
/// currency. The party rules per type are checked in [`Transaction::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    transaction_type: TransactionType,
    source_money: Money,
    target_money: Money,
    source: Option<AccountId>,
    target: Option<AccountId>,
    description: String,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a `Pending` entry with a fresh id.
    pub fn new(
        transaction_type: TransactionType,
        source_money: Money,
        target_money: Money,
        source: Option<AccountId>,
        target: Option<AccountId>,
        description: impl Into<String>,
    ) -> FinanceResult<Self> {
        match transaction_type {
            TransactionType::Transfer | TransactionType::Refund => {
                if source.is_none() || target.is_none() {
                    return Err(FinanceError::policy(format!(
                        "{transaction_type:?} must have both source and target"
                    )));
                }
            }
            TransactionType::Deposit => {
                if target.is_none() {
                    return Err(FinanceError::policy("Deposit must have a target"));
                }
                if source.is_some() {
                    return Err(FinanceError::policy("Deposit cannot have a source"));
                }
            }
        }

        Ok(Self {
            id: TransactionId::new(),
            transaction_type,
            source_money,
            target_money,
            source,
            target,
            description: description.into(),
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Copy of this entry with a final status.
    pub fn with_status(self, status: TransactionStatus) -> Self {
        Self { status, ..self }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn source_money(&self) -> Money {
        self.source_money
    }

    pub fn target_money(&self) -> Money {
        self.target_money
    }

    pub fn source(&self) -> Option<AccountId> {
        self.source
    }

    pub fn target(&self) -> Option<AccountId> {
        self.target
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
