use thiserror::Error;

use holdco_core::{AccountId, DomainError};
use holdco_finance::FinanceError;
use holdco_hr::HrError;

pub type CompanyResult<T> = Result<T, CompanyError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompanyError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Finance(#[from] FinanceError),

    #[error(transparent)]
    Hr(#[from] HrError),

    /// Stake outside the range of the ownership kind, or the wrong parent.
    #[error("ownership stake is forbidden: {0}")]
    OwnershipStake(String),

    #[error("{name} already cooperates with the group")]
    AlreadyCooperated { name: String },

    #[error("company {id} does not cooperate with the group")]
    NotCooperated { id: AccountId },
}

impl CompanyError {
    pub fn stake(msg: impl Into<String>) -> Self {
        Self::OwnershipStake(msg.into())
    }
}
