use thiserror::Error;

use holdco_core::DomainError;
use holdco_finance::FinanceError;

use crate::employee::EmployeeId;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Finance(#[from] FinanceError),

    #[error("employee '{name}' is already hired")]
    AlreadyHired { name: String },

    #[error("employee {id} is not hired")]
    NotHired { id: EmployeeId },

    /// The employee lacks a qualification for the requested duty.
    #[error("employee cannot do that: {0}")]
    Capability(String),
}
