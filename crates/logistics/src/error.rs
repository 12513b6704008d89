//! Logistics error model.

use thiserror::Error;

use holdco_core::DomainError;
use holdco_hr::HrError;

use crate::transport::TransportStatus;

pub type CargoResult<T> = Result<T, CargoError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CargoError {
    /// Malformed input: negative capacity, zero quantity, bad fill rate.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Hr(#[from] HrError),

    /// Not enough free space or carrying capacity at the destination.
    #[error("loading is impossible: {0}")]
    LoadingImpossible(String),

    /// The source does not hold the requested products, or removing capacity
    /// would strand loaded cargo.
    #[error("unloading is impossible: {0}")]
    UnloadingImpossible(String),

    #[error("transport is {status}, operation not allowed")]
    TransportUnavailable { status: TransportStatus },

    #[error("no wagon with capacity {capacity} and carrying capacity {carrying_capacity}")]
    WagonNotFound {
        capacity: rust_decimal::Decimal,
        carrying_capacity: rust_decimal::Decimal,
    },
}

impl CargoError {
    pub fn loading(msg: impl Into<String>) -> Self {
        Self::LoadingImpossible(msg.into())
    }

    pub fn unloading(msg: impl Into<String>) -> Self {
        Self::UnloadingImpossible(msg.into())
    }
}
