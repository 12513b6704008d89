//! `holdco-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the finance, HR,
//! logistics and company crates (no IO, no logging setup).

pub mod error;
pub mod id;
pub mod location;
pub mod model;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use id::{AccountId, IdGenerator, SequentialIdGenerator, TransactionId};
pub use location::{Location, Region};
pub use validation::{NonNegative, ensure_non_negative, ensure_not_blank, ensure_positive};
pub use model::{Entity, ValueObject};
