//! Companies and corporate groups.
//!
//! A [`Company`] is an [`holdco_finance::Account`], so the transfer engine can
//! move money between group members directly.

pub mod company;
pub mod error;
pub mod group;
pub mod ownership;

pub use company::{Company, CompanyDetails};
pub use error::{CompanyError, CompanyResult};
pub use group::CorporateGroup;
pub use ownership::Ownership;
