//! Finance module: money, budgets, currency conversion and the transfer engine.
//!
//! Pure domain logic only: no IO, no persistence. Accounts are supplied by the
//! caller through the [`Account`] trait.

pub mod budget;
pub mod currency;
pub mod error;
pub mod management;
pub mod money;
pub mod transaction;

pub use budget::{Account, Budget};
pub use currency::{CurrencyService, RateTable};
pub use error::{FinanceError, FinanceResult};
pub use management::BudgetManagementService;
pub use money::{Currency, DIVISION_SCALE, Money};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
