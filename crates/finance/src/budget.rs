//! Balances and the account abstraction consumed by the transfer engine.

use holdco_core::AccountId;

use crate::error::{FinanceError, FinanceResult};
use crate::money::{Currency, Money};

/// Anything holding a currency-typed balance that money can move in and out of.
///
/// `withdraw` and `deposit` may fail; [`crate::BudgetManagementService`]
/// compensates a half-done transfer.
pub trait Account {
    fn account_id(&self) -> AccountId;

    fn balance(&self) -> Money;

    fn withdraw(&mut self, money: Money) -> FinanceResult<()>;

    fn deposit(&mut self, money: Money) -> FinanceResult<()>;
}

/// Single balance whose currency is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    balance: Money,
}

impl Budget {
    pub fn new(balance: Money) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }

    pub fn can_withdraw(&self, money: &Money) -> FinanceResult<bool> {
        self.balance.ensure_same_currency(money)?;
        Ok(self.balance.amount() >= money.amount())
    }

    pub fn withdraw(&mut self, money: Money) -> FinanceResult<()> {
        if !self.can_withdraw(&money)? {
            return Err(FinanceError::InsufficientFunds {
                requested: money.amount(),
                available: self.balance.amount(),
            });
        }
        self.balance = self.balance.try_sub(&money)?;
        Ok(())
    }

    pub fn deposit(&mut self, money: Money) -> FinanceResult<()> {
        self.balance = self.balance.try_add(&money)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn budget() -> Budget {
        Budget::new(Money::new(dec!(1000), Currency::Usd).unwrap())
    }

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::Usd).unwrap()
    }

    #[test]
    fn initial_balance() {
        let b = budget();
        assert_eq!(b.balance(), usd(dec!(1000)));
        assert_eq!(b.currency(), Currency::Usd);
    }

    #[test]
    fn deposit_adds() {
        let mut b = budget();
        b.deposit(usd(dec!(500))).unwrap();
        assert_eq!(b.balance(), usd(dec!(1500)));
    }

    #[test]
    fn withdraw_subtracts() {
        let mut b = budget();
        b.withdraw(usd(dec!(500))).unwrap();
        assert_eq!(b.balance(), usd(dec!(500)));
    }

    #[test]
    fn withdraw_everything_is_allowed() {
        let mut b = budget();
        b.withdraw(usd(dec!(1000))).unwrap();
        assert!(b.balance().is_zero());
    }

    #[test]
    fn insufficient_funds_leave_balance_untouched() {
        let mut b = budget();
        let err = b.withdraw(usd(dec!(1500))).unwrap_err();
        assert_eq!(
            err,
            FinanceError::InsufficientFunds {
                requested: dec!(1500),
                available: dec!(1000),
            }
        );
        assert_eq!(b.balance(), usd(dec!(1000)));
    }

    #[test]
    fn wrong_currency_is_rejected_both_ways() {
        let mut b = budget();
        let eur = Money::new(dec!(100), Currency::Eur).unwrap();
        assert!(matches!(
            b.withdraw(eur),
            Err(FinanceError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            b.deposit(eur),
            Err(FinanceError::CurrencyMismatch { .. })
        ));
        assert_eq!(b.balance(), usd(dec!(1000)));
    }
}
