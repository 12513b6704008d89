//! Transfer engine: moves money between accounts and keeps the ledger.

use holdco_core::TransactionId;

use crate::budget::Account;
use crate::currency::CurrencyService;
use crate::error::{FinanceError, FinanceResult};
use crate::money::Money;
use crate::transaction::{Transaction, TransactionStatus, TransactionType};

/// Orchestrates transfers, deposits and refunds between [`Account`]s.
///
/// - Amounts are converted into the receiving account's currency.
/// - A transfer whose deposit fails is compensated by re-depositing the
///   withdrawn amount into the source before the error surfaces.
/// - Every recorded operation lands in an append-only ledger.
#[derive(Debug, Clone)]
pub struct BudgetManagementService {
    currency_service: CurrencyService,
    history: Vec<Transaction>,
}

impl BudgetManagementService {
    pub fn new(currency_service: CurrencyService) -> Self {
        Self {
            currency_service,
            history: Vec::new(),
        }
    }

    pub fn currency_service(&self) -> &CurrencyService {
        &self.currency_service
    }

    /// Move `source_money` from `source` to `target`.
    ///
    /// Returns the recorded entry: `Completed` on success, `Failed` when a
    /// policy violation stopped the movement. Any other failure is returned
    /// as an error after rollback and nothing is recorded.
    pub fn transfer<S, T>(
        &mut self,
        source_money: Money,
        source: &mut S,
        target: &mut T,
        description: impl Into<String>,
    ) -> FinanceResult<Transaction>
    where
        S: Account + ?Sized,
        T: Account + ?Sized,
    {
        source_money.ensure_same_currency(&source.balance())?;

        let target_money = self
            .currency_service
            .convert(&source_money, target.balance().currency())?;

        let transaction = Transaction::new(
            TransactionType::Transfer,
            source_money,
            target_money,
            Some(source.account_id()),
            Some(target.account_id()),
            description,
        )?;

        let status = match move_funds(source, target, source_money, target_money) {
            Ok(()) => TransactionStatus::Completed,
            Err(err) if err.is_policy_violation() => {
                tracing::warn!(
                    transaction_id = %transaction.id(),
                    error = %err,
                    "transfer rejected by account policy"
                );
                TransactionStatus::Failed
            }
            Err(err) => {
                tracing::warn!(
                    transaction_id = %transaction.id(),
                    error = %err,
                    "transfer aborted"
                );
                return Err(err);
            }
        };

        let transaction = transaction.with_status(status);
        tracing::info!(
            transaction_id = %transaction.id(),
            source = %source_money,
            target = %target_money,
            status = ?status,
            "transfer recorded"
        );
        self.history.push(transaction.clone());
        Ok(transaction)
    }

    /// Inject external funds into `account`, converted to its currency.
    pub fn deposit<A>(
        &mut self,
        source_money: Money,
        account: &mut A,
        description: impl Into<String>,
    ) -> FinanceResult<Transaction>
    where
        A: Account + ?Sized,
    {
        let target_money = self
            .currency_service
            .convert(&source_money, account.balance().currency())?;

        let transaction = Transaction::new(
            TransactionType::Deposit,
            source_money,
            target_money,
            None,
            Some(account.account_id()),
            description,
        )?;

        account.deposit(target_money)?;

        let transaction = transaction.with_status(TransactionStatus::Completed);
        tracing::info!(
            transaction_id = %transaction.id(),
            amount = %target_money,
            "deposit recorded"
        );
        self.history.push(transaction.clone());
        Ok(transaction)
    }

    /// Send the proceeds of a completed transfer back to where they came from.
    ///
    /// The caller hands in the two accounts of the original transfer; they
    /// must match the parties recorded in the ledger.
    pub fn refund<S, T>(
        &mut self,
        transaction_id: TransactionId,
        original_source: &mut S,
        original_target: &mut T,
    ) -> FinanceResult<Transaction>
    where
        S: Account + ?Sized,
        T: Account + ?Sized,
    {
        let original = self
            .find(transaction_id)
            .ok_or(FinanceError::TransactionNotFound(transaction_id))?;

        if original.transaction_type() != TransactionType::Transfer {
            return Err(FinanceError::policy("can only refund transfers"));
        }
        if original.status() != TransactionStatus::Completed {
            return Err(FinanceError::policy(format!(
                "transaction {transaction_id} did not complete, nothing to refund"
            )));
        }
        if original.source() != Some(original_source.account_id())
            || original.target() != Some(original_target.account_id())
        {
            return Err(FinanceError::policy(format!(
                "accounts do not match the parties of transaction {transaction_id}"
            )));
        }

        tracing::info!(%transaction_id, "refunding transfer");
        self.transfer(
            original.target_money(),
            original_target,
            original_source,
            format!("Refund for {transaction_id}"),
        )
    }

    /// Most recent entry with the given id.
    pub fn find(&self, transaction_id: TransactionId) -> Option<Transaction> {
        self.history
            .iter()
            .rev()
            .find(|t| t.id() == transaction_id)
            .cloned()
    }

    /// Snapshot of the ledger in append order.
    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.history.clone()
    }
}

fn move_funds<S, T>(
    source: &mut S,
    target: &mut T,
    source_money: Money,
    target_money: Money,
) -> FinanceResult<()>
where
    S: Account + ?Sized,
    T: Account + ?Sized,
{
    source.withdraw(source_money)?;

    if let Err(cause) = target.deposit(target_money) {
        if let Err(rollback) = source.deposit(source_money) {
            tracing::error!(
                account = %source.account_id(),
                amount = %source_money,
                error = %rollback,
                "compensating deposit failed, funds are in flight"
            );
            return Err(FinanceError::RollbackFailed {
                cause: Box::new(cause),
                rollback: Box::new(rollback),
            });
        }
        tracing::info!(
            account = %source.account_id(),
            amount = %source_money,
            "withdrawal rolled back"
        );
        return Err(cause);
    }

    Ok(())
}
