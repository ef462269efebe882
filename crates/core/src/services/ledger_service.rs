use tracing::debug;

use crate::amount::parse_amount;
use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::date::DayDate;
use crate::models::ledger::Ledger;
use crate::models::transaction::{Transaction, TransactionKind, TxStamp};
use crate::services::balance_service::BalanceService;

/// What to do with transactions still referencing an account when it is
/// removed. There is no default — the caller decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Refuse to remove the account while transactions reference it.
    Block,
    /// Remove the account and drop every transaction referencing it.
    /// Nothing is reversed: the balance leaves with the account.
    Cascade,
}

/// Owns the ledger mutations: account lifecycle and the transaction logs.
///
/// Validation happens before any in-memory change, so a rejected operation
/// leaves the ledger untouched. Persistence is the facade's job, once per
/// logical operation.
pub struct LedgerService {
    balance: BalanceService,
}

impl LedgerService {
    pub fn new() -> Self {
        Self {
            balance: BalanceService::new(),
        }
    }

    /// Create an account seeded with one opening history point.
    ///
    /// The opening balance allows zero but not negative values.
    pub fn add_account(
        &self,
        ledger: &mut Ledger,
        name: &str,
        balance_input: &str,
        today: DayDate,
    ) -> Result<(), CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Account name must not be empty".into(),
            ));
        }
        let balance = parse_amount(balance_input).ok_or_else(|| {
            CoreError::ValidationError(format!(
                "'{balance_input}' is not a valid opening balance"
            ))
        })?;
        if balance < 0.0 {
            return Err(CoreError::ValidationError(
                "Opening balance must not be negative".into(),
            ));
        }
        if ledger.has_account(name) {
            return Err(CoreError::DuplicateAccount(name.to_string()));
        }
        ledger.accounts.push(Account::new(name, balance, today));
        debug!(account = name, balance, "account created");
        Ok(())
    }

    /// Manually set an account's balance, recording a dated history point.
    ///
    /// Zero is allowed, negative is not. A same-date update overwrites the
    /// existing point instead of appending a second one.
    pub fn update_balance(
        &self,
        ledger: &mut Ledger,
        name: &str,
        balance_input: &str,
        today: DayDate,
    ) -> Result<(), CoreError> {
        let value = parse_amount(balance_input).ok_or_else(|| {
            CoreError::ValidationError(format!("'{balance_input}' is not a valid balance"))
        })?;
        if value < 0.0 {
            return Err(CoreError::ValidationError(
                "Balance must not be negative".into(),
            ));
        }
        let account = ledger
            .account_mut(name)
            .ok_or_else(|| CoreError::AccountNotFound(name.to_string()))?;
        account.balance = value;
        account.record_snapshot(today, value);
        debug!(account = name, value, "balance updated");
        Ok(())
    }

    /// Remove an account under an explicit removal policy.
    pub fn remove_account(
        &self,
        ledger: &mut Ledger,
        name: &str,
        policy: RemovalPolicy,
    ) -> Result<(), CoreError> {
        if !ledger.has_account(name) {
            return Err(CoreError::AccountNotFound(name.to_string()));
        }
        let referenced = ledger.transactions().any(|t| t.account == name);
        match policy {
            RemovalPolicy::Block if referenced => {
                return Err(CoreError::AccountInUse(name.to_string()));
            }
            RemovalPolicy::Cascade => {
                ledger.expenses.retain(|t| t.account != name);
                ledger.incomes.retain(|t| t.account != name);
            }
            RemovalPolicy::Block => {}
        }
        ledger.accounts.retain(|a| a.name != name);
        debug!(account = name, ?policy, "account removed");
        Ok(())
    }

    /// Validate and record a transaction, applying its effect to the
    /// owning account. Returns the new transaction's id.
    pub fn record(
        &self,
        ledger: &mut Ledger,
        kind: TransactionKind,
        account: &str,
        amount_input: &str,
        reason: &str,
        stamp: TxStamp,
    ) -> Result<i64, CoreError> {
        let account = account.trim();
        let reason = reason.trim();
        if account.is_empty() {
            return Err(CoreError::ValidationError("No account selected".into()));
        }
        let amount = parse_amount(amount_input).ok_or_else(|| {
            CoreError::ValidationError(format!("'{amount_input}' is not a valid amount"))
        })?;
        if amount <= 0.0 {
            return Err(CoreError::ValidationError(
                "Amount must be greater than zero".into(),
            ));
        }
        if reason.is_empty() {
            return Err(CoreError::ValidationError(
                "Reason must not be empty".into(),
            ));
        }
        if !ledger.has_account(account) {
            return Err(CoreError::AccountNotFound(account.to_string()));
        }

        let id = stamp.id;
        let transaction = Transaction::new(kind, account, amount, reason, stamp);
        self.balance
            .apply(&mut ledger.accounts, kind, account, amount);
        ledger.collection_mut(kind).push(transaction);
        debug!(kind = %kind, account, amount, id, "transaction recorded");
        Ok(id)
    }

    /// Delete a transaction by id, reversing its exact original effect on
    /// the owning account.
    pub fn delete(
        &self,
        ledger: &mut Ledger,
        kind: TransactionKind,
        id: i64,
    ) -> Result<(), CoreError> {
        let collection = ledger.collection_mut(kind);
        let idx = collection
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        let removed = collection.remove(idx);
        self.balance.reverse(
            &mut ledger.accounts,
            removed.kind,
            &removed.account,
            removed.amount,
        );
        debug!(kind = %kind, id, "transaction deleted");
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
