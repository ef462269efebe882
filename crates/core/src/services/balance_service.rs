use tracing::warn;

use crate::models::account::Account;
use crate::models::transaction::TransactionKind;

/// Applies transactions to account balances and reverses them on deletion.
///
/// Pure in-memory arithmetic — no I/O. Deleting a transaction undoes its
/// exact original effect; balances are never recomputed from scratch.
pub struct BalanceService;

impl BalanceService {
    pub fn new() -> Self {
        Self
    }

    /// Apply a transaction's effect to its owning account:
    /// an expense subtracts, an income adds.
    ///
    /// A missing account is a warn-logged no-op. Write-time validation
    /// rejects unknown accounts, so this path is only reachable through
    /// legacy persisted data.
    pub fn apply(
        &self,
        accounts: &mut [Account],
        kind: TransactionKind,
        account: &str,
        amount: f64,
    ) {
        self.adjust(accounts, account, kind.sign() * amount);
    }

    /// Exactly invert a previous [`apply`](Self::apply): an expense
    /// reversal adds the amount back, an income reversal subtracts it.
    pub fn reverse(
        &self,
        accounts: &mut [Account],
        kind: TransactionKind,
        account: &str,
        amount: f64,
    ) {
        self.adjust(accounts, account, -kind.sign() * amount);
    }

    /// Sum of all current account balances.
    pub fn total(&self, accounts: &[Account]) -> f64 {
        accounts.iter().map(|a| a.balance).sum()
    }

    fn adjust(&self, accounts: &mut [Account], name: &str, delta: f64) {
        match accounts.iter_mut().find(|a| a.name == name) {
            Some(account) => account.balance += delta,
            None => warn!(
                account = name,
                "balance adjustment skipped: account no longer exists"
            ),
        }
    }
}

impl Default for BalanceService {
    fn default() -> Self {
        Self::new()
    }
}
