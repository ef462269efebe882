use super::account::Account;
use super::history::BalanceHistory;
use super::transaction::{Transaction, TransactionKind};
use super::watchlist::WatchedStock;

/// The combined in-memory state: accounts, the two transaction logs, the
/// daily chart history, and the stock watchlist.
///
/// Loaded once at startup from the key-value store, held as session state,
/// and mirrored back after every mutation. Each field persists under its
/// own key — `Ledger` itself is never serialized as one value.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub accounts: Vec<Account>,
    pub expenses: Vec<Transaction>,
    pub incomes: Vec<Transaction>,
    pub balance_history: BalanceHistory,
    pub watchlist: Vec<WatchedStock>,
}

impl Ledger {
    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    pub fn account_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.name == name)
    }

    pub fn has_account(&self, name: &str) -> bool {
        self.account(name).is_some()
    }

    /// The transaction log holding the given kind.
    pub fn collection(&self, kind: TransactionKind) -> &Vec<Transaction> {
        match kind {
            TransactionKind::Expense => &self.expenses,
            TransactionKind::Income => &self.incomes,
        }
    }

    pub fn collection_mut(&mut self, kind: TransactionKind) -> &mut Vec<Transaction> {
        match kind {
            TransactionKind::Expense => &mut self.expenses,
            TransactionKind::Income => &mut self.incomes,
        }
    }

    /// All transactions, expenses first, in insertion order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.expenses.iter().chain(self.incomes.iter())
    }
}
