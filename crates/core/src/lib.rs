pub mod amount;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use errors::CoreError;
use models::account::Account;
use models::date::{DayDate, MonthKey};
use models::history::{BalanceSnapshot, SeriesPoint};
use models::ledger::Ledger;
use models::report::MonthlyReport;
use models::transaction::{Transaction, TransactionKind, TxStamp};
use models::watchlist::{default_watchlist, Quote, WatchedStock};
use services::balance_service::BalanceService;
use services::history_service::HistoryService;
use services::ledger_service::{LedgerService, RemovalPolicy};
use services::quote_service::QuoteService;
use services::report_service::ReportService;
use storage::{KeyValueStore, StateKey};

/// Main entry point for the Centime core library.
///
/// Owns the in-memory ledger and the services that operate on it, with the
/// persistence backend injected at construction. All mutations go through
/// this facade, one per session: each operation runs to completion —
/// validate, mutate, record today's total, persist — before the next one
/// is processed.
#[must_use]
pub struct Centime {
    store: Box<dyn KeyValueStore>,
    ledger: Ledger,
    ledger_service: LedgerService,
    balance_service: BalanceService,
    history_service: HistoryService,
    report_service: ReportService,
    quote_service: QuoteService,
}

impl std::fmt::Debug for Centime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Centime")
            .field("accounts", &self.ledger.accounts.len())
            .field("expenses", &self.ledger.expenses.len())
            .field("incomes", &self.ledger.incomes.len())
            .field("history", &self.ledger.balance_history.len())
            .field("watchlist", &self.ledger.watchlist.len())
            .finish()
    }
}

impl Centime {
    /// Load all persisted state from `store`, with the default quote
    /// provider configured.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self, CoreError> {
        Self::open_with_quotes(store, QuoteService::with_defaults())
    }

    /// Load all persisted state from `store`, using the given quote
    /// service (tests inject mock providers this way).
    ///
    /// Absent keys fall back to empty collections, except the watchlist,
    /// which is seeded with the default symbols and written back. An empty
    /// balance history is seeded with today's total.
    pub fn open_with_quotes(
        store: Box<dyn KeyValueStore>,
        quote_service: QuoteService,
    ) -> Result<Self, CoreError> {
        let mut tracker = Self {
            store,
            ledger: Ledger::default(),
            ledger_service: LedgerService::new(),
            balance_service: BalanceService::new(),
            history_service: HistoryService::new(),
            report_service: ReportService::new(),
            quote_service,
        };
        tracker.load()?;
        Ok(tracker)
    }

    fn load(&mut self) -> Result<(), CoreError> {
        self.ledger.accounts = self.read_key(StateKey::Accounts)?.unwrap_or_default();
        self.ledger.expenses = self.read_key(StateKey::Expenses)?.unwrap_or_default();
        self.ledger.incomes = self.read_key(StateKey::Incomes)?.unwrap_or_default();
        self.ledger.balance_history = self
            .read_key(StateKey::BalanceHistory)?
            .unwrap_or_default();

        match self.read_key::<Vec<WatchedStock>>(StateKey::Watchlist)? {
            Some(watchlist) => self.ledger.watchlist = watchlist,
            None => {
                self.ledger.watchlist = default_watchlist();
                self.commit(&[StateKey::Watchlist])?;
            }
        }

        if self.ledger.balance_history.is_empty() {
            let total = self.balance_service.total(&self.ledger.accounts);
            self.history_service.record_total(
                &mut self.ledger.balance_history,
                DayDate::today(),
                total,
            );
            self.commit(&[StateKey::BalanceHistory])?;
        }

        info!(
            accounts = self.ledger.accounts.len(),
            expenses = self.ledger.expenses.len(),
            incomes = self.ledger.incomes.len(),
            "ledger loaded"
        );
        Ok(())
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Create an account with an opening balance.
    ///
    /// Writes `accounts` and `balanceHistory`.
    pub fn add_account(&mut self, name: &str, balance_input: &str) -> Result<(), CoreError> {
        let today = DayDate::today();
        self.ledger_service
            .add_account(&mut self.ledger, name, balance_input, today)?;
        self.record_daily_total(today);
        self.commit(&[StateKey::Accounts, StateKey::BalanceHistory])
    }

    /// Manually set an account's balance, recording a dated snapshot on
    /// the account.
    ///
    /// Writes `accounts` and `balanceHistory`.
    pub fn update_account_balance(
        &mut self,
        name: &str,
        balance_input: &str,
    ) -> Result<(), CoreError> {
        let today = DayDate::today();
        self.ledger_service
            .update_balance(&mut self.ledger, name, balance_input, today)?;
        self.record_daily_total(today);
        self.commit(&[StateKey::Accounts, StateKey::BalanceHistory])
    }

    /// Remove an account under an explicit removal policy.
    ///
    /// Writes `accounts`, `expenses`, `incomes`, and `balanceHistory`.
    pub fn remove_account(&mut self, name: &str, policy: RemovalPolicy) -> Result<(), CoreError> {
        self.ledger_service
            .remove_account(&mut self.ledger, name, policy)?;
        self.record_daily_total(DayDate::today());
        self.commit(&[
            StateKey::Accounts,
            StateKey::Expenses,
            StateKey::Incomes,
            StateKey::BalanceHistory,
        ])
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record an expense against an account. Returns the transaction id.
    pub fn record_expense(
        &mut self,
        account: &str,
        amount_input: &str,
        reason: &str,
    ) -> Result<i64, CoreError> {
        self.record_transaction(TransactionKind::Expense, account, amount_input, reason)
    }

    /// Record an income against an account. Returns the transaction id.
    pub fn record_income(
        &mut self,
        account: &str,
        amount_input: &str,
        reason: &str,
    ) -> Result<i64, CoreError> {
        self.record_transaction(TransactionKind::Income, account, amount_input, reason)
    }

    /// Record a transaction of the given kind.
    ///
    /// Writes the matching transaction log, `accounts`, and
    /// `balanceHistory`.
    pub fn record_transaction(
        &mut self,
        kind: TransactionKind,
        account: &str,
        amount_input: &str,
        reason: &str,
    ) -> Result<i64, CoreError> {
        let stamp = TxStamp::now();
        let today = stamp.date;
        let id = self
            .ledger_service
            .record(&mut self.ledger, kind, account, amount_input, reason, stamp)?;
        self.record_daily_total(today);
        self.commit(&[
            collection_key(kind),
            StateKey::Accounts,
            StateKey::BalanceHistory,
        ])?;
        Ok(id)
    }

    /// Delete a transaction by id, reversing its effect on the owning
    /// account.
    ///
    /// Writes the matching transaction log, `accounts`, and
    /// `balanceHistory`.
    pub fn delete_transaction(
        &mut self,
        kind: TransactionKind,
        id: i64,
    ) -> Result<(), CoreError> {
        self.ledger_service.delete(&mut self.ledger, kind, id)?;
        self.record_daily_total(DayDate::today());
        self.commit(&[
            collection_key(kind),
            StateKey::Accounts,
            StateKey::BalanceHistory,
        ])
    }

    // ── Read model ──────────────────────────────────────────────────

    pub fn accounts(&self) -> &[Account] {
        &self.ledger.accounts
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.ledger.account(name)
    }

    /// Sum of all current account balances.
    #[must_use]
    pub fn total_balance(&self) -> f64 {
        self.balance_service.total(&self.ledger.accounts)
    }

    pub fn expenses(&self) -> &[Transaction] {
        &self.ledger.expenses
    }

    pub fn incomes(&self) -> &[Transaction] {
        &self.ledger.incomes
    }

    /// The `limit` most recent expenses, newest first.
    #[must_use]
    pub fn recent_expenses(&self, limit: usize) -> Vec<&Transaction> {
        recent(&self.ledger.expenses, limit)
    }

    /// The `limit` most recent incomes, newest first.
    #[must_use]
    pub fn recent_incomes(&self, limit: usize) -> Vec<&Transaction> {
        recent(&self.ledger.incomes, limit)
    }

    /// The capped daily total-balance series, oldest first.
    pub fn balance_series(&self) -> &[BalanceSnapshot] {
        self.ledger.balance_history.entries()
    }

    /// Name/balance pairs for the per-account distribution chart.
    #[must_use]
    pub fn account_distribution(&self) -> Vec<(&str, f64)> {
        self.ledger
            .accounts
            .iter()
            .map(|a| (a.name.as_str(), a.balance))
            .collect()
    }

    /// The combined per-account snapshot history, chronological.
    #[must_use]
    pub fn account_history_series(&self) -> Vec<SeriesPoint> {
        self.history_service.account_series(&self.ledger.accounts)
    }

    /// Month buckets available for reporting, most recent first. The
    /// current month is always present.
    #[must_use]
    pub fn month_keys(&self) -> Vec<MonthKey> {
        self.report_service
            .month_keys(self.ledger.transactions(), DayDate::today())
    }

    /// Expense/income totals for the given month bucket.
    #[must_use]
    pub fn monthly_report(&self, key: MonthKey) -> MonthlyReport {
        self.report_service
            .monthly_report(self.ledger.transactions(), key)
    }

    // ── Watchlist ───────────────────────────────────────────────────

    pub fn watchlist(&self) -> &[WatchedStock] {
        &self.ledger.watchlist
    }

    /// Add a stock to the watchlist. The symbol is uppercased and must not
    /// already be present.
    ///
    /// Writes `myStocks`.
    pub fn add_watched_stock(&mut self, symbol: &str, name: &str) -> Result<(), CoreError> {
        let symbol = symbol.trim();
        let name = name.trim();
        if symbol.is_empty() || name.is_empty() {
            return Err(CoreError::ValidationError(
                "Both symbol and name are required".into(),
            ));
        }
        let stock = WatchedStock::new(symbol, name);
        if self.ledger.watchlist.iter().any(|s| s.symbol == stock.symbol) {
            return Err(CoreError::DuplicateStock(stock.symbol));
        }
        self.ledger.watchlist.push(stock);
        self.commit(&[StateKey::Watchlist])
    }

    /// Remove a stock from the watchlist by symbol (case-insensitive).
    /// Returns whether anything was removed.
    ///
    /// Writes `myStocks` when something was removed.
    pub fn remove_watched_stock(&mut self, symbol: &str) -> Result<bool, CoreError> {
        let symbol = symbol.trim().to_uppercase();
        let before = self.ledger.watchlist.len();
        self.ledger.watchlist.retain(|s| s.symbol != symbol);
        if self.ledger.watchlist.len() == before {
            return Ok(false);
        }
        self.commit(&[StateKey::Watchlist])?;
        Ok(true)
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// Fetch current quotes for the watchlist.
    ///
    /// Fire-and-forget per call: a failure here is reported to the caller
    /// only and never touches ledger state.
    pub async fn fetch_quotes(&self) -> Result<Vec<Quote>, CoreError> {
        let symbols: Vec<String> = self
            .ledger
            .watchlist
            .iter()
            .map(|s| s.symbol.clone())
            .collect();
        self.quote_service.fetch_quotes(&symbols).await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn record_daily_total(&mut self, today: DayDate) {
        let total = self.balance_service.total(&self.ledger.accounts);
        self.history_service
            .record_total(&mut self.ledger.balance_history, today, total);
    }

    /// Persist the named collections: serialize them all first, then
    /// write the keys in order. A serialization failure aborts before
    /// anything is written.
    fn commit(&mut self, keys: &[StateKey]) -> Result<(), CoreError> {
        let mut staged: Vec<(StateKey, Value)> = Vec::with_capacity(keys.len());
        for key in keys {
            staged.push((*key, self.encode_key(*key)?));
        }
        for (key, value) in staged {
            self.store.set(key.as_str(), value)?;
        }
        Ok(())
    }

    fn encode_key(&self, key: StateKey) -> Result<Value, CoreError> {
        let value = match key {
            StateKey::Accounts => serde_json::to_value(&self.ledger.accounts),
            StateKey::Expenses => serde_json::to_value(&self.ledger.expenses),
            StateKey::Incomes => serde_json::to_value(&self.ledger.incomes),
            StateKey::BalanceHistory => serde_json::to_value(&self.ledger.balance_history),
            StateKey::Watchlist => serde_json::to_value(&self.ledger.watchlist),
        };
        value.map_err(|e| CoreError::Serialization(format!("failed to encode '{key}': {e}")))
    }

    fn read_key<T: DeserializeOwned>(&self, key: StateKey) -> Result<Option<T>, CoreError> {
        match self.store.get(key.as_str())? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| CoreError::Deserialization(format!("stored '{key}' is corrupt: {e}"))),
            None => Ok(None),
        }
    }
}

/// The store key a transaction of this kind persists under.
fn collection_key(kind: TransactionKind) -> StateKey {
    match kind {
        TransactionKind::Expense => StateKey::Expenses,
        TransactionKind::Income => StateKey::Incomes,
    }
}

/// The `limit` most recent transactions by id, newest first.
fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.id));
    sorted.truncate(limit);
    sorted
}
