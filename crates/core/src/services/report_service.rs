use std::collections::HashSet;

use crate::models::date::{DayDate, MonthKey};
use crate::models::report::MonthlyReport;
use crate::models::transaction::{Transaction, TransactionKind};

/// Buckets transactions by `(month, year)` for the reporting view.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Distinct month keys across all transactions, most recent first.
    /// The current month is always present, even when it has no
    /// transactions yet.
    pub fn month_keys<'a>(
        &self,
        transactions: impl Iterator<Item = &'a Transaction>,
        today: DayDate,
    ) -> Vec<MonthKey> {
        let mut seen: HashSet<MonthKey> = transactions.map(|t| t.month_key()).collect();
        seen.insert(today.month_key());
        let mut keys: Vec<MonthKey> = seen.into_iter().collect();
        keys.sort();
        keys.reverse();
        keys
    }

    /// Sum expenses and incomes over the transactions falling in `key`'s
    /// month.
    pub fn monthly_report<'a>(
        &self,
        transactions: impl Iterator<Item = &'a Transaction>,
        key: MonthKey,
    ) -> MonthlyReport {
        let mut report = MonthlyReport {
            key,
            total_expenses: 0.0,
            total_incomes: 0.0,
        };
        for transaction in transactions.filter(|t| key.contains(t.date)) {
            match transaction.kind {
                TransactionKind::Expense => report.total_expenses += transaction.amount,
                TransactionKind::Income => report.total_incomes += transaction.amount,
            }
        }
        report
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
