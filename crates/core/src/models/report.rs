use serde::{Deserialize, Serialize};

use super::date::MonthKey;

/// Expense/income totals for one month bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub key: MonthKey,
    pub total_expenses: f64,
    pub total_incomes: f64,
}
