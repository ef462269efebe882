use serde::{Deserialize, Serialize};

use super::date::DayDate;

/// A dated balance snapshot on a single account, recorded when the account
/// is opened and on every manual balance update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: DayDate,
    pub value: f64,
}

/// A named balance-holding bucket.
///
/// The name doubles as the display key and must be unique within the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,

    /// Current balance: opening balance plus every applied income, minus
    /// every applied expense.
    pub balance: f64,

    /// Snapshot history. At most one entry per calendar date — a later
    /// write to an existing date overwrites the value in place.
    #[serde(default)]
    pub history: Vec<BalancePoint>,
}

impl Account {
    /// Create an account seeded with one opening snapshot.
    pub fn new(name: impl Into<String>, balance: f64, opened: DayDate) -> Self {
        Self {
            name: name.into(),
            balance,
            history: vec![BalancePoint {
                date: opened,
                value: balance,
            }],
        }
    }

    /// Record a snapshot for `date`, overwriting an existing same-date point.
    pub fn record_snapshot(&mut self, date: DayDate, value: f64) {
        match self.history.iter_mut().find(|p| p.date == date) {
            Some(point) => point.value = value,
            None => self.history.push(BalancePoint { date, value }),
        }
    }
}
