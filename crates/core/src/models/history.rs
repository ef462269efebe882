use serde::{Deserialize, Serialize};

use super::date::DayDate;

/// One aggregate total-balance snapshot per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub date: DayDate,
    pub balance: f64,
}

/// Sliding window of daily total-balance snapshots, ordered by insertion
/// and capped at [`BalanceHistory::CAP`] entries.
///
/// Persisted as a plain array under the `balanceHistory` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceHistory {
    entries: Vec<BalanceSnapshot>,
}

impl BalanceHistory {
    /// Maximum number of daily snapshots retained.
    pub const CAP: usize = 90;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BalanceSnapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&BalanceSnapshot> {
        self.entries.last()
    }

    /// Upsert the snapshot for `date`.
    ///
    /// When the newest entry already carries `date`, its balance is
    /// overwritten (same-day events collapse to the last write). Otherwise
    /// a new snapshot is appended and the oldest entry evicted once the
    /// window exceeds the cap.
    pub fn upsert(&mut self, date: DayDate, balance: f64) {
        if let Some(last) = self.entries.last_mut() {
            if last.date == date {
                last.balance = balance;
                return;
            }
        }
        self.entries.push(BalanceSnapshot { date, balance });
        if self.entries.len() > Self::CAP {
            self.entries.remove(0);
        }
    }
}

/// A point on the combined per-account history series.
///
/// The core computes these — the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: DayDate,
    pub value: f64,
}
