use std::collections::HashMap;

use crate::models::account::Account;
use crate::models::date::DayDate;
use crate::models::history::{BalanceHistory, SeriesPoint};

/// Produces the chart-ready series: the capped daily total-balance window
/// and the combined per-account history.
///
/// Pure aggregation over model state — no I/O.
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// Record the current total balance under `today`'s label.
    ///
    /// Same-day calls overwrite the existing snapshot; a new day appends
    /// one and slides the window past the cap.
    pub fn record_total(&self, history: &mut BalanceHistory, today: DayDate, total: f64) {
        history.upsert(today, total);
    }

    /// Combine every account's snapshot history into one chronological
    /// series.
    ///
    /// Values sharing an exact date are summed across accounts (all
    /// accounts reporting to that date), the result is sorted
    /// chronologically, and a point is only emitted when its date is
    /// strictly later than the last emitted one — an equal date overwrites
    /// the last point's value instead of duplicating it.
    pub fn account_series(&self, accounts: &[Account]) -> Vec<SeriesPoint> {
        let mut by_date: HashMap<DayDate, f64> = HashMap::new();
        for account in accounts {
            for point in &account.history {
                *by_date.entry(point.date).or_insert(0.0) += point.value;
            }
        }

        let mut combined: Vec<SeriesPoint> = by_date
            .into_iter()
            .map(|(date, value)| SeriesPoint { date, value })
            .collect();
        combined.sort_by_key(|p| p.date);

        let mut series: Vec<SeriesPoint> = Vec::with_capacity(combined.len());
        for point in combined {
            match series.last_mut() {
                Some(last) if point.date <= last.date => last.value = point.value,
                _ => series.push(point),
            }
        }
        series
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
