use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::date::{DayDate, MonthKey};

/// Which side of the ledger a transaction lives on.
///
/// Carried explicitly on every transaction — never inferred from which
/// collection happens to hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money leaving an account
    Expense,
    /// Money entering an account
    Income,
}

impl TransactionKind {
    /// Sign of the effect on the owning account's balance.
    pub fn sign(&self) -> f64 {
        match self {
            TransactionKind::Expense => -1.0,
            TransactionKind::Income => 1.0,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Expense => write!(f, "Expense"),
            TransactionKind::Income => write!(f, "Income"),
        }
    }
}

/// Creation stamp for a transaction.
///
/// The millisecond timestamp doubles as the unique id and the recency sort
/// key (descending id = descending recency). The calendar date and wall-time
/// are kept as explicit fields because the id cannot be turned back into a
/// display date without fixing a timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxStamp {
    pub id: i64,
    pub date: DayDate,
    pub time: String,
}

impl TxStamp {
    /// Stamp for the current instant.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Stamp for a fixed instant — lets tests pin ids and dates.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            id: instant.timestamp_millis(),
            date: DayDate::new(instant.date_naive()),
            time: instant.format("%H:%M").to_string(),
        }
    }
}

/// A single income or expense event affecting exactly one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Creation timestamp in Unix milliseconds; unique identity and
    /// recency sort key.
    pub id: i64,

    /// Expense or Income
    pub kind: TransactionKind,

    /// Name reference to the owning account, validated at record time.
    pub account: String,

    /// Amount of the transaction (always strictly positive)
    pub amount: f64,

    /// Free-text category, also used by the frontend for icon/colour
    /// classification.
    pub reason: String,

    /// Calendar day of creation
    pub date: DayDate,

    /// Wall-clock time of creation, `HH:MM`
    pub time: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        account: impl Into<String>,
        amount: f64,
        reason: impl Into<String>,
        stamp: TxStamp,
    ) -> Self {
        Self {
            id: stamp.id,
            kind,
            account: account.into(),
            amount,
            reason: reason.into(),
            date: stamp.date,
            time: stamp.time,
        }
    }

    /// The `(month, year)` bucket this transaction reports under.
    pub fn month_key(&self) -> MonthKey {
        self.date.month_key()
    }
}
