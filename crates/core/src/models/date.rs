use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire format for day labels. Every persisted date goes through this one
/// parse/format pair — there is no locale-dependent splitting anywhere.
const DAY_FORMAT: &str = "%d/%m/%Y";

/// A calendar day carried as `DD/MM/YYYY` on the wire.
///
/// Wraps `chrono::NaiveDate`, so ordering and arithmetic are unambiguous;
/// the slash format only exists at the serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayDate(NaiveDate);

impl DayDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date (UTC).
    pub fn today() -> Self {
        Self(chrono::Utc::now().date_naive())
    }

    /// Parse a `DD/MM/YYYY` label. Returns `None` on anything else.
    pub fn parse(label: &str) -> Option<Self> {
        NaiveDate::parse_from_str(label.trim(), DAY_FORMAT)
            .ok()
            .map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The `(month, year)` bucket this day falls in.
    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            month: self.0.month(),
            year: self.0.year(),
        }
    }
}

impl std::fmt::Display for DayDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl Serialize for DayDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DayDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DayDate::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid day label '{raw}', expected DD/MM/YYYY"))
        })
    }
}

/// A `(month, year)` grouping used for monthly reporting, formatted `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub month: u32,
    pub year: i32,
}

impl MonthKey {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// Parse an `MM/YYYY` label. Returns `None` on anything else.
    pub fn parse(label: &str) -> Option<Self> {
        let (month, year) = label.trim().split_once('/')?;
        let month: u32 = month.parse().ok()?;
        let year: i32 = year.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Whether `date` falls inside this month bucket.
    pub fn contains(&self, date: DayDate) -> bool {
        date.as_naive().month() == self.month && date.as_naive().year() == self.year
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl Ord for MonthKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl PartialOrd for MonthKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
