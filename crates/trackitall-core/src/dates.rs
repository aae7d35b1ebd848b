//! Date normalization and calendar windows.
//!
//! Records arrive with dates in whatever shape the document store produced:
//! an ISO-8601 string, a numeric epoch in milliseconds, or a timestamp object
//! with `seconds`/`nanoseconds` fields. [`RecordDate`] accepts all three and
//! normalizes them to a UTC calendar day. Anything else deserializes into
//! [`RecordDate::Unrecognized`] and normalizes to `None`, so a single bad
//! document never fails a whole batch.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A date as stored by the data-retrieval layer, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordDate {
    /// Timestamp object, e.g. `{"seconds": 1704412800, "nanoseconds": 0}`
    Timestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Milliseconds since the Unix epoch
    EpochMillis(i64),
    /// ISO-8601 date or date-time string
    Iso(String),
    /// Any other shape; never matches a window
    Unrecognized(serde_json::Value),
}

impl RecordDate {
    /// Convert to a UTC calendar day, or `None` if the value cannot be read.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match self {
            RecordDate::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::<Utc>::from_timestamp(*seconds, *nanoseconds).map(|dt| dt.date_naive()),
            RecordDate::EpochMillis(ms) => {
                DateTime::<Utc>::from_timestamp_millis(*ms).map(|dt| dt.date_naive())
            }
            RecordDate::Iso(s) => parse_iso_day(s),
            RecordDate::Unrecognized(_) => None,
        }
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(date: NaiveDate) -> Self {
        RecordDate::Iso(date.format("%Y-%m-%d").to_string())
    }
}

impl From<DateTime<Utc>> for RecordDate {
    fn from(dt: DateTime<Utc>) -> Self {
        RecordDate::Iso(dt.to_rfc3339())
    }
}

impl From<&str> for RecordDate {
    fn from(s: &str) -> Self {
        RecordDate::Iso(s.to_string())
    }
}

fn parse_iso_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // Date-time without an offset is taken as UTC.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// A half-open range of calendar days, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the window. The end day is excluded.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Number of days covered, 0 for an inverted window.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }
}

/// The calendar month enclosing `date`.
pub fn month_window(date: NaiveDate) -> DateWindow {
    let start = date - Duration::days(i64::from(date.day0()));
    let end = start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    DateWindow::new(start, end)
}

/// The Monday-to-Sunday week enclosing `date`.
pub fn week_window(date: NaiveDate) -> DateWindow {
    let start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    DateWindow::new(start, start + Duration::days(7))
}

/// Parse a `YYYY-MM` month label into its window.
pub fn parse_month(label: &str) -> Option<DateWindow> {
    NaiveDate::parse_from_str(&format!("{}-01", label.trim()), "%Y-%m-%d")
        .ok()
        .map(month_window)
}
