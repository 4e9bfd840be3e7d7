//! Canonical `YYYY-MM-DD` join keys for completion data

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::types::{HabitgridError, Result};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date as `YYYY-MM-DD`
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Key for the calendar day a timestamp falls on in its own time zone.
/// The time-of-day is dropped; no conversion to another zone happens.
pub fn local_date_key<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    date_key(at.date_naive())
}

/// Parse a `YYYY-MM-DD` key back into a date
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|e| HabitgridError::Parse(format!("date key {:?}: {}", key, e)))
}
