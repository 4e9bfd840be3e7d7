//! Completion data sources
//!
//! The habit service exports calendar data as JSON:
//! `{ "habits": [{id, name, color?, icon?}], "days": [{date, completions, completionRate}] }`.
//! Records with an unparseable date are skipped and rates outside 0-100 are
//! clamped, both with a warning.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::calendar::{clamp_rate, parse_date_key, IntensityLevel};
use crate::types::{
    CompletionSnapshot, DayRecord, HabitInfo, HabitgridError, LoadWarning, Result,
};

/// Trait for anything that can supply a completion snapshot
pub trait CompletionSource {
    /// Source name for log messages
    fn name(&self) -> &str;

    /// Load the snapshot plus an optional non-fatal warning
    fn load(&self) -> Result<(CompletionSnapshot, Option<LoadWarning>)>;
}

#[derive(Debug, Default, Deserialize)]
struct CalendarExport {
    #[serde(default)]
    habits: Vec<HabitInfo>,
    #[serde(default)]
    days: Vec<DayRecord>,
}

/// Build a snapshot from raw records, repairing what can be repaired
pub fn snapshot_from_records(
    habits: Vec<HabitInfo>,
    records: Vec<DayRecord>,
) -> (CompletionSnapshot, Option<LoadWarning>) {
    let mut snapshot = CompletionSnapshot::new(habits);
    let mut skipped = 0;
    let mut clamped = 0;

    for record in records {
        let date = match parse_date_key(&record.date) {
            Ok(date) => date,
            Err(e) => {
                warn!("skipping day record: {}", e);
                skipped += 1;
                continue;
            }
        };

        let mut day = record.day;
        if let Err(e) = IntensityLevel::try_from_rate(day.completion_rate) {
            warn!("{} on {}, clamping", e, record.date);
            day.completion_rate = clamp_rate(day.completion_rate);
            clamped += 1;
        }
        snapshot.insert_day(date, day);
    }

    let warning = (skipped > 0 || clamped > 0).then_some(LoadWarning::Repaired { skipped, clamped });
    (snapshot, warning)
}

/// Parse a calendar export from a JSON string
pub fn parse_export(json: &str) -> Result<(CompletionSnapshot, Option<LoadWarning>)> {
    let export: CalendarExport =
        serde_json::from_str(json).map_err(|e| HabitgridError::Parse(e.to_string()))?;
    Ok(snapshot_from_records(export.habits, export.days))
}

/// JSON file exported from the habit service
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CompletionSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    /// A missing file yields an empty snapshot and a `Missing` warning
    fn load(&self) -> Result<(CompletionSnapshot, Option<LoadWarning>)> {
        if !self.path.exists() {
            warn!("completion data not found at {}", self.path.display());
            return Ok((
                CompletionSnapshot::default(),
                Some(LoadWarning::Missing(self.path.display().to_string())),
            ));
        }

        let content = fs::read_to_string(&self.path)?;
        let (snapshot, warning) = parse_export(&content)?;
        debug!(
            source = self.name(),
            habits = snapshot.habits().len(),
            days = snapshot.day_count(),
            "loaded completion data from {}",
            self.path.display()
        );
        Ok((snapshot, warning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r##"{
        "habits": [
            {"id": "h1", "name": "Read", "color": "#6366f1", "icon": "book"},
            {"id": "h2", "name": "Run"}
        ],
        "days": [
            {"date": "2024-06-14", "completions": ["h1"], "completionRate": 50},
            {"date": "2024-06-15", "completions": ["h1", "h2"], "completionRate": 100}
        ]
    }"##;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_export_sample() {
        let (snapshot, warning) = parse_export(SAMPLE).unwrap();
        assert!(warning.is_none());
        assert_eq!(snapshot.habits().len(), 2);
        assert_eq!(snapshot.habit("h1").unwrap().icon.as_deref(), Some("book"));
        assert_eq!(snapshot.rate(ymd(2024, 6, 15)), 100.0);
        assert_eq!(snapshot.rate(ymd(2024, 6, 14)), 50.0);
    }

    #[test]
    fn test_parse_export_empty_object() {
        let (snapshot, warning) = parse_export("{}").unwrap();
        assert!(warning.is_none());
        assert_eq!(snapshot.day_count(), 0);
    }

    #[test]
    fn test_parse_export_invalid_json() {
        let err = parse_export("{not json").unwrap_err();
        assert!(matches!(err, HabitgridError::Parse(_)));
    }

    #[test]
    fn test_bad_dates_skipped_and_rates_clamped() {
        let json = r#"{"days": [
            {"date": "2024-13-01", "completionRate": 10},
            {"date": "2024-06-01", "completionRate": 140},
            {"date": "2024-06-02", "completionRate": -3}
        ]}"#;
        let (snapshot, warning) = parse_export(json).unwrap();
        assert_eq!(
            warning,
            Some(LoadWarning::Repaired {
                skipped: 1,
                clamped: 2
            })
        );
        assert_eq!(snapshot.day_count(), 2);
        assert_eq!(snapshot.rate(ymd(2024, 6, 1)), 100.0);
        assert_eq!(snapshot.rate(ymd(2024, 6, 2)), 0.0);
    }

    #[test]
    fn test_json_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        let (snapshot, warning) = source.load().unwrap();
        assert!(warning.is_none());
        assert_eq!(snapshot.day_count(), 2);
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("nope.json"));
        let (snapshot, warning) = source.load().unwrap();
        assert_eq!(snapshot.day_count(), 0);
        assert!(matches!(warning, Some(LoadWarning::Missing(_))));
    }
}
