use chrono::NaiveDate;
use thiserror::Error;

/// habitgrid error types
#[derive(Error, Debug)]
pub enum HabitgridError {
    /// Date range whose end precedes its start
    #[error("invalid range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Completion rate outside 0..=100 (or NaN)
    #[error("invalid completion rate: {0}")]
    InvalidRate(f64),

    /// Cursor arithmetic left chrono's representable dates
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// Failed to parse a date key or completion file
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for habitgrid
pub type Result<T> = std::result::Result<T, HabitgridError>;
