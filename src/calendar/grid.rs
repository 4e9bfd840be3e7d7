//! Week-row grid construction shared by the week, month and year views

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::types::{HabitgridError, Result};

/// Columns in a week row
pub const DAYS_PER_WEEK: usize = 7;

/// Week start used by every view of the application
pub const DEFAULT_WEEK_START: Weekday = Weekday::Sun;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A single slot in a week row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "date", rename_all = "lowercase")]
pub enum Cell {
    /// A calendar day inside the requested range
    Real(NaiveDate),
    /// Padding that aligns a partial week to seven columns
    Empty,
}

impl Cell {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Real(date) => Some(date),
            Self::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Seven cells, column 0 being the configured week start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekRow([Cell; DAYS_PER_WEEK]);

impl WeekRow {
    pub fn cells(&self) -> &[Cell; DAYS_PER_WEEK] {
        &self.0
    }

    pub fn cell(&self, column: usize) -> Option<Cell> {
        self.0.get(column).copied()
    }

    /// Real dates in column order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().filter_map(|c| c.date())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates().next()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&Cell::Real(date))
    }

    /// Number of placeholder cells
    pub fn padding(&self) -> usize {
        self.0.iter().filter(|c| c.is_empty()).count()
    }
}

/// Month annotation attached to the first row showing a new month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    pub row: usize,
    pub year: i32,
    pub month: u32,
    pub name: &'static str,
}

/// Column of `date` in a row starting on `week_start`
pub fn weekday_column(date: NaiveDate, week_start: Weekday) -> usize {
    let day = date.weekday().num_days_from_sunday() as usize;
    let start = week_start.num_days_from_sunday() as usize;
    (DAYS_PER_WEEK + day - start) % DAYS_PER_WEEK
}

/// First day of the week containing `date`
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(weekday_column(date, week_start) as i64))
}

/// Last day of the week containing `date`
pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
    let remaining = DAYS_PER_WEEK - 1 - weekday_column(date, week_start);
    date.checked_add_signed(Duration::days(remaining as i64))
}

/// Weekdays in column order for a row starting on `week_start`
pub fn weekday_order(week_start: Weekday) -> [Weekday; DAYS_PER_WEEK] {
    let mut day = week_start;
    std::array::from_fn(|_| {
        let current = day;
        day = day.succ();
        current
    })
}

/// Abbreviated English month name ("Jan".."Dec") for a 1-based month
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[(month.clamp(1, 12) - 1) as usize]
}

/// Partition the inclusive range `start..=end` into week rows.
///
/// The first row is left-padded so `start` lands in its weekday column and
/// the last row is right-padded to seven cells. Fails with
/// [`HabitgridError::InvalidRange`] when `end` precedes `start`.
pub fn build_weeks(start: NaiveDate, end: NaiveDate, week_start: Weekday) -> Result<Vec<WeekRow>> {
    if end < start {
        return Err(HabitgridError::InvalidRange { start, end });
    }

    let padding = weekday_column(start, week_start);
    let days = (end - start).num_days() as usize + 1;
    let mut rows = Vec::with_capacity((padding + days).div_ceil(DAYS_PER_WEEK));

    let mut cells = [Cell::Empty; DAYS_PER_WEEK];
    let mut column = padding;
    for date in start.iter_days().take(days) {
        cells[column] = Cell::Real(date);
        column += 1;
        if column == DAYS_PER_WEEK {
            rows.push(WeekRow(cells));
            cells = [Cell::Empty; DAYS_PER_WEEK];
            column = 0;
        }
    }
    if column > 0 {
        rows.push(WeekRow(cells));
    }

    Ok(rows)
}

/// Label each row whose first real date starts a month not yet labelled.
/// Rows made only of placeholders never get a label.
pub fn build_month_labels(weeks: &[WeekRow]) -> Vec<MonthLabel> {
    let mut labels = Vec::new();
    let mut last: Option<(i32, u32)> = None;

    for (row, week) in weeks.iter().enumerate() {
        let Some(first) = week.first_date() else {
            continue;
        };
        let month = (first.year(), first.month());
        if last != Some(month) {
            labels.push(MonthLabel {
                row,
                year: month.0,
                month: month.1,
                name: month_abbreviation(month.1),
            });
            last = Some(month);
        }
    }

    labels
}
