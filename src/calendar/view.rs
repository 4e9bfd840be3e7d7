//! View mode and navigation cursor owned by the rendering layer

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::grid::{build_weeks, end_of_week, start_of_week, WeekRow, DEFAULT_WEEK_START};
use crate::types::{HabitgridError, Result};

/// Calendar granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Year,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Week => "Week",
            Self::Year => "Year",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::Year => "year",
        })
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "m" => Ok(Self::Month),
            "week" | "w" => Ok(Self::Week),
            "year" | "y" => Ok(Self::Year),
            other => Err(format!(
                "unknown view '{}', expected month, week or year",
                other
            )),
        }
    }
}

/// ISO 8601 week identifier, used to link a day of the year view to its week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IsoWeekId {
    pub year: i32,
    pub week: u32,
}

impl IsoWeekId {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Monday of this ISO week
    pub fn monday(self) -> Result<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon).ok_or_else(|| {
            HabitgridError::DateOutOfRange(format!("ISO week {}-W{:02}", self.year, self.week))
        })
    }
}

impl fmt::Display for IsoWeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// ISO week number of `date`
pub fn iso_week(date: NaiveDate) -> IsoWeekId {
    IsoWeekId::of(date)
}

fn out_of_range(what: impl fmt::Display) -> HabitgridError {
    HabitgridError::DateOutOfRange(what.to_string())
}

/// Reference date plus view mode; every grid is derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    mode: ViewMode,
    date: NaiveDate,
    week_start: Weekday,
}

impl CalendarCursor {
    pub fn new(mode: ViewMode, date: NaiveDate) -> Self {
        Self {
            mode,
            date,
            week_start: DEFAULT_WEEK_START,
        }
    }

    /// Deep link into the week view for an ISO week
    pub fn from_iso_week(id: IsoWeekId) -> Result<Self> {
        Ok(Self::new(ViewMode::Week, id.monday()?))
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Advance by one week, month or year
    pub fn next(&mut self) -> Result<()> {
        self.date = self.shifted(true)?;
        Ok(())
    }

    /// Go back by one week, month or year
    pub fn prev(&mut self) -> Result<()> {
        self.date = self.shifted(false)?;
        Ok(())
    }

    /// Jump to `today` (caller supplies the clock)
    pub fn today(&mut self, today: NaiveDate) {
        self.date = today;
    }

    /// Move the reference date; the viewed period follows it
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Move the reference date by whole days, keeping the view mode
    pub fn shift_days(&mut self, days: i64) -> Result<()> {
        self.date = self
            .date
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| out_of_range(format!("{} {:+} days", self.date, days)))?;
        Ok(())
    }

    /// Switch to the week view containing `date`
    pub fn drill_into_week(&mut self, date: NaiveDate) {
        self.mode = ViewMode::Week;
        self.date = date;
    }

    pub fn iso_week(&self) -> IsoWeekId {
        IsoWeekId::of(self.date)
    }

    // Month arithmetic clamps the day (Jan 31 + 1 month = Feb 29 in 2024)
    fn shifted(&self, forward: bool) -> Result<NaiveDate> {
        let shifted = match (self.mode, forward) {
            (ViewMode::Week, true) => self.date.checked_add_signed(Duration::weeks(1)),
            (ViewMode::Week, false) => self.date.checked_sub_signed(Duration::weeks(1)),
            (ViewMode::Month, true) => self.date.checked_add_months(Months::new(1)),
            (ViewMode::Month, false) => self.date.checked_sub_months(Months::new(1)),
            (ViewMode::Year, true) => self.date.checked_add_months(Months::new(12)),
            (ViewMode::Year, false) => self.date.checked_sub_months(Months::new(12)),
        };
        let direction = if forward { "after" } else { "before" };
        shifted.ok_or_else(|| out_of_range(format!("{} {} {}", self.mode, direction, self.date)))
    }

    /// Inclusive date range the current view lays out.
    ///
    /// Week: the week containing the date. Month: the month widened to whole
    /// weeks. Year: January 1 through December 31.
    pub fn range(&self) -> Result<(NaiveDate, NaiveDate)> {
        match self.mode {
            ViewMode::Week => {
                let start = start_of_week(self.date, self.week_start);
                let end = end_of_week(self.date, self.week_start);
                start.zip(end).ok_or_else(|| out_of_range(self.date))
            }
            ViewMode::Month => {
                let (first, last) = self.month_bounds()?;
                let start = start_of_week(first, self.week_start);
                let end = end_of_week(last, self.week_start);
                start.zip(end).ok_or_else(|| out_of_range(self.date))
            }
            ViewMode::Year => {
                let year = self.date.year();
                let start = NaiveDate::from_ymd_opt(year, 1, 1);
                let end = NaiveDate::from_ymd_opt(year, 12, 31);
                start.zip(end).ok_or_else(|| out_of_range(year))
            }
        }
    }

    fn month_bounds(&self) -> Result<(NaiveDate, NaiveDate)> {
        let first = self
            .date
            .with_day(1)
            .ok_or_else(|| out_of_range(self.date))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| out_of_range(self.date))?;
        Ok((first, last))
    }

    /// Week rows for the current view
    pub fn weeks(&self) -> Result<Vec<WeekRow>> {
        let (start, end) = self.range()?;
        build_weeks(start, end, self.week_start)
    }

    /// Whether `date` belongs to the period being viewed. Month grids show
    /// days from adjacent months that fall outside it.
    pub fn in_period(&self, date: NaiveDate) -> bool {
        match self.mode {
            ViewMode::Week => self
                .range()
                .map(|(start, end)| start <= date && date <= end)
                .unwrap_or(false),
            ViewMode::Month => date.year() == self.date.year() && date.month() == self.date.month(),
            ViewMode::Year => date.year() == self.date.year(),
        }
    }

    /// Heading for the current view ("January 2024", "Jan 7 - Jan 13, 2024", "2024")
    pub fn title(&self) -> Result<String> {
        Ok(match self.mode {
            ViewMode::Week => {
                let (start, end) = self.range()?;
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            ViewMode::Month => self.date.format("%B %Y").to_string(),
            ViewMode::Year => self.date.format("%Y").to_string(),
        })
    }
}
