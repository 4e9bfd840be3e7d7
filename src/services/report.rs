//! Render-ready description of one calendar view

use chrono::NaiveDate;
use serde::Serialize;

use super::summary::GridSummary;
use crate::calendar::{
    build_month_labels, date_key, intensity_from_rate, CalendarCursor, Cell, IntensityLevel,
    IsoWeekId, MonthLabel, ViewMode, WeekRow,
};
use crate::types::{CompletionSnapshot, HabitFilter, Result};

/// One grid slot with its completion data resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReport {
    pub date: Option<String>,
    pub completion_rate: Option<f64>,
    pub intensity: Option<IntensityLevel>,
    pub completions: Vec<String>,
    pub in_period: bool,
    pub is_today: bool,
}

impl CellReport {
    fn placeholder() -> Self {
        Self {
            date: None,
            completion_rate: None,
            intensity: None,
            completions: Vec::new(),
            in_period: false,
            is_today: false,
        }
    }
}

/// Full view: grid, month labels and period summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReport {
    pub view: ViewMode,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub iso_week: IsoWeekId,
    pub weeks: Vec<Vec<CellReport>>,
    pub month_labels: Vec<MonthLabel>,
    pub summary: GridSummary,
}

impl ViewReport {
    /// Build the report for `cursor`. `today` is injected so output is
    /// reproducible; the summary covers only days inside the viewed period.
    pub fn build(
        cursor: &CalendarCursor,
        snapshot: &CompletionSnapshot,
        filter: &HabitFilter,
        today: NaiveDate,
    ) -> Result<Self> {
        let (start, end) = cursor.range()?;
        let weeks = cursor.weeks()?;
        let summary =
            GridSummary::from_weeks_where(&weeks, snapshot, filter, |d| cursor.in_period(d));

        Ok(Self {
            view: cursor.mode(),
            title: cursor.title()?,
            start,
            end,
            iso_week: cursor.iso_week(),
            month_labels: build_month_labels(&weeks),
            weeks: weeks
                .iter()
                .map(|w| report_row(w, cursor, snapshot, filter, today))
                .collect(),
            summary,
        })
    }
}

fn report_row(
    week: &WeekRow,
    cursor: &CalendarCursor,
    snapshot: &CompletionSnapshot,
    filter: &HabitFilter,
    today: NaiveDate,
) -> Vec<CellReport> {
    week.cells()
        .iter()
        .map(|cell| match *cell {
            Cell::Empty => CellReport::placeholder(),
            Cell::Real(date) => {
                let rate = snapshot.rate_for(date, filter);
                CellReport {
                    date: Some(date_key(date)),
                    completion_rate: Some(rate),
                    intensity: Some(intensity_from_rate(rate)),
                    completions: snapshot
                        .completed_habits(date, filter)
                        .into_iter()
                        .map(|h| h.id)
                        .collect(),
                    in_period: cursor.in_period(date),
                    is_today: date == today,
                }
            }
        })
        .collect()
}
