//! Period summary over the real cells of a grid

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::WeekRow;
use crate::types::{CompletionSnapshot, HabitFilter};

/// Totals for the days a grid shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSummary {
    /// Real (non-placeholder) days considered
    pub total_days: u32,
    /// Days with at least one completion passing the filter
    pub days_with_completions: u32,
    /// Completions passing the filter, summed over all days
    pub total_completions: u64,
    /// Mean of the per-day completion rates under the filter
    pub average_rate: f64,
    /// Day with the highest rate under the filter (earliest wins ties)
    pub best_day: Option<(NaiveDate, f64)>,
}

impl GridSummary {
    /// Summarise every real cell of `weeks`; placeholders are ignored
    pub fn from_weeks(weeks: &[WeekRow], snapshot: &CompletionSnapshot, filter: &HabitFilter) -> Self {
        Self::from_dates(weeks.iter().flat_map(|w| w.dates()), snapshot, filter)
    }

    /// Summarise real cells of `weeks` for which `keep` returns true
    /// (e.g. only the days of the viewed month)
    pub fn from_weeks_where<F>(
        weeks: &[WeekRow],
        snapshot: &CompletionSnapshot,
        filter: &HabitFilter,
        keep: F,
    ) -> Self
    where
        F: Fn(NaiveDate) -> bool,
    {
        Self::from_dates(
            weeks.iter().flat_map(|w| w.dates()).filter(|d| keep(*d)),
            snapshot,
            filter,
        )
    }

    fn from_dates<I>(dates: I, snapshot: &CompletionSnapshot, filter: &HabitFilter) -> Self
    where
        I: Iterator<Item = NaiveDate>,
    {
        let mut summary = Self::default();
        let mut rate_sum = 0.0;

        for date in dates {
            summary.total_days = summary.total_days.saturating_add(1);
            let rate = snapshot.rate_for(date, filter);
            rate_sum += rate;

            let completed = snapshot.completed_habits(date, filter).len();
            if completed > 0 {
                summary.days_with_completions += 1;
                summary.total_completions = summary.total_completions.saturating_add(completed as u64);
            }

            match summary.best_day {
                Some((_, best)) if rate <= best => {}
                _ if rate > 0.0 => summary.best_day = Some((date, rate)),
                _ => {}
            }
        }

        if summary.total_days > 0 {
            summary.average_rate = rate_sum / f64::from(summary.total_days);
        }
        summary
    }
}
