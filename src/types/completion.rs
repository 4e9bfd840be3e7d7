//! Completion data supplied by the habit service

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar::{date_key, intensity_from_rate, IntensityLevel};

/// Display metadata for a habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitInfo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Completed habits and rate for one calendar day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayCompletion {
    /// Ids of habits completed that day
    #[serde(default)]
    pub completions: Vec<String>,
    /// Percentage of habits completed (0-100), computed upstream
    #[serde(default)]
    pub completion_rate: f64,
}

/// Day record as it appears in the calendar payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(flatten)]
    pub day: DayCompletion,
}

/// Which habits the calendar shows; empty selection means all of them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitFilter {
    selected: Vec<String>,
}

impl HabitFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn allows(&self, habit_id: &str) -> bool {
        self.is_all() || self.selected.iter().any(|id| id == habit_id)
    }

    /// Add or remove a habit from the selection
    pub fn toggle(&mut self, habit_id: &str) {
        if let Some(pos) = self.selected.iter().position(|id| id == habit_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(habit_id.to_string());
        }
    }

    /// Step through: all habits -> first habit only -> second -> ... -> all
    pub fn cycle(&mut self, habits: &[HabitInfo]) {
        let next = match self.selected.as_slice() {
            [] => habits.first(),
            [current] => habits
                .iter()
                .position(|h| &h.id == current)
                .and_then(|i| habits.get(i + 1)),
            _ => None,
        };
        self.selected = next.map(|h| vec![h.id.clone()]).unwrap_or_default();
    }
}

/// Habit registry plus per-day completions, keyed by [`date_key`]
#[derive(Debug, Clone, Default)]
pub struct CompletionSnapshot {
    habits: Vec<HabitInfo>,
    days: HashMap<String, DayCompletion>,
}

impl CompletionSnapshot {
    pub fn new(habits: Vec<HabitInfo>) -> Self {
        Self {
            habits,
            days: HashMap::new(),
        }
    }

    /// Record a day, replacing any earlier record for the same date
    pub fn insert_day(&mut self, date: NaiveDate, day: DayCompletion) {
        self.days.insert(date_key(date), day);
    }

    pub fn habits(&self) -> &[HabitInfo] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&HabitInfo> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCompletion> {
        self.days.get(&date_key(date))
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Completion rate for `date` as reported upstream, 0 when the source
    /// has no record
    pub fn rate(&self, date: NaiveDate) -> f64 {
        self.day(date).map(|d| d.completion_rate).unwrap_or(0.0)
    }

    pub fn intensity(&self, date: NaiveDate) -> IntensityLevel {
        intensity_from_rate(self.rate(date))
    }

    /// Completion rate for `date` restricted to `filter`.
    ///
    /// Unfiltered, this is the upstream rate. Filtered, it is the share of
    /// selected registered habits completed that day, so a day where only
    /// deselected habits were done reads 0.
    pub fn rate_for(&self, date: NaiveDate, filter: &HabitFilter) -> f64 {
        if filter.is_all() {
            return self.rate(date);
        }
        let selected = self.selected_habit_ids(filter);
        if selected.is_empty() {
            return 0.0;
        }
        let done = self
            .day(date)
            .map(|day| {
                selected
                    .iter()
                    .filter(|id| day.completions.iter().any(|c| c == *id))
                    .count()
            })
            .unwrap_or(0);
        done as f64 / selected.len() as f64 * 100.0
    }

    pub fn intensity_for(&self, date: NaiveDate, filter: &HabitFilter) -> IntensityLevel {
        intensity_from_rate(self.rate_for(date, filter))
    }

    /// Distinct selected ids that exist in the registry, in registry order
    fn selected_habit_ids(&self, filter: &HabitFilter) -> Vec<&str> {
        self.habits
            .iter()
            .filter(|h| filter.selected().contains(&h.id))
            .map(|h| h.id.as_str())
            .collect()
    }

    /// Habits completed on `date` that pass `filter`.
    /// Unfiltered, ids missing from the registry are kept with an empty
    /// name; a filter only ever matches registered habits.
    pub fn completed_habits(&self, date: NaiveDate, filter: &HabitFilter) -> Vec<HabitInfo> {
        let Some(day) = self.day(date) else {
            return Vec::new();
        };
        if !filter.is_all() {
            return self
                .selected_habit_ids(filter)
                .into_iter()
                .filter(|id| day.completions.iter().any(|c| c == id))
                .filter_map(|id| self.habit(id).cloned())
                .collect();
        }
        day.completions
            .iter()
            .map(|id| {
                self.habit(id).cloned().unwrap_or_else(|| HabitInfo {
                    id: id.clone(),
                    name: String::new(),
                    color: None,
                    icon: None,
                })
            })
            .collect()
    }

    /// Habits the filter selects (all registered habits when unfiltered).
    /// Duplicate and unregistered ids in the selection are not counted.
    pub fn tracked_habit_count(&self, filter: &HabitFilter) -> usize {
        if filter.is_all() {
            self.habits.len()
        } else {
            self.selected_habit_ids(filter).len()
        }
    }
}
