//! Calendar grid construction and heatmap bucketing
//!
//! Pure functions: no I/O, no clock access. Callers pass the reference
//! date (and "today", where it matters) explicitly.

mod date_key;
mod grid;
mod intensity;
mod view;

pub use date_key::{date_key, local_date_key, parse_date_key};
pub use grid::{
    build_month_labels, build_weeks, end_of_week, month_abbreviation, start_of_week,
    weekday_column, weekday_order, Cell, MonthLabel, WeekRow, DAYS_PER_WEEK, DEFAULT_WEEK_START,
};
pub use intensity::{clamp_rate, intensity_from_rate, IntensityLevel};
pub use view::{iso_week, CalendarCursor, IsoWeekId, ViewMode};
