//! `habitgrid grid` subcommand: print the current view as text or JSON

use chrono::{NaiveDate, Weekday};
use clap::Args;

use crate::calendar::{parse_date_key, weekday_order, CalendarCursor, IntensityLevel, ViewMode};
use crate::services::report::{CellReport, ViewReport};
use crate::types::{CompletionSnapshot, HabitFilter, Result};

/// Print a calendar grid
#[derive(Args, Debug)]
pub struct GridArgs {
    /// View to print (month, week or year); defaults to the configured view
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Only count these habit ids (repeatable)
    #[arg(long = "habit", value_name = "ID")]
    pub habits: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date_key(s).map_err(|e| e.to_string())
}

impl GridArgs {
    /// Render the requested view; `today` is the caller's clock
    pub fn render(
        &self,
        snapshot: &CompletionSnapshot,
        default_view: ViewMode,
        today: NaiveDate,
    ) -> Result<String> {
        let cursor = CalendarCursor::new(
            self.view.unwrap_or(default_view),
            self.date.unwrap_or(today),
        );
        let filter = HabitFilter::only(self.habits.iter().cloned());
        let report = ViewReport::build(&cursor, snapshot, &filter, today)?;

        if self.json {
            Ok(serde_json::to_string_pretty(&report)?)
        } else {
            Ok(render_text(&report, cursor.week_start()))
        }
    }
}

/// Block glyph for an intensity level (legacy shading scale)
pub fn intensity_glyph(level: IntensityLevel) -> char {
    match level {
        IntensityLevel::None => '·',
        IntensityLevel::Low => '░',
        IntensityLevel::Medium => '▒',
        IntensityLevel::High => '▓',
        IntensityLevel::Max => '█',
    }
}

fn cell_glyph(cell: &CellReport) -> char {
    cell.intensity.map(intensity_glyph).unwrap_or(' ')
}

/// Plain-text rendering of a view report
pub fn render_text(report: &ViewReport, week_start: Weekday) -> String {
    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');

    match report.view {
        ViewMode::Year => render_year_text(report, week_start, &mut out),
        ViewMode::Month | ViewMode::Week => render_rows_text(report, week_start, &mut out),
    }

    let s = &report.summary;
    out.push_str(&format!(
        "\n{} completions on {}/{} days, average {:.0}%\n",
        s.total_completions, s.days_with_completions, s.total_days, s.average_rate
    ));
    out
}

/// Month/week layout: one line of day numbers and one line of glyphs per row
fn render_rows_text(report: &ViewReport, week_start: Weekday, out: &mut String) {
    for day in weekday_order(week_start) {
        out.push_str(&format!(" {:>2} ", &day.to_string()[..2]));
    }
    out.push('\n');

    for week in &report.weeks {
        for cell in week {
            let number = cell
                .date
                .as_deref()
                .and_then(|key| parse_date_key(key).ok())
                .map(|d| d.format("%-d").to_string())
                .unwrap_or_default();
            out.push_str(&format!(" {:>2} ", number));
        }
        out.push('\n');
        for cell in week {
            let glyph = if cell.in_period { cell_glyph(cell) } else { ' ' };
            out.push_str(&format!(" {}{} ", glyph, glyph));
        }
        out.push('\n');
    }
}

const YEAR_LABEL_WIDTH: usize = 4;
const YEAR_CELL_WIDTH: usize = 2;

/// Year layout: weekdays as lines, weeks as columns, month names on top
fn render_year_text(report: &ViewReport, week_start: Weekday, out: &mut String) {
    let width = YEAR_LABEL_WIDTH + report.weeks.len() * YEAR_CELL_WIDTH + 2;
    let mut labels = vec![' '; width];
    for label in &report.month_labels {
        let x = YEAR_LABEL_WIDTH + label.row * YEAR_CELL_WIDTH;
        for (i, ch) in label.name.chars().enumerate() {
            if let Some(slot) = labels.get_mut(x + i) {
                *slot = ch;
            }
        }
    }
    out.push_str(labels.iter().collect::<String>().trim_end());
    out.push('\n');

    for (column, day) in weekday_order(week_start).iter().enumerate() {
        out.push_str(&format!("{:<width$}", day.to_string(), width = YEAR_LABEL_WIDTH));
        for week in &report.weeks {
            out.push(week.get(column).map(cell_glyph).unwrap_or(' '));
            out.push(' ');
        }
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
}

/// Legend text for `habitgrid legend`
pub fn render_legend() -> String {
    let mut out = String::from("Less ");
    for level in IntensityLevel::ALL {
        out.push(intensity_glyph(level));
        out.push(' ');
    }
    out.push_str("More\n\n");
    for level in IntensityLevel::ALL {
        let range = match level {
            IntensityLevel::None => "0%".to_string(),
            IntensityLevel::Low => "<25%".to_string(),
            IntensityLevel::Max => "75-100%".to_string(),
            other => format!("{:.0}-<{:.0}%", other.lower_bound(), other.lower_bound() + 25.0),
        };
        out.push_str(&format!(
            "{} {}  {:<9} activity  {}\n",
            intensity_glyph(level),
            level.level(),
            level.label(),
            range
        ));
    }
    out
}
