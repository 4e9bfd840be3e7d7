//! Year heatmap widget (weekdays as rows, weeks as columns)

use chrono::{NaiveDate, Weekday};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::calendar::{weekday_order, Cell, MonthLabel, WeekRow, DAYS_PER_WEEK};
use crate::tui::theme::Theme;
use crate::types::{CompletionSnapshot, HabitFilter};

/// Cell dimensions: 2 chars content + 1 gap
const CELL_WIDTH: u16 = 3;
const LABEL_WIDTH: u16 = 4; // "Mon " prefix

/// Rows the widget needs: month labels + 7 weekdays
pub const HEATMAP_HEIGHT: u16 = 1 + DAYS_PER_WEEK as u16;

/// Year heatmap for ratatui
pub struct YearHeatmap<'a> {
    weeks: &'a [WeekRow],
    labels: &'a [MonthLabel],
    snapshot: &'a CompletionSnapshot,
    filter: &'a HabitFilter,
    week_start: Weekday,
    today: Option<NaiveDate>,
    selected: Option<NaiveDate>,
    theme: Theme,
}

impl<'a> YearHeatmap<'a> {
    pub fn new(
        weeks: &'a [WeekRow],
        labels: &'a [MonthLabel],
        snapshot: &'a CompletionSnapshot,
        filter: &'a HabitFilter,
        week_start: Weekday,
    ) -> Self {
        Self {
            weeks,
            labels,
            snapshot,
            filter,
            week_start,
            today: None,
            selected: None,
            theme: Theme::default(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_selected(mut self, selected: NaiveDate) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Number of week columns that fit in `width`
    pub fn weeks_for_width(width: u16) -> usize {
        (width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH) as usize
    }

    /// First visible week column. Keeps the selected week roughly centered
    /// when the whole year does not fit.
    pub fn scroll_offset(total: usize, visible: usize, selected_row: Option<usize>) -> usize {
        if visible == 0 || total <= visible {
            return 0;
        }
        let selected = selected_row.unwrap_or(0);
        selected.saturating_sub(visible / 2).min(total - visible)
    }

    fn selected_row(&self) -> Option<usize> {
        let selected = self.selected?;
        self.weeks.iter().position(|w| w.contains(selected))
    }

    fn render_month_labels(&self, area: Rect, buf: &mut Buffer, offset: usize, visible: usize) {
        let style = Style::default().fg(self.theme.muted());
        let max_x = area.x + area.width;
        for label in self.labels {
            if label.row < offset || label.row >= offset + visible {
                continue;
            }
            let x = area.x + LABEL_WIDTH + ((label.row - offset) as u16 * CELL_WIDTH);
            if x + 3 > max_x {
                break;
            }
            buf.set_string(x, area.y, label.name, style);
        }
    }

    fn render_cell(&self, buf: &mut Buffer, x: u16, y: u16, cell: Cell) {
        let Cell::Real(date) = cell else {
            return;
        };
        let level = self.snapshot.intensity_for(date, self.filter);
        let base = Style::default().bg(self.theme.heatmap_color(level));

        if self.selected == Some(date) {
            let style = base
                .fg(self.theme.selection())
                .add_modifier(Modifier::BOLD);
            buf.set_string(x, y, "[]", style);
        } else if self.today == Some(date) {
            buf.set_string(x, y, "••", base.fg(self.theme.today()));
        } else {
            buf.set_string(x, y, "  ", base);
        }
    }
}

impl Widget for YearHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= LABEL_WIDTH || area.height == 0 {
            return;
        }

        let visible = Self::weeks_for_width(area.width);
        let offset = Self::scroll_offset(self.weeks.len(), visible, self.selected_row());

        self.render_month_labels(area, buf, offset, visible);

        for (column, day) in weekday_order(self.week_start).iter().enumerate() {
            let y = area.y + 1 + column as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_string(
                area.x,
                y,
                day.to_string(),
                Style::default().fg(self.theme.muted()),
            );

            for (i, week) in self.weeks.iter().skip(offset).take(visible).enumerate() {
                let x = area.x + LABEL_WIDTH + (i as u16 * CELL_WIDTH);
                if let Some(cell) = week.cell(column) {
                    self.render_cell(buf, x, y, cell);
                }
            }
        }
    }
}
