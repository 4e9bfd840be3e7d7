//! Week view: one column per day listing completed habits

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::calendar::{Cell, WeekRow};
use crate::tui::theme::{habit_color, Theme};
use crate::types::{CompletionSnapshot, HabitFilter};

/// Seven day columns for the week containing the cursor
pub struct WeekColumns<'a> {
    week: &'a WeekRow,
    snapshot: &'a CompletionSnapshot,
    filter: &'a HabitFilter,
    today: Option<NaiveDate>,
    selected: Option<NaiveDate>,
    theme: Theme,
}

impl<'a> WeekColumns<'a> {
    pub fn new(week: &'a WeekRow, snapshot: &'a CompletionSnapshot, filter: &'a HabitFilter) -> Self {
        Self {
            week,
            snapshot,
            filter,
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

    fn render_day(&self, area: Rect, buf: &mut Buffer, date: NaiveDate) {
        let width = area.width.saturating_sub(1) as usize;
        if width == 0 || area.height == 0 {
            return;
        }

        let mut header_style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        if self.today == Some(date) {
            header_style = header_style.fg(self.theme.today());
        }
        if self.selected == Some(date) {
            header_style = header_style
                .fg(self.theme.selection())
                .add_modifier(Modifier::REVERSED);
        }
        let header = truncate(&date.format("%a %-d").to_string(), width);
        buf.set_string(area.x, area.y, header, header_style);

        if area.height < 2 {
            return;
        }
        let level = self.snapshot.intensity_for(date, self.filter);
        buf.set_string(
            area.x,
            area.y + 1,
            "▀".repeat(width),
            Style::default().fg(self.theme.heatmap_color(level)),
        );

        if area.height < 3 {
            return;
        }
        let rate = format!("{:.0}%", self.snapshot.rate_for(date, self.filter));
        buf.set_string(
            area.x,
            area.y + 2,
            truncate(&rate, width),
            Style::default().fg(self.theme.muted()),
        );

        let habits = self.snapshot.completed_habits(date, self.filter);
        let list_top = area.y + 4;
        if habits.is_empty() {
            if list_top < area.y + area.height {
                buf.set_string(area.x, list_top, "-", Style::default().fg(self.theme.muted()));
            }
            return;
        }
        for (i, habit) in habits.iter().enumerate() {
            let y = list_top + i as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_string(
                area.x,
                y,
                "●",
                Style::default().fg(habit_color(habit.color.as_deref())),
            );
            let name = if habit.name.is_empty() { &habit.id } else { &habit.name };
            buf.set_string(
                area.x + 2,
                y,
                truncate(name, width.saturating_sub(2)),
                Style::default().fg(self.theme.text()),
            );
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max == 0 {
        String::new()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}

impl Widget for WeekColumns<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(area);
        for (cell, column) in self.week.cells().iter().zip(columns.iter()) {
            if let Cell::Real(date) = *cell {
                self.render_day(*column, buf, date);
            }
        }
    }
}
