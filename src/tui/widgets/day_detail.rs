//! Selected day panel: rate, level and completed habits

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::calendar::{iso_week, intensity_from_rate};
use crate::tui::theme::{habit_color, Theme};
use crate::types::{CompletionSnapshot, HabitFilter};

/// Detail panel for one day
pub struct DayDetail<'a> {
    date: NaiveDate,
    snapshot: &'a CompletionSnapshot,
    filter: &'a HabitFilter,
    theme: Theme,
}

impl<'a> DayDetail<'a> {
    pub fn new(date: NaiveDate, snapshot: &'a CompletionSnapshot, filter: &'a HabitFilter) -> Self {
        Self {
            date,
            snapshot,
            filter,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let rate = self.snapshot.rate_for(self.date, self.filter);
        let level = intensity_from_rate(rate);
        let muted = Style::default().fg(self.theme.muted());
        let text = Style::default().fg(self.theme.text());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Week       ", muted),
                Span::styled(iso_week(self.date).to_string(), text),
            ]),
            Line::from(vec![
                Span::styled("Completion ", muted),
                Span::styled(format!("{:.0}%", rate), text),
            ]),
            Line::from(vec![
                Span::styled("Activity   ", muted),
                Span::styled(
                    level.label().to_string(),
                    Style::default().fg(self.theme.heatmap_color(level)),
                ),
            ]),
            Line::default(),
        ];

        let habits = self.snapshot.completed_habits(self.date, self.filter);
        if habits.is_empty() {
            lines.push(Line::styled("No completions", muted));
            return lines;
        }

        lines.push(Line::styled(
            format!(
                "Completed {}/{}",
                habits.len(),
                self.snapshot.tracked_habit_count(self.filter)
            ),
            text.add_modifier(Modifier::BOLD),
        ));
        for habit in habits {
            let name = if habit.name.is_empty() {
                habit.id.clone()
            } else {
                habit.name.clone()
            };
            let mut spans = vec![Span::styled(
                "● ",
                Style::default().fg(habit_color(habit.color.as_deref())),
            )];
            if let Some(icon) = habit.icon.filter(|i| !i.is_empty()) {
                spans.push(Span::raw(format!("{} ", icon)));
            }
            spans.push(Span::styled(name, text));
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Widget for DayDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.date.format("%a, %b %-d %Y")))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted()));
        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayCompletion, HabitInfo};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> CompletionSnapshot {
        let mut snap = CompletionSnapshot::new(vec![
            HabitInfo {
                id: "h1".into(),
                name: "Read".into(),
                color: None,
                icon: Some("📚".into()),
            },
            HabitInfo {
                id: "h2".into(),
                name: "Run".into(),
                color: None,
                icon: None,
            },
        ]);
        snap.insert_day(
            ymd(2024, 1, 8),
            DayCompletion {
                completions: vec!["h2".into()],
                completion_rate: 50.0,
            },
        );
        snap
    }

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_detail_lines_with_completions() {
        let snap = snapshot();
        let filter = HabitFilter::all();
        let lines = text_of(&DayDetail::new(ymd(2024, 1, 8), &snap, &filter).lines());
        assert_eq!(lines[0], "Week       2024-W02");
        assert_eq!(lines[1], "Completion 50%");
        assert_eq!(lines[2], "Activity   High");
        assert_eq!(lines[4], "Completed 1/2");
        assert_eq!(lines[5], "● Run");
    }

    #[test]
    fn test_detail_lines_without_data() {
        let snap = snapshot();
        let filter = HabitFilter::all();
        let lines = text_of(&DayDetail::new(ymd(2024, 1, 9), &snap, &filter).lines());
        assert_eq!(lines[1], "Completion 0%");
        assert_eq!(lines[2], "Activity   No");
        assert_eq!(lines[4], "No completions");
    }

    #[test]
    fn test_detail_filtered_out() {
        let snap = snapshot();
        let filter = HabitFilter::only(["h1"]);
        let lines = text_of(&DayDetail::new(ymd(2024, 1, 8), &snap, &filter).lines());
        // Only h2 was done, so the h1 view reads zero
        assert_eq!(lines[1], "Completion 0%");
        assert_eq!(lines[2], "Activity   No");
        assert_eq!(lines[4], "No completions");
    }

    #[test]
    fn test_detail_filtered_in() {
        let snap = snapshot();
        let filter = HabitFilter::only(["h2", "h2"]);
        let lines = text_of(&DayDetail::new(ymd(2024, 1, 8), &snap, &filter).lines());
        assert_eq!(lines[1], "Completion 100%");
        assert_eq!(lines[2], "Activity   Very High");
        assert_eq!(lines[4], "Completed 1/1");
    }

    #[test]
    fn test_render_title() {
        let snap = snapshot();
        let filter = HabitFilter::all();
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        DayDetail::new(ymd(2024, 1, 8), &snap, &filter).render(area, &mut buf);
        let top: String = (0..30).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains(" Mon, Jan 8 2024 "));
    }
}
