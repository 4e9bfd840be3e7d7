//! Bottom line: period summary, load warnings and key hint

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::services::GridSummary;
use crate::tui::theme::Theme;

pub struct StatusBar<'a> {
    summary: &'a GridSummary,
    message: Option<&'a str>,
    theme: Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(summary: &'a GridSummary, theme: Theme) -> Self {
        Self {
            summary,
            message: None,
            theme,
        }
    }

    /// Warning or error shown instead of the key hint
    pub fn with_message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    pub fn summary_text(summary: &GridSummary) -> String {
        let mut text = format!(
            "{} completions · {}/{} active days · avg {:.0}%",
            summary.total_completions,
            summary.days_with_completions,
            summary.total_days,
            summary.average_rate
        );
        if let Some((date, rate)) = summary.best_day {
            text.push_str(&format!(" · best {} ({:.0}%)", date.format("%b %-d"), rate));
        }
        text
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_stringn(
            area.x,
            area.y,
            Self::summary_text(self.summary),
            area.width as usize,
            Style::default().fg(self.theme.text()),
        );

        let (right, style) = match self.message {
            Some(message) => (message, Style::default().fg(self.theme.error())),
            None => ("? help", Style::default().fg(self.theme.muted())),
        };
        let len = right.chars().count() as u16;
        if area.height > 1 {
            buf.set_stringn(area.x, area.y + 1, right, area.width as usize, style);
        } else if len < area.width {
            buf.set_string(area.x + area.width - len, area.y, right, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_summary_text() {
        let summary = GridSummary {
            total_days: 31,
            days_with_completions: 4,
            total_completions: 9,
            average_rate: 12.4,
            best_day: NaiveDate::from_ymd_opt(2024, 1, 2).map(|d| (d, 100.0)),
        };
        assert_eq!(
            StatusBar::summary_text(&summary),
            "9 completions · 4/31 active days · avg 12% · best Jan 2 (100%)"
        );
    }

    #[test]
    fn test_summary_text_empty() {
        assert_eq!(
            StatusBar::summary_text(&GridSummary::default()),
            "0 completions · 0/0 active days · avg 0%"
        );
    }

    #[test]
    fn test_render_message_on_second_line() {
        let summary = GridSummary::default();
        let area = Rect::new(0, 0, 60, 2);
        let mut buf = Buffer::empty(area);
        let theme = Theme::Dark;
        StatusBar::new(&summary, theme)
            .with_message(Some("No data file at /tmp/x.json"))
            .render(area, &mut buf);
        let line: String = (0..60).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(line.starts_with("No data file at /tmp/x.json"));
        assert_eq!(buf[(0, 1)].fg, theme.error());
    }
}
