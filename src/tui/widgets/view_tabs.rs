//! View switcher and period title

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::calendar::ViewMode;
use crate::tui::theme::Theme;

/// View modes in switcher order
pub const VIEW_MODES: [ViewMode; 3] = [ViewMode::Month, ViewMode::Week, ViewMode::Year];

/// Key that selects each view
pub fn view_key(mode: ViewMode) -> char {
    match mode {
        ViewMode::Month => 'm',
        ViewMode::Week => 'w',
        ViewMode::Year => 'y',
    }
}

/// Two-line header: view switcher, then "◀ title ▶" with the ISO week
/// on the right and the habit filter on the left
pub struct ViewTabs<'a> {
    selected: ViewMode,
    title: &'a str,
    iso_week: String,
    filter_label: &'a str,
    theme: Theme,
}

impl<'a> ViewTabs<'a> {
    pub fn new(selected: ViewMode, title: &'a str, theme: Theme) -> Self {
        Self {
            selected,
            title,
            iso_week: String::new(),
            filter_label: "",
            theme,
        }
    }

    pub fn with_iso_week(mut self, iso_week: impl Into<String>) -> Self {
        self.iso_week = iso_week.into();
        self
    }

    pub fn with_filter_label(mut self, label: &'a str) -> Self {
        self.filter_label = label;
        self
    }

    fn tab_display(&self, mode: ViewMode) -> String {
        if mode == self.selected {
            format!("[{}]", mode.label())
        } else {
            mode.label().to_string()
        }
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        // Total width of all tabs for centering
        let total_width: u16 = VIEW_MODES
            .iter()
            .map(|mode| self.tab_display(*mode).len() as u16 + 2)
            .sum::<u16>()
            .saturating_sub(2);

        let mut x = area.x + (area.width.saturating_sub(total_width)) / 2;
        for mode in VIEW_MODES {
            let display = self.tab_display(mode);
            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }
            let style = if mode == self.selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };
            buf.set_string(x, area.y, &display, style);
            x += display_len + 2;
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer, y: u16) {
        let muted = Style::default().fg(self.theme.muted());

        buf.set_string(area.x, y, self.filter_label, muted);

        let week_len = self.iso_week.chars().count() as u16;
        if week_len > 0 && week_len < area.width {
            buf.set_string(area.x + area.width - week_len, y, &self.iso_week, muted);
        }

        let title = format!("◀ {} ▶", self.title);
        let title_len = title.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(title_len) / 2;
        buf.set_string(
            x,
            y,
            &title,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );
    }
}

impl Widget for ViewTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.render_tabs(area, buf);
        if area.height > 1 {
            self.render_title(area, buf, area.y + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_view_keys() {
        assert_eq!(view_key(ViewMode::Month), 'm');
        assert_eq!(view_key(ViewMode::Week), 'w');
        assert_eq!(view_key(ViewMode::Year), 'y');
    }

    #[test]
    fn test_render_tabs_highlights_selected() {
        let area = Rect::new(0, 0, 40, 2);
        let mut buf = Buffer::empty(area);
        ViewTabs::new(ViewMode::Week, "Jan 7 - Jan 13, 2024", Theme::Dark).render(area, &mut buf);
        let tabs = row_text(&buf, 0);
        assert!(tabs.contains("Month  [Week]  Year"));
        assert!(row_text(&buf, 1).contains("◀ Jan 7 - Jan 13, 2024 ▶"));
    }

    #[test]
    fn test_render_title_line_extras() {
        let area = Rect::new(0, 0, 60, 2);
        let mut buf = Buffer::empty(area);
        ViewTabs::new(ViewMode::Month, "January 2024", Theme::Dark)
            .with_iso_week("2024-W02")
            .with_filter_label("Habits: All")
            .render(area, &mut buf);
        let line = row_text(&buf, 1);
        assert!(line.starts_with("Habits: All"));
        assert!(line.ends_with("2024-W02"));
        assert!(line.contains("◀ January 2024 ▶"));
    }
}
