//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 20;

/// (key, description) pairs per section
const NAVIGATION: [(&str, &str); 5] = [
    ("h/l or ←/→", "Previous / next period"),
    ("k/j or ↑/↓", "Move selection by a week"),
    ("[ / ]", "Move selection by a day"),
    ("t", "Jump to today"),
    ("Enter", "Open week (year view)"),
];
const VIEWS: [(&str, &str); 2] = [("m / w / y", "Month / Week / Year"), ("f", "Cycle habit filter")];
const GENERAL: [(&str, &str); 2] = [("q / Esc", "Quit"), ("?", "Toggle help")];

pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn render_section(
        &self,
        rows: &[Rect],
        buf: &mut Buffer,
        header: &str,
        bindings: &[(&str, &str)],
    ) {
        let Some((header_row, rest)) = rows.split_first() else {
            return;
        };
        Paragraph::new(Line::from(Span::styled(
            header.to_string(),
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .render(*header_row, buf);

        if let Some(sep_row) = rest.first() {
            buf.set_string(
                sep_row.x,
                sep_row.y,
                "─".repeat(sep_row.width as usize),
                Style::default().fg(self.theme.muted()),
            );
        }
        for (row, (key, desc)) in rest.iter().skip(1).zip(bindings) {
            render_keybinding(*row, buf, key, desc, self.theme);
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" habitgrid v{} ", VERSION))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([Constraint::Length(1); POPUP_HEIGHT as usize - 2]).split(inner);

        // header + separator + bindings, then a blank row
        let nav_end = 2 + NAVIGATION.len();
        let views_start = nav_end + 1;
        let views_end = views_start + 2 + VIEWS.len();
        let general_start = views_end + 1;
        let general_end = general_start + 2 + GENERAL.len();

        self.render_section(rows.get(0..nav_end).unwrap_or(&[]), buf, "Navigation", &NAVIGATION);
        self.render_section(
            rows.get(views_start..views_end).unwrap_or(&[]),
            buf,
            "Views",
            &VIEWS,
        );
        self.render_section(
            rows.get(general_start..general_end).unwrap_or(&[]),
            buf,
            "General",
            &GENERAL,
        );

        if let Some(hint_row) = rows.last() {
            Paragraph::new(Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(*hint_row, buf);
        }
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(format!("  {:<14}", key), Style::default().fg(theme.accent())),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}
