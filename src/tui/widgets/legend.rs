//! Heatmap legend: "Less ██ ██ ██ ██ ██ More"

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::calendar::IntensityLevel;
use crate::tui::theme::Theme;

pub struct Legend {
    theme: Theme,
}

impl Legend {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Display width of the swatch line
    pub fn width() -> u16 {
        // "Less " + 5 * "██ " + "More"
        5 + IntensityLevel::ALL.len() as u16 * 3 + 4
    }

    /// Level names for the second line, e.g. "No · Low · ... · Very High"
    pub fn names() -> String {
        IntensityLevel::ALL
            .iter()
            .map(|level| level.label())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < Self::width() {
            return;
        }
        let muted = Style::default().fg(self.theme.muted());
        let x0 = area.x + (area.width - Self::width()) / 2;

        buf.set_string(x0, area.y, "Less", muted);
        let mut x = x0 + 5;
        for level in IntensityLevel::ALL {
            buf.set_string(
                x,
                area.y,
                "██",
                Style::default().fg(self.theme.heatmap_color(level)),
            );
            x += 3;
        }
        buf.set_string(x, area.y, "More", muted);

        if area.height > 1 {
            let names = Self::names();
            let width = names.chars().count() as u16;
            if width <= area.width {
                let nx = area.x + (area.width - width) / 2;
                buf.set_string(nx, area.y + 1, names, muted);
            }
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
    fn test_legend_width() {
        assert_eq!(Legend::width(), 24);
    }

    #[test]
    fn test_legend_names() {
        assert_eq!(Legend::names(), "No · Low · Medium · High · Very High");
    }

    #[test]
    fn test_render_swatches() {
        let area = Rect::new(0, 0, 24, 2);
        let mut buf = Buffer::empty(area);
        let theme = Theme::Dark;
        Legend::new(theme).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "Less ██ ██ ██ ██ ██ More");
        assert_eq!(
            buf[(5, 0)].fg,
            theme.heatmap_color(IntensityLevel::None)
        );
        assert_eq!(
            buf[(17, 0)].fg,
            theme.heatmap_color(IntensityLevel::Max)
        );
        // Names do not fit in 24 columns
        assert_eq!(row_text(&buf, 1).trim(), "");
    }

    #[test]
    fn test_render_too_narrow_is_noop() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        Legend::new(Theme::Dark).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "");
    }
}
