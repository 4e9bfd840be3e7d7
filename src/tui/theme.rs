//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::calendar::IntensityLevel;

/// Fallback dot color for habits without one (indigo)
const DEFAULT_HABIT_COLOR: Color = Color::Rgb(0x63, 0x66, 0xf1);

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, day numbers)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (view switcher, keybinding keys)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (weekday labels, days outside the period, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Today highlight
    pub fn today(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Selected day highlight
    pub fn selection(self) -> Color {
        match self {
            Self::Dark => Color::LightBlue,
            Self::Light => Color::Blue,
        }
    }

    /// Progress bars and completion checkmarks
    pub fn bar(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Heatmap intensity color (GitHub-style green gradient)
    pub fn heatmap_color(self, level: IntensityLevel) -> Color {
        match self {
            Self::Dark => match level {
                IntensityLevel::None => Color::Indexed(236),
                IntensityLevel::Low => Color::Indexed(22),
                IntensityLevel::Medium => Color::Indexed(28),
                IntensityLevel::High => Color::Indexed(34),
                IntensityLevel::Max => Color::Indexed(40),
            },
            Self::Light => match level {
                IntensityLevel::None => Color::Indexed(254),
                IntensityLevel::Low => Color::Indexed(194),
                IntensityLevel::Medium => Color::Indexed(157),
                IntensityLevel::High => Color::Indexed(71),
                IntensityLevel::Max => Color::Indexed(28),
            },
        }
    }
}

/// Parse a `#rrggbb` habit color, falling back to indigo
pub fn habit_color(hex: Option<&str>) -> Color {
    hex.and_then(parse_hex_color).unwrap_or(DEFAULT_HABIT_COLOR)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.today(), Color::Yellow);
        assert_eq!(t.bar(), Color::Green);
        assert_eq!(t.error(), Color::Red);
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.today(), Color::Indexed(130));
        assert_eq!(t.bar(), Color::Indexed(22));
        assert_eq!(t.error(), Color::Indexed(124));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_dark_heatmap_colors() {
        let t = Theme::Dark;
        assert_eq!(t.heatmap_color(IntensityLevel::None), Color::Indexed(236));
        assert_eq!(t.heatmap_color(IntensityLevel::Low), Color::Indexed(22));
        assert_eq!(t.heatmap_color(IntensityLevel::Medium), Color::Indexed(28));
        assert_eq!(t.heatmap_color(IntensityLevel::High), Color::Indexed(34));
        assert_eq!(t.heatmap_color(IntensityLevel::Max), Color::Indexed(40));
    }

    #[test]
    fn test_light_heatmap_colors() {
        let t = Theme::Light;
        assert_eq!(t.heatmap_color(IntensityLevel::None), Color::Indexed(254));
        assert_eq!(t.heatmap_color(IntensityLevel::Max), Color::Indexed(28));
    }

    #[test]
    fn test_habit_color_parsing() {
        assert_eq!(habit_color(Some("#22c55e")), Color::Rgb(0x22, 0xc5, 0x5e));
        assert_eq!(habit_color(Some("#FFFFFF")), Color::Rgb(255, 255, 255));
        assert_eq!(habit_color(Some("green")), DEFAULT_HABIT_COLOR);
        assert_eq!(habit_color(Some("#12345")), DEFAULT_HABIT_COLOR);
        assert_eq!(habit_color(None), DEFAULT_HABIT_COLOR);
    }
}
