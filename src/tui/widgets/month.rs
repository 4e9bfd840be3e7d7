//! Month grid widget: day numbers over intensity bars

use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::calendar::{weekday_order, Cell, CalendarCursor, WeekRow};
use crate::tui::theme::Theme;
use crate::types::{CompletionSnapshot, HabitFilter};

const CELL_WIDTH: u16 = 5; // 4 chars content + 1 gap
const ROW_HEIGHT: u16 = 2; // day number + bar

/// Month grid for ratatui
pub struct MonthGrid<'a> {
    weeks: &'a [WeekRow],
    cursor: &'a CalendarCursor,
    snapshot: &'a CompletionSnapshot,
    filter: &'a HabitFilter,
    today: NaiveDate,
    theme: Theme,
}

impl<'a> MonthGrid<'a> {
    pub fn new(
        weeks: &'a [WeekRow],
        cursor: &'a CalendarCursor,
        snapshot: &'a CompletionSnapshot,
        filter: &'a HabitFilter,
        today: NaiveDate,
    ) -> Self {
        Self {
            weeks,
            cursor,
            snapshot,
            filter,
            today,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Width of the full grid
    pub fn width() -> u16 {
        CELL_WIDTH * 7
    }

    /// Height needed for `rows` week rows plus the weekday header
    pub fn height(rows: usize) -> u16 {
        1 + rows as u16 * ROW_HEIGHT
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, week_start: Weekday) {
        let style = Style::default().fg(self.theme.muted());
        for (i, day) in weekday_order(week_start).iter().enumerate() {
            let x = area.x + i as u16 * CELL_WIDTH;
            if x + 4 > area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, format!("{:>3} ", &day.to_string()[..2]), style);
        }
    }

    fn render_day(&self, buf: &mut Buffer, x: u16, y: u16, date: NaiveDate, max_y: u16) {
        let in_period = self.cursor.in_period(date);
        let mut number_style = if in_period {
            Style::default().fg(self.theme.text())
        } else {
            Style::default().fg(self.theme.muted())
        };
        if date == self.today {
            number_style = number_style
                .fg(self.theme.today())
                .add_modifier(Modifier::BOLD);
        }
        if date == self.cursor.date() {
            number_style = number_style
                .fg(self.theme.selection())
                .add_modifier(Modifier::REVERSED);
        }
        buf.set_string(x, y, format!("{:>3} ", date.day()), number_style);

        // Days from adjacent months carry no bar
        if in_period && y + 1 < max_y {
            let level = self.snapshot.intensity_for(date, self.filter);
            buf.set_string(
                x,
                y + 1,
                "▀▀▀▀",
                Style::default().fg(self.theme.heatmap_color(level)),
            );
        }
    }
}

impl Widget for MonthGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CELL_WIDTH || area.height == 0 {
            return;
        }
        self.render_header(area, buf, self.cursor.week_start());

        let max_x = area.x + area.width;
        let max_y = area.y + area.height;
        for (row, week) in self.weeks.iter().enumerate() {
            let y = area.y + 1 + row as u16 * ROW_HEIGHT;
            if y >= max_y {
                break;
            }
            for (i, cell) in week.cells().iter().enumerate() {
                let x = area.x + i as u16 * CELL_WIDTH;
                if x + 4 > max_x {
                    break;
                }
                if let Cell::Real(date) = *cell {
                    self.render_day(buf, x, y, date, max_y);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ViewMode;
    use crate::types::{DayCompletion, HabitInfo};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(MonthGrid::width(), 35);
        assert_eq!(MonthGrid::height(5), 11);
    }

    #[test]
    fn test_render_january_2024() {
        let cursor = CalendarCursor::new(ViewMode::Month, ymd(2024, 1, 10));
        let weeks = cursor.weeks().unwrap();
        let mut snapshot = CompletionSnapshot::default();
        snapshot.insert_day(
            ymd(2024, 1, 2),
            DayCompletion {
                completions: vec!["h1".into()],
                completion_rate: 80.0,
            },
        );
        let area = Rect::new(0, 0, MonthGrid::width(), MonthGrid::height(weeks.len()));
        let mut buf = Buffer::empty(area);
        let theme = Theme::Dark;

        MonthGrid::new(&weeks, &cursor, &snapshot, &HabitFilter::all(), ymd(2024, 1, 15))
            .with_theme(theme)
            .render(area, &mut buf);

        assert_eq!(row_text(&buf, 0).trim_end(), " Su   Mo   Tu   We   Th   Fr   Sa");
        assert!(row_text(&buf, 1).starts_with(" 31    1    2"));

        // Dec 31 is outside January: muted number, no bar
        assert_eq!(buf[(1, 1)].fg, theme.muted());
        assert_eq!(buf[(0, 2)].symbol(), " ");
        // Jan 2 bar uses the Max color
        assert_eq!(buf[(10, 2)].symbol(), "▀");
        assert_eq!(
            buf[(10, 2)].fg,
            theme.heatmap_color(crate::calendar::IntensityLevel::Max)
        );
        // Selected Jan 10 (row 1, Wednesday) is reversed
        assert!(buf[(16, 3)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_render_bar_follows_filter() {
        let cursor = CalendarCursor::new(ViewMode::Month, ymd(2024, 1, 10));
        let weeks = cursor.weeks().unwrap();
        let mut snapshot = CompletionSnapshot::new(vec![
            HabitInfo {
                id: "h1".into(),
                name: "Read".into(),
                color: None,
                icon: None,
            },
            HabitInfo {
                id: "h2".into(),
                name: "Run".into(),
                color: None,
                icon: None,
            },
        ]);
        snapshot.insert_day(
            ymd(2024, 1, 2),
            DayCompletion {
                completions: vec!["h2".into()],
                completion_rate: 50.0,
            },
        );
        let area = Rect::new(0, 0, MonthGrid::width(), MonthGrid::height(weeks.len()));
        let theme = Theme::Dark;
        let filter = HabitFilter::only(["h1"]);
        let mut buf = Buffer::empty(area);

        MonthGrid::new(&weeks, &cursor, &snapshot, &filter, ymd(2024, 1, 15))
            .with_theme(theme)
            .render(area, &mut buf);

        // Only h2 was done on Jan 2, so the h1 view shows no activity
        assert_eq!(
            buf[(10, 2)].fg,
            theme.heatmap_color(crate::calendar::IntensityLevel::None)
        );
    }

    #[test]
    fn test_render_clips_to_area() {
        let cursor = CalendarCursor::new(ViewMode::Month, ymd(2024, 3, 1));
        let weeks = cursor.weeks().unwrap();
        let snapshot = CompletionSnapshot::default();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        MonthGrid::new(&weeks, &cursor, &snapshot, &HabitFilter::all(), ymd(2024, 3, 1))
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), " Su   Mo    ");
    }
}
