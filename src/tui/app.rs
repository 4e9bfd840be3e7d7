//! Application state and event loop

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};
use tracing::{debug, warn};

use crate::calendar::{build_month_labels, CalendarCursor, ViewMode, WeekRow};
use crate::services::{CompletionSource, GridSummary, JsonFileSource};
use crate::types::{CompletionSnapshot, HabitFilter, LoadWarning, Result};

use super::theme::Theme;
use super::widgets::{
    day_detail::DayDetail,
    heatmap::{YearHeatmap, HEATMAP_HEIGHT},
    help::HelpPopup,
    legend::Legend,
    month::MonthGrid,
    status_bar::StatusBar,
    view_tabs::ViewTabs,
    week::WeekColumns,
};

const DETAIL_WIDTH: u16 = 32;

/// Main application
pub struct App {
    /// Reference date doubles as the selected day
    cursor: CalendarCursor,
    today: NaiveDate,
    snapshot: CompletionSnapshot,
    filter: HabitFilter,
    show_help: bool,
    should_quit: bool,
    theme: Theme,
    /// Load warning or last navigation error, shown in the status bar
    message: Option<String>,
}

impl App {
    pub fn new(snapshot: CompletionSnapshot, mode: ViewMode, today: NaiveDate) -> Self {
        Self {
            cursor: CalendarCursor::new(mode, today),
            today,
            snapshot,
            filter: HabitFilter::all(),
            show_help: false,
            should_quit: false,
            theme: Theme::default(),
            message: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_warning(mut self, warning: Option<LoadWarning>) -> Self {
        self.message = warning.map(|w| match w {
            LoadWarning::Missing(path) => format!("No data file at {}", path),
            LoadWarning::Repaired { skipped, clamped } => format!(
                "Data repaired: {} bad dates skipped, {} rates clamped",
                skipped, clamped
            ),
        });
        self
    }

    pub fn cursor(&self) -> &CalendarCursor {
        &self.cursor
    }

    pub fn selected(&self) -> NaiveDate {
        self.cursor.date()
    }

    pub fn filter(&self) -> &HabitFilter {
        &self.filter
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.should_quit = true;
                    }
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                    }
                    // Help overlay swallows everything else
                    _ if self.show_help => {}
                    KeyCode::Left | KeyCode::Char('h') => {
                        let result = self.cursor.prev();
                        self.record(result);
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        let result = self.cursor.next();
                        self.record(result);
                    }
                    KeyCode::Up | KeyCode::Char('k') => self.move_selection(-7),
                    KeyCode::Down | KeyCode::Char('j') => self.move_selection(7),
                    KeyCode::Char('[') => self.move_selection(-1),
                    KeyCode::Char(']') => self.move_selection(1),
                    KeyCode::Char('t') => {
                        self.cursor.today(self.today);
                        self.message = None;
                    }
                    KeyCode::Char('m') => self.cursor.set_mode(ViewMode::Month),
                    KeyCode::Char('w') => self.cursor.set_mode(ViewMode::Week),
                    KeyCode::Char('y') => self.cursor.set_mode(ViewMode::Year),
                    KeyCode::Enter if self.cursor.mode() == ViewMode::Year => {
                        let selected = self.selected();
                        self.cursor.drill_into_week(selected);
                    }
                    KeyCode::Char('f') => {
                        self.filter.cycle(self.snapshot.habits());
                        debug!("habit filter: {}", self.filter_label());
                    }
                    _ => {}
                }
            }
        }
    }

    fn move_selection(&mut self, days: i64) {
        let result = self.cursor.shift_days(days);
        self.record(result);
    }

    fn record(&mut self, result: Result<()>) {
        if let Err(e) = result {
            warn!("navigation failed: {}", e);
            self.message = Some(e.to_string());
        }
    }

    /// Advance the clock; keeps "today" correct across midnight
    pub fn tick(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn filter_label(&self) -> String {
        match self.filter.selected() {
            [] => "Habits: All".to_string(),
            [id] => {
                let name = self
                    .snapshot
                    .habit(id)
                    .map(|h| h.name.as_str())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(id);
                format!("Habits: {}", name)
            }
            ids => format!("Habits: {} selected", ids.len()),
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn render_error(&self, area: Rect, buf: &mut Buffer, message: &str) {
        let y = area.y + area.height / 2;
        let text = format!("Error: {}", message);
        let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
        buf.set_string(x, y, &text, Style::default().fg(self.theme.error()));
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer, weeks: &[WeekRow]) {
        let selected = self.selected();
        match self.cursor.mode() {
            ViewMode::Month => {
                let [grid_area, detail_area] = Layout::horizontal([
                    Constraint::Length(MonthGrid::width() + 2),
                    Constraint::Length(DETAIL_WIDTH),
                ])
                .flex(ratatui::layout::Flex::Center)
                .areas(area);
                MonthGrid::new(weeks, &self.cursor, &self.snapshot, &self.filter, self.today)
                    .with_theme(self.theme)
                    .render(grid_area, buf);
                DayDetail::new(selected, &self.snapshot, &self.filter)
                    .with_theme(self.theme)
                    .render(detail_area, buf);
            }
            ViewMode::Week => {
                if let Some(week) = weeks.first() {
                    WeekColumns::new(week, &self.snapshot, &self.filter)
                        .with_today(self.today)
                        .with_selected(selected)
                        .with_theme(self.theme)
                        .render(area, buf);
                }
            }
            ViewMode::Year => {
                let labels = build_month_labels(weeks);
                let [heatmap_area, _, detail_area] = Layout::vertical([
                    Constraint::Length(HEATMAP_HEIGHT),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .areas(area);
                YearHeatmap::new(
                    weeks,
                    &labels,
                    &self.snapshot,
                    &self.filter,
                    self.cursor.week_start(),
                )
                    .with_today(self.today)
                    .with_selected(selected)
                    .with_theme(self.theme)
                    .render(heatmap_area, buf);
                let [detail_area] = Layout::horizontal([Constraint::Length(DETAIL_WIDTH)])
                    .flex(ratatui::layout::Flex::Center)
                    .areas(detail_area);
                DayDetail::new(selected, &self.snapshot, &self.filter)
                    .with_theme(self.theme)
                    .render(detail_area, buf);
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (weeks, title) = match (self.cursor.weeks(), self.cursor.title()) {
            (Ok(weeks), Ok(title)) => (weeks, title),
            (Err(e), _) | (_, Err(e)) => {
                self.render_error(area, buf, &e.to_string());
                return;
            }
        };

        let [header_area, _, body_area, legend_area, status_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .areas(area);

        let filter_label = self.filter_label();
        ViewTabs::new(self.cursor.mode(), &title, self.theme)
            .with_iso_week(self.cursor.iso_week().to_string())
            .with_filter_label(&filter_label)
            .render(header_area, buf);

        self.render_body(body_area, buf, &weeks);

        Legend::new(self.theme).render(legend_area, buf);

        let cursor = &self.cursor;
        let summary =
            GridSummary::from_weeks_where(&weeks, &self.snapshot, &self.filter, |d| {
                cursor.in_period(d)
            });
        StatusBar::new(&summary, self.theme)
            .with_message(self.message.as_deref())
            .render(status_area, buf);

        // Render help popup overlay if active
        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI against the completion export at `data_file`
pub fn run(data_file: PathBuf, view: ViewMode) -> anyhow::Result<()> {
    // Must be called before entering raw mode
    let theme = Theme::detect();

    let source = JsonFileSource::new(data_file);
    let (snapshot, warning) = source.load()?;
    debug!(
        "loaded {} days and {} habits from {}",
        snapshot.day_count(),
        snapshot.habits().len(),
        source.name()
    );

    let mut app = App::new(snapshot, view, Local::now().date_naive())
        .with_theme(theme)
        .with_warning(warning);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(250))? {
            app.handle_event(event::read()?);
        } else {
            app.tick(Local::now().date_naive());
        }
    }

    Ok(())
}
