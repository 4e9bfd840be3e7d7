//! TUI widgets

pub mod day_detail;
pub mod heatmap;
pub mod help;
pub mod legend;
pub mod month;
pub mod status_bar;
pub mod view_tabs;
pub mod week;
