//! Calendar heatmap grids for habit completion data.
//!
//! [`calendar`] holds the pure grid builder (weeks, month labels, intensity
//! buckets, view cursor). [`services`] loads completion exports and shapes
//! them into reports; [`cli`] and [`tui`] are the two front ends.

pub mod calendar;
pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
