//! Type definitions for habitgrid

mod completion;
mod error;

pub use completion::*;
pub use error::*;

/// Loading warning types surfaced in the status line
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// Data file does not exist yet
    Missing(String),
    /// Some day records were skipped or had their rate clamped
    Repaired { skipped: usize, clamped: usize },
}
