//! Services for loading completion data and shaping views

pub mod completion_source;
pub mod config;
pub mod report;
pub mod summary;

pub use completion_source::{CompletionSource, JsonFileSource};
pub use config::Config;
pub use report::ViewReport;
pub use summary::GridSummary;
