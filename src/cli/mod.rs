mod grid;

pub use grid::{intensity_glyph, render_legend, render_text, GridArgs};

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::calendar::ViewMode;
use crate::services::{CompletionSource, Config, JsonFileSource};
use crate::types::LoadWarning;

/// Terminal heatmap calendar for habit completions
#[derive(Parser)]
#[command(name = "habitgrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Completion export to read (overrides HABITGRID_DATA and config)
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui {
        /// Initial view (month, week or year)
        #[arg(long)]
        view: Option<ViewMode>,
    },

    /// Print a calendar grid
    Grid(GridArgs),

    /// Show the intensity legend
    Legend,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let data_file = config.resolve_data_file(self.data.as_deref())?;

        match self.command {
            None => crate::tui::run(data_file, config.default_view),
            Some(Commands::Tui { view }) => {
                crate::tui::run(data_file, view.unwrap_or(config.default_view))
            }
            Some(Commands::Grid(args)) => {
                let source = JsonFileSource::new(data_file);
                let (snapshot, warning) = source.load()?;
                if let Some(LoadWarning::Missing(path)) = &warning {
                    warn!("no completion data at {}", path);
                }
                let today = Local::now().date_naive();
                print!("{}", args.render(&snapshot, config.default_view, today)?);
                Ok(())
            }
            Some(Commands::Legend) => {
                print!("{}", render_legend());
                Ok(())
            }
        }
    }
}
