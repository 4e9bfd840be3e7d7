use clap::Parser;
use tracing_subscriber::EnvFilter;

use habitgrid::cli::Cli;

/// Log filter variable, e.g. `HABITGRID_LOG=debug`
const LOG_ENV_VAR: &str = "HABITGRID_LOG";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    cli.run()
}
