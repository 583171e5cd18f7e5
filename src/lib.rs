// Module declarations
pub(crate) mod cli;
pub(crate) mod commands;
pub mod config;
pub mod ignore;
pub mod packages;

pub use config::AppConfig;
pub use ignore::IgnoreSet;
pub use packages::{Report, ensure_markers, find_missing_markers};

use anyhow::Result;

/// Main entry point for CLI usage
pub fn run_cli() -> Result<()> {
    cli::run_cli()
}

/// Entry point for CLI usage with custom arguments
pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cli::run_cli_with(args)
}
