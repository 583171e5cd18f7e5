use crate::commands;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ensure-init-files",
    version,
    about = "Create missing __init__.py files in every Python package directory"
)]
struct Cli {
    /// Project root to scan
    #[arg(default_value = ".")]
    root_dir: PathBuf,

    /// Increase verbosity (-v, -vv). Uses RUST_LOG under the hood
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to pyproject.toml (defaults to ROOT_DIR/pyproject.toml if present)
    #[arg(long)]
    pyproject: Option<String>,

    /// Additional directory name or glob to ignore (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Only report missing files; exit non-zero if any are missing
    #[arg(long)]
    check: bool,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    // A subscriber may already be installed when invoked more than once in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let cli = Cli::try_parse_from(args)?;
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    if cli.check {
        commands::check(&cli.root_dir, cli.pyproject.as_deref(), &cli.ignore)
    } else {
        commands::ensure(&cli.root_dir, cli.pyproject.as_deref(), &cli.ignore).map(|_| ())
    }
}
