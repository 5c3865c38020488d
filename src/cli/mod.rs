//! Command-line interface for repo-flatten

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod flatten;

pub use flatten::{default_output_path, FlattenArgs};

/// Flatten a local directory or GitHub repository into a single text file
#[derive(Parser)]
#[command(name = "repo-flatten")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    args: FlattenArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    flatten::run(cli.args, cli.verbose)
}
