//! Flatten command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{FlattenStats, OUTPUT_SUFFIX};
use crate::fetch::{acquire_source, is_remote_locator};
use crate::flatten::Flattener;
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct FlattenArgs {
    /// Local path or GitHub repository URL
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Maximum file size in KiB [default: 100]
    #[arg(
        long,
        value_name = "KIB",
        env = "REPO_FLATTEN_MAX_SIZE",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_size: Option<u64>,

    /// Output file [default: <source name>_output.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Branch or tag to clone when SOURCE is a repository URL
    #[arg(long = "ref", value_name = "REF")]
    pub git_ref: Option<String>,

    /// Path to config file (repo-flatten.toml or repo-flatten.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: FlattenArgs, verbose: bool) -> Result<()> {
    let start_time = Instant::now();

    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let merged = merge_cli_with_config(
        file_config,
        CliOverrides { max_size_kib: args.max_size, output: args.output, git_ref: args.git_ref },
    );

    let source = args.source.as_str();
    if merged.max_size_kib == 0 {
        anyhow::bail!("max_size_kib must be at least 1");
    }
    let output = merged.output.clone().unwrap_or_else(|| default_output_path(source));

    if is_remote_locator(source) {
        println!("{}", style("Processing GitHub repository...").bold().blue());
    }
    let repo = acquire_source(source, merged.git_ref.as_deref())?;

    let stats = Flattener::new(repo.root())
        .max_file_bytes(merged.max_file_bytes())
        .ignore_file(merged.ignore_file.clone())
        .progress(build_progress())
        .run(repo.label(), &output)?;

    tracing::debug!("Finished in {:.2}s", start_time.elapsed().as_secs_f64());
    print_summary(&stats, &output, verbose);
    Ok(())
}

/// `<stem of source>_output.txt`, falling back to `repo` when the source has no name.
pub fn default_output_path(source: &str) -> PathBuf {
    let stem = Path::new(source.trim_end_matches('/'))
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "..")
        .unwrap_or("repo");
    PathBuf::from(format!("{stem}{OUTPUT_SUFFIX}"))
}

fn build_progress() -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    if let Ok(template) =
        ProgressStyle::with_template("{spinner:.green} Processing repository... {wide_msg}")
    {
        progress.set_style(template);
    }
    progress
}

fn print_summary(stats: &FlattenStats, output: &Path, verbose: bool) {
    println!("{}", style("Conversion successful!").bold().green());
    println!("{} {}", style("Processed Files:").bold(), stats.files_processed);
    if verbose {
        println!("{} {}", style("Seen Files:").bold(), stats.files_seen);
    }
    println!("{} {}", style("Output File:").bold(), output.display());

    if verbose {
        println!(
            "{} {} (size: {}, binary: {}, ignored: {}, unreadable: {})",
            style("Skipped Files:").bold(),
            stats.files_skipped(),
            stats.files_skipped_size,
            stats.files_skipped_binary,
            stats.files_skipped_ignored,
            stats.files_skipped_unreadable
        );
        if stats.files_failed > 0 {
            println!("{} {}", style("Failed Files:").bold(), stats.files_failed);
        }
        println!("{} {}", style("Pruned Directories:").bold(), stats.dirs_pruned);
        println!("{} {}", style("Bytes Written:").bold(), format_with_commas(stats.bytes_written));
    }
}
