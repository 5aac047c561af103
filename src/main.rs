//! topsize - find the largest entries under a directory tree.
//!
//! Usage:
//!   topsize                  Search the current directory
//!   topsize PATH             Search PATH
//!   topsize PATH -n 25       Report the 25 largest entries
//!   topsize --help           Show help

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};

use topsize_core::{DEFAULT_TOP_N, Entry, ScanConfig, ScanReport};
use topsize_scan::TopScanner;

#[derive(Parser)]
#[command(
    name = "topsize",
    version,
    about = "Find the largest files and directories under a path",
    long_about = "topsize walks a directory tree and reports the N largest entries by byte size.\n\n\
                  Directories are ranked by their own metadata size, not by the size of their \
                  contents. Unreadable directories and vanished entries are reported on stderr \
                  and skipped."
)]
struct Cli {
    /// Directory to search (defaults to current directory)
    path: Option<PathBuf>,

    /// Number of entries to report
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_TOP_N,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    top: usize,

    /// Show human-readable sizes instead of bytes
    #[arg(long)]
    human: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Skip entries whose name starts with a dot
    #[arg(long)]
    no_hidden: bool,

    /// Skip entries whose name matches this glob (repeatable)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Suppress status lines on stderr (warnings are still printed)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    run(cli)
}

/// Resolve the root, scan it, and print the report.
fn run(cli: Cli) -> Result<()> {
    let root = match cli.path {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context(
                "Unable to detect current working directory, try passing a directory as argument",
            )?;
            status(cli.quiet, "Defaulting to current directory");
            cwd
        }
    };

    let config = ScanConfig::builder()
        .root(root.clone())
        .top_n(cli.top)
        .include_hidden(!cli.no_hidden)
        .ignore_patterns(cli.ignore)
        .build()
        .context("Invalid configuration")?;

    status(
        cli.quiet,
        &format!("Finding the {} largest entries in: {}", cli.top, root.display()),
    );

    let scanner = TopScanner::new(config).context("Invalid configuration")?;
    let report = scanner
        .scan()
        .with_context(|| format!("Cannot scan {}", root.display()))?;

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    status(
        cli.quiet,
        &format!("Completed in {:.6} seconds", report.scan_duration.as_secs_f64()),
    );

    match cli.format {
        OutputFormat::Text => print_entries(&report, cli.human),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_entries(report: &ScanReport, human: bool) {
    for entry in &report.entries {
        println!("{}", format_entry(entry, human));
    }
}

/// One result line: `<path>\t<size>`.
fn format_entry(entry: &Entry, human: bool) -> String {
    let size = if human {
        format_size(entry.size)
    } else {
        entry.size.to_string()
    };
    format!("{}\t{}", entry.path.display(), size)
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

fn status(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{message}");
    }
}
