//! corpus-balance - keep as many files per genre as fit a size budget
//!
//! Reads a folder of `<genre>_<name>.txt` files, selects per genre the
//! largest subset whose character (or word) count stays within the
//! capacity, and copies it to the destination folder.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use corpus_balance::logging::init_tracing;
use corpus_balance::types::FailurePolicy;
use corpus_balance::{run, BalanceConfig, RunReport};

#[derive(Parser, Debug)]
#[command(name = "corpus-balance")]
#[command(
    author,
    version,
    about,
    long_about = r#"Balance a text corpus per genre under a size budget.

The genre of each file is the part of its name before the first delimiter
("roman_balzac.txt" -> "roman"). For every genre, the largest possible
number of files is kept such that their summed size stays within CAPACITY.

Examples:
    corpus-balance --source data/romans --capacity 2931562 --mode words
    corpus-balance --config balance.json --dry-run --json
"#
)]
struct Cli {
    /// JSON config file; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Folder to scan.
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Folder receiving the selected files (created if missing).
    #[arg(long, value_name = "DIR")]
    destination: Option<PathBuf>,

    /// Per-genre budget, in units of MODE.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    capacity: Option<i64>,

    /// Weight function: characters or words.
    #[arg(long, value_name = "MODE")]
    mode: Option<String>,

    /// Only scan files with this extension.
    #[arg(long, value_name = "EXT", conflicts_with = "all_files")]
    extension: Option<String>,

    /// Scan every file regardless of extension.
    #[arg(long)]
    all_files: bool,

    /// Character separating the genre from the rest of the file name.
    #[arg(long, value_name = "CHAR")]
    delimiter: Option<char>,

    /// Descend into subdirectories.
    #[arg(long)]
    recursive: bool,

    /// Abort on the first unreadable or uncopyable file instead of skipping it.
    #[arg(long)]
    fail_fast: bool,

    /// Compute the selection without copying anything.
    #[arg(long)]
    dry_run: bool,

    /// Write an audit manifest (JSON) to this path.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Print the run summary as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// More diagnostics on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors on stderr.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<BalanceConfig> {
        let mut config = match &self.config {
            Some(path) => BalanceConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => {
                let Some(source) = self.source.clone() else {
                    bail!("--source is required without --config");
                };
                let Some(capacity) = self.capacity else {
                    bail!("--capacity is required without --config");
                };
                BalanceConfig::new(source, capacity)
            }
        };

        if let Some(source) = self.source {
            config.source_folder = source;
        }
        if let Some(destination) = self.destination {
            config.destination_folder = destination;
        }
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.all_files {
            config.extension = None;
        } else if let Some(ext) = self.extension {
            config.extension = Some(ext.trim_start_matches('.').to_string());
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        config.recursive |= self.recursive;
        config.dry_run |= self.dry_run;
        if self.fail_fast {
            config.on_error = FailurePolicy::Abort;
        }
        if self.report.is_some() {
            config.report_path = self.report;
        }
        Ok(config)
    }
}

fn print_table(report: &RunReport) {
    println!(
        "{:<24} {:>9} {:>10} {:>14} {:>14} {:>14}",
        "category", "selected", "considered", "weight_used", "capacity", "headroom"
    );
    for s in report.selection.summaries() {
        println!(
            "{:<24} {:>9} {:>10} {:>14} {:>14} {:>14}",
            s.category.as_str(),
            s.documents_selected,
            s.documents_considered,
            s.weight_used,
            s.capacity,
            s.headroom
        );
    }
    match report.copied {
        Some(n) => println!("copied {n} of {} selected files", report.selection.total_selected()),
        None => println!("dry run: {} files selected", report.selection.total_selected()),
    }
    for item in &report.skipped {
        println!("skipped {}: {}", item.path.display(), item.reason);
    }
    for failure in &report.copy_failures {
        println!("failed {failure}");
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    init_tracing(level);

    let json = cli.json;
    let config = cli.into_config()?;
    let report = run(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        print_table(&report);
    }

    if report.copy_failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}
