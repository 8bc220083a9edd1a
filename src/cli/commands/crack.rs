//! `zipcrack crack`: run a search and report the result

use crate::cli::Output;
use crate::config::ZipcrackConfig;
use crate::error::SearchError;
use crate::persist::LastDirectory;
use crate::search::{SearchOutcome, SearchReport, SearchRequest, SearchSession};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Args)]
pub struct CrackArgs {
    /// Archive containing the protected entry
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Longest password to try
    #[arg(short = 'l', long, allow_hyphen_values = true)]
    pub max_length: Option<i64>,

    /// Index of the protected entry inside the archive
    #[arg(short, long)]
    pub entry: Option<usize>,

    /// Maximum concurrent workers (0 = one per CPU)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Alphabet to build candidates from, in search order
    #[arg(long)]
    pub charset: Option<String>,

    /// Reopen the archive for every candidate instead of caching a handle per worker
    #[arg(long)]
    pub no_reuse_handle: bool,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable result with statistics
    Text,
    /// JSON report for machine processing
    Json,
}

/// CLI flags layered over the configuration files
#[derive(Serialize)]
pub struct CrackOverrides {
    search: SearchOverrides,
}

#[derive(Serialize)]
struct SearchOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reuse_handle: Option<bool>,
}

impl CrackArgs {
    pub fn overrides(&self) -> CrackOverrides {
        CrackOverrides {
            search: SearchOverrides {
                max_length: self.max_length,
                entry_index: self.entry,
                max_threads: self.threads,
                charset: self.charset.clone(),
                reuse_handle: self.no_reuse_handle.then_some(false),
            },
        }
    }
}

pub async fn execute(args: CrackArgs, config: &ZipcrackConfig, output: &Output) -> Result<ExitCode> {
    let last_dir = LastDirectory::new(&config.state.last_dir_file);
    let archive = last_dir.resolve(&args.archive);

    let request = SearchRequest::new(&archive, config.search.entry_index, config.search.max_length)
        .map_err(SearchError::from)?;
    let options = config.search_options()?;

    tracing::info!("Analyzing passwords from file: {}", archive.display());
    if let Err(e) = last_dir.remember_archive(&archive) {
        tracing::warn!("Could not remember archive directory: {e:#}");
    }

    let json = matches!(args.format, OutputFormat::Json);
    let output = if json { Output::new(false, true) } else { *output };

    output.header("🔐 Password search");
    output.key_value("Archive", &archive.display().to_string(), false);
    output.key_value("Entry", &request.entry_index().to_string(), false);
    output.key_value("Max length", &request.max_length().to_string(), false);
    output.key_value("Charset", &format!("{} symbols", options.charset.len()), false);
    if let Some(space) = options.charset.search_space(request.max_length()) {
        output.verbose(&format!("Search space: {space} candidates"));
    }
    output.blank_line();

    let max_length = request.max_length();
    let session = SearchSession::spawn(request, options).context("Failed to start search")?;
    let spinner = if args.no_progress {
        indicatif::ProgressBar::hidden()
    } else {
        output.spinner("Analyzing password...")
    };

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(Duration::from_millis(200));
    let mut cancelled = false;

    while session.is_running() {
        tokio::select! {
            _ = &mut ctrl_c, if !cancelled => {
                cancelled = true;
                session.cancel();
                spinner.set_message("Cancelling...");
                tracing::warn!("Interrupt received, cancelling search");
            }
            _ = ticker.tick() => {
                if !cancelled {
                    spinner.set_message(format!(
                        "Analyzing password... {} candidates tested",
                        session.attempts()
                    ));
                }
            }
        }
    }

    let report = session.wait().await?;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, max_length, &output);
    }

    Ok(match report.outcome {
        SearchOutcome::Found { .. } => ExitCode::SUCCESS,
        SearchOutcome::Exhausted | SearchOutcome::Cancelled => ExitCode::from(1),
    })
}

fn print_report(report: &SearchReport, max_length: u32, output: &Output) {
    match &report.outcome {
        SearchOutcome::Found { password } => {
            output.success("Password found");
            output.password(password);
        }
        SearchOutcome::Exhausted => {
            output.warning(&format!(
                "No password found (all candidates up to {max_length} symbols rejected)"
            ));
        }
        SearchOutcome::Cancelled => output.warning("Search cancelled before a password was found"),
    }

    output.key_value("Attempts", &report.attempts.to_string(), false);
    output.key_value(
        "Elapsed",
        &format!("{:.2}s", report.elapsed.as_secs_f64()),
        false,
    );
    output.key_value(
        "Workers",
        &format!("{} per batch, {} batches", report.batch_size, report.batches),
        false,
    );
}
