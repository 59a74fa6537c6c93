//! Command-line interface.
//!
//! Parses the CLI surface and drives the whole pipeline: load
//! configuration, scan the target, classify and move each file, write the
//! run log, and report statistics.

use crate::category::CategoryMap;
use crate::config::Config;
use crate::organizer::{FileOrganizer, OrganizeError};
use crate::output::OutputFormatter;
use crate::run_log::{LOG_DIR_NAME, RunLog};
use crate::scanner::Scanner;
use crate::stats::{RunStatistics, human_size};
use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

/// Organize the files of a directory into category subfolders by extension.
#[derive(Parser, Debug)]
#[command(name = "tidyup", version, about)]
pub struct Cli {
    /// Directory to organize (default: current directory)
    pub directory: Option<PathBuf>,

    /// Perform a dry run without moving files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Recursively organize files in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Show per-category statistics after organizing
    #[arg(short, long)]
    pub stats: bool,

    /// Path to an alternative configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// What a run did, for callers and tests.
#[derive(Debug)]
pub struct RunReport {
    /// Files the scanner yielded.
    pub scanned: usize,
    /// Files moved, or simulated in dry-run mode.
    pub organized: usize,
    /// Files that failed to move and were skipped.
    pub failed: usize,
    /// Per-category totals accumulated during the run.
    pub statistics: RunStatistics,
    /// The log file written for this run.
    pub log_path: PathBuf,
}

/// Runs the organization pipeline for the parsed arguments.
///
/// Fatal conditions (missing target, bad configuration, unwritable log)
/// return `Err` before any file is touched; per-file failures are logged,
/// counted, and do not fail the run.
pub fn run(cli: &Cli) -> Result<RunReport, String> {
    let target = match &cli.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| format!("Cannot determine current directory: {}", e))?,
    };

    if !target.exists() {
        return Err(OrganizeError::TargetNotFound { path: target }.to_string());
    }
    if !target.is_dir() {
        return Err(OrganizeError::NotADirectory { path: target }.to_string());
    }

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let extra_skip_dirs = config.scan.extra_skip_dirs.clone();
    let filter = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let categories = CategoryMap::new();
    let mut log = RunLog::create(&target).map_err(|e| e.to_string())?;

    let started = Instant::now();
    log.info(&format!(
        "Starting file organization in: {}",
        target.display()
    ))
    .map_err(|e| e.to_string())?;
    log.info(&format!(
        "Options: dry_run={}, recursive={}",
        cli.dry_run, cli.recursive
    ))
    .map_err(|e| e.to_string())?;

    if cli.dry_run {
        OutputFormatter::dry_run_notice("No files will be moved");
        log.info("DRY RUN MODE: No files will be moved")
            .map_err(|e| e.to_string())?;
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", target.display()));
    }

    let skip_dirs: Vec<String> = categories
        .output_dir_names()
        .map(str::to_string)
        .chain(std::iter::once(LOG_DIR_NAME.to_string()))
        .chain(extra_skip_dirs)
        .collect();
    let scanner = Scanner::new(&target, cli.recursive).skip_dirs(skip_dirs);
    let files: Vec<PathBuf> = scanner.files(&filter).collect();

    let organizer = FileOrganizer::new(&target, cli.dry_run);
    let mut statistics = RunStatistics::new();
    let mut announced_dirs: HashSet<&'static str> = HashSet::new();
    let mut failures: Vec<String> = Vec::new();

    let progress = OutputFormatter::create_progress_bar(files.len() as u64);
    for path in &files {
        progress.inc(1);

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let category = categories.category_for_path(path);
        let category_dir = category.dir_name();

        match organizer.move_to_category(path, category_dir) {
            Ok(outcome) => {
                if outcome.created_dir && announced_dirs.insert(category_dir) {
                    let line = if outcome.simulated {
                        format!("Would create category directory: {}", category_dir)
                    } else {
                        format!("Created category directory: {}", category_dir)
                    };
                    log.info(&line).map_err(|e| e.to_string())?;
                }

                let destination_name = outcome
                    .destination
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let line = if outcome.simulated {
                    format!(
                        "Would move '{}' to '{}/{}'",
                        path.display(),
                        category_dir,
                        destination_name
                    )
                } else {
                    format!(
                        "Moved '{}' to '{}/{}'",
                        file_name, category_dir, destination_name
                    )
                };
                log.info(&line).map_err(|e| e.to_string())?;
                statistics.record_move(category, outcome.size_bytes);
            }
            Err(e) => {
                let message = format!("Error moving file '{}': {}", file_name, e);
                log.error(&message).map_err(|err| err.to_string())?;
                failures.push(message);
                statistics.record_failure();
            }
        }
    }
    progress.finish_and_clear();

    for failure in &failures {
        OutputFormatter::error(failure);
    }

    let organized = statistics.organized();
    let failed = statistics.failed();
    log.info(&format!(
        "Processed {} files: {} organized, {} failed",
        files.len(),
        organized,
        failed
    ))
    .map_err(|e| e.to_string())?;
    log.info(&format!(
        "Organization completed in {:.2} seconds",
        started.elapsed().as_secs_f64()
    ))
    .map_err(|e| e.to_string())?;

    if cli.dry_run {
        OutputFormatter::success(&format!(
            "Dry run complete. {} files would be organized.",
            organized
        ));
    } else {
        OutputFormatter::success(&format!("Organization complete! {} files organized.", organized));
    }
    if failed > 0 {
        OutputFormatter::warning(&format!(
            "{} files could not be organized. See the log for details.",
            failed
        ));
    }

    if cli.stats {
        log.info("Category statistics:").map_err(|e| e.to_string())?;
        for (name, totals) in statistics.totals() {
            log.info(&format!(
                "  {}: {} files, {}",
                name,
                totals.files,
                human_size(totals.bytes)
            ))
            .map_err(|e| e.to_string())?;
        }
        OutputFormatter::stats_table(&statistics);
    }

    OutputFormatter::info(&format!("Log written to {}", log.path().display()));

    Ok(RunReport {
        scanned: files.len(),
        organized,
        failed,
        statistics,
        log_path: log.path().to_path_buf(),
    })
}
