//! Console output and styling.
//!
//! Centralizes all terminal output: colored status lines, the progress bar
//! shown while the batch is processed, and the statistics table printed in
//! `--stats` mode. The run log file is separate; this module is only about
//! what the user sees on screen.

use crate::stats::{RunStatistics, human_size};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Styled terminal output for the CLI.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success line (green checkmark).
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error line to stderr (red cross).
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning line (yellow).
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an informational line (cyan).
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run banner.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Progress bar over the file batch.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the per-category statistics table.
    ///
    /// One row per populated category with its file count and
    /// human-readable size, followed by a total row.
    pub fn stats_table(stats: &RunStatistics) {
        Self::header("CATEGORY STATISTICS");

        let category_width = stats
            .totals()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        println!(
            "{:<width$} | {} | {}",
            "Category".bold(),
            "Files".bold(),
            "Size".bold(),
            width = category_width
        );
        println!("{}", "-".repeat(category_width + 24));

        for (name, totals) in stats.totals() {
            let file_word = if totals.files == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {} | {}",
                name,
                totals.files.to_string().green(),
                file_word,
                human_size(totals.bytes),
                width = category_width
            );
        }

        let total = stats.grand_total();
        println!("{}", "-".repeat(category_width + 24));
        println!(
            "{:<width$} | {} {} | {}",
            "Total".bold(),
            total.files.to_string().green().bold(),
            if total.files == 1 { "file" } else { "files" },
            human_size(total.bytes),
            width = category_width
        );
    }
}
