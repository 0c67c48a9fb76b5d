//! Report formatting and printing utilities.
//!
//! Per-file write notices and the end-of-run summary. Separate from the
//! pipeline so output can be captured in tests via the `_to` variants.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::collect::FileError;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Totals for one run, consumed by the summary printer and exit status.
#[derive(Debug)]
pub struct RunSummary {
    /// Files the lint pass attempted.
    pub checked: usize,
    /// Files with at least one retained violation.
    pub annotated_files: usize,
    /// Nodes that received (or merged into) a disable comment.
    pub comments: usize,
    /// Retained violations across all files.
    pub violations: usize,
    pub errors: Vec<FileError>,
    pub dry_run: bool,
}

/// Per-file notice, printed before (would-be) serialization.
pub fn print_write(path: &Path, violations: usize, dry_run: bool) {
    if dry_run {
        println!(
            "{} {} disable(s) to {}",
            "Would write".yellow().bold(),
            violations,
            path.display()
        );
    } else {
        println!(
            "{} {} disable(s) to {}...",
            "Writing".green().bold(),
            violations,
            path.display()
        );
    }
}

/// Per-file processing failures go to stderr; the run continues.
pub fn print_file_errors(errors: &[FileError]) {
    for error in errors {
        eprintln!(
            "{} skipping {}: {}",
            "warning:".bold().yellow(),
            error.path.display(),
            error.message
        );
    }
}

pub fn print_summary(summary: &RunSummary) {
    print_summary_to(summary, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(summary: &RunSummary, writer: &mut W) {
    if summary.annotated_files == 0 {
        if summary.errors.is_empty() {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Checked {} {} - no violations to disable",
                    summary.checked,
                    if summary.checked == 1 { "file" } else { "files" }
                )
                .green()
            );
        }
        return;
    }

    if summary.dry_run {
        let _ = writeln!(
            writer,
            "{} {} comment(s) in {} file(s) (from {} violation(s)).",
            "Would insert".yellow().bold(),
            summary.comments,
            summary.annotated_files,
            summary.violations
        );
        let _ = writeln!(
            writer,
            "Run without {} to write these comments.",
            "--dry-run".cyan()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} comment(s) in {} file(s) (from {} violation(s)).",
            "Inserted".green().bold(),
            summary.comments,
            summary.annotated_files,
            summary.violations
        );
    }
}
