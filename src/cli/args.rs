//! CLI argument definitions using clap.
//!
//! The surface mirrors the classic stylelint-disable invocation: rule
//! patterns first, then the file list after a `--` separator.
//!
//! ```text
//! stylehush [OPTIONS] [RULES]... -- <FILES>...
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Insert stylelint-disable comments for existing lint violations",
    long_about = None
)]
pub struct Arguments {
    /// Rule-name patterns to disable (glob syntax, e.g. "color-*"); empty means all rules
    #[arg(value_name = "RULES")]
    pub rules: Vec<String>,

    /// Files or directories to process (after "--")
    #[arg(last = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Compute changes but do not write any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    pub fn print_usage() {
        Self::command().print_help().ok();
    }
}
