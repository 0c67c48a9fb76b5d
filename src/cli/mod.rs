//! Command-line interface layer.

use anyhow::Result;
use colored::Colorize;

mod args;
mod exit_status;
mod report;
mod run;

pub use args::Arguments;
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    if args.no_color {
        colored::control::set_override(false);
    }

    if args.files.is_empty() {
        eprintln!(
            "{} You must provide one or more files after \"--\" in the arguments list.",
            "warning:".bold().yellow()
        );
        Arguments::print_usage();
        return Ok(ExitStatus::Error);
    }

    if args.rules.is_empty() {
        eprintln!(
            "{} No rules provided; disabling all rules!",
            "warning:".bold().yellow()
        );
    }

    let summary = run::run(&args)?;
    report::print_summary(&summary);

    Ok(ExitStatus::from_summary(&summary))
}
