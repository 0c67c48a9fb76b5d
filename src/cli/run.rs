//! The check-then-annotate pipeline behind the CLI.

use std::env;
use std::fs;

use anyhow::{Context, Result};

use super::args::Arguments;
use super::report::{self, RunSummary};
use crate::filter::RuleFilter;
use crate::{collect, config, disable, scanner};

pub fn run(args: &Arguments) -> Result<RunSummary> {
    let filter = RuleFilter::new(&args.rules)?;

    let cwd = env::current_dir().context("Failed to resolve working directory")?;
    let loaded = config::load_config(&cwd)?;
    if args.verbose && loaded.from_file {
        eprintln!("Loaded {}", config::CONFIG_FILE_NAME);
    }

    let files = scanner::discover_files(&args.files, &loaded.config);
    let collection = collect::collect(&files, &filter);
    report::print_file_errors(&collection.errors);

    let mut annotated_files = 0;
    let mut comments = 0;
    let mut violations = 0;
    for mut file in collection.files {
        comments += disable::insert_disable_comments(&mut file.document, &file.disables);
        violations += file.violations;
        annotated_files += 1;
        report::print_write(&file.source, file.violations, args.dry_run);
        if !args.dry_run {
            fs::write(&file.source, file.document.to_css())
                .with_context(|| format!("Failed to write {}", file.source.display()))?;
        }
    }

    Ok(RunSummary {
        checked: collection.checked,
        annotated_files,
        comments,
        violations,
        errors: collection.errors,
        dry_run: args.dry_run,
    })
}
