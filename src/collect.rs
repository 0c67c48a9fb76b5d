//! Violation collection.
//!
//! Runs the lint pass over each requested file and folds the warnings
//! that survive the rule filter into a side map from flagged node to the
//! rule names to silence on it. Files the engine cannot read or parse
//! are reported and excluded without aborting the run; files with zero
//! retained violations produce no entry.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use rayon::prelude::*;

use crate::css::{self, Document, NodeId};
use crate::directives::DisableContext;
use crate::filter::RuleFilter;
use crate::rules::{self, Warning};

/// A file the lint pass could not process.
#[derive(Debug, Clone)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Per-file collection result.
pub struct CollectedFile {
    pub source: PathBuf,
    pub document: Document,
    /// Side map from flagged node to the rule names to silence on it,
    /// in first-seen order and deduplicated.
    pub disables: HashMap<NodeId, Vec<String>>,
    /// Number of retained violations (several may map to one node).
    pub violations: usize,
}

pub struct Collection {
    pub files: Vec<CollectedFile>,
    pub errors: Vec<FileError>,
    /// Total number of files the lint pass attempted.
    pub checked: usize,
}

/// Lint every file and retain the violations matching `filter`.
///
/// Files are linted in parallel; results are consumed in input order so
/// the decision trace on stderr is deterministic.
pub fn collect(paths: &[PathBuf], filter: &RuleFilter) -> Collection {
    let linted: Vec<(PathBuf, Result<(Document, Vec<Warning>), String>)> = paths
        .par_iter()
        .map(|path| (path.clone(), lint_file(path)))
        .collect();

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for (path, outcome) in linted {
        match outcome {
            Err(message) => errors.push(FileError { path, message }),
            Ok((document, warnings)) => {
                let mut disables: HashMap<NodeId, Vec<String>> = HashMap::new();
                let mut violations = 0;
                for warning in warnings {
                    if filter.matches(warning.rule) {
                        eprintln!(
                            "{} disabling violation of {} on {}:{}",
                            "+".green(),
                            warning.rule.cyan(),
                            path.display(),
                            warning.line
                        );
                        let rules = disables.entry(warning.node).or_default();
                        if !rules.iter().any(|r| r == warning.rule) {
                            rules.push(warning.rule.to_string());
                        }
                        violations += 1;
                    } else {
                        eprintln!(
                            "{} skipping violation of {} on {}:{}",
                            "-".dimmed(),
                            warning.rule.dimmed(),
                            path.display(),
                            warning.line
                        );
                    }
                }
                if !disables.is_empty() {
                    files.push(CollectedFile {
                        source: path,
                        document,
                        disables,
                        violations,
                    });
                }
            }
        }
    }

    Collection {
        files,
        errors,
        checked: paths.len(),
    }
}

/// Read, parse and lint a single file. Warnings already covered by
/// disable directives in the file are dropped here.
fn lint_file(path: &Path) -> Result<(Document, Vec<Warning>), String> {
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let document = css::parse(&source).map_err(|e| e.to_string())?;
    let context = DisableContext::from_document(&document);
    let mut warnings = rules::check_all(&document);
    warnings.retain(|w| !context.should_ignore(w.line, w.rule));
    Ok((document, warnings))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_collect_retains_matching_violations() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "bad.css", "a { color: #00; }\n");
        let filter = RuleFilter::new(&["color-*".to_string()]).unwrap();

        let collection = collect(&[path.clone()], &filter);

        assert_eq!(collection.checked, 1);
        assert!(collection.errors.is_empty());
        assert_eq!(collection.files.len(), 1);
        let file = &collection.files[0];
        assert_eq!(file.source, path);
        assert_eq!(file.violations, 1);
        let rules: Vec<&Vec<String>> = file.disables.values().collect();
        assert_eq!(rules, vec![&vec!["color-no-invalid-hex".to_string()]]);
    }

    #[test]
    fn test_collect_skips_non_matching_violations() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "bad.css", "a { color: #00; }\n");
        let filter = RuleFilter::new(&["block-no-empty".to_string()]).unwrap();

        let collection = collect(&[path], &filter);

        assert!(collection.files.is_empty());
    }

    #[test]
    fn test_collect_no_entry_for_clean_file() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "clean.css", "a { color: #fff; }\n");

        let collection = collect(&[path], &RuleFilter::all());

        assert!(collection.files.is_empty());
        assert!(collection.errors.is_empty());
        assert_eq!(collection.checked, 1);
    }

    #[test]
    fn test_collect_parse_error_excludes_file_only() {
        let dir = tempdir().unwrap();
        let broken = write(&dir, "broken.css", "a { color: red;\n");
        let bad = write(&dir, "bad.css", "a {}\n");

        let collection = collect(&[broken.clone(), bad], &RuleFilter::all());

        assert_eq!(collection.errors.len(), 1);
        assert_eq!(collection.errors[0].path, broken);
        assert!(collection.errors[0].message.contains("Unclosed block"));
        assert_eq!(collection.files.len(), 1);
    }

    #[test]
    fn test_collect_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.css");

        let collection = collect(&[missing], &RuleFilter::all());

        assert_eq!(collection.errors.len(), 1);
        assert!(collection.files.is_empty());
    }

    #[test]
    fn test_collect_honors_existing_directives() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "done.css",
            "a { color: #00; /* stylelint-disable-line color-no-invalid-hex */ }\n",
        );

        let collection = collect(&[path], &RuleFilter::all());

        assert!(collection.files.is_empty());
    }

    #[test]
    fn test_collect_merges_rules_per_node() {
        let dir = tempdir().unwrap();
        // Both violations land on the same declaration node
        let path = write(&dir, "bad.css", "a {\n  margin: 0px 0px;\n}\n");

        let collection = collect(&[path], &RuleFilter::all());

        assert_eq!(collection.files.len(), 1);
        let file = &collection.files[0];
        assert_eq!(file.violations, 2);
        assert_eq!(file.disables.len(), 1);
        let rules = file.disables.values().next().unwrap();
        assert_eq!(rules, &vec!["length-zero-no-unit".to_string()]);
    }
}
