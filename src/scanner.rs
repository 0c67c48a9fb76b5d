//! File discovery.
//!
//! CLI arguments may be files or directories. Directories are walked for
//! files with a configured extension, honoring the configured ignore
//! patterns; explicit file arguments are taken as-is and left for the
//! collector to report if unreadable.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::Config;

pub fn discover_files(inputs: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let ignore_patterns: Vec<Pattern> = config
        .ignores
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !entry.file_type().is_file() {
                    continue;
                }
                if !has_wanted_extension(path, &config.extensions) {
                    continue;
                }
                if is_ignored(path, &ignore_patterns) {
                    continue;
                }
                if seen.insert(path.to_path_buf()) {
                    files.push(path.to_path_buf());
                }
            }
        } else if seen.insert(input.clone()) {
            files.push(input.clone());
        }
    }

    files
}

fn has_wanted_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext))
}

fn is_ignored(path: &Path, patterns: &[Pattern]) -> bool {
    let text = path.to_string_lossy();
    patterns.iter().any(|p| p.matches(&text))
}
