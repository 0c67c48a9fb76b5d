use std::process::ExitCode;

use super::report::RunSummary;

/// Exit status following common linter-tool conventions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing left to do: clean files, or all disables written.
    Success,
    /// Dry-run found violations that would be disabled.
    Failure,
    /// Usage error, or at least one file could not be processed.
    Error,
}

impl ExitStatus {
    pub fn from_summary(summary: &RunSummary) -> Self {
        if !summary.errors.is_empty() {
            Self::Error
        } else if summary.dry_run && summary.annotated_files > 0 {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
