//! Exit code logic for the mirror process.
//!
//! Single responsibility: map the result of a run to the process exit status.

use std::process::ExitCode;

use super::error::RunError;
use crate::reconcile::RunSummary;

/// Process exit statuses, one per way a run can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// Completed without an unresolved mismatch (or mismatches were kept).
    Success,
    /// The manifest could not be downloaded.
    ManifestDownloadFailed,
    /// The manifest could not be opened.
    ManifestOpenFailed,
    /// Reading the manifest failed.
    ManifestReadFailed,
    /// The manifest could not be deleted after processing.
    ManifestDeleteFailed,
    /// At least one file still mismatched after its retry and was not kept.
    MismatchFound,
}

impl RunExit {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::ManifestDownloadFailed => 1,
            Self::ManifestOpenFailed => 2,
            Self::ManifestReadFailed => 3,
            Self::ManifestDeleteFailed => 4,
            Self::MismatchFound => 5,
        }
    }
}

impl From<RunExit> for ExitCode {
    fn from(exit: RunExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Determines the process exit status from a run result.
///
/// Fatal errors win; otherwise a mismatch only fails the run when mismatched
/// files were not being kept.
#[must_use]
pub fn determine_exit_outcome(result: &Result<RunSummary, RunError>, keep_mismatched: bool) -> RunExit {
    match result {
        Err(error) => error.exit(),
        Ok(summary) if summary.mismatch_found() && !keep_mismatched => RunExit::MismatchFound,
        Ok(_) => RunExit::Success,
    }
}
