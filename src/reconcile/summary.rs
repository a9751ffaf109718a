//! Run-level tally of entry outcomes.

use super::outcome::EntryOutcome;

/// Counts of every terminal state seen during one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries valid on first verification.
    pub valid: usize,
    /// Subset of `valid` that had to be downloaded first.
    pub downloaded: usize,
    /// Entries fixed by the re-download.
    pub recovered: usize,
    /// Mismatched files that were removed.
    pub deleted: usize,
    /// Mismatched files that could not be removed.
    pub delete_failed: usize,
    /// Mismatched files kept on request.
    pub kept_mismatched: usize,
    /// Entries given up on without a verdict.
    pub skipped: usize,
    /// Manifest lines skipped because they did not hold exactly two tokens.
    pub malformed_lines: usize,
}

impl RunSummary {
    /// Folds one entry outcome into the tally.
    pub fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Valid { downloaded } => {
                self.valid += 1;
                if *downloaded {
                    self.downloaded += 1;
                }
            }
            EntryOutcome::Recovered => self.recovered += 1,
            EntryOutcome::Deleted { .. } => self.deleted += 1,
            EntryOutcome::DeleteFailed { .. } => self.delete_failed += 1,
            EntryOutcome::KeptMismatched { .. } => self.kept_mismatched += 1,
            EntryOutcome::Skipped(_) => self.skipped += 1,
        }
    }

    /// Records a malformed manifest line.
    pub fn record_malformed(&mut self) {
        self.malformed_lines += 1;
    }

    /// True if any entry still mismatched after its retry, kept or not.
    #[must_use]
    pub fn mismatch_found(&self) -> bool {
        self.deleted + self.delete_failed + self.kept_mismatched > 0
    }

    /// Number of well-formed entries processed.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.valid
            + self.recovered
            + self.deleted
            + self.delete_failed
            + self.kept_mismatched
            + self.skipped
    }
}
