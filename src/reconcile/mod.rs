//! Per-entry reconciliation of local files against the manifest.
//!
//! Each entry walks a small state machine:
//!
//! ```text
//! CheckExists ─absent─▶ Download ─fail─▶ Skipped
//!      │                   │
//!      └──present──▶ Verify ◀┘
//!                      │ match ─▶ Valid
//!                      ▼ mismatch
//!                    Retry (download + digest, exactly once)
//!                      │ fail ─▶ Skipped
//!                      │ match ─▶ Recovered
//!                      ▼ mismatch
//!               ResolveMismatch ─▶ Deleted | DeleteFailed | KeptMismatched
//! ```
//!
//! A single retry bounds the work per entry to two downloads and two digests.
//! The retry always downloads again, even when the mismatch came from a stale
//! local copy rather than a bad transfer.

mod outcome;
mod summary;

pub use outcome::{EntryOutcome, SkipReason};
pub use summary::RunSummary;

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::config::RunConfig;
use crate::digest::{digests_match, hash_file};
use crate::download::Transport;
use crate::manifest::ManifestEntry;

/// Drives one manifest entry to a terminal [`EntryOutcome`].
///
/// Entry failures never escape as errors: they end up as
/// [`EntryOutcome::Skipped`] so one bad entry cannot stop the run.
#[derive(Debug)]
pub struct Reconciler<'a, T: ?Sized> {
    config: &'a RunConfig,
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Reconciler<'a, T> {
    /// Creates a reconciler bound to one run's configuration and transport.
    #[must_use]
    pub fn new(config: &'a RunConfig, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// Reconciles a single entry.
    #[instrument(skip(self, entry), fields(file = %entry.file_name))]
    pub async fn reconcile(&self, entry: &ManifestEntry) -> EntryOutcome {
        let Some(path) = entry.local_path(self.config.output_dir()) else {
            warn!("file name escapes the output directory, not mirroring it");
            return EntryOutcome::Skipped(SkipReason::UnsafePath);
        };
        let url = self.config.file_url(&entry.file_name);

        let mut downloaded = false;
        if !is_present(&path).await {
            debug!(%url, "missing locally, downloading");
            if let Err(error) = self.transport.download(&url, &path).await {
                warn!(%error, "download failed");
                return EntryOutcome::Skipped(SkipReason::Download(error));
            }
            downloaded = true;
        }

        let actual = match hash_file(&path).await {
            Ok(actual) => actual,
            Err(error) => {
                warn!(%error, "could not hash file");
                return EntryOutcome::Skipped(SkipReason::Digest(error));
            }
        };
        if digests_match(&entry.expected_hash, &actual) {
            debug!("digest matches");
            return EntryOutcome::Valid { downloaded };
        }

        warn!(
            expected = %entry.expected_hash,
            %actual,
            "MD5 mismatch, downloading again"
        );
        if let Err(error) = self.transport.download(&url, &path).await {
            warn!(%error, "re-download failed");
            return EntryOutcome::Skipped(SkipReason::RetryDownload(error));
        }

        let actual = match hash_file(&path).await {
            Ok(actual) => actual,
            Err(error) => {
                warn!(%error, "could not hash re-downloaded file");
                return EntryOutcome::Skipped(SkipReason::RetryDigest(error));
            }
        };
        if digests_match(&entry.expected_hash, &actual) {
            info!("digest matches after re-download");
            return EntryOutcome::Recovered;
        }

        warn!(
            expected = %entry.expected_hash,
            %actual,
            "MD5 mismatch persists after re-download"
        );
        self.resolve_mismatch(&path, actual).await
    }

    async fn resolve_mismatch(&self, path: &Path, actual: String) -> EntryOutcome {
        if self.config.keep_mismatched() {
            info!("keeping mismatched file");
            return EntryOutcome::KeptMismatched { actual };
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                info!("deleted mismatched file");
                EntryOutcome::Deleted { actual }
            }
            Err(error) => {
                warn!(%error, "could not delete mismatched file");
                EntryOutcome::DeleteFailed { actual, error }
            }
        }
    }
}

/// Anything other than a definite "not found" counts as present, so an
/// unreadable path goes on to verification and fails there.
async fn is_present(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(_) => true,
        Err(error) => error.kind() != std::io::ErrorKind::NotFound,
    }
}
