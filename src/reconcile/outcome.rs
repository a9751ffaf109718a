//! Terminal states of a reconciled entry.

use crate::digest::DigestError;
use crate::download::TransportError;

/// Why an entry was given up on without a verdict.
#[derive(Debug)]
pub enum SkipReason {
    /// The initial download of a missing file failed.
    Download(TransportError),
    /// The file could not be hashed on first verification.
    Digest(DigestError),
    /// The re-download after a mismatch failed.
    RetryDownload(TransportError),
    /// The re-downloaded file could not be hashed.
    RetryDigest(DigestError),
    /// The manifest file name points outside the output directory.
    UnsafePath,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Download(error) => write!(f, "download failed: {error}"),
            Self::Digest(error) => write!(f, "MD5 calculation failed: {error}"),
            Self::RetryDownload(error) => write!(f, "re-download failed: {error}"),
            Self::RetryDigest(error) => write!(f, "MD5 recalculation failed: {error}"),
            Self::UnsafePath => f.write_str("file name escapes the output directory"),
        }
    }
}

/// Where an entry ended up.
#[derive(Debug)]
pub enum EntryOutcome {
    /// Digest matched on first verification.
    Valid {
        /// Whether the file had to be fetched because it was missing.
        downloaded: bool,
    },
    /// Digest matched after the single re-download.
    Recovered,
    /// Mismatch persisted and the file was removed.
    Deleted {
        /// Digest of the removed content.
        actual: String,
    },
    /// Mismatch persisted and removing the file failed.
    DeleteFailed {
        /// Digest of the content left behind.
        actual: String,
        /// Why removal failed.
        error: std::io::Error,
    },
    /// Mismatch persisted and the file was kept on request.
    KeptMismatched {
        /// Digest of the kept content.
        actual: String,
    },
    /// No verdict could be reached; the run moves on.
    Skipped(SkipReason),
}

impl EntryOutcome {
    /// True when the file still mismatched after its retry.
    ///
    /// This is what raises the run-level mismatch flag, whether or not the
    /// file was deleted.
    #[must_use]
    pub fn is_unresolved_mismatch(&self) -> bool {
        matches!(
            self,
            Self::Deleted { .. } | Self::DeleteFailed { .. } | Self::KeptMismatched { .. }
        )
    }
}
