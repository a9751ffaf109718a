//! Fatal run failures.

use std::path::PathBuf;

use thiserror::Error;

use super::exit::RunExit;
use crate::download::TransportError;
use crate::manifest::ManifestError;

/// Failures that abort the whole run.
///
/// Per-entry failures never show up here; they are recorded as
/// [`EntryOutcome::Skipped`](crate::reconcile::EntryOutcome::Skipped).
#[derive(Debug, Error)]
pub enum RunError {
    /// The manifest could not be downloaded.
    #[error("failed to download manifest {url}: {source}")]
    ManifestDownload {
        /// Manifest URL.
        url: String,
        /// Transport failure.
        #[source]
        source: TransportError,
    },

    /// The downloaded manifest could not be opened.
    #[error("failed to open manifest {path}: {source}")]
    ManifestOpen {
        /// Local manifest path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the manifest failed part way.
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        /// Local manifest path.
        path: PathBuf,
        /// Reader failure.
        #[source]
        source: ManifestError,
    },

    /// The manifest could not be removed after processing.
    #[error("failed to delete manifest {path}: {source}")]
    ManifestDelete {
        /// Local manifest path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Process exit status for this failure.
    #[must_use]
    pub fn exit(&self) -> RunExit {
        match self {
            Self::ManifestDownload { .. } => RunExit::ManifestDownloadFailed,
            Self::ManifestOpen { .. } => RunExit::ManifestOpenFailed,
            Self::ManifestRead { .. } => RunExit::ManifestReadFailed,
            Self::ManifestDelete { .. } => RunExit::ManifestDeleteFailed,
        }
    }
}
