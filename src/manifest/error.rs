//! Error types for manifest reading.

use thiserror::Error;

/// Errors raised while reading a manifest.
///
/// Malformed lines are not errors; they surface as
/// [`ManifestLine::Malformed`](super::ManifestLine::Malformed).
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The underlying reader failed.
    #[error("read failed at manifest line {line}: {source}")]
    Read {
        /// 1-based number of the line being read when the failure happened.
        line: usize,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
