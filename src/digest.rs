//! Streaming MD5 digests of local files.
//!
//! The published manifests are MD5 based, so the output here must match
//! `md5sum` byte for byte: lowercase hex of the full file content.

use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{instrument, trace};

/// Read buffer size used while hashing.
const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Errors that can occur while hashing a local file.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The file could not be opened.
    #[error("could not open {path}: {source}")]
    Open {
        /// File that failed to open.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file opened but reading it failed part way.
    #[error("could not read {path}: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Computes the lowercase hex MD5 digest of the file at `path`.
///
/// The file is streamed through the hasher in fixed-size chunks, so memory use
/// does not grow with file size.
///
/// # Errors
///
/// Returns [`DigestError::Open`] if the file cannot be opened and
/// [`DigestError::Read`] if reading it fails.
#[instrument(level = "debug", fields(path = %path.display()))]
pub async fn hash_file(path: &Path) -> Result<String, DigestError> {
    let mut file = File::open(path).await.map_err(|source| DigestError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        let read = file
            .read(&mut buffer)
            .await
            .map_err(|source| DigestError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        total += read as u64;
    }

    let digest = format!("{:x}", hasher.finalize());
    trace!(bytes = total, %digest, "hashed file");
    Ok(digest)
}

/// Returns true when a computed digest matches the manifest's expected value.
///
/// The comparison is exact: `actual` is lowercase hex, so an uppercase
/// manifest digest never matches.
#[must_use]
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected == actual
}
