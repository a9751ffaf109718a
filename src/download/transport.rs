//! The seam between the reconciler and the network.

use std::path::Path;

use async_trait::async_trait;

use super::error::TransportError;

/// Fetches a URL and stores its body at a local path.
///
/// Implementations overwrite `dest` in place and must not retry on their own:
/// the reconciler owns the single retry a mismatched entry gets.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Downloads `url` into `dest`, returning the number of bytes written.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, TransportError>;
}

