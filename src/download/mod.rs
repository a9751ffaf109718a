//! HTTP transport for mirroring files.
//!
//! This module fetches a single URL and streams the body to a local file,
//! overwriting any existing content.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large mirrored assets)
//! - Structured error types carrying the URL or path
//! - A [`Transport`] trait so the reconciler can run against any backend
//!
//! # Example
//!
//! ```no_run
//! use md5mirror_core::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! client
//!     .download_to_file("http://mirror.example/dl/tool.tar.gz", Path::new("tool.tar.gz"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod transport;

pub use client::{HttpClient, save_to_file};
pub use error::TransportError;
pub use transport::Transport;
