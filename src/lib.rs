//! md5mirror core library
//!
//! Keeps a local directory in sync with a remote file set described by an
//! MD5 manifest (`md5sums.md5`): missing files are downloaded, every file is
//! verified, mismatches get exactly one re-download and are deleted if they
//! still do not match.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - HTTP transport streaming a URL into a local file
//! - [`digest`] - Streaming MD5 of local files
//! - [`manifest`] - Lazy manifest parsing
//! - [`reconcile`] - Per-entry state machine (exists, download, verify, retry, resolve)
//! - [`mirror`] - Run driver and exit-code mapping
//! - [`config`] - Immutable per-run configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod digest;
pub mod download;
pub mod manifest;
pub mod mirror;
pub mod reconcile;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use config::{DEFAULT_BASE_URL, DEFAULT_JOBS, MAX_JOBS, RunConfig};
pub use digest::{DigestError, hash_file};
pub use download::{HttpClient, Transport, TransportError};
pub use manifest::{MANIFEST_FILE_NAME, ManifestEntry, ManifestError, ManifestLine, ManifestReader};
pub use mirror::{Mirror, Reporter, RunError, RunExit, determine_exit_outcome};
pub use reconcile::{EntryOutcome, Reconciler, RunSummary, SkipReason};
