//! Run configuration.
//!
//! A [`RunConfig`] is built once per run (by the CLI from flags, config file
//! and defaults) and then passed by reference to every component. Nothing in
//! the library reads configuration from the environment.

use std::path::{Path, PathBuf};

use crate::manifest::MANIFEST_FILE_NAME;

/// Base URL used when none is given.
pub const DEFAULT_BASE_URL: &str = "http://rose-swe.bplaced.net/dl/";

/// Default number of entries reconciled at once (strictly sequential).
pub const DEFAULT_JOBS: usize = 1;

/// Upper bound for concurrently reconciled entries.
pub const MAX_JOBS: usize = 16;

/// Immutable settings for one mirroring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    base_url: String,
    delete_manifest: bool,
    keep_mismatched: bool,
    output_dir: PathBuf,
    jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RunConfig {
    /// Creates a configuration for `base_url` with every option at its default.
    ///
    /// A trailing `/` is appended to the base URL when missing.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            delete_manifest: false,
            keep_mismatched: false,
            output_dir: PathBuf::from("."),
            jobs: DEFAULT_JOBS,
        }
    }

    /// Deletes the local manifest once every entry was processed.
    #[must_use]
    pub fn with_delete_manifest(mut self, delete_manifest: bool) -> Self {
        self.delete_manifest = delete_manifest;
        self
    }

    /// Keeps files that still mismatch after their retry instead of deleting them.
    #[must_use]
    pub fn with_keep_mismatched(mut self, keep_mismatched: bool) -> Self {
        self.keep_mismatched = keep_mismatched;
        self
    }

    /// Sets the directory holding the manifest and the mirrored files.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Sets how many entries may be reconciled at once, clamped to `1..=MAX_JOBS`.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.clamp(1, MAX_JOBS);
        self
    }

    /// Base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn delete_manifest(&self) -> bool {
        self.delete_manifest
    }

    #[must_use]
    pub fn keep_mismatched(&self) -> bool {
        self.keep_mismatched
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Download URL of a manifest file name (plain concatenation onto the base URL).
    #[must_use]
    pub fn file_url(&self, file_name: &str) -> String {
        format!("{}{file_name}", self.base_url)
    }

    /// Download URL of the manifest itself.
    #[must_use]
    pub fn manifest_url(&self) -> String {
        self.file_url(MANIFEST_FILE_NAME)
    }

    /// Local path the manifest is stored at.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}
