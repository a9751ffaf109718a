//! A single `(hash, filename)` pair from the manifest.

use std::path::{Component, Path, PathBuf};

/// One expected file of the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Hex MD5 digest as published in the manifest.
    pub expected_hash: String,
    /// File name relative to both the base URL and the output directory.
    pub file_name: String,
}

impl ManifestEntry {
    /// Creates an entry from its two manifest tokens.
    #[must_use]
    pub fn new(expected_hash: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            expected_hash: expected_hash.into(),
            file_name: file_name.into(),
        }
    }

    /// Resolves the local path of this entry under `root`.
    ///
    /// Returns `None` when the name is absolute or climbs out of `root`
    /// through `..`; such entries must never be written.
    #[must_use]
    pub fn local_path(&self, root: &Path) -> Option<PathBuf> {
        let relative = Path::new(&self.file_name);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        let names_a_file = relative
            .components()
            .any(|component| matches!(component, Component::Normal(_)));

        (contained && names_a_file).then(|| root.join(relative))
    }
}
