//! Run driver: manifest download, reconciliation of every entry, cleanup.
//!
//! # Example
//!
//! ```no_run
//! use md5mirror_core::config::RunConfig;
//! use md5mirror_core::download::HttpClient;
//! use md5mirror_core::mirror::{Mirror, Reporter, determine_exit_outcome};
//! use md5mirror_core::manifest::ManifestEntry;
//! use md5mirror_core::reconcile::EntryOutcome;
//!
//! struct Quiet;
//!
//! impl Reporter for Quiet {
//!     fn malformed_line(&mut self, _line_number: usize, _text: &str) {}
//!     fn entry_finished(&mut self, _entry: &ManifestEntry, _outcome: &EntryOutcome) {}
//! }
//!
//! # async fn example() {
//! let config = RunConfig::new("https://www.cfg2html.com/").with_keep_mismatched(true);
//! let client = HttpClient::new();
//! let result = Mirror::new(&config, &client).run(&mut Quiet).await;
//! let exit = determine_exit_outcome(&result, config.keep_mismatched());
//! println!("exit code {}", exit.code());
//! # }
//! ```

mod error;
mod exit;

pub use error::RunError;
pub use exit::{RunExit, determine_exit_outcome};

use std::pin::pin;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{debug, info, instrument, warn};

use crate::config::RunConfig;
use crate::download::Transport;
use crate::manifest::{ManifestEntry, ManifestError, ManifestLine, ManifestReader};
use crate::reconcile::{EntryOutcome, Reconciler, RunSummary};

/// Receives progress as the run advances, in manifest order.
pub trait Reporter {
    /// A manifest line without exactly two tokens was skipped.
    fn malformed_line(&mut self, line_number: usize, text: &str);

    /// An entry reached its terminal state.
    fn entry_finished(&mut self, entry: &ManifestEntry, outcome: &EntryOutcome);
}

/// One processed manifest line, ready to be reported.
enum Processed {
    Malformed { line_number: usize, text: String },
    Entry(ManifestEntry, EntryOutcome),
}

/// Mirrors the file set described by the remote manifest.
#[derive(Debug)]
pub struct Mirror<'a, T: ?Sized> {
    config: &'a RunConfig,
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Mirror<'a, T> {
    #[must_use]
    pub fn new(config: &'a RunConfig, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// Runs the whole procedure: download the manifest, reconcile every entry,
    /// then delete the manifest if configured.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] for the four fatal conditions. Entry failures are
    /// reported through `reporter` and counted in the summary instead.
    #[instrument(skip_all, fields(base_url = %self.config.base_url()))]
    pub async fn run(&self, reporter: &mut dyn Reporter) -> Result<RunSummary, RunError> {
        let manifest_url = self.config.manifest_url();
        let manifest_path = self.config.manifest_path();

        info!(url = %manifest_url, "fetching manifest");
        self.transport
            .download(&manifest_url, &manifest_path)
            .await
            .map_err(|source| RunError::ManifestDownload {
                url: manifest_url.clone(),
                source,
            })?;

        let file = File::open(&manifest_path)
            .await
            .map_err(|source| RunError::ManifestOpen {
                path: manifest_path.clone(),
                source,
            })?;

        let summary = self
            .process(BufReader::new(file), reporter)
            .await
            .map_err(|source| RunError::ManifestRead {
                path: manifest_path.clone(),
                source,
            })?;

        if self.config.delete_manifest() {
            tokio::fs::remove_file(&manifest_path)
                .await
                .map_err(|source| RunError::ManifestDelete {
                    path: manifest_path.clone(),
                    source,
                })?;
            debug!(path = %manifest_path.display(), "deleted manifest");
        }

        info!(
            entries = summary.entries(),
            valid = summary.valid,
            recovered = summary.recovered,
            skipped = summary.skipped,
            mismatch_found = summary.mismatch_found(),
            "mirror pass complete"
        );
        Ok(summary)
    }

    /// Reconciles every entry of an already opened manifest.
    ///
    /// Up to `jobs` entries are in flight at once; outcomes are still reported
    /// in manifest order. With the default of one job this is strictly
    /// sequential.
    ///
    /// # Errors
    ///
    /// Returns the reader failure; entries before it have already been
    /// reconciled and reported.
    pub async fn process<R: AsyncBufRead + Unpin>(
        &self,
        manifest: R,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, ManifestError> {
        let reconciler = Reconciler::new(self.config, self.transport);
        let reconciler = &reconciler;

        let mut processed = pin!(
            ManifestReader::new(manifest)
                .into_stream()
                .map(|line| async move {
                    let line = match line {
                        Ok(line) => line,
                        Err(error) => return Err(error),
                    };
                    match line {
                        ManifestLine::Entry(entry) => {
                            let outcome = reconciler.reconcile(&entry).await;
                            Ok(Processed::Entry(entry, outcome))
                        }
                        ManifestLine::Malformed { line_number, text } => {
                            Ok(Processed::Malformed { line_number, text })
                        }
                    }
                })
                .buffered(self.config.jobs())
        );

        let mut summary = RunSummary::default();
        while let Some(item) = processed.next().await {
            match item? {
                Processed::Malformed { line_number, text } => {
                    warn!(line_number, line = %text, "skipping malformed manifest line");
                    summary.record_malformed();
                    reporter.malformed_line(line_number, &text);
                }
                Processed::Entry(entry, outcome) => {
                    summary.record(&outcome);
                    reporter.entry_finished(&entry, &outcome);
                }
            }
        }

        Ok(summary)
    }
}
