//! Manifest parsing.
//!
//! A manifest is plain text with one `<hex-md5> <filename>` pair per line,
//! the same shape `md5sum` prints. Lines are read lazily from any async
//! buffered reader; a line that does not split into exactly two whitespace
//! separated tokens is handed back as [`ManifestLine::Malformed`] so the
//! caller can warn about it and move on.
//!
//! # Example
//!
//! ```
//! use md5mirror_core::manifest::{ManifestLine, ManifestReader};
//!
//! # tokio_test::block_on(async {
//! let text = "0cc175b9c0f1b6a831c399e269772661  a.txt\nnot a valid line\n";
//! let mut reader = ManifestReader::new(text.as_bytes());
//!
//! let first = reader.next_line().await.unwrap().unwrap();
//! assert!(matches!(first, ManifestLine::Entry(ref e) if e.file_name == "a.txt"));
//!
//! let second = reader.next_line().await.unwrap().unwrap();
//! assert!(matches!(second, ManifestLine::Malformed { line_number: 2, .. }));
//!
//! assert!(reader.next_line().await.unwrap().is_none());
//! # });
//! ```

mod entry;
mod error;

pub use entry::ManifestEntry;
pub use error::ManifestError;

use futures_util::Stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// File name of the manifest, both remotely (under the base URL) and locally.
pub const MANIFEST_FILE_NAME: &str = "md5sums.md5";

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    /// A well-formed `(hash, filename)` pair.
    Entry(ManifestEntry),
    /// A line that did not have exactly two tokens; skipped with a warning.
    Malformed {
        /// 1-based line number.
        line_number: usize,
        /// The line as read, without its terminator.
        text: String,
    },
}

/// Splits one manifest line into an entry, or flags it as malformed.
#[must_use]
pub fn parse_line(line_number: usize, line: &str) -> ManifestLine {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(hash), Some(name), None) => ManifestLine::Entry(ManifestEntry::new(hash, name)),
        _ => ManifestLine::Malformed {
            line_number,
            text: line.to_string(),
        },
    }
}

/// Lazy, forward-only manifest reader.
///
/// Re-reading a manifest means opening it again; the reader cannot rewind.
#[derive(Debug)]
pub struct ManifestReader<R> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> ManifestReader<R> {
    /// Wraps a buffered reader positioned at the start of a manifest.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Reads the next line, returning `None` at end of input.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; such a line simply
    /// fails verification or parses as malformed.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Read`] only when the underlying read fails.
    pub async fn next_line(&mut self) -> Result<Option<ManifestLine>, ManifestError> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .await
            .map_err(|source| ManifestError::Read {
                line: self.line_number + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }

        self.line_number += 1;
        let text = String::from_utf8_lossy(&self.buffer);
        let text = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
        Ok(Some(parse_line(self.line_number, text)))
    }

    /// Turns the reader into a stream of lines that ends after the first read error.
    pub fn into_stream(self) -> impl Stream<Item = Result<ManifestLine, ManifestError>> {
        futures_util::stream::unfold(Some(self), |state| async move {
            let mut reader = state?;
            match reader.next_line().await {
                Ok(Some(line)) => Some((Ok(line), Some(reader))),
                Ok(None) => None,
                Err(error) => Some((Err(error), None)),
            }
        })
    }
}
