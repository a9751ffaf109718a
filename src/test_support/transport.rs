//! Scripted in-memory [`Transport`] that records every request.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::download::{Transport, TransportError};

/// One queued answer for a URL.
#[derive(Debug)]
enum Reply {
    Body(Vec<u8>),
    Status(u16),
    /// Succeeds but leaves a directory where the file should be.
    Directory,
    /// Succeeds without writing anything.
    NoFile,
}

/// Replays queued bodies or status failures per URL, in the order they were queued.
///
/// A URL with nothing left in its queue answers 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body for `url`.
    pub fn respond(&self, url: &str, body: &[u8]) -> &Self {
        self.push(url, Reply::Body(body.to_vec()));
        self
    }

    /// Queues an HTTP status failure for `url`.
    pub fn fail(&self, url: &str, status: u16) -> &Self {
        self.push(url, Reply::Status(status));
        self
    }

    /// Queues a download that replaces the destination with an empty directory.
    pub fn respond_with_directory(&self, url: &str) -> &Self {
        self.push(url, Reply::Directory);
        self
    }

    /// Queues a download that reports success but writes no file.
    pub fn respond_without_file(&self, url: &str) -> &Self {
        self.push(url, Reply::NoFile);
        self
    }

    /// Every URL requested so far, in request order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls().iter().filter(|called| *called == url).count()
    }

    fn push(&self, url: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Reply::Status(404));

        match reply {
            Reply::Body(body) => {
                tokio::fs::write(dest, &body)
                    .await
                    .map_err(|e| TransportError::io(dest, e))?;
                Ok(body.len() as u64)
            }
            Reply::Status(status) => Err(TransportError::http_status(url, status)),
            Reply::Directory => {
                if tokio::fs::metadata(dest).await.is_ok() {
                    tokio::fs::remove_file(dest)
                        .await
                        .map_err(|e| TransportError::io(dest, e))?;
                }
                tokio::fs::create_dir(dest)
                    .await
                    .map_err(|e| TransportError::io(dest, e))?;
                Ok(0)
            }
            Reply::NoFile => Ok(0),
        }
    }
}
