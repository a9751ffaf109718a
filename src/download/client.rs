//! HTTP client wrapper for mirroring files.
//!
//! This module provides the `HttpClient` struct which fetches a URL and
//! streams the response body over a local file.

use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::error::TransportError;
use super::transport::Transport;
use crate::user_agent;

/// HTTP client for downloading files with streaming support.
///
/// Create it once per run and reuse it for every entry so connections are pooled.
/// Timeouts and redirect handling are left at the reqwest defaults.
///
/// # Example
///
/// ```no_run
/// use md5mirror_core::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let bytes = client
///     .download_to_file("http://mirror.example/dl/md5sums.md5", Path::new("md5sums.md5"))
///     .await?;
/// println!("Downloaded {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client identifying itself with the tool User-Agent.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(user_agent::default_download_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Sends a GET request and returns the response once a success status arrived.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the URL is invalid, the connection fails,
    /// or the server answers with a non-2xx status.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<reqwest::Response, TransportError> {
        Url::parse(url).map_err(|_| TransportError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "server rejected request");
            return Err(TransportError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }

    /// Downloads `url` over `dest`, returning the number of bytes written.
    ///
    /// The destination is only created once the server answered with success.
    /// An existing file is truncated in place; an interrupted body leaves the
    /// partial file behind.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`fetch`](Self::fetch) and [`save_to_file`].
    #[instrument(skip(self), fields(url = %url, dest = %dest.display()))]
    pub async fn download_to_file(&self, url: &str, dest: &Path) -> Result<u64, TransportError> {
        let response = self.fetch(url).await?;
        let bytes = save_to_file(response, dest).await?;
        info!(bytes, "download complete");
        Ok(bytes)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, TransportError> {
        self.download_to_file(url, dest).await
    }
}

/// Streams a response body into `path`, overwriting whatever is there.
///
/// # Errors
///
/// Returns [`TransportError::Io`] on create/write failure and
/// [`TransportError::Network`] if the body stream breaks mid-copy.
pub async fn save_to_file(response: reqwest::Response, path: &Path) -> Result<u64, TransportError> {
    let url = response.url().to_string();
    let file = File::create(path)
        .await
        .map_err(|e| TransportError::io(path, e))?;

    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| TransportError::network(url.as_str(), e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| TransportError::io(path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| TransportError::io(path, e))?;

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use tempfile::TempDir;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_http_client_download_success() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/dl/a.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"a"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let dest = temp_dir.path().join("a.txt");
        let url = format!("{}/dl/a.txt", mock_server.uri());

        let bytes = client.download_to_file(&url, &dest).await.unwrap();

        assert_eq!(bytes, 1);
        assert_eq!(std::fs::read(&dest).unwrap(), b"a");
    }

    #[tokio::test]
    async fn test_http_client_overwrites_existing_file() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("notes.txt");
        std::fs::write(&dest, b"a much longer stale local copy").unwrap();

        Mock::given(method("GET"))
            .and(path("/notes.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/notes.txt", mock_server.uri());
        client.download_to_file(&url, &dest).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn test_http_client_404_leaves_destination_untouched() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("missing.bin");

        Mock::given(method("GET"))
            .and(path("/missing.bin"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/missing.bin", mock_server.uri());

        let result = client.download_to_file(&url, &dest).await;

        match result {
            Err(TransportError::HttpStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
        assert!(!dest.exists(), "no file should be created for a 404");
    }

    #[tokio::test]
    async fn test_http_client_500_is_http_status_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/error", mock_server.uri());

        let result = client
            .download_to_file(&url, &temp_dir.path().join("error"))
            .await;

        assert!(matches!(
            result,
            Err(TransportError::HttpStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_http_client_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let client = HttpClient::new();

        let result = client
            .download_to_file("not-a-valid-url", &temp_dir.path().join("x"))
            .await;

        assert!(matches!(result, Err(TransportError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_http_client_connection_refused_is_network_error() {
        let temp_dir = TempDir::new().unwrap();
        let client = HttpClient::new();
        // Port 9 (discard) is essentially never served on localhost.
        let result = client
            .download_to_file("http://127.0.0.1:9/a.txt", &temp_dir.path().join("a.txt"))
            .await;

        assert!(matches!(result, Err(TransportError::Network { .. })));
    }

    #[tokio::test]
    async fn test_http_client_create_failure_is_io_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/a.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"a"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/a.txt", mock_server.uri());
        let dest = temp_dir.path().join("no-such-dir").join("a.txt");

        let result = client.download_to_file(&url, &dest).await;

        assert!(matches!(result, Err(TransportError::Io { .. })));
    }

    #[tokio::test]
    async fn test_http_client_large_file_streams() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let large_content = vec![7u8; 1024 * 1024];

        Mock::given(method("GET"))
            .and(path("/large.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(large_content))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/large.bin", mock_server.uri());
        let dest = temp_dir.path().join("large.bin");

        let bytes = client.download_to_file(&url, &dest).await.unwrap();

        assert_eq!(bytes, 1024 * 1024);
        assert_eq!(std::fs::metadata(&dest).unwrap().len(), 1024 * 1024);
    }

    #[tokio::test]
    async fn test_http_client_sends_user_agent() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/ua.txt"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::default();
        let url = format!("{}/ua.txt", mock_server.uri());
        client
            .download_to_file(&url, &temp_dir.path().join("ua.txt"))
            .await
            .unwrap();
    }

    #[test]
    fn test_invalid_url_rejected_before_touching_destination() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("x");
        let client = HttpClient::new();
        let result = tokio_test::block_on(client.download_to_file("::not a url::", &dest));
        assert!(matches!(result, Err(TransportError::InvalidUrl { .. })));
        assert!(!dest.exists());
    }
}
