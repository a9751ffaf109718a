//! Wiremock startup that degrades to a skip in sandboxes without loopback sockets.
//!
//! Shared with the integration tests through `tests/support/mod.rs`.

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_ENV: &str = "MD5MIRROR_REQUIRE_SOCKET_TESTS";

/// True when `MD5MIRROR_REQUIRE_SOCKET_TESTS` asks for a hard failure instead of a skip.
#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var(REQUIRE_ENV)
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Starts a mock server, or returns `None` when no loopback port can be bound.
///
/// # Panics
///
/// Panics instead of skipping when [`socket_tests_required`] is set.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if let Err(error) = TcpListener::bind("127.0.0.1:0") {
        let message = format!("cannot bind a loopback socket for wiremock ({error})");
        assert!(!socket_tests_required(), "{message}; {REQUIRE_ENV} is set");
        eprintln!("{message}; skipping. Set {REQUIRE_ENV}=1 to fail instead.");
        return None;
    }
    Some(MockServer::start().await)
}
