//! Shared helpers for unit tests.

pub mod reader;
pub mod socket_guard;
pub mod transport;
