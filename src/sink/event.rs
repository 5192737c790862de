//! Event records written to the log sink.

use std::net::SocketAddr;

use chrono::Local;
use serde::Serialize;

/// Timestamp in the fixed `YYYY-MM-DD HH:MM:SS` log format, local time.
fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One accepted connection. Created exactly once per accept, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionEvent {
    timestamp: String,
    ip: String,
    port: u16,
    event: &'static str,
}

impl ConnectionEvent {
    /// Record a connection attempt from `peer`, stamped with the current
    /// time.
    pub fn attempt(peer: SocketAddr) -> Self {
        Self {
            timestamp: now_stamp(),
            ip: peer.ip().to_string(),
            port: peer.port(),
            event: "connection_attempt",
        }
    }

    /// The timestamp this event carries, for the status line.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// A handling failure. Peer fields are present only when known, e.g. an
/// accept error has no peer yet.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

impl ErrorEvent {
    /// An error with no peer context (accept failures).
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
            ip: None,
            port: None,
        }
    }

    /// An error attributed to a known peer (send failures).
    pub fn with_peer(error: impl std::fmt::Display, peer: SocketAddr) -> Self {
        Self {
            error: error.to_string(),
            ip: Some(peer.ip().to_string()),
            port: Some(peer.port()),
        }
    }
}
