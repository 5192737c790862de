//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the honeypot service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HoneypotConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Structured log sink settings.
    pub log: LogConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port. Defaults to 22 to mimic SSH.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 22,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Idle-shutdown threshold in whole minutes. The service stops if no
    /// connection has ever arrived once this much time has elapsed.
    pub idle_minutes: u64,

    /// Upper bound on a single accept wait, in seconds. Controls how often
    /// the accept loop re-checks the running flag and the idle window.
    pub accept_wait_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            idle_minutes: 60,
            accept_wait_secs: 1,
        }
    }
}

impl TimeoutConfig {
    /// Idle threshold as a duration. Converted from minutes exactly once,
    /// at startup.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_minutes.saturating_mul(60))
    }

    /// Accept-wait bound as a duration.
    pub fn accept_wait(&self) -> Duration {
        Duration::from_secs(self.accept_wait_secs)
    }
}

/// Structured log sink settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path of the live log file.
    pub path: PathBuf,

    /// Rotation threshold in bytes.
    pub max_bytes: u64,

    /// Number of rotated backups to retain. Oldest backups beyond this
    /// count are discarded.
    pub backup_count: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("honeypot_logs.json"),
            max_bytes: 5 * 1024,
            backup_count: 3,
        }
    }
}
