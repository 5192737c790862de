//! Passive TCP Deception Service ("honeypot")
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────┐
//!                       │                  HONEYPOT                   │
//!                       │                                             │
//!   Inbound TCP         │  ┌──────────┐ bounded wait ┌─────────────┐ │
//!   ────────────────────┼─▶│  accept  │─────────────▶│ connection  │ │
//!                       │  │   loop   │  (detached)  │  handler    │ │
//!                       │  └────┬─────┘              └──────┬──────┘ │
//!                       │       │ polls                     │ logs   │
//!                       │       ▼                           ▼        │
//!                       │  ┌──────────┐              ┌─────────────┐ │
//!                       │  │  shared  │◀─ increment ─│  rotating   │ │
//!                       │  │  state   │              │  JSON sink  │ │
//!                       │  └────┬─────┘              └─────────────┘ │
//!                       │       ▲ flag flip                          │
//!                       │  ┌────┴─────┐                              │
//!                       │  │ signals  │  SIGINT / SIGTERM            │
//!                       │  └──────────┘                              │
//!                       └────────────────────────────────────────────┘
//! ```
//!
//! The accept loop owns the listening socket and decides termination: an
//! external signal, or the idle watchdog when no connection ever arrived.
//! Every peer gets one fixed deterrent line, one log record, and a closed
//! socket.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use honeypot::config::validation::validate_config;
use honeypot::config::{load_config, ConfigError, HoneypotConfig};
use honeypot::Honeypot;

#[derive(Parser)]
#[command(name = "honeypot")]
#[command(about = "Passive TCP deception service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (default "0.0.0.0").
    #[arg(long)]
    host: Option<String>,

    /// Listen port (default 22).
    #[arg(long)]
    port: Option<u16>,

    /// Idle shutdown threshold in whole minutes (default 60).
    #[arg(long)]
    idle_timeout_minutes: Option<u64>,

    /// Log file path (default "honeypot_logs.json").
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Log rotation threshold in bytes (default 5120).
    #[arg(long)]
    log_max_bytes: Option<u64>,

    /// Number of rotated log backups to retain (default 3).
    #[arg(long)]
    log_backup_count: Option<usize>,
}

impl Cli {
    /// Flags beat file, file beats defaults.
    fn apply_overrides(&self, config: &mut HoneypotConfig) {
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(minutes) = self.idle_timeout_minutes {
            config.timeouts.idle_minutes = minutes;
        }
        if let Some(path) = &self.log_path {
            config.log.path = path.clone();
        }
        if let Some(max_bytes) = self.log_max_bytes {
            config.log.max_bytes = max_bytes;
        }
        if let Some(backup_count) = self.log_backup_count {
            config.log.backup_count = backup_count;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "honeypot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("honeypot v0.1.0 starting");

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HoneypotConfig::default(),
    };
    cli.apply_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        idle_minutes = config.timeouts.idle_minutes,
        log_path = %config.log.path.display(),
        "Configuration loaded"
    );

    let service = Honeypot::new(config);
    service.run().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
