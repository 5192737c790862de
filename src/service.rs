//! Service wiring: context construction and the run sequence.
//!
//! # Design Decisions
//! - No ambient globals: the counter, running flag, and sink handle live
//!   in an explicitly constructed context cloned into the accept loop and
//!   every handler
//! - Fail fast: sink or bind failure is fatal before listening begins

use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::HoneypotConfig;
use crate::lifecycle;
use crate::net::{Listener, ListenerError};
use crate::sink::RotatingSink;
use crate::state::ServiceState;

/// Shared handles injected into the accept loop and each connection
/// handler.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub state: Arc<ServiceState>,
    pub sink: Arc<RotatingSink>,
}

/// Errors that prevent the service from reaching the listening state.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Could not open the structured log sink.
    #[error("failed to open log sink: {0}")]
    Sink(#[source] std::io::Error),

    /// Could not bind or listen on the configured address.
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// The honeypot service: owns the validated configuration and drives the
/// starting → listening → stopped sequence.
pub struct Honeypot {
    config: HoneypotConfig,
}

impl Honeypot {
    /// Create a service from a validated configuration.
    pub fn new(config: HoneypotConfig) -> Self {
        Self { config }
    }

    /// Run to completion: bind, watch for signals, accept until shutdown,
    /// release the socket.
    pub async fn run(self) -> Result<(), ServiceError> {
        let sink = RotatingSink::open(
            &self.config.log.path,
            self.config.log.max_bytes,
            self.config.log.backup_count,
        )
        .map_err(ServiceError::Sink)?;
        let state = Arc::new(ServiceState::new(self.config.timeouts.idle_timeout()));
        let ctx = ServiceContext {
            state: Arc::clone(&state),
            sink: Arc::new(sink),
        };

        let listener = Listener::bind(&self.config.listener)?;
        tracing::info!(
            address = %listener.local_addr(),
            idle_minutes = self.config.timeouts.idle_minutes,
            "Honeypot active, waiting for connections"
        );

        lifecycle::spawn_signal_watcher(Arc::clone(&state));

        listener.run(ctx, self.config.timeouts.accept_wait()).await;

        tracing::info!(
            connections = state.connection_count(),
            "Honeypot closed cleanly"
        );
        Ok(())
    }
}
