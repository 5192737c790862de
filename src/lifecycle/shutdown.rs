//! Shutdown coordination for the honeypot.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::state::ServiceState;

/// Spawn a task that waits for SIGINT or SIGTERM and flips the running
/// flag. The accept loop picks the flag up at the top of its next
/// iteration, so shutdown latency is bounded by the accept wait.
pub fn spawn_signal_watcher(state: Arc<ServiceState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let signal = wait_for_termination().await;
        tracing::info!(signal, "Termination signal received, stopping accept loop");
        state.stop();
    })
}

#[cfg(unix)]
async fn wait_for_termination() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() -> &'static str {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    "ctrl-c"
}
