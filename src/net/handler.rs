//! Per-connection handling.
//!
//! # Responsibilities
//! - Append one connection_attempt record per accepted connection
//! - Increment the shared counter and emit the status line
//! - Send the deterrent payload and close the socket on every path
//!
//! # Design Decisions
//! - Send failures are logged with peer context and swallowed; a handler
//!   never affects the accept loop or the running flag
//! - Generic over the stream so the failure path is unit-testable

use std::net::SocketAddr;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::service::ServiceContext;
use crate::sink::{ConnectionEvent, ErrorEvent};

/// Fixed text sent to every connecting peer before the socket closes.
pub const DETERRENT_PAYLOAD: &[u8] = b"Access denied. This incident has been recorded.\n";

/// Handle one accepted connection: record it, count it, deter it, close it.
///
/// Runs as a detached task; completes on every path and never propagates an
/// error back to the accept loop.
pub async fn handle_connection<S>(mut stream: S, peer: SocketAddr, ctx: ServiceContext)
where
    S: AsyncWrite + Unpin,
{
    let event = ConnectionEvent::attempt(peer);
    let timestamp = event.timestamp().to_string();
    if let Err(e) = ctx.sink.append(&event) {
        tracing::error!(peer = %peer, error = %e, "Failed to append connection record");
    }

    let index = ctx.state.record_connection();
    tracing::info!(
        index,
        peer = %peer,
        timestamp = %timestamp,
        "Connection detected"
    );

    if let Err(e) = stream.write_all(DETERRENT_PAYLOAD).await {
        tracing::warn!(peer = %peer, error = %e, "Failed to send deterrent payload");
        if let Err(sink_err) = ctx.sink.append(&ErrorEvent::with_peer(&e, peer)) {
            tracing::error!(peer = %peer, error = %sink_err, "Failed to append error record");
        }
    }

    // Flush what we can and close; the socket is ours and drops here on
    // every path.
    let _ = stream.shutdown().await;
}
