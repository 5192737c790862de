//! Accept loop and listening socket ownership.
//!
//! # Responsibilities
//! - Bind to the configured address with address reuse and a real backlog
//! - Wait for connections with a bounded timeout so shutdown and idle
//!   checks stay periodic
//! - Dispatch each accepted connection to a detached handler task
//!
//! # Design Decisions
//! - Bind/listen failures are fatal; accept failures never are
//! - The loop consumes the listener, so the socket is released exactly
//!   once on every exit path, including early returns

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};

use crate::config::schema::ListenerConfig;
use crate::net::handler::handle_connection;
use crate::service::ServiceContext;
use crate::sink::ErrorEvent;

/// Listen backlog.
const BACKLOG: u32 = 128;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Configured host does not parse as an IP address.
    #[error("invalid bind host {host:?}: {source}")]
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },

    /// Failed to bind or listen on the address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// The listening socket and its accept loop.
///
/// Exclusively owns the socket; handlers only ever see their accepted
/// client stream.
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Bind to the configured address with `SO_REUSEADDR` set.
    pub fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let ip: IpAddr = config
            .host
            .parse()
            .map_err(|source| ListenerError::InvalidHost {
                host: config.host.clone(),
                source,
            })?;
        let addr = SocketAddr::new(ip, config.port);

        let bind_err = |source| ListenerError::Bind { addr, source };
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(bind_err)?;
        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;
        let inner = socket.listen(BACKLOG).map_err(bind_err)?;
        let local_addr = inner.local_addr().map_err(bind_err)?;

        tracing::info!(address = %local_addr, "Listener bound");
        Ok(Self { inner, local_addr })
    }

    /// The address this listener is bound to. Useful when the configured
    /// port is 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Run the accept loop until a shutdown signal flips the running flag
    /// or the idle watchdog fires.
    ///
    /// Consumes the listener; the socket drops when this returns, on every
    /// exit path.
    pub async fn run(self, ctx: ServiceContext, accept_wait: Duration) {
        loop {
            // Checked before everything else each iteration.
            if !ctx.state.is_running() {
                tracing::info!("Shutdown requested, leaving accept loop");
                break;
            }
            if ctx.state.idle_expired() {
                tracing::info!(
                    uptime_secs = ctx.state.uptime().as_secs(),
                    "No connection attempts within the idle window, shutting down"
                );
                break;
            }

            match tokio::time::timeout(accept_wait, self.inner.accept()).await {
                Ok(Ok((stream, peer))) => {
                    // Fire-and-forget; the loop never waits on a handler.
                    let ctx = ctx.clone();
                    tokio::spawn(handle_connection(stream, peer, ctx));
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Accept failed");
                    if let Err(sink_err) = ctx.sink.append(&ErrorEvent::new(&e)) {
                        tracing::error!(error = %sink_err, "Failed to append error record");
                    }
                }
                // Wait expired with no connection; re-check loop conditions.
                Err(_) => continue,
            }
        }
        tracing::info!(
            connections = ctx.state.connection_count(),
            "Accept loop stopped, releasing listening socket"
        );
    }
}
