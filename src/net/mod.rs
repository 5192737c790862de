//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bounded accept wait, shutdown/idle checks)
//!     → handler.rs (detached task: log, count, deter, close)
//!
//! Service states:
//!     Starting → Listening → ShuttingDown → Stopped
//! ```
//!
//! # Design Decisions
//! - The accept loop exclusively owns the listening socket; handlers own
//!   only their accepted client socket
//! - Handlers are fire-and-forget; the loop never blocks on them and they
//!   touch loop control only through the shared connection counter
//! - The accept wait is bounded so running/idle checks stay periodic

pub mod handler;
pub mod listener;

pub use handler::DETERRENT_PAYLOAD;
pub use listener::{Listener, ListenerError};
