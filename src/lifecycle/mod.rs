//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGINT / SIGTERM
//!     → shutdown.rs (signal watcher task)
//!     → ServiceState::stop() (flag flip only)
//!     → accept loop observes the flag within one accept-wait interval
//! ```
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe); the watcher does no I/O
//!   beyond a tracing line emitted from ordinary task context
//! - Both termination signals map to the same graceful path
//! - No cooperative cancellation of in-flight handlers; shutdown only
//!   stops new accepts

pub mod shutdown;

pub use shutdown::spawn_signal_watcher;
