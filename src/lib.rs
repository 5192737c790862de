//! Passive TCP Deception Service Library
//!
//! Accepts every inbound connection on a single decoy port, records the
//! attempt to a rotated JSON-lines log, sends a fixed deterrent message,
//! and closes the connection. Shuts itself down if no connection is ever
//! observed within a configurable idle window.

pub mod config;
pub mod lifecycle;
pub mod net;
pub mod service;
pub mod sink;
pub mod state;

pub use config::schema::HoneypotConfig;
pub use service::{Honeypot, ServiceContext};
pub use sink::RotatingSink;
pub use state::ServiceState;
