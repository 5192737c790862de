//! Shared service state and the idle watchdog predicate.
//!
//! # Responsibilities
//! - Count accepted connections without lost updates
//! - Hold the running flag flipped by the shutdown controller
//! - Derive the idle-shutdown condition from count and uptime
//!
//! # Design Decisions
//! - Plain atomics, no mutex: the only shared mutation is a counter
//!   increment and a one-way flag flip
//! - The watchdog owns no thread; the accept loop polls `idle_expired`
//!   once per iteration

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// State shared between the accept loop, every connection handler, and the
/// shutdown controller.
#[derive(Debug)]
pub struct ServiceState {
    /// Total connections accepted since start. Monotonically non-decreasing.
    connection_count: AtomicU64,
    /// True until a signal or the idle watchdog asks the loop to stop.
    /// One-way transition; never reset.
    running: AtomicBool,
    /// Fixed at construction; basis for the idle window.
    start_time: Instant,
    /// Idle threshold, converted from whole minutes once at startup.
    idle_timeout: Duration,
}

impl ServiceState {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            connection_count: AtomicU64::new(0),
            running: AtomicBool::new(true),
            start_time: Instant::now(),
            idle_timeout,
        }
    }

    /// Record one accepted connection and return its running index
    /// (1-based). The fetch-and-add guarantees no two callers observe the
    /// same prior value.
    pub fn record_connection(&self) -> u64 {
        self.connection_count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Total connections accepted so far.
    pub fn connection_count(&self) -> u64 {
        self.connection_count.load(Ordering::SeqCst)
    }

    /// Whether the accept loop should keep going.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the accept loop to stop at its next iteration. Safe to call from
    /// any task; flag flip only.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// The idle watchdog condition: true only while no connection has ever
    /// been accepted and the idle window has elapsed. A single connection
    /// disables this path for the remaining process lifetime.
    pub fn idle_expired(&self) -> bool {
        self.connection_count() == 0 && self.start_time.elapsed() > self.idle_timeout
    }

    /// Time since the service started.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
