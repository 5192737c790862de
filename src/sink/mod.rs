//! Structured log sink subsystem.
//!
//! # Data Flow
//! ```text
//! Connection handler / accept loop
//!     → event.rs (one immutable record per attempt or failure)
//!     → rotating.rs (serialize, append one JSON object per line)
//!     → live file, rotated into numbered backups at a byte threshold
//! ```
//!
//! # Design Decisions
//! - One JSON object per line, no enclosing array; the file is the
//!   authoritative record of every attempt
//! - A mutex serializes appends so concurrent handlers never interleave
//!   a single record
//! - Records are write-only for the service; nothing reads them back

pub mod event;
pub mod rotating;

pub use event::{ConnectionEvent, ErrorEvent};
pub use rotating::RotatingSink;
