//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides applied in main
//!     → validation.rs (semantic checks)
//!     → HoneypotConfig (validated, immutable)
//!     → shared with the accept loop and handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the service starts; no hot reload
//! - All fields have defaults so a missing file or minimal file works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::HoneypotConfig;
pub use schema::ListenerConfig;
pub use schema::LogConfig;
pub use schema::TimeoutConfig;
