//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (log size > 0, accept wait >= 1)
//! - Check the bind host parses as an IP address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HoneypotConfig → Result<(), Vec<ValidationError>>
//! - Runs after CLI overrides, before the config is accepted into the system

use std::net::IpAddr;

use crate::config::schema::HoneypotConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Bind host is not a valid IP address.
    InvalidHost(String),
    /// Rotation threshold must be positive.
    ZeroLogSize,
    /// Accept wait of zero would spin the loop.
    ZeroAcceptWait,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidHost(host) => {
                write!(f, "listener.host {:?} is not a valid IP address", host)
            }
            ValidationError::ZeroLogSize => write!(f, "log.max_bytes must be greater than zero"),
            ValidationError::ZeroAcceptWait => {
                write!(f, "timeouts.accept_wait_secs must be at least 1")
            }
        }
    }
}

/// Validate a configuration, collecting every semantic error.
///
/// `timeouts.idle_minutes == 0` is deliberately legal: it means the idle
/// shutdown fires on the first loop iteration unless a connection already
/// arrived.
pub fn validate_config(config: &HoneypotConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }
    if config.log.max_bytes == 0 {
        errors.push(ValidationError::ZeroLogSize);
    }
    if config.timeouts.accept_wait_secs == 0 {
        errors.push(ValidationError::ZeroAcceptWait);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&HoneypotConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = HoneypotConfig::default();
        config.listener.host = "not-an-ip".to_string();
        config.log.max_bytes = 0;
        config.timeouts.accept_wait_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroLogSize));
        assert!(errors.contains(&ValidationError::ZeroAcceptWait));
    }

    #[test]
    fn zero_idle_minutes_is_legal() {
        let mut config = HoneypotConfig::default();
        config.timeouts.idle_minutes = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn ipv6_host_is_valid() {
        let mut config = HoneypotConfig::default();
        config.listener.host = "::1".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
