//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Any other out-of-range or empty value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names used in validation errors.
pub mod field {
    /// `interfaces.allowed_prefixes`
    pub const ALLOWED_PREFIXES: &str = "interfaces.allowed_prefixes";
    /// `service.manager`
    pub const SERVICE_MANAGER: &str = "service.manager";
    /// `service.name`
    pub const SERVICE_NAME: &str = "service.name";
    /// `probe.count`
    pub const PROBE_COUNT: &str = "probe.count";
    /// `probe.timeout`
    pub const PROBE_TIMEOUT: &str = "probe.timeout";
    /// `probe.interval_ms`
    pub const PROBE_INTERVAL: &str = "probe.interval_ms";
    /// `health.timeout`
    pub const HEALTH_TIMEOUT: &str = "health.timeout";
}

impl ConfigError {
    /// Creates an `InvalidValue` error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidDuration` error for a zero value.
    #[must_use]
    pub fn zero_duration(field: &'static str) -> Self {
        Self::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        }
    }
}
