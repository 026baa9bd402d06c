//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Interfaces file configuration
    #[serde(default)]
    pub interfaces: InterfacesSection,

    /// Service restart configuration
    #[serde(default)]
    pub service: ServiceSection,

    /// Reachability probe configuration
    #[serde(default)]
    pub probe: ProbeSection,

    /// Health check configuration
    #[serde(default)]
    pub health: HealthSection,
}

/// Interfaces file configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfacesSection {
    /// Location of the interfaces file
    pub path: Option<PathBuf>,

    /// Name prefixes of interfaces that may be reconfigured
    pub allowed_prefixes: Option<Vec<String>>,
}

/// Service restart configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    /// Service manager program
    pub manager: Option<String>,

    /// Service to restart
    pub name: Option<String>,
}

/// Reachability probe configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSection {
    /// Number of echo requests
    pub count: Option<u16>,

    /// Deadline for the whole sequence in seconds
    pub timeout: Option<u64>,

    /// Spacing between requests in milliseconds
    pub interval_ms: Option<u64>,

    /// Use raw sockets
    pub privileged: Option<bool>,
}

/// Health check configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthSection {
    /// Endpoint URL
    pub url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# netconsole configuration file

[interfaces]
# Location of the ifupdown interfaces file
# path = "/etc/network/interfaces"

# Interfaces whose name starts with one of these prefixes may be reconfigured
# Note: --allow-prefix on the command line REPLACES this list
allowed_prefixes = ["enp1s0", "enp2s0", "enp3s0", "enp4s0", "enp5s0", "enp6s0"]

[service]
# Restarted with "<manager> restart <name>" after an interface update
# manager = "systemctl"
# name = "networking"

[probe]
# Number of ICMP echo requests (default: 4)
# count = 4

# Deadline for the whole probe in seconds (default: 5)
# timeout = 5

# Spacing between requests in milliseconds (default: 1000)
# interval_ms = 1000

# Use raw sockets (needs root or CAP_NET_RAW); false uses unprivileged ICMP sockets
# privileged = true

[health]
# Endpoint queried by the health check; only HTTP 200 counts as healthy
# url = "https://api.threathunting.com.cn/"

# Request timeout in seconds (default: HTTP client default)
# timeout = 10
"#
    .to_string()
}
