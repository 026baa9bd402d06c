//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::network::NamePolicy;
use crate::probe::ProbeSettings;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Location of the interfaces file
    pub interfaces_path: PathBuf,

    /// Interfaces that may be reconfigured
    pub naming: NamePolicy,

    /// Service manager program
    pub service_manager: String,

    /// Service restarted after an update
    pub service_name: String,

    /// Reachability probe parameters
    pub probe: ProbeSettings,

    /// Health check endpoint
    pub health_url: Url,

    /// Health check request timeout; `None` uses the HTTP client default
    pub health_timeout: Option<Duration>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let health_timeout = self
            .health_timeout
            .map_or_else(|| "default".to_string(), |t| format!("{}s", t.as_secs()));

        write!(
            f,
            "Config {{ interfaces: {}, prefixes: [{}], restart: {} restart {}, \
             probe: {}x/{}s every {}ms{}, health: {} ({}) }}",
            self.interfaces_path.display(),
            self.naming.prefixes().join(", "),
            self.service_manager,
            self.service_name,
            self.probe.count,
            self.probe.timeout.as_secs(),
            self.probe.interval.as_millis(),
            if self.probe.privileged { "" } else { " unprivileged" },
            self.health_url,
            health_timeout,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The prefix list is empty or contains an empty prefix
    /// - The service manager or name is empty
    /// - The probe count, timeout or interval is zero
    /// - The health URL is invalid or not HTTP(S)
    /// - The health timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let interfaces_path = Self::resolve_interfaces_path(cli, toml);
        let naming = Self::resolve_naming(cli, toml)?;
        let (service_manager, service_name) = Self::resolve_service(toml)?;
        let probe = Self::resolve_probe(toml)?;
        let health_url = Self::resolve_health_url(cli, toml)?;
        let health_timeout = Self::resolve_health_timeout(toml)?;

        Ok(Self {
            interfaces_path,
            naming,
            service_manager,
            service_name,
            probe,
            health_url,
            health_timeout,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_interfaces_path(cli: &Cli, toml: Option<&TomlConfig>) -> PathBuf {
        // Priority: CLI explicit > TOML > default
        cli.interfaces
            .clone()
            .or_else(|| toml.and_then(|t| t.interfaces.path.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::INTERFACES_PATH))
    }

    fn resolve_naming(cli: &Cli, toml: Option<&TomlConfig>) -> Result<NamePolicy, ConfigError> {
        // CLI prefixes replace the TOML list entirely
        let prefixes = if cli.allow_prefixes.is_empty() {
            toml.and_then(|t| t.interfaces.allowed_prefixes.clone())
                .unwrap_or_else(defaults::allowed_prefixes)
        } else {
            cli.allow_prefixes.clone()
        };

        if prefixes.is_empty() {
            return Err(ConfigError::invalid(
                field::ALLOWED_PREFIXES,
                "at least one prefix is required",
            ));
        }
        if prefixes.iter().any(|prefix| prefix.trim().is_empty()) {
            return Err(ConfigError::invalid(
                field::ALLOWED_PREFIXES,
                "prefixes must not be empty",
            ));
        }

        Ok(NamePolicy::new(prefixes))
    }

    fn resolve_service(toml: Option<&TomlConfig>) -> Result<(String, String), ConfigError> {
        let service = toml.map(|t| &t.service);

        let manager = service
            .and_then(|s| s.manager.clone())
            .unwrap_or_else(|| defaults::SERVICE_MANAGER.to_string());
        let name = service
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| defaults::SERVICE_NAME.to_string());

        if manager.trim().is_empty() {
            return Err(ConfigError::invalid(field::SERVICE_MANAGER, "must not be empty"));
        }
        if name.trim().is_empty() {
            return Err(ConfigError::invalid(field::SERVICE_NAME, "must not be empty"));
        }

        Ok((manager, name))
    }

    fn resolve_probe(toml: Option<&TomlConfig>) -> Result<ProbeSettings, ConfigError> {
        let probe = toml.map(|t| &t.probe);

        let count = probe
            .and_then(|p| p.count)
            .unwrap_or(defaults::PROBE_COUNT);
        let timeout_secs = probe
            .and_then(|p| p.timeout)
            .unwrap_or(defaults::PROBE_TIMEOUT_SECS);
        let interval_ms = probe
            .and_then(|p| p.interval_ms)
            .unwrap_or(defaults::PROBE_INTERVAL_MS);
        let privileged = probe
            .and_then(|p| p.privileged)
            .unwrap_or(defaults::PROBE_PRIVILEGED);

        if count == 0 {
            return Err(ConfigError::invalid(
                field::PROBE_COUNT,
                "must be greater than 0",
            ));
        }
        if timeout_secs == 0 {
            return Err(ConfigError::zero_duration(field::PROBE_TIMEOUT));
        }
        if interval_ms == 0 {
            return Err(ConfigError::zero_duration(field::PROBE_INTERVAL));
        }

        Ok(ProbeSettings {
            count,
            timeout: Duration::from_secs(timeout_secs),
            interval: Duration::from_millis(interval_ms),
            privileged,
        })
    }

    fn resolve_health_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .health_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.health.url.as_deref()))
            .unwrap_or(defaults::HEALTH_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}', expected http or https", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_health_timeout(toml: Option<&TomlConfig>) -> Result<Option<Duration>, ConfigError> {
        match toml.and_then(|t| t.health.timeout) {
            Some(0) => Err(ConfigError::zero_duration(field::HEALTH_TIMEOUT)),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
