//! Tests for validated configuration.

use std::path::Path;
use std::time::Duration;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["netconsole"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn no_sources_yields_builtin_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert_eq!(config.interfaces_path, Path::new("/etc/network/interfaces"));
        assert_eq!(config.naming.prefixes().len(), 6);
        assert!(config.naming.accepts("enp1s0"));
        assert!(!config.naming.accepts("eth0"));
        assert_eq!(config.service_manager, "systemctl");
        assert_eq!(config.service_name, "networking");
        assert_eq!(config.probe.count, 4);
        assert_eq!(config.probe.timeout, Duration::from_secs(5));
        assert_eq!(config.probe.interval, Duration::from_secs(1));
        assert!(config.probe.privileged);
        assert_eq!(
            config.health_url.as_str(),
            "https://api.threathunting.com.cn/"
        );
        assert!(config.health_timeout.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn empty_toml_is_same_as_none() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml(""))).unwrap();

        assert_eq!(config.service_name, "networking");
        assert_eq!(config.probe.count, 4);
    }

    #[test]
    fn verbose_flag_is_carried() {
        let config = ValidatedConfig::from_raw(&cli(&["--verbose"]), None).unwrap();
        assert!(config.verbose);
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_interfaces_path_overrides_toml() {
        let cli = cli(&["--interfaces", "/cli/interfaces"]);
        let toml = toml("[interfaces]\npath = \"/toml/interfaces\"\n");

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.interfaces_path, Path::new("/cli/interfaces"));
    }

    #[test]
    fn toml_interfaces_path_overrides_default() {
        let toml = toml("[interfaces]\npath = \"/toml/interfaces\"\n");

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.interfaces_path, Path::new("/toml/interfaces"));
    }

    #[test]
    fn cli_prefixes_replace_toml_list() {
        let cli = cli(&["--allow-prefix", "eth"]);
        let toml = toml("[interfaces]\nallowed_prefixes = [\"enp1s0\", \"enp2s0\"]\n");

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.naming.prefixes(), ["eth".to_string()]);
        assert!(!config.naming.accepts("enp1s0"));
    }

    #[test]
    fn toml_prefixes_replace_defaults() {
        let toml = toml("[interfaces]\nallowed_prefixes = [\"enp7s0\"]\n");

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.naming.accepts("enp7s0"));
        assert!(!config.naming.accepts("enp1s0"));
    }

    #[test]
    fn cli_health_url_overrides_toml() {
        let cli = cli(&["--health-url", "http://cli.example.com/"]);
        let toml = toml("[health]\nurl = \"http://toml.example.com/\"\n");

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.health_url.as_str(), "http://cli.example.com/");
    }

    #[test]
    fn toml_only_settings_are_applied() {
        let toml = toml(
            r#"
            [service]
            manager = "service"
            name = "network-manager"

            [probe]
            count = 2
            timeout = 3
            interval_ms = 250
            privileged = false

            [health]
            timeout = 7
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.service_manager, "service");
        assert_eq!(config.service_name, "network-manager");
        assert_eq!(config.probe.count, 2);
        assert_eq!(config.probe.timeout, Duration::from_secs(3));
        assert_eq!(config.probe.interval, Duration::from_millis(250));
        assert!(!config.probe.privileged);
        assert_eq!(config.health_timeout, Some(Duration::from_secs(7)));
    }
}

mod validation {
    use super::*;

    fn error(content: &str) -> ConfigError {
        ValidatedConfig::from_raw(&cli(&[]), Some(&toml(content))).unwrap_err()
    }

    #[test]
    fn empty_prefix_list_is_rejected() {
        let err = error("[interfaces]\nallowed_prefixes = []\n");
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "interfaces.allowed_prefixes"));
    }

    #[test]
    fn blank_prefix_is_rejected() {
        let err = error("[interfaces]\nallowed_prefixes = [\"enp1s0\", \" \"]\n");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn blank_cli_prefix_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--allow-prefix", ""]), None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn empty_service_name_is_rejected() {
        let err = error("[service]\nname = \"\"\n");
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "service.name"));
    }

    #[test]
    fn empty_service_manager_is_rejected() {
        let err = error("[service]\nmanager = \"  \"\n");
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "service.manager"));
    }

    #[test]
    fn zero_probe_count_is_rejected() {
        let err = error("[probe]\ncount = 0\n");
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "probe.count"));
    }

    #[test]
    fn zero_probe_timeout_is_rejected() {
        let err = error("[probe]\ntimeout = 0\n");
        assert!(matches!(err, ConfigError::InvalidDuration { field, .. } if field == "probe.timeout"));
    }

    #[test]
    fn zero_probe_interval_is_rejected() {
        let err = error("[probe]\ninterval_ms = 0\n");
        assert!(matches!(err, ConfigError::InvalidDuration { .. }));
    }

    #[test]
    fn zero_health_timeout_is_rejected() {
        let err = error("[health]\ntimeout = 0\n");
        assert!(matches!(err, ConfigError::InvalidDuration { field, .. } if field == "health.timeout"));
    }

    #[test]
    fn malformed_health_url_is_rejected() {
        let err = error("[health]\nurl = \"not a url\"\n");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = error("[health]\nurl = \"ftp://example.com/\"\n");
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }
}

mod loading {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn load_without_config_uses_defaults() {
        let config = ValidatedConfig::load(&cli(&[])).unwrap();
        assert_eq!(config.service_name, "networking");
    }

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[probe]\ncount = 8").unwrap();
        let path = file.path().to_str().unwrap();

        let config = ValidatedConfig::load(&cli(&["--config", path])).unwrap();

        assert_eq!(config.probe.count, 8);
    }

    #[test]
    fn load_missing_config_file_fails() {
        let result = ValidatedConfig::load(&cli(&["--config", "/nonexistent/netconsole.toml"]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn written_template_loads_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("netconsole.toml");

        write_default_config(&path).unwrap();
        let config =
            ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(config.probe.count, 4);
        assert_eq!(config.naming.prefixes().len(), 6);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let result = write_default_config(Path::new("/nonexistent/dir/netconsole.toml"));
        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn summary_mentions_key_settings() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();
        let text = config.to_string();

        assert!(text.contains("/etc/network/interfaces"));
        assert!(text.contains("systemctl restart networking"));
        assert!(text.contains("4x/5s every 1000ms"));
        assert!(text.contains("https://api.threathunting.com.cn/"));
    }
}
