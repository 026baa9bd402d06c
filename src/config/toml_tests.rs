//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.interfaces.path.is_none());
        assert!(config.interfaces.allowed_prefixes.is_none());
        assert!(config.service.name.is_none());
        assert!(config.probe.count.is_none());
        assert!(config.health.url.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [interfaces]
            path = "/srv/interfaces"
            allowed_prefixes = ["eth", "enp1s0"]

            [service]
            manager = "service"
            name = "networking"

            [probe]
            count = 3
            timeout = 10
            interval_ms = 200
            privileged = false

            [health]
            url = "http://127.0.0.1:8080/health"
            timeout = 2
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(
            config.interfaces.path.as_deref(),
            Some(std::path::Path::new("/srv/interfaces"))
        );
        assert_eq!(
            config.interfaces.allowed_prefixes,
            Some(vec!["eth".to_string(), "enp1s0".to_string()])
        );
        assert_eq!(config.service.manager.as_deref(), Some("service"));
        assert_eq!(config.probe.count, Some(3));
        assert_eq!(config.probe.timeout, Some(10));
        assert_eq!(config.probe.interval_ms, Some(200));
        assert_eq!(config.probe.privileged, Some(false));
        assert_eq!(
            config.health.url.as_deref(),
            Some("http://127.0.0.1:8080/health")
        );
        assert_eq!(config.health.timeout, Some(2));
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            [probe]
            count = 4
            ttl = 64
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_unknown_sections() {
        let toml = r#"
            [webhook]
            url = "https://example.com"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_negative_count() {
        assert!(TomlConfig::parse("[probe]\ncount = -1\n").is_err());
    }
}

mod default_template {
    use super::*;

    #[test]
    fn template_is_valid_toml() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(
            config.interfaces.allowed_prefixes.map(|p| p.len()),
            Some(6)
        );
    }

    #[test]
    fn template_contains_all_sections() {
        let template = default_config_template();

        for section in ["[interfaces]", "[service]", "[probe]", "[health]"] {
            assert!(template.contains(section), "{section}");
        }
    }

    #[test]
    fn template_documents_defaults() {
        let template = default_config_template();

        assert!(template.contains("# count = 4"));
        assert!(template.contains("# timeout = 5"));
        assert!(template.contains("https://api.threathunting.com.cn/"));
    }
}

mod file_loading {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[service]\nname = \"networking\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.service.name.as_deref(), Some("networking"));
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let result = TomlConfig::load(std::path::Path::new("/nonexistent/netconsole.toml"));

        assert!(matches!(
            result,
            Err(super::super::ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn load_invalid_toml_file_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[probe\ncount = 4").unwrap();

        let result = TomlConfig::load(file.path());

        assert!(matches!(
            result,
            Err(super::super::ConfigError::TomlParse(_))
        ));
    }
}
