//! Tests for CLI argument parsing.

use std::path::Path;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn default_values() {
        let cli = Cli::parse_from_iter(["netconsole"]);

        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.interfaces.is_none());
        assert!(cli.allow_prefixes.is_empty());
        assert!(cli.health_url.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_paths() {
        let cli = Cli::parse_from_iter([
            "netconsole",
            "--config",
            "/etc/netconsole.toml",
            "--interfaces",
            "/tmp/interfaces",
        ]);

        assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/netconsole.toml")));
        assert_eq!(cli.interfaces.as_deref(), Some(Path::new("/tmp/interfaces")));
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from_iter(["netconsole", "-c", "a.toml", "-i", "ifaces", "-v"]);

        assert_eq!(cli.config.as_deref(), Some(Path::new("a.toml")));
        assert_eq!(cli.interfaces.as_deref(), Some(Path::new("ifaces")));
        assert!(cli.verbose);
    }

    #[test]
    fn allow_prefix_is_repeatable() {
        let cli = Cli::parse_from_iter([
            "netconsole",
            "--allow-prefix",
            "eth",
            "--allow-prefix",
            "enp7s0",
        ]);

        assert_eq!(cli.allow_prefixes, ["eth", "enp7s0"]);
    }

    #[test]
    fn parse_health_url() {
        let cli = Cli::parse_from_iter(["netconsole", "--health-url", "http://localhost:8080/"]);

        assert_eq!(cli.health_url.as_deref(), Some("http://localhost:8080/"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let result = <Cli as clap::Parser>::try_parse_from(["netconsole", "--ping", "8.8.8.8"]);
        assert!(result.is_err());
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_with_default_output() {
        let cli = Cli::parse_from_iter(["netconsole", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => assert_eq!(output, Path::new("netconsole.toml")),
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn init_with_custom_output() {
        let cli = Cli::parse_from_iter(["netconsole", "init", "--output", "/tmp/custom.toml"]);

        match cli.command {
            Some(Command::Init { output }) => assert_eq!(output, Path::new("/tmp/custom.toml")),
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn session_is_not_init() {
        assert!(!Cli::parse_from_iter(["netconsole"]).is_init());
    }
}
