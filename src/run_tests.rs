//! Tests for the run module.

use super::*;

mod run_error {
    use super::*;

    #[test]
    fn terminal_error_displays_source() {
        let error = RunError::Terminal(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(error.to_string().starts_with("Terminal I/O failed:"));
    }

    #[test]
    fn http_client_error_displays_source() {
        let error = RunError::HttpClient(HttpError::Timeout);
        assert!(error.to_string().contains("Failed to create HTTP client"));
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::Runtime(io::Error::other("no driver"));
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("Runtime"));
    }
}

mod console_wiring {
    use super::*;
    use netconsole::config::Cli;
    use std::path::Path;
    use std::time::Duration;

    fn make_test_config(args: &[&str]) -> ValidatedConfig {
        let mut full_args = vec!["netconsole"];
        full_args.extend(args);
        ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
    }

    #[test]
    fn updater_uses_configured_path_and_service() {
        let config = make_test_config(&["--interfaces", "/tmp/interfaces"]);

        let console = build_console(config).unwrap();

        assert_eq!(console.updater().path(), Path::new("/tmp/interfaces"));
        assert_eq!(console.updater().service_name(), "networking");
        assert_eq!(console.updater().service().program(), "systemctl");
    }

    #[test]
    fn updater_uses_configured_prefixes() {
        let config = make_test_config(&["--allow-prefix", "eth"]);

        let console = build_console(config).unwrap();

        assert!(console.updater().check_name("eth0").is_ok());
        assert!(console.updater().check_name("enp1s0").is_err());
    }

    #[test]
    fn prober_uses_default_sequence() {
        let console = build_console(make_test_config(&[])).unwrap();

        let settings = console.prober().settings();
        assert_eq!(settings.count, 4);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn checker_uses_configured_url() {
        let config = make_test_config(&["--health-url", "http://127.0.0.1:9/health"]);

        let console = build_console(config).unwrap();

        assert_eq!(console.checker().url().as_str(), "http://127.0.0.1:9/health");
    }
}

mod color {
    use super::*;

    #[test]
    fn colors_only_on_a_terminal() {
        assert!(use_color(true, false));
        assert!(!use_color(false, false));
    }

    #[test]
    fn no_color_wins() {
        assert!(!use_color(true, true));
    }
}

mod runtime {
    use super::*;

    #[test]
    fn current_thread_runtime_runs_futures() {
        let runtime = build_runtime().unwrap();
        assert_eq!(runtime.block_on(async { 7 }), 7);
    }
}
