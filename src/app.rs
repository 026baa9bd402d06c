//! Process-level helpers for the entry point: exit codes, logging and
//! configuration hints.

use netconsole::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Normal exit from the menu (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Invalid arguments or config file (exit code 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The terminal or the runtime failed (exit code 2).
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns a follow-up hint for a configuration error, if one helps.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileRead { .. } => {
            Some("Run 'netconsole init' to generate a configuration template.")
        }
        ConfigError::TomlParse(_) => {
            Some("Compare with the template written by 'netconsole init'.")
        }
        ConfigError::InvalidValue { field: f, .. } if *f == field::ALLOWED_PREFIXES => {
            Some("Pass --allow-prefix <PREFIX> or list at least one prefix in [interfaces].")
        }
        _ => None,
    }
}

/// Installs the global subscriber.
///
/// Logs go to stderr at `WARN` (`DEBUG` with `--verbose`) unless `RUST_LOG`
/// says otherwise, so the menu on stdout stays readable.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
