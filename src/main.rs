//! netconsole: Debian network console
//!
//! Entry point for the netconsole application.

use std::path::Path;
use std::process::ExitCode;

use netconsole::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{config_hint, exit_code, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        Some(Command::Init { output }) => init(output),
        None => session(&cli),
    }
}

/// Writes the configuration template for `netconsole init`.
fn init(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }
    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

/// Validates the configuration and runs the console on a current-thread runtime.
///
/// Excluded from coverage - requires the process terminal.
#[cfg(not(tarpaulin_include))]
fn session(cli: &Cli) -> ExitCode {
    let config = match ValidatedConfig::load(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if let Some(hint) = config_hint(&e) {
                eprintln!("\n{hint}");
            }
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let outcome = run::build_runtime().and_then(|runtime| runtime.block_on(run::execute(config)));
    match outcome {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}
