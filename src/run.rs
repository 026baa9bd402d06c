//! Application execution logic.
//!
//! This module wires the production collaborators into a [`Console`] and
//! runs it on the process terminal.

use std::io::{self, IsTerminal};

use thiserror::Error;
use tokio::io::{BufReader, Stdin, Stdout};
use tokio::runtime::Runtime;

use netconsole::config::ValidatedConfig;
use netconsole::console::{Console, Terminal};
use netconsole::health::{HealthChecker, HttpError, ReqwestClient};
use netconsole::probe::{Prober, SurgeTransport};
use netconsole::service::SystemctlManager;
use netconsole::store::FileInterfacesStore;
use netconsole::time::TokioSleeper;
use netconsole::update::Updater;

/// The console type used by the binary.
type AppConsole =
    Console<FileInterfacesStore, SystemctlManager, SurgeTransport, TokioSleeper, ReqwestClient>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the async runtime.
    #[error("Failed to create Tokio runtime: {0}")]
    Runtime(#[source] io::Error),

    /// Failed to build the health check client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// Reading from or writing to the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[source] io::Error),
}

/// Builds the single-threaded runtime the console runs on.
///
/// # Errors
///
/// Returns [`RunError::Runtime`] if the runtime cannot be created.
pub fn build_runtime() -> Result<Runtime, RunError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(RunError::Runtime)
}

/// Runs the interactive session until the operator exits.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - The terminal fails
///
/// # Coverage Note
///
/// This function is excluded from coverage because it drives the process
/// terminal.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let console = build_console(config)?;
    let mut terminal = process_terminal();

    console.run(&mut terminal).await.map_err(RunError::Terminal)?;
    tracing::debug!("Console closed");
    Ok(())
}

/// Creates the console from configuration.
fn build_console(config: ValidatedConfig) -> Result<AppConsole, RunError> {
    let updater = Updater::new(
        FileInterfacesStore::new(),
        SystemctlManager::with_program(config.service_manager),
        config.interfaces_path,
    )
    .with_service_name(config.service_name)
    .with_policy(config.naming);

    let prober = Prober::new(SurgeTransport::new(), config.probe);

    let client = ReqwestClient::with_timeout(config.health_timeout).map_err(RunError::HttpClient)?;
    let checker = HealthChecker::new(client, config.health_url);

    Ok(Console::new(updater, prober, checker))
}

/// Wraps stdin and stdout; colors only when stdout is a terminal.
#[cfg(not(tarpaulin_include))]
fn process_terminal() -> Terminal<BufReader<Stdin>, Stdout> {
    let color = use_color(
        io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    );
    Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).with_color(color)
}

/// Colors are used on a terminal unless `NO_COLOR` is set.
const fn use_color(is_terminal: bool, no_color: bool) -> bool {
    is_terminal && !no_color
}
