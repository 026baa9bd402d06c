//! The interactive menu session.
//!
//! [`Console`] prints the menu, reads a selection and runs one of four
//! actions against its collaborators:
//!
//! 1. list the adapters of the interfaces file ([`Updater::load`])
//! 2. update one adapter and restart networking ([`Updater::apply`])
//! 3. probe an address ([`Prober::probe`])
//! 4. check the health endpoint ([`HealthChecker::check`])
//!
//! Every action ends with exactly one status line. Action failures are
//! rendered, never returned; only terminal I/O errors end the session.

mod menu;
mod terminal;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use menu::{MENU, MenuChoice};
pub use terminal::{Status, Terminal};

use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::health::{HealthChecker, HttpClient};
use crate::network::parse_address;
use crate::probe::{EchoTransport, Prober};
use crate::service::ServiceManager;
use crate::store::InterfacesStore;
use crate::time::Sleeper;
use crate::update::{Field, UpdateError, UpdateRequest, Updater, check_private, parse_field};

const SELECT: &str = "Select an option: ";

/// The menu session and the collaborators behind its actions.
///
/// # Type Parameters
///
/// - `St`, `Sv`: The interfaces store and service manager of the [`Updater`]
/// - `T`, `S`: The echo transport and sleeper of the [`Prober`]
/// - `H`: The HTTP client of the [`HealthChecker`]
#[derive(Debug)]
pub struct Console<St, Sv, T, S, H> {
    updater: Updater<St, Sv>,
    prober: Prober<T, S>,
    checker: HealthChecker<H>,
}

impl<St, Sv, T, S, H> Console<St, Sv, T, S, H> {
    /// Creates a console over the given collaborators.
    #[must_use]
    pub const fn new(
        updater: Updater<St, Sv>,
        prober: Prober<T, S>,
        checker: HealthChecker<H>,
    ) -> Self {
        Self {
            updater,
            prober,
            checker,
        }
    }

    /// Returns the updater.
    #[must_use]
    pub const fn updater(&self) -> &Updater<St, Sv> {
        &self.updater
    }

    /// Returns the prober.
    #[must_use]
    pub const fn prober(&self) -> &Prober<T, S> {
        &self.prober
    }

    /// Returns the health checker.
    #[must_use]
    pub const fn checker(&self) -> &HealthChecker<H> {
        &self.checker
    }
}

impl<St, Sv, T, S, H> Console<St, Sv, T, S, H>
where
    St: InterfacesStore,
    Sv: ServiceManager,
    T: EchoTransport,
    S: Sleeper,
    H: HttpClient,
{
    /// Runs the menu loop until `0` is selected or the input closes.
    ///
    /// # Errors
    ///
    /// Returns the first terminal I/O error.
    pub async fn run<R, W>(&self, terminal: &mut Terminal<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            for line in MENU {
                terminal.line(line).await?;
            }
            let Some(input) = terminal.prompt(SELECT).await? else {
                tracing::debug!("Input closed, leaving the console");
                terminal.line("").await?;
                return Ok(());
            };

            let Some(choice) = MenuChoice::parse(&input) else {
                terminal
                    .status(Status::Info, &format!("Unknown option '{input}', choose 0-4"))
                    .await?;
                continue;
            };
            tracing::debug!("Selected {choice}");

            match choice {
                MenuChoice::List => self.list(terminal).await?,
                MenuChoice::Update => self.update(terminal).await?,
                MenuChoice::Probe => self.probe(terminal).await?,
                MenuChoice::Health => self.health(terminal).await?,
                MenuChoice::Exit => return Ok(()),
            }
        }
    }

    async fn list<R, W>(&self, terminal: &mut Terminal<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let interfaces = match self.updater.load() {
            Ok(interfaces) => interfaces,
            Err(e) => {
                tracing::error!("Listing failed: {e}");
                return terminal.status(Status::Failure, &e.to_string()).await;
            }
        };

        if interfaces.is_empty() {
            let message = format!(
                "No interfaces configured in {}",
                self.updater.path().display()
            );
            return terminal.status(Status::Info, &message).await;
        }
        for adapter in interfaces.adapters() {
            terminal.line(&adapter.to_string()).await?;
        }
        Ok(())
    }

    async fn update<R, W>(&self, terminal: &mut Terminal<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let Some(name) = terminal.prompt("Interface name: ").await? else {
            return Ok(());
        };
        if let Err(e) = self.updater.check_name(&name) {
            return report(terminal, &e).await;
        }

        let Some(text) = terminal.prompt("New address: ").await? else {
            return Ok(());
        };
        let address = match parse_field(Field::Address, &text).and_then(check_private) {
            Ok(address) => address,
            Err(e) => return report(terminal, &e).await,
        };

        let Some(text) = terminal.prompt("Netmask: ").await? else {
            return Ok(());
        };
        let netmask = match parse_field(Field::Netmask, &text) {
            Ok(netmask) => netmask,
            Err(e) => return report(terminal, &e).await,
        };

        let Some(text) = terminal.prompt("Gateway: ").await? else {
            return Ok(());
        };
        let gateway = match parse_field(Field::Gateway, &text) {
            Ok(gateway) => gateway,
            Err(e) => return report(terminal, &e).await,
        };

        let request = UpdateRequest {
            name,
            address,
            netmask,
            gateway,
        };
        match self.updater.apply(&request).await {
            Ok(()) => {
                let message = format!(
                    "Updated {} to {} netmask {} gateway {} and restarted {}",
                    request.name,
                    request.address,
                    request.netmask,
                    request.gateway,
                    self.updater.service_name()
                );
                terminal.status(Status::Success, &message).await
            }
            Err(e) => report(terminal, &e).await,
        }
    }

    async fn probe<R, W>(&self, terminal: &mut Terminal<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let Some(text) = terminal.prompt("Address to probe: ").await? else {
            return Ok(());
        };
        let Some(target) = parse_address(&text) else {
            let message = format!("Invalid address '{text}': expected an IPv4 or IPv6 address");
            return terminal.status(Status::Failure, &message).await;
        };

        let settings = self.prober.settings();
        terminal
            .line(&format!(
                "Probing {target} with {} echo requests ...",
                settings.count
            ))
            .await?;

        match self.prober.probe(target).await {
            Ok(stats) if stats.reachable() => {
                let average = stats.average_rtt().map_or_else(String::new, |rtt| {
                    format!(", average {}", format_rtt(rtt))
                });
                let message = format!(
                    "{target} is reachable: {}/{} replies{average}",
                    stats.received, stats.sent
                );
                terminal.status(Status::Success, &message).await
            }
            Ok(stats) => {
                let message = format!(
                    "{target} is unreachable: {}/{} replies",
                    stats.received, stats.sent
                );
                terminal.status(Status::Failure, &message).await
            }
            Err(e) => {
                tracing::error!("Probe of {target} failed: {e}");
                terminal
                    .status(Status::Failure, &format!("Probe failed: {e}"))
                    .await
            }
        }
    }

    async fn health<R, W>(&self, terminal: &mut Terminal<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let url = self.checker.url();
        match self.checker.check().await {
            Ok(report) if report.healthy() => {
                terminal
                    .status(Status::Success, &format!("{url} is healthy ({report})"))
                    .await
            }
            Ok(report) => {
                terminal
                    .status(Status::Failure, &format!("{url} is unhealthy: HTTP {report}"))
                    .await
            }
            Err(e) => {
                terminal
                    .status(Status::Failure, &format!("Cannot reach {url}: {e}"))
                    .await
            }
        }
    }
}

/// Renders an update refusal or failure as one status line.
async fn report<R, W>(terminal: &mut Terminal<R, W>, error: &UpdateError) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if error.is_warning() {
        tracing::warn!("Update refused: {error}");
        terminal.status(Status::Warning, &error.to_string()).await
    } else {
        tracing::error!("Update failed: {error}");
        terminal.status(Status::Failure, &error.to_string()).await
    }
}

fn format_rtt(rtt: Duration) -> String {
    format!("{:.1} ms", rtt.as_secs_f64() * 1000.0)
}
