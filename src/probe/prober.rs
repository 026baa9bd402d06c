//! The fixed-count probe sequence.

use std::net::IpAddr;
use std::time::Duration;

use tokio::time::Instant;

use super::{EchoSession, EchoTransport, ProbeError};
use crate::time::{Sleeper, TokioSleeper};

/// Parameters of one probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Number of echo requests.
    pub count: u16,
    /// Deadline for the whole sequence.
    pub timeout: Duration,
    /// Spacing between consecutive requests.
    pub interval: Duration,
    /// Request a raw (privileged) socket.
    pub privileged: bool,
}

impl ProbeSettings {
    /// Default number of echo requests.
    pub const DEFAULT_COUNT: u16 = 4;
    /// Default deadline for the whole sequence.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    /// Default spacing between requests.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            count: Self::DEFAULT_COUNT,
            timeout: Self::DEFAULT_TIMEOUT,
            interval: Self::DEFAULT_INTERVAL,
            privileged: true,
        }
    }
}

/// Outcome of a probe sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeStats {
    /// Echo requests sent before the deadline.
    pub sent: u16,
    /// Replies received.
    pub received: u16,
    /// Round-trip time of each reply, in arrival order.
    pub rtts: Vec<Duration>,
}

impl ProbeStats {
    /// A target is reachable if at least one reply came back.
    #[must_use]
    pub const fn reachable(&self) -> bool {
        self.received > 0
    }

    /// Mean round-trip time over the received replies.
    #[must_use]
    pub fn average_rtt(&self) -> Option<Duration> {
        let count = u32::try_from(self.rtts.len()).ok().filter(|&n| n > 0)?;
        Some(self.rtts.iter().sum::<Duration>() / count)
    }

    fn record(&mut self, rtt: Duration) {
        self.received += 1;
        self.rtts.push(rtt);
    }
}

/// Runs probe sequences over an [`EchoTransport`].
///
/// Requests go out one at a time, `interval` apart. Each request waits for
/// its reply at most until the next one is due (the last one until the
/// deadline). Once `timeout` has elapsed no further request is sent.
/// Timeouts and send errors count as lost replies.
///
/// # Type Parameters
///
/// - `T`: The echo transport
/// - `S`: The sleeper used for request spacing (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct Prober<T, S = TokioSleeper> {
    transport: T,
    settings: ProbeSettings,
    sleeper: S,
}

impl<T> Prober<T, TokioSleeper> {
    /// Creates a prober with the given transport and settings.
    #[must_use]
    pub const fn new(transport: T, settings: ProbeSettings) -> Self {
        Self {
            transport,
            settings,
            sleeper: TokioSleeper,
        }
    }
}

impl<T, S> Prober<T, S> {
    /// Sets a custom sleeper for request spacing.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Prober<T, S2> {
        Prober {
            transport: self.transport,
            settings: self.settings,
            sleeper,
        }
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> &ProbeSettings {
        &self.settings
    }
}

impl<T: EchoTransport, S: Sleeper> Prober<T, S> {
    /// Probes `target` and returns the statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if the echo socket cannot be opened.
    pub async fn probe(&self, target: IpAddr) -> Result<ProbeStats, ProbeError> {
        let ProbeSettings {
            count,
            timeout,
            interval,
            privileged,
        } = self.settings;

        let mut session = self.transport.open(target, privileged).await?;
        let deadline = Instant::now() + timeout;
        let mut stats = ProbeStats::default();

        for sequence in 0..count {
            let started = Instant::now();
            let remaining = deadline.saturating_duration_since(started);
            if remaining.is_zero() {
                break;
            }

            let last = sequence + 1 == count;
            let wait = if last { remaining } else { interval.min(remaining) };

            stats.sent += 1;
            match session.echo(sequence, wait).await {
                Ok(rtt) => {
                    tracing::debug!("Reply from {target}: seq={sequence} time={rtt:?}");
                    stats.record(rtt);
                }
                Err(failure) => {
                    tracing::debug!("No reply from {target}: seq={sequence}: {failure}");
                }
            }

            if last {
                break;
            }
            let pause = interval
                .saturating_sub(started.elapsed())
                .min(deadline.saturating_duration_since(Instant::now()));
            if !pause.is_zero() {
                self.sleeper.sleep(pause).await;
            }
        }

        tracing::debug!(
            "Probe of {target}: {}/{} replies",
            stats.received,
            stats.sent
        );
        Ok(stats)
    }
}
