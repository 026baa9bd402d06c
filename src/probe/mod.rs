//! Reachability probing with ICMP echo.
//!
//! This module provides:
//! - The echo transport seam ([`EchoTransport`], [`EchoSession`])
//! - The production transport over `surge-ping` ([`SurgeTransport`])
//! - The fixed-count probe sequence with a total deadline ([`Prober`])
//! - Its settings and results ([`ProbeSettings`], [`ProbeStats`])

mod prober;
mod surge;


pub use prober::{ProbeSettings, ProbeStats, Prober};
pub use surge::SurgeTransport;

use std::future::Future;
use std::io;
use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

/// Errors that prevent a probe sequence from running at all.
///
/// Lost replies are not errors; they show up in [`ProbeStats`].
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Opening a raw ICMP socket was refused.
    #[error("Permission denied opening ICMP socket (raw sockets need root or CAP_NET_RAW)")]
    PermissionDenied {
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The ICMP socket could not be set up.
    #[error("Failed to set up ICMP socket: {source}")]
    Setup {
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ProbeError {
    /// Classifies a socket creation error.
    #[must_use]
    pub fn from_io(source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { source }
        } else {
            Self::Setup { source }
        }
    }
}

/// Why a single echo request got no reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EchoFailure {
    /// No reply arrived within the allotted time.
    #[error("timed out")]
    Timeout,

    /// The request could not be sent or the reply was unusable.
    #[error("{0}")]
    Send(String),
}

/// Opens echo sessions towards a target.
///
/// # Testing
///
/// Use [`mock::MockTransport`] to script replies without sockets.
pub trait EchoTransport: Send + Sync {
    /// Session type returned by [`open`](Self::open).
    type Session: EchoSession;

    /// Opens a session to `target`.
    ///
    /// `privileged` selects a raw socket; otherwise an unprivileged datagram
    /// ICMP socket is requested.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if the socket cannot be created.
    fn open(
        &self,
        target: IpAddr,
        privileged: bool,
    ) -> impl Future<Output = Result<Self::Session, ProbeError>> + Send;
}

/// An open echo session to one target.
pub trait EchoSession: Send {
    /// Sends echo request `sequence` and waits up to `timeout` for its reply.
    ///
    /// Returns the round-trip time.
    ///
    /// # Errors
    ///
    /// Returns [`EchoFailure`] if no usable reply arrives.
    fn echo(
        &mut self,
        sequence: u16,
        timeout: Duration,
    ) -> impl Future<Output = Result<Duration, EchoFailure>> + Send;
}
