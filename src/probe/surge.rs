//! Production echo transport using `surge-ping`.

use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence, Pinger, SurgeError};

use super::{EchoFailure, EchoSession, EchoTransport, ProbeError};

/// Size of the echo payload, matching the classic `ping` default.
const PAYLOAD_LEN: usize = 56;

/// Echo transport over ICMP sockets.
///
/// A privileged session uses a raw socket (root or `CAP_NET_RAW`); an
/// unprivileged one uses a datagram ICMP socket, which the kernel only
/// allows for groups listed in `net.ipv4.ping_group_range`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurgeTransport;

impl SurgeTransport {
    /// Creates the transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EchoTransport for SurgeTransport {
    type Session = SurgeSession;

    async fn open(&self, target: IpAddr, privileged: bool) -> Result<SurgeSession, ProbeError> {
        let config = socket_config(target, privileged);

        let client = Client::new(&config).map_err(ProbeError::from_io)?;
        let identifier = PingIdentifier(u16::try_from(std::process::id() & 0xffff).unwrap_or(0));
        let pinger = client.pinger(target, identifier).await;

        Ok(SurgeSession {
            _client: client,
            pinger,
            payload: [0; PAYLOAD_LEN],
        })
    }
}

/// Socket settings for one target: raw when privileged, datagram otherwise.
fn socket_config(target: IpAddr, privileged: bool) -> Config {
    let kind = match target {
        IpAddr::V4(_) => ICMP::V4,
        IpAddr::V6(_) => ICMP::V6,
    };
    let sock_type = if privileged {
        socket2::Type::RAW
    } else {
        socket2::Type::DGRAM
    };
    Config::builder().kind(kind).sock_type_hint(sock_type).build()
}

/// An open ICMP session to one target.
pub struct SurgeSession {
    // Owns the socket and its receive task; the pinger only holds a handle.
    _client: Client,
    pinger: Pinger,
    payload: [u8; PAYLOAD_LEN],
}

impl std::fmt::Debug for SurgeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurgeSession").finish_non_exhaustive()
    }
}

impl EchoSession for SurgeSession {
    async fn echo(&mut self, sequence: u16, timeout: Duration) -> Result<Duration, EchoFailure> {
        self.pinger.timeout(timeout);
        match self.pinger.ping(PingSequence(sequence), &self.payload).await {
            Ok((_packet, rtt)) => Ok(rtt),
            Err(SurgeError::Timeout { .. }) => Err(EchoFailure::Timeout),
            Err(e) => Err(EchoFailure::Send(e.to_string())),
        }
    }
}
