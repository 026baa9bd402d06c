//! Core network types for adapter representation.

use std::fmt;
use std::net::IpAddr;

/// Address family of an `iface` stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4 (`inet`).
    Inet,
    /// IPv6 (`inet6`).
    Inet6,
}

impl AddressFamily {
    /// Returns the family an address belongs to.
    #[must_use]
    pub const fn of(address: IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Self::Inet,
            IpAddr::V6(_) => Self::Inet6,
        }
    }

    /// Parses the keyword used in `iface` lines.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "inet" => Some(Self::Inet),
            "inet6" => Some(Self::Inet6),
            _ => None,
        }
    }

    /// Returns the keyword used in `iface` lines.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inet => "inet",
            Self::Inet6 => "inet6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// How an `iface` stanza obtains its address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigMethod {
    /// Fixed address from the stanza options.
    Static,
    /// Address leased from a DHCP server.
    Dhcp,
    /// The loopback interface.
    Loopback,
    /// Interface brought up without address configuration.
    Manual,
    /// Any other method (`auto`, `ppp`, `tunnel`, ...), kept verbatim.
    Other(String),
}

impl ConfigMethod {
    /// Parses the method keyword used in `iface` lines.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "static" => Self::Static,
            "dhcp" => Self::Dhcp,
            "loopback" => Self::Loopback,
            "manual" => Self::Manual,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the keyword used in `iface` lines.
    #[must_use]
    pub fn keyword(&self) -> &str {
        match self {
            Self::Static => "static",
            Self::Dhcp => "dhcp",
            Self::Loopback => "loopback",
            Self::Manual => "manual",
            Self::Other(keyword) => keyword,
        }
    }
}

impl fmt::Display for ConfigMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The `iface` line of an adapter: family and method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    /// Address family.
    pub family: AddressFamily,
    /// Configuration method.
    pub method: ConfigMethod,
}

/// One configured network interface entry of the interfaces file.
///
/// Only `address`, `netmask` and `gateway` are interpreted; every other
/// option line of the stanza is carried in `options` in its original order so
/// the file can be written back without losing settings.
///
/// # Equality
///
/// Two adapters are equal if every field, including option order, is equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    /// Interface name (e.g., "enp1s0", "lo").
    pub name: String,
    /// Listed in an `auto` line.
    pub auto: bool,
    /// Classes from `allow-<class>` lines (e.g., "hotplug").
    pub allow: Vec<String>,
    /// Other interface-list directives naming this adapter (`no-auto-down`,
    /// `no-scripts`), in file order.
    pub flags: Vec<String>,
    /// The `iface` line, absent for names that only appear in `auto`/`allow-*`.
    pub stanza: Option<Stanza>,
    /// Configured address.
    pub address: Option<IpAddr>,
    /// Configured netmask, always address-shaped.
    pub netmask: Option<IpAddr>,
    /// Configured default gateway.
    pub gateway: Option<IpAddr>,
    /// Uninterpreted option lines as `(keyword, value)`.
    pub options: Vec<(String, String)>,
}

impl Adapter {
    /// Creates an adapter with an `iface` stanza and no options.
    #[must_use]
    pub fn new(name: impl Into<String>, family: AddressFamily, method: ConfigMethod) -> Self {
        Self {
            stanza: Some(Stanza { family, method }),
            ..Self::bare(name)
        }
    }

    /// Creates an adapter that has no `iface` stanza yet.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto: false,
            allow: Vec::new(),
            flags: Vec::new(),
            stanza: None,
            address: None,
            netmask: None,
            gateway: None,
            options: Vec::new(),
        }
    }

    /// Marks the adapter as brought up automatically.
    #[must_use]
    pub fn with_auto(mut self) -> Self {
        self.auto = true;
        self
    }

    /// Sets address, netmask and gateway.
    #[must_use]
    pub fn with_addresses(
        mut self,
        address: IpAddr,
        netmask: IpAddr,
        gateway: Option<IpAddr>,
    ) -> Self {
        self.address = Some(address);
        self.netmask = Some(netmask);
        self.gateway = gateway;
        self
    }

    /// Returns the address family of the stanza, if any.
    #[must_use]
    pub fn family(&self) -> Option<AddressFamily> {
        self.stanza.as_ref().map(|stanza| stanza.family)
    }

    /// Returns true if this adapter has the given name and family.
    #[must_use]
    pub fn is(&self, name: &str, family: AddressFamily) -> bool {
        self.name == name && self.family() == Some(family)
    }

    /// Overwrites the static addressing of this adapter.
    ///
    /// The stanza is switched to the `static` method and to the family of
    /// the new address.
    pub fn assign_static(&mut self, address: IpAddr, netmask: IpAddr, gateway: IpAddr) {
        self.stanza = Some(Stanza {
            family: AddressFamily::of(address),
            method: ConfigMethod::Static,
        });
        self.address = Some(address);
        self.netmask = Some(netmask);
        self.gateway = Some(gateway);
    }
}

/// Human-readable one-line summary used by the interface listing.
impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(stanza) = &self.stanza {
            write!(f, " ({} {})", stanza.family, stanza.method)?;
        }
        write!(
            f,
            "  address: {}  netmask: {}  gateway: {}",
            Placeholder(self.address),
            Placeholder(self.netmask),
            Placeholder(self.gateway),
        )
    }
}

/// Displays an optional address, or `-` when absent.
struct Placeholder(Option<IpAddr>);

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(address) => write!(f, "{address}"),
            None => f.write_str("-"),
        }
    }
}
