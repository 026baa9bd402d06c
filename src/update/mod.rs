//! Interface address updates.
//!
//! An update is validated step by step as the operator answers each prompt
//! ([`Updater::check_name`], [`parse_field`], [`check_private`]) and then
//! applied in one go ([`Updater::apply`]): load the store, rewrite the
//! matching adapter, save, restart the networking service.

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::network::{AddressFamily, NamePolicy, is_private, parse_address};
use crate::service::{ServiceError, ServiceManager};
use crate::store::{Interfaces, InterfacesStore, StoreError};

/// The address-shaped inputs of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The new interface address.
    Address,
    /// The new netmask.
    Netmask,
    /// The new default gateway.
    Gateway,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Address => "address",
            Self::Netmask => "netmask",
            Self::Gateway => "gateway",
        })
    }
}

/// Reasons an update is refused or fails.
///
/// Every variant except [`Restart`](Self::Restart) leaves the interfaces
/// file untouched.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The interface name is not on the allow-list.
    #[error("Interface '{name}' is not allowed; expected a name starting with one of: {allowed}")]
    InvalidName {
        /// Name as entered
        name: String,
        /// Accepted prefixes, comma separated
        allowed: String,
    },

    /// An address-shaped input did not parse.
    #[error("Invalid {field} '{text}': expected an IPv4 or IPv6 address")]
    InvalidFormat {
        /// Which input
        field: Field,
        /// Text as entered
        text: String,
    },

    /// The new address is publicly routable.
    #[error("{address} is not a private address; refusing to assign it")]
    NotPrivate {
        /// The rejected address
        address: IpAddr,
    },

    /// The store has no stanza for this name and family.
    #[error("No {family} stanza for interface '{name}' in the interfaces file")]
    UnknownAdapter {
        /// Interface name
        name: String,
        /// Family of the new address
        family: AddressFamily,
    },

    /// The interfaces file could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The file was rewritten but the service restart failed.
    #[error("Configuration written, but restarting {service} failed: {source}")]
    Restart {
        /// Service that was restarted
        service: String,
        /// What the service manager reported
        #[source]
        source: ServiceError,
    },
}

impl UpdateError {
    /// Returns true for refusals that are warnings rather than failures.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::NotPrivate { .. })
    }
}

/// Parses one address-shaped input.
///
/// # Errors
///
/// Returns [`UpdateError::InvalidFormat`] if `text` is not an address.
pub fn parse_field(field: Field, text: &str) -> Result<IpAddr, UpdateError> {
    parse_address(text).ok_or_else(|| UpdateError::InvalidFormat {
        field,
        text: text.trim().to_string(),
    })
}

/// Rejects publicly routable addresses.
///
/// # Errors
///
/// Returns [`UpdateError::NotPrivate`] if `address` is not private.
pub fn check_private(address: IpAddr) -> Result<IpAddr, UpdateError> {
    if is_private(address) {
        Ok(address)
    } else {
        Err(UpdateError::NotPrivate { address })
    }
}

/// A fully validated update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Interface to update.
    pub name: String,
    /// New address, private.
    pub address: IpAddr,
    /// New netmask.
    pub netmask: IpAddr,
    /// New default gateway.
    pub gateway: IpAddr,
}

/// Applies updates to the interfaces file and restarts networking.
///
/// # Type Parameters
///
/// - `St`: The interfaces store
/// - `Sv`: The service manager
#[derive(Debug)]
pub struct Updater<St, Sv> {
    store: St,
    service: Sv,
    path: PathBuf,
    service_name: String,
    policy: NamePolicy,
}

impl<St, Sv> Updater<St, Sv> {
    /// Service restarted when none is configured.
    pub const DEFAULT_SERVICE: &'static str = "networking";

    /// Creates an updater for the interfaces file at `path`.
    ///
    /// Uses the on-board naming policy and restarts `networking`.
    #[must_use]
    pub fn new(store: St, service: Sv, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            service,
            path: path.into(),
            service_name: Self::DEFAULT_SERVICE.to_string(),
            policy: NamePolicy::onboard(),
        }
    }

    /// Sets the service restarted after a successful write.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Sets the interface naming policy.
    #[must_use]
    pub fn with_policy(mut self, policy: NamePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the interfaces file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the name of the restarted service.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &St {
        &self.store
    }

    /// Returns the service manager.
    #[must_use]
    pub const fn service(&self) -> &Sv {
        &self.service
    }

    /// Checks an interface name against the naming policy.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::InvalidName`] if no allowed prefix matches.
    pub fn check_name(&self, name: &str) -> Result<(), UpdateError> {
        if self.policy.accepts(name) {
            Ok(())
        } else {
            Err(UpdateError::InvalidName {
                name: name.to_string(),
                allowed: self.policy.prefixes().join(", "),
            })
        }
    }
}

impl<St: InterfacesStore, Sv: ServiceManager> Updater<St, Sv> {
    /// Loads the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file or a fragment cannot be read.
    pub fn load(&self) -> Result<Interfaces, StoreError> {
        self.store.load(&self.path)
    }

    /// Writes the update and restarts the networking service.
    ///
    /// The adapter is matched by name and by the family of the new address.
    /// Its method becomes `static`. A failed restart does not undo the write.
    ///
    /// # Errors
    ///
    /// - [`UpdateError::Store`] if loading or saving fails (nothing restarted)
    /// - [`UpdateError::UnknownAdapter`] if no stanza matches (nothing written)
    /// - [`UpdateError::Restart`] if the service manager fails after the write
    pub async fn apply(&self, request: &UpdateRequest) -> Result<(), UpdateError> {
        let mut interfaces = self.load()?;
        let family = AddressFamily::of(request.address);

        let adapter = interfaces
            .adapter_mut(&request.name, family)
            .ok_or_else(|| UpdateError::UnknownAdapter {
                name: request.name.clone(),
                family,
            })?;
        adapter.assign_static(request.address, request.netmask, request.gateway);

        self.store.save(&interfaces, &self.path)?;
        tracing::info!(
            "Set {} {} to {} netmask {} gateway {}",
            request.name,
            family,
            request.address,
            request.netmask,
            request.gateway
        );

        self.service
            .restart(&self.service_name)
            .await
            .map_err(|source| UpdateError::Restart {
                service: self.service_name.clone(),
                source,
            })
    }
}
