//! Interface naming policy.
//!
//! Only interfaces following the on-board naming convention may be
//! reconfigured. The accepted prefixes are configuration data; see
//! [`NamePolicy::onboard`] for the built-in list.

/// Allow-list of interface name prefixes.
///
/// A name is accepted if it starts with any of the prefixes.
///
/// # Examples
///
/// ```
/// use netconsole::network::NamePolicy;
///
/// let policy = NamePolicy::onboard();
///
/// assert!(policy.accepts("enp1s0"));
/// assert!(policy.accepts("enp3s0f1"));
/// assert!(!policy.accepts("eth0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePolicy {
    prefixes: Vec<String>,
}

impl NamePolicy {
    /// Built-in prefixes for the six on-board ports.
    pub const ONBOARD_PREFIXES: [&'static str; 6] =
        ["enp1s0", "enp2s0", "enp3s0", "enp4s0", "enp5s0", "enp6s0"];

    /// Creates a policy accepting the given prefixes.
    #[must_use]
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the policy for the built-in on-board prefixes.
    #[must_use]
    pub fn onboard() -> Self {
        Self::new(Self::ONBOARD_PREFIXES)
    }

    /// Returns true if `name` starts with an allowed prefix.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        self.prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Returns the configured prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self::onboard()
    }
}
