//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::network::NamePolicy;
use crate::probe::ProbeSettings;

/// Default location of the interfaces file.
pub const INTERFACES_PATH: &str = "/etc/network/interfaces";

/// Default service manager program.
pub const SERVICE_MANAGER: &str = "systemctl";

/// Default service restarted after an update.
pub const SERVICE_NAME: &str = "networking";

/// Default number of echo requests per probe.
pub const PROBE_COUNT: u16 = ProbeSettings::DEFAULT_COUNT;

/// Default probe deadline in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Default spacing between echo requests in milliseconds.
pub const PROBE_INTERVAL_MS: u64 = 1000;

/// Raw sockets are requested unless configured otherwise.
pub const PROBE_PRIVILEGED: bool = true;

/// Default health check endpoint.
pub const HEALTH_URL: &str = "https://api.threathunting.com.cn/";

/// Default interface name prefixes that may be reconfigured.
#[must_use]
pub fn allowed_prefixes() -> Vec<String> {
    NamePolicy::ONBOARD_PREFIXES
        .iter()
        .map(ToString::to_string)
        .collect()
}
