//! Service manager abstraction.
//!
//! Restarting the networking service is the last step of an interface
//! update. The [`ServiceManager`] trait keeps the external process out of
//! the update logic so it can be exercised without root.

mod systemctl;

#[cfg(test)]
mod systemctl_tests;

pub use systemctl::SystemctlManager;

use std::io;

use thiserror::Error;

/// Errors from restarting a service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The manager program could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The manager ran but reported failure.
    #[error("{}", failure_message(*code, stderr))]
    Failed {
        /// Exit code, absent if killed by a signal
        code: Option<i32>,
        /// Trimmed standard error output
        stderr: String,
    },
}

fn failure_message(code: Option<i32>, stderr: &str) -> String {
    let status = code.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit code {code}"),
    );
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

/// Restarts system services.
///
/// # Testing
///
/// Use [`mock::MockServiceManager`] to record restarts without spawning
/// anything.
pub trait ServiceManager: Send + Sync {
    /// Restarts the named service and waits for the manager to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Spawn`] if the manager cannot be started and
    /// [`ServiceError::Failed`] if it exits unsuccessfully.
    fn restart(
        &self,
        service: &str,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>> + Send;
}
