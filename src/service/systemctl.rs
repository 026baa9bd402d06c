//! Service restarts through an external manager program.

use tokio::process::Command;

use super::{ServiceError, ServiceManager};

/// Restarts services by running `<program> restart <service>`.
///
/// Standard output and error are captured rather than inherited so the
/// console output stays intact; stderr is attached to the error on failure.
///
/// # Example
///
/// ```no_run
/// use netconsole::service::{ServiceManager, SystemctlManager};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// SystemctlManager::new().restart("networking").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemctlManager {
    program: String,
}

impl SystemctlManager {
    /// Program used when none is configured.
    pub const DEFAULT_PROGRAM: &'static str = "systemctl";

    /// Creates a manager that runs `systemctl`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(Self::DEFAULT_PROGRAM)
    }

    /// Creates a manager that runs the given program.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the program this manager runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemctlManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceManager for SystemctlManager {
    async fn restart(&self, service: &str) -> Result<(), ServiceError> {
        tracing::debug!("Running {} restart {}", self.program, service);

        let output = Command::new(&self.program)
            .arg("restart")
            .arg(service)
            .output()
            .await
            .map_err(|e| ServiceError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!(
            "{} restart {} exited with {}",
            self.program,
            service,
            output.status
        );
        Err(ServiceError::Failed {
            code: output.status.code(),
            stderr,
        })
    }
}
