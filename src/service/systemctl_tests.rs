//! Tests for the external-program service manager.
//!
//! Standard Unix utilities stand in for `systemctl`: they accept (and ignore
//! or reject) the `restart <service>` arguments.

use super::{ServiceError, ServiceManager, SystemctlManager};

#[test]
fn default_program_is_systemctl() {
    assert_eq!(SystemctlManager::default().program(), "systemctl");
}

#[test]
fn failure_display_includes_code_and_stderr() {
    let error = ServiceError::Failed {
        code: Some(5),
        stderr: "Unit networking.service not found.".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "exit code 5: Unit networking.service not found."
    );
}

#[test]
fn failure_display_without_code_mentions_signal() {
    let error = ServiceError::Failed {
        code: None,
        stderr: String::new(),
    };
    assert_eq!(error.to_string(), "terminated by signal");
}

#[cfg(unix)]
mod process {
    use super::*;

    #[tokio::test]
    async fn zero_exit_is_success() {
        let manager = SystemctlManager::with_program("true");
        assert!(manager.restart("networking").await.is_ok());
    }

    #[tokio::test]
    async fn non_zero_exit_is_failure_with_code() {
        let manager = SystemctlManager::with_program("false");

        let error = manager.restart("networking").await.unwrap_err();

        assert!(matches!(error, ServiceError::Failed { code: Some(1), .. }));
    }

    #[tokio::test]
    async fn stderr_is_captured_and_trimmed() {
        // `sh restart networking` fails to open a script named "restart"
        let manager = SystemctlManager::with_program("sh");

        let error = manager.restart("networking").await.unwrap_err();

        let ServiceError::Failed { code, stderr } = error else {
            panic!("expected Failed, got {error:?}");
        };
        assert!(code.is_some_and(|code| code != 0));
        assert!(!stderr.is_empty());
        assert_eq!(stderr, stderr.trim());
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let manager = SystemctlManager::with_program("/nonexistent/netconsole-systemctl");

        let error = manager.restart("networking").await.unwrap_err();

        assert!(matches!(error, ServiceError::Spawn { .. }));
        assert!(error.to_string().contains("/nonexistent/netconsole-systemctl"));
    }
}
