//! Privileged-execution bridge
//!
//! Runs a command through an out-of-process elevation helper (`pkexec`,
//! `sudo`, ...). The helper's own prompts are never interpreted here.

use crate::error::PermissionError;
use log::{error, info};
use std::env;
use std::path::Path;
use std::process::Command;

/// Outcome of a successful privileged run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitReport {
    pub code: i32,
    pub output: String,
}

/// Something that can run an argument vector with elevated rights.
pub trait EscalationBridge {
    /// Name of the helper, for diagnostics.
    fn program(&self) -> &str;

    /// Runs `args` (program name first) elevated, blocking until the helper exits.
    fn run_privileged(&self, args: &[String]) -> Result<ExitReport, PermissionError>;
}

/// Bridge backed by a helper executable on the host.
#[derive(Debug, Clone)]
pub struct CommandBridge {
    helper: String,
}

impl CommandBridge {
    pub fn new(helper: impl Into<String>) -> Self {
        Self {
            helper: helper.into(),
        }
    }

    /// Returns a bridge only if `helper` names an executable that exists,
    /// either as a path or somewhere on `PATH`.
    pub fn locate(helper: &str) -> Option<Self> {
        if helper.trim().is_empty() {
            return None;
        }

        if helper.contains('/') {
            return Path::new(helper).is_file().then(|| Self::new(helper));
        }

        let search = env::var_os("PATH")?;
        env::split_paths(&search)
            .any(|dir| dir.join(helper).is_file())
            .then(|| Self::new(helper))
    }
}

impl EscalationBridge for CommandBridge {
    fn program(&self) -> &str {
        &self.helper
    }

    fn run_privileged(&self, args: &[String]) -> Result<ExitReport, PermissionError> {
        if args.is_empty() {
            return Err(PermissionError::EmptyCommand);
        }

        info!("Escalating via {}: {:?}", self.helper, args);

        let output = Command::new(&self.helper).args(args).output().map_err(|e| {
            error!("Failed to spawn {}: {}", self.helper, e);
            PermissionError::EscalationFailed {
                program: self.helper.clone(),
                message: e.to_string(),
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            return Ok(ExitReport {
                code: output.status.code().unwrap_or(0),
                output: stdout,
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr
        };

        error!("{} failed for {:?}: {}", self.helper, args, message);
        Err(PermissionError::EscalationFailed {
            program: self.helper.clone(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locate_rejects_blank_and_missing_helpers() {
        assert!(CommandBridge::locate("").is_none());
        assert!(CommandBridge::locate("   ").is_none());
        assert!(CommandBridge::locate("/definitely/not/a/helper").is_none());
        assert!(CommandBridge::locate("astrum-no-such-helper-binary").is_none());
    }

    #[test]
    fn test_locate_finds_helper_on_path() {
        assert!(CommandBridge::locate("sh").is_some());
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let bridge = CommandBridge::new("env");
        assert_eq!(
            bridge.run_privileged(&[]),
            Err(PermissionError::EmptyCommand)
        );
    }

    #[test]
    fn test_pass_through_success_and_failure() {
        // `env` runs its arguments as a command, standing in for a helper.
        let bridge = CommandBridge::new("env");
        let report = bridge.run_privileged(&argv(&["echo", "elevated"])).unwrap();
        assert_eq!(report.code, 0);
        assert_eq!(report.output, "elevated");

        let err = bridge
            .run_privileged(&argv(&["sh", "-c", "echo refused >&2; exit 126"]))
            .unwrap_err();
        assert_eq!(
            err,
            PermissionError::EscalationFailed {
                program: "env".into(),
                message: "refused".into(),
            }
        );
    }

    #[test]
    fn test_spawn_error_surfaces_as_escalation_failure() {
        let bridge = CommandBridge::new("/definitely/not/a/helper");
        let err = bridge.run_privileged(&argv(&["true"])).unwrap_err();
        assert!(matches!(err, PermissionError::EscalationFailed { .. }));
    }
}
