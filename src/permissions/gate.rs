//! Permission gate
//!
//! Classifies an access request as granted, escalatable or terminally denied,
//! and forwards escalated commands to the configured bridge.

use crate::error::PermissionError;
use crate::permissions::bridge::{CommandBridge, EscalationBridge, ExitReport};
use crate::permissions::probe::{Access, AccessProbe, HostProbe};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Result of checking one path against one access kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Granted,
    DeniedEscalatable,
    DeniedTerminal,
}

/// Whether a failed delete is retried through the bridge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscalationPolicy {
    #[default]
    Never,
    RetryElevated,
}

pub struct PermissionGate {
    probe: Box<dyn AccessProbe>,
    bridge: Option<Box<dyn EscalationBridge>>,
}

impl PermissionGate {
    pub fn new(probe: Box<dyn AccessProbe>, bridge: Option<Box<dyn EscalationBridge>>) -> Self {
        Self { probe, bridge }
    }

    /// Gate backed by the kernel's access checks and `helper`, if it can be found.
    pub fn host(helper: &str) -> Self {
        let bridge = CommandBridge::locate(helper)
            .map(|b| Box::new(b) as Box<dyn EscalationBridge>);
        if bridge.is_none() {
            debug!("Escalation helper {:?} unavailable", helper);
        }
        Self::new(Box::new(HostProbe), bridge)
    }

    pub fn probe(&self) -> &dyn AccessProbe {
        self.probe.as_ref()
    }

    pub fn has_bridge(&self) -> bool {
        self.bridge.is_some()
    }

    pub fn classify(&self, path: &Path, access: Access) -> Classification {
        if self.probe.check(path, access) {
            Classification::Granted
        } else if self.bridge.is_some() {
            Classification::DeniedEscalatable
        } else {
            Classification::DeniedTerminal
        }
    }

    pub fn run_privileged(&self, args: &[String]) -> Result<ExitReport, PermissionError> {
        match &self.bridge {
            Some(bridge) => bridge.run_privileged(args),
            None => Err(PermissionError::BridgeUnavailable),
        }
    }
}

impl std::fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGate")
            .field("bridge", &self.bridge.as_ref().map(|b| b.program().to_string()))
            .finish()
    }
}
