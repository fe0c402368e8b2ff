//! Navigation controller
//!
//! Ties resolution and permission checks together. The controller is either
//! idle on a current location or waiting for the caller to accept or decline
//! an escalation offer. A failed navigation never changes the current location.

use log::{info, warn};

use crate::error::NavigateError;
use crate::navigate::resolver::{Location, resolve};
use crate::navigate::results::{NavigationOutcome, NavigationState};
use crate::permissions::{Access, Classification, ExitReport, PermissionGate};

#[derive(Debug)]
pub struct NavigationController {
    gate: PermissionGate,
    opener: String,
    current: Location,
    state: NavigationState,
}

impl NavigationController {
    /// Starts at `start`, which must resolve and be readable.
    pub fn new(
        gate: PermissionGate,
        opener: impl Into<String>,
        start: &str,
    ) -> Result<Self, NavigateError> {
        let current = resolve(start, gate.probe())?;
        if gate.classify(current.path(), Access::Read) != Classification::Granted {
            return Err(NavigateError::PermissionDenied(current.path().to_path_buf()));
        }

        Ok(Self {
            gate,
            opener: opener.into(),
            current,
            state: NavigationState::Idle,
        })
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Attempts to move to `raw`.
    ///
    /// A pending escalation offer is dropped first, as if declined.
    pub fn navigate(&mut self, raw: &str) -> Result<NavigationOutcome, NavigateError> {
        if let NavigationState::AwaitingEscalationDecision { pending } = &self.state {
            info!("Dropping escalation offer for {}", pending.path().display());
            self.state = NavigationState::Idle;
        }

        let location = resolve(raw, self.gate.probe()).inspect_err(|e| warn!("{}", e))?;

        match self.gate.classify(location.path(), Access::Read) {
            Classification::Granted => {
                info!("Navigated to {}", location.path().display());
                self.current = location.clone();
                Ok(NavigationOutcome::Entered(location))
            }
            Classification::DeniedEscalatable => {
                info!("Read denied on {}, offering escalation", location.path().display());
                self.state = NavigationState::AwaitingEscalationDecision {
                    pending: location.clone(),
                };
                Ok(NavigationOutcome::EscalationOffered(location))
            }
            Classification::DeniedTerminal => {
                warn!("Read denied on {}", location.path().display());
                Err(NavigateError::PermissionDenied(location.path().to_path_buf()))
            }
        }
    }

    /// Opens the pending location through the bridge.
    ///
    /// On failure the offer stays pending so the caller may retry. The current
    /// location is unchanged either way: the elevated helper runs out of process.
    pub fn accept(&mut self) -> Result<ExitReport, NavigateError> {
        let NavigationState::AwaitingEscalationDecision { pending } = &self.state else {
            return Err(NavigateError::NoPendingEscalation);
        };

        let report = self.run_opener(pending)?;
        self.state = NavigationState::Idle;
        Ok(report)
    }

    pub fn decline(&mut self) -> Result<(), NavigateError> {
        if self.state == NavigationState::Idle {
            return Err(NavigateError::NoPendingEscalation);
        }
        self.state = NavigationState::Idle;
        Ok(())
    }

    /// Whether offering "open as root" for `location` makes sense.
    pub fn can_open_elevated(&self, location: &Location) -> bool {
        self.gate.classify(location.path(), Access::Write) == Classification::DeniedEscalatable
    }

    pub fn open_elevated(&self, location: &Location) -> Result<ExitReport, NavigateError> {
        self.run_opener(location)
    }

    fn run_opener(&self, location: &Location) -> Result<ExitReport, NavigateError> {
        let argv = vec![
            self.opener.clone(),
            location.path().to_string_lossy().into_owned(),
        ];
        Ok(self.gate.run_privileged(&argv)?)
    }
}
