//! Result types for navigation

use crate::navigate::resolver::Location;

/// Where the controller is in the navigation flow.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationState {
    Idle,
    /// A navigation was refused but can be retried through the bridge.
    AwaitingEscalationDecision { pending: Location },
}

/// Successful result of `navigate`.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    Entered(Location),
    EscalationOffered(Location),
}
