//! Permission checks and privilege escalation
//!
//! Decides whether the process may touch a path and, when it may not,
//! whether a privileged helper can do it instead.

pub mod bridge;
pub mod gate;
pub mod probe;

pub use bridge::{CommandBridge, EscalationBridge, ExitReport};
pub use gate::{Classification, EscalationPolicy, PermissionGate};
pub use probe::{Access, AccessProbe, HostProbe};
