//! Explicit status changes are gated by a fixed transition table.
//!
//! Derived targets (ready) are legal from some explicit states: they drop
//! the explicit override and hand the waypoint back to the status engine.

use super::domain::{DerivedStatus, ExplicitStatus, Status};
use super::error::InvalidTransition;

/// Whether `from -> to` is a legal explicit status change.
pub fn allowed(from: Status, to: Status) -> bool {
    use DerivedStatus::*;
    use ExplicitStatus::*;
    use Status::{Derived, Explicit};

    match (from, to) {
        (Derived(Blocked), Explicit(Active) | Explicit(Abandoned)) => true,
        (Derived(Ready), Explicit(Active) | Explicit(Done) | Explicit(Abandoned)) => true,
        (Explicit(Active), Explicit(Done) | Explicit(Abandoned) | Derived(Ready)) => true,
        (Explicit(Done), Explicit(Active) | Derived(Ready)) => true,
        (Explicit(Abandoned), Derived(Ready)) => true,
        _ => false,
    }
}

/// Gate an explicit status change, naming both endpoints on refusal.
pub fn check(from: Status, to: Status) -> Result<(), InvalidTransition> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(InvalidTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}

/// Parse a requested status by name, against the current status.
///
/// Unknown names are refused as transitions, not parse errors: string-driven
/// callers (CLI, proposal acceptance) get a refusal naming the current
/// status and the raw request.
pub fn parse_target(current: Status, raw: &str) -> Result<Status, InvalidTransition> {
    Status::parse(raw).ok_or_else(|| InvalidTransition {
        from: current.as_str().to_string(),
        to: raw.to_string(),
    })
}
