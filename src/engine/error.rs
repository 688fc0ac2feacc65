//! Operation-level errors: refusals the orchestrator issues before any
//! state change. Each variant names the ids involved so callers can
//! surface a specific message.

use thiserror::Error;

use crate::core::{NoteId, WaypointId};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpError {
    #[error("waypoint not found: {0}")]
    WaypointNotFound(WaypointId),

    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("dependency already present: {from} -> {to}")]
    DuplicateDependency { from: WaypointId, to: WaypointId },

    #[error("dependency not present: {from} -> {to}")]
    DependencyNotFound { from: WaypointId, to: WaypointId },

    #[error("note {note} already linked to waypoint {waypoint}")]
    AlreadyLinked { note: NoteId, waypoint: WaypointId },

    #[error("note {note} is not linked to waypoint {waypoint}")]
    NotLinked { note: NoteId, waypoint: WaypointId },

    #[error("branch name taken: {0}")]
    BranchTaken(String),

    #[error("validation failed for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("no wayline workspace found; run `wl init` first")]
    NoActiveContext,
}

impl OpError {
    /// Stable machine-readable code for `--json` consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WaypointNotFound(_)
            | Self::NoteNotFound(_)
            | Self::BranchNotFound(_)
            | Self::DependencyNotFound { .. }
            | Self::NotLinked { .. } => "not_found",
            Self::DuplicateDependency { .. }
            | Self::AlreadyLinked { .. }
            | Self::BranchTaken(_) => "conflict",
            Self::InvalidField { .. } => "invalid_input",
            Self::NoActiveContext => "no_active_context",
        }
    }
}
