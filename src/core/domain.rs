//! Waypoint status as a sum type.
//!
//! The explicit/derived split is structural: explicit statuses are stored
//! and authoritative, derived statuses are recomputed from the dependency
//! graph before every read. Impossible to confuse one for the other.

use serde::{Deserialize, Serialize};

/// Statuses set directly by a caller and stored as authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplicitStatus {
    Active,
    Done,
    Abandoned,
}

/// Statuses computed from graph state, never the source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedStatus {
    Blocked,
    Ready,
}

/// Waypoint status.
///
/// Serialized as the flat snake_case name ("blocked", "active", ...) so
/// persisted records read naturally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Status {
    Derived(DerivedStatus),
    Explicit(ExplicitStatus),
}

impl Status {
    pub const BLOCKED: Status = Status::Derived(DerivedStatus::Blocked);
    pub const READY: Status = Status::Derived(DerivedStatus::Ready);
    pub const ACTIVE: Status = Status::Explicit(ExplicitStatus::Active);
    pub const DONE: Status = Status::Explicit(ExplicitStatus::Done);
    pub const ABANDONED: Status = Status::Explicit(ExplicitStatus::Abandoned);

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Derived(DerivedStatus::Blocked) => "blocked",
            Self::Derived(DerivedStatus::Ready) => "ready",
            Self::Explicit(ExplicitStatus::Active) => "active",
            Self::Explicit(ExplicitStatus::Done) => "done",
            Self::Explicit(ExplicitStatus::Abandoned) => "abandoned",
        }
    }

    /// Parse a status name. `None` for anything that is not a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blocked" => Some(Self::BLOCKED),
            "ready" => Some(Self::READY),
            "active" => Some(Self::ACTIVE),
            "done" => Some(Self::DONE),
            "abandoned" => Some(Self::ABANDONED),
            _ => None,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Explicit(ExplicitStatus::Done))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Derived(DerivedStatus::Ready))
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Derived(DerivedStatus::Blocked))
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::READY
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
