//! Core capability errors (parsing, validation, graph invariants).
//!
//! These are bounded and stable: core errors represent domain/refusal
//! states, not library implementation details.

use thiserror::Error;

/// Invalid identifier.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("waypoint id `{raw}` is invalid: {reason}")]
    Waypoint { raw: String, reason: String },
    #[error("note id `{raw}` is invalid: {reason}")]
    Note { raw: String, reason: String },
    #[error("branch name `{raw}` is invalid: {reason}")]
    Branch { raw: String, reason: String },
}

/// Waypoint titles must be non-empty.
#[derive(Debug, Error, Clone)]
#[error("waypoint title must not be empty")]
pub struct EmptyTitle;

/// A waypoint may not depend on itself.
#[derive(Debug, Error, Clone)]
#[error("waypoint {id} cannot depend on itself")]
pub struct SelfDependency {
    pub id: String,
}

/// Status change outside the legal transition table.
#[derive(Debug, Error, Clone)]
#[error("invalid transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: String,
    pub to: String,
}

/// The candidate edge would make the dependency graph cyclic.
#[derive(Debug, Error, Clone)]
#[error("dependency {from} -> {to} would create a cycle")]
pub struct WouldCycle {
    pub from: String,
    pub to: String,
}

/// Canonical error enum for the core capability.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    EmptyTitle(#[from] EmptyTitle),
    #[error(transparent)]
    SelfDependency(#[from] SelfDependency),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    WouldCycle(#[from] WouldCycle),
}

impl CoreError {
    /// Stable machine-readable code for `--json` consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) | Self::EmptyTitle(_) | Self::SelfDependency(_) => "invalid_input",
            Self::InvalidTransition(_) => "invalid_transition",
            Self::WouldCycle(_) => "would_cycle",
        }
    }
}
