//! Crate-level convenience error.
//!
//! Not a "god error": a thin wrapper over the canonical capability errors,
//! with a stable code string for machine-readable output.

use thiserror::Error;

use crate::core::CoreError;
use crate::engine::OpError;
use crate::store::StoreError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Op(#[from] OpError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to render output: {0}")]
    Output(serde_json::Error),
}

impl Error {
    /// Stable machine-readable code: `not_found`, `invalid_input`,
    /// `conflict`, `invalid_transition`, `would_cycle`,
    /// `no_active_context`, or `persistence`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core(e) => e.code(),
            Self::Op(e) => e.code(),
            Self::Store(e) => e.code(),
            Self::Output(_) => "persistence",
        }
    }
}

impl From<crate::core::EmptyTitle> for Error {
    fn from(e: crate::core::EmptyTitle) -> Self {
        Self::Core(e.into())
    }
}

impl From<crate::core::SelfDependency> for Error {
    fn from(e: crate::core::SelfDependency) -> Self {
        Self::Core(e.into())
    }
}

impl From<crate::core::WouldCycle> for Error {
    fn from(e: crate::core::WouldCycle) -> Self {
        Self::Core(e.into())
    }
}

impl From<crate::core::InvalidId> for Error {
    fn from(e: crate::core::InvalidId) -> Self {
        Self::Core(e.into())
    }
}
