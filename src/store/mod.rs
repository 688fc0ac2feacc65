//! Whole-collection persistence.
//!
//! The engine treats the waypoint collection as the unit of
//! read-modify-write: every mutation reads everything, changes the
//! in-memory copy, and writes everything back atomically. Missing data
//! reads as empty; there is no partial update.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{Branch, Waypoint};

mod json;

pub use json::JsonStore;

/// Persistence failure. Everything here maps to the `persistence` code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt collection at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        "persistence"
    }
}

/// Storage collaborator: whole-collection reads and atomic writes.
pub trait Storage {
    fn read_waypoints(&self) -> Result<Vec<Waypoint>, StoreError>;
    fn write_waypoints(&mut self, waypoints: &[Waypoint]) -> Result<(), StoreError>;
    fn read_branches(&self) -> Result<Vec<Branch>, StoreError>;
    fn write_branches(&mut self, branches: &[Branch]) -> Result<(), StoreError>;
}
