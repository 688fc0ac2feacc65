#![forbid(unsafe_code)]

//! Waypoint route tracker: a dependency-graph engine for structured
//! exploration sessions. Waypoints are units of planned work connected by
//! dependency edges, partitioned into branches; readiness is always
//! derived from the live graph.

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod notes;
mod paths;
pub mod store;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    Branch, BranchName, DerivedStatus, ExplicitStatus, NoteId, Patch, Status, WallClock, Waypoint,
    WaypointId, WaypointPatch, compute_statuses, topo_sort, would_cycle,
};
pub use crate::engine::{Engine, FileEngine, MergeOutcome, Session, WaypointDraft};
pub use crate::events::{ChannelSink, Event, EventSink, NullSink, TracingSink};
pub use crate::notes::{JsonNotes, NoteDirectory, NoteRecord};
pub use crate::store::{JsonStore, Storage};
