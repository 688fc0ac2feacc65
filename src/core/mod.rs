//! Domain core: identities, statuses, the waypoint model, and the pure
//! graph algorithms the engine is built on.

pub mod domain;
pub mod error;
pub mod graph;
pub mod identity;
pub mod time;
pub mod transition;
pub mod waypoint;

pub use domain::{DerivedStatus, ExplicitStatus, Status};
pub use error::{CoreError, EmptyTitle, InvalidId, InvalidTransition, SelfDependency, WouldCycle};
pub use graph::{compute_statuses, topo_sort, would_cycle};
pub use identity::{BranchName, NoteId, WaypointId};
pub use time::WallClock;
pub use waypoint::{Branch, Patch, Waypoint, WaypointPatch};
