//! The Waypoint: a unit of planned work, a node in the dependency graph.
//!
//! Branch membership is a field on the waypoint, not a foreign-key table.
//! Branch records only exist to carry reasoning for registered branches.

use serde::{Deserialize, Serialize};

use super::domain::Status;
use super::identity::{BranchName, NoteId, WaypointId};
use super::time::WallClock;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    /// Ordered, duplicate-free. May transiently contain dangling ids after
    /// an external edit; the status engine treats those as never-done.
    #[serde(default)]
    pub depends_on: Vec<WaypointId>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub linked_note_ids: Vec<NoteId>,
    pub branch: BranchName,
    pub created_at: WallClock,
    pub updated_at: WallClock,
}

impl Waypoint {
    pub fn has_dependency(&self, id: &WaypointId) -> bool {
        self.depends_on.contains(id)
    }

    pub fn touch(&mut self, now: WallClock) {
        self.updated_at = now;
    }
}

/// Registered branch record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: BranchName,
    #[serde(default)]
    pub reasoning: String,
    pub created_at: WallClock,
}

/// Field-level patch operation.
///
/// The clean solution to the "Option<Option<T>>" problem:
/// - `Keep` - don't change the field
/// - `Clear` - reset the field to its empty value
/// - `Set(T)` - set the field to a new value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

// Custom serde for Patch: absent = Keep, null = Clear, value = Set
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Patch::Keep | Patch::Clear => serializer.serialize_none(),
            Patch::Set(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let opt: Option<T> = Option::deserialize(deserializer)?;
        match opt {
            None => Ok(Patch::Clear),
            Some(v) => Ok(Patch::Set(v)),
        }
    }
}

/// Partial update for the mutable waypoint fields.
///
/// Enumerates exactly what a caller may change; unrecognized fields are
/// unrepresentable. Status, dependencies, and note links have their own
/// operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaypointPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub reasoning: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub branch: Patch<BranchName>,
}

impl WaypointPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_keep()
            && self.description.is_keep()
            && self.reasoning.is_keep()
            && self.branch.is_keep()
    }
}
