//! Mutation notifications.
//!
//! Fire-and-forget: a sink that cannot accept an event drops it and the
//! engine never notices. Hooks, panels, and activity logs subscribe here;
//! none of them may stall or fail a mutation.

use crossbeam::channel::{Receiver, Sender, TrySendError, unbounded};
use serde::Serialize;

use crate::core::{BranchName, NoteId, WaypointId};

/// One event per mutating operation, emitted after persistence succeeds.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    WaypointCreated {
        id: WaypointId,
    },
    WaypointUpdated {
        id: WaypointId,
    },
    StatusChanged {
        id: WaypointId,
        from: String,
        to: String,
    },
    WaypointDeleted {
        id: WaypointId,
    },
    DependencyAdded {
        from: WaypointId,
        to: WaypointId,
    },
    DependencyRemoved {
        from: WaypointId,
        to: WaypointId,
    },
    NoteLinked {
        note: NoteId,
        waypoint: WaypointId,
    },
    NoteUnlinked {
        note: NoteId,
        waypoint: WaypointId,
    },
    BranchCreated {
        name: BranchName,
    },
    BranchMerged {
        source: BranchName,
        target: BranchName,
        copied: usize,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WaypointCreated { .. } => "waypoint_created",
            Self::WaypointUpdated { .. } => "waypoint_updated",
            Self::StatusChanged { .. } => "status_changed",
            Self::WaypointDeleted { .. } => "waypoint_deleted",
            Self::DependencyAdded { .. } => "dependency_added",
            Self::DependencyRemoved { .. } => "dependency_removed",
            Self::NoteLinked { .. } => "note_linked",
            Self::NoteUnlinked { .. } => "note_unlinked",
            Self::BranchCreated { .. } => "branch_created",
            Self::BranchMerged { .. } => "branch_merged",
        }
    }
}

/// Notification sink. `emit` must not fail and must not block.
pub trait EventSink {
    fn emit(&self, event: &Event);
}

/// Drops everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &Event) {}
}

/// Logs each event through tracing. The default sink for the CLI.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &Event) {
        tracing::info!(event = event.name(), "{:?}", event);
    }
}

/// Forwards events over a crossbeam channel for an in-process subscriber.
///
/// A full or disconnected channel drops the event; slow subscribers cannot
/// hold up a mutation.
pub struct ChannelSink {
    tx: Sender<Event>,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<Event>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: &Event) {
        match self.tx.try_send(event.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                tracing::debug!(event = event.name(), "event subscriber gone; dropping");
            }
        }
    }
}
