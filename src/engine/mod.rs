//! The orchestrator.
//!
//! Every public operation runs synchronously to completion over the whole
//! waypoint collection: read everything, validate entirely, apply one
//! change, recompute derived statuses, persist atomically, emit one
//! notification. A refused operation leaves no trace.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::core::graph::{compute_statuses, topo_sort, would_cycle};
use crate::core::{
    Branch, BranchName, EmptyTitle, NoteId, Patch, SelfDependency, Status, Waypoint, WaypointId,
    WaypointPatch, WouldCycle, transition,
};
use crate::events::{Event, EventSink, TracingSink};
use crate::notes::{JsonNotes, NoteDirectory};
use crate::paths;
use crate::store::{JsonStore, Storage};
use crate::{Error, Result};

mod clock;
mod error;

pub use clock::Clock;
pub use error::OpError;

/// Session-scoped context: which branch the caller is looking at.
///
/// In-memory only, explicitly not part of the persisted-consistency story.
/// Passed into every branch-sensitive call instead of living in module
/// state.
#[derive(Clone, Debug)]
pub struct Session {
    branch: BranchName,
}

impl Session {
    pub fn new(branch: BranchName) -> Self {
        Self { branch }
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }
}

/// Everything needed to create a waypoint. Never created implicitly.
#[derive(Clone, Debug, Default)]
pub struct WaypointDraft {
    pub title: String,
    pub description: String,
    pub reasoning: String,
    pub depends_on: Vec<WaypointId>,
    /// Defaults to the session branch.
    pub branch: Option<BranchName>,
}

/// Result of a branch merge.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MergeOutcome {
    /// Fresh ids of the copies, in source storage order.
    pub copied: Vec<WaypointId>,
    pub warning: Option<String>,
}

pub struct Engine<S: Storage, N: NoteDirectory, E: EventSink> {
    store: S,
    notes: N,
    events: E,
    clock: Clock,
    default_branch: BranchName,
    id_length: usize,
}

/// The engine wired to the on-disk workspace: JSON collections, JSON
/// note directory, tracing notifications.
pub type FileEngine = Engine<JsonStore, JsonNotes, TracingSink>;

impl FileEngine {
    /// Open the workspace discovered from the current directory.
    pub fn open() -> Result<(Self, Session)> {
        let root = paths::discover().ok_or(OpError::NoActiveContext)?;
        Ok(Self::at(root))
    }

    /// Open a workspace rooted at an explicit data dir.
    pub fn at(root: PathBuf) -> (Self, Session) {
        let cfg = config::load(&root);
        let notes = JsonNotes::new(root.join("notes.json"));
        let store = JsonStore::new(root);
        let engine = Engine::new(store, notes, TracingSink, &cfg);
        let session = Session::new(engine.default_branch.clone());
        (engine, session)
    }

    /// Create a `.wayline` workspace under `parent` and open it.
    pub fn init(parent: &Path) -> Result<(Self, Session)> {
        let root = parent.join(paths::DATA_DIR_NAME);
        config::write(&root, &Config::default()).map_err(|e| {
            Error::from(crate::store::StoreError::Write {
                path: root.join(config::CONFIG_FILE),
                source: e,
            })
        })?;
        Ok(Self::at(root))
    }
}

impl<S: Storage, N: NoteDirectory, E: EventSink> Engine<S, N, E> {
    pub fn new(store: S, notes: N, events: E, cfg: &Config) -> Self {
        let default_branch = BranchName::new(cfg.default_branch.clone()).unwrap_or_else(|_| {
            tracing::warn!("configured default branch is empty; using `main`");
            BranchName::default_branch()
        });
        Self {
            store,
            notes,
            events,
            clock: Clock::new(),
            default_branch,
            id_length: cfg.id_length.max(3),
        }
    }

    pub fn default_branch(&self) -> &BranchName {
        &self.default_branch
    }

    pub fn active_branch<'s>(&self, session: &'s Session) -> &'s BranchName {
        session.branch()
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Load the full collection with derived statuses recomputed.
    fn load(&self) -> Result<Vec<Waypoint>> {
        let mut ws = self.store.read_waypoints()?;
        compute_statuses(&mut ws);
        Ok(ws)
    }

    pub fn get(&self, id: &WaypointId) -> Result<Waypoint> {
        let ws = self.load()?;
        ws.into_iter()
            .find(|w| &w.id == id)
            .ok_or_else(|| OpError::WaypointNotFound(id.clone()).into())
    }

    /// All waypoints, optionally restricted to one branch. Storage order.
    pub fn list(&self, branch: Option<&BranchName>) -> Result<Vec<Waypoint>> {
        let ws = self.load()?;
        Ok(match branch {
            Some(b) => ws.into_iter().filter(|w| &w.branch == b).collect(),
            None => ws,
        })
    }

    /// The route: one branch's waypoints in topological order.
    pub fn get_route(&self, session: &Session, branch: Option<&BranchName>) -> Result<Vec<Waypoint>> {
        let branch = branch.unwrap_or_else(|| session.branch());
        let subset: Vec<Waypoint> = self
            .load()?
            .into_iter()
            .filter(|w| &w.branch == branch)
            .collect();
        let order = topo_sort(&subset);
        Ok(order
            .into_iter()
            .filter_map(|id| subset.iter().find(|w| w.id == id).cloned())
            .collect())
    }

    pub fn get_ready(&self, session: &Session) -> Result<Vec<Waypoint>> {
        Ok(self
            .list(Some(session.branch()))?
            .into_iter()
            .filter(|w| w.status.is_ready())
            .collect())
    }

    pub fn get_blocked(&self, session: &Session) -> Result<Vec<Waypoint>> {
        Ok(self
            .list(Some(session.branch()))?
            .into_iter()
            .filter(|w| w.status.is_blocked())
            .collect())
    }

    // -------------------------------------------------------------------------
    // Waypoint CRUD
    // -------------------------------------------------------------------------

    pub fn create_waypoint(&mut self, session: &Session, draft: WaypointDraft) -> Result<Waypoint> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(EmptyTitle.into());
        }

        let ws = self.load()?;
        let mut seen = HashSet::new();
        for dep in &draft.depends_on {
            if !ws.iter().any(|w| &w.id == dep) {
                return Err(OpError::WaypointNotFound(dep.clone()).into());
            }
            if !seen.insert(dep.clone()) {
                return Err(OpError::InvalidField {
                    field: "depends_on",
                    reason: format!("duplicate dependency {dep}"),
                }
                .into());
            }
        }

        let id = self.fresh_id(&ws, &HashSet::new());
        let now = self.clock.tick();
        let waypoint = Waypoint {
            id: id.clone(),
            title,
            description: draft.description,
            status: Status::default(),
            depends_on: draft.depends_on,
            reasoning: draft.reasoning,
            linked_note_ids: Vec::new(),
            branch: draft.branch.unwrap_or_else(|| session.branch().clone()),
            created_at: now,
            updated_at: now,
        };

        let mut ws = ws;
        let pos = ws.len();
        ws.push(waypoint);
        self.persist(&mut ws, Event::WaypointCreated { id })?;
        Ok(ws[pos].clone())
    }

    pub fn update_waypoint(&mut self, id: &WaypointId, patch: WaypointPatch) -> Result<Waypoint> {
        let mut ws = self.load()?;
        let pos = position(&ws, id)?;
        if patch.is_empty() {
            return Ok(ws[pos].clone());
        }

        // Validate the whole patch before touching the record.
        let title = match &patch.title {
            Patch::Keep => None,
            Patch::Clear => return Err(EmptyTitle.into()),
            Patch::Set(v) => {
                let v = v.trim();
                if v.is_empty() {
                    return Err(EmptyTitle.into());
                }
                Some(v.to_string())
            }
        };
        if matches!(patch.branch, Patch::Clear) {
            return Err(OpError::InvalidField {
                field: "branch",
                reason: "cannot be cleared".into(),
            }
            .into());
        }

        let now = self.clock.tick();
        let w = &mut ws[pos];
        if let Some(title) = title {
            w.title = title;
        }
        match patch.description {
            Patch::Keep => {}
            Patch::Clear => w.description.clear(),
            Patch::Set(v) => w.description = v,
        }
        match patch.reasoning {
            Patch::Keep => {}
            Patch::Clear => w.reasoning.clear(),
            Patch::Set(v) => w.reasoning = v,
        }
        if let Patch::Set(branch) = patch.branch {
            w.branch = branch;
        }
        w.touch(now);

        self.persist(&mut ws, Event::WaypointUpdated { id: id.clone() })?;
        Ok(ws[pos].clone())
    }

    pub fn delete_waypoint(&mut self, id: &WaypointId) -> Result<Waypoint> {
        let mut ws = self.load()?;
        let pos = position(&ws, id)?;
        let removed = ws.remove(pos);

        // Repair, not an error: dependents simply lose the edge.
        let now = self.clock.tick();
        for w in ws.iter_mut() {
            if w.has_dependency(id) {
                w.depends_on.retain(|d| d != id);
                w.touch(now);
            }
        }

        for note_id in &removed.linked_note_ids {
            if self.notes.update(note_id, None)?.is_none() {
                tracing::debug!(note = %note_id, "linked note vanished before unlink");
            }
        }

        self.persist(&mut ws, Event::WaypointDeleted { id: id.clone() })?;
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------------

    pub fn set_status(&mut self, id: &WaypointId, target: Status) -> Result<Waypoint> {
        let mut ws = self.load()?;
        let pos = position(&ws, id)?;
        let current = ws[pos].status;
        transition::check(current, target).map_err(crate::core::CoreError::from)?;

        let now = self.clock.tick();
        ws[pos].status = target;
        ws[pos].touch(now);

        // The cascade point: recompute may flip dependents, and may flip a
        // derived target right back (ready with unmet deps is blocked).
        compute_statuses(&mut ws);
        let effective = ws[pos].status;
        self.store.write_waypoints(&ws)?;
        self.events.emit(&Event::StatusChanged {
            id: id.clone(),
            from: current.as_str().to_string(),
            to: effective.as_str().to_string(),
        });
        Ok(ws[pos].clone())
    }

    /// String-driven variant: unknown status names are refused as
    /// transitions naming the current status.
    pub fn set_status_named(&mut self, id: &WaypointId, raw: &str) -> Result<Waypoint> {
        let current = self.get(id)?.status;
        let target =
            transition::parse_target(current, raw).map_err(crate::core::CoreError::from)?;
        self.set_status(id, target)
    }

    // -------------------------------------------------------------------------
    // Dependencies
    // -------------------------------------------------------------------------

    pub fn add_dependency(
        &mut self,
        waypoint_id: &WaypointId,
        dependency_id: &WaypointId,
    ) -> Result<Waypoint> {
        if waypoint_id == dependency_id {
            return Err(SelfDependency {
                id: waypoint_id.as_str().to_string(),
            }
            .into());
        }

        let mut ws = self.load()?;
        let pos = position(&ws, waypoint_id)?;
        if find(&ws, dependency_id).is_none() {
            return Err(OpError::WaypointNotFound(dependency_id.clone()).into());
        }
        if ws[pos].has_dependency(dependency_id) {
            return Err(OpError::DuplicateDependency {
                from: waypoint_id.clone(),
                to: dependency_id.clone(),
            }
            .into());
        }
        if would_cycle(&ws, waypoint_id, dependency_id) {
            return Err(WouldCycle {
                from: waypoint_id.as_str().to_string(),
                to: dependency_id.as_str().to_string(),
            }
            .into());
        }

        let now = self.clock.tick();
        ws[pos].depends_on.push(dependency_id.clone());
        ws[pos].touch(now);
        self.persist(
            &mut ws,
            Event::DependencyAdded {
                from: waypoint_id.clone(),
                to: dependency_id.clone(),
            },
        )?;
        Ok(ws[pos].clone())
    }

    pub fn remove_dependency(
        &mut self,
        waypoint_id: &WaypointId,
        dependency_id: &WaypointId,
    ) -> Result<Waypoint> {
        let mut ws = self.load()?;
        let pos = position(&ws, waypoint_id)?;
        if !ws[pos].has_dependency(dependency_id) {
            return Err(OpError::DependencyNotFound {
                from: waypoint_id.clone(),
                to: dependency_id.clone(),
            }
            .into());
        }

        let now = self.clock.tick();
        ws[pos].depends_on.retain(|d| d != dependency_id);
        ws[pos].touch(now);
        self.persist(
            &mut ws,
            Event::DependencyRemoved {
                from: waypoint_id.clone(),
                to: dependency_id.clone(),
            },
        )?;
        Ok(ws[pos].clone())
    }

    // -------------------------------------------------------------------------
    // Note links
    // -------------------------------------------------------------------------

    /// Link both sides: waypoint first, then the note back-reference.
    /// Sequential with no rollback; a failure on the second write leaves
    /// the waypoint side applied.
    pub fn link_note(&mut self, note_id: &NoteId, waypoint_id: &WaypointId) -> Result<Waypoint> {
        let mut ws = self.load()?;
        let pos = position(&ws, waypoint_id)?;
        let note = self
            .notes
            .get(note_id)?
            .ok_or_else(|| OpError::NoteNotFound(note_id.clone()))?;
        if ws[pos].linked_note_ids.contains(note_id) {
            return Err(OpError::AlreadyLinked {
                note: note_id.clone(),
                waypoint: waypoint_id.clone(),
            }
            .into());
        }
        if let Some(existing) = note.waypoint_id {
            return Err(OpError::AlreadyLinked {
                note: note_id.clone(),
                waypoint: existing,
            }
            .into());
        }

        let now = self.clock.tick();
        ws[pos].linked_note_ids.push(note_id.clone());
        ws[pos].touch(now);
        compute_statuses(&mut ws);
        self.store.write_waypoints(&ws)?;
        self.notes.update(note_id, Some(waypoint_id))?;
        self.events.emit(&Event::NoteLinked {
            note: note_id.clone(),
            waypoint: waypoint_id.clone(),
        });
        Ok(ws[pos].clone())
    }

    pub fn unlink_note(&mut self, note_id: &NoteId, waypoint_id: &WaypointId) -> Result<Waypoint> {
        let mut ws = self.load()?;
        let pos = position(&ws, waypoint_id)?;
        if !ws[pos].linked_note_ids.contains(note_id) {
            return Err(OpError::NotLinked {
                note: note_id.clone(),
                waypoint: waypoint_id.clone(),
            }
            .into());
        }

        let now = self.clock.tick();
        ws[pos].linked_note_ids.retain(|n| n != note_id);
        ws[pos].touch(now);
        compute_statuses(&mut ws);
        self.store.write_waypoints(&ws)?;
        // The note may have been deleted externally; a missing record is
        // already unlinked.
        self.notes.update(note_id, None)?;
        self.events.emit(&Event::NoteUnlinked {
            note: note_id.clone(),
            waypoint: waypoint_id.clone(),
        });
        Ok(ws[pos].clone())
    }

    // -------------------------------------------------------------------------
    // Branches
    // -------------------------------------------------------------------------

    pub fn create_branch(&mut self, name: &str, reasoning: &str) -> Result<Branch> {
        let name = BranchName::new(name)?;
        let mut branches = self.store.read_branches()?;
        if name == self.default_branch || branches.iter().any(|b| b.name == name) {
            return Err(OpError::BranchTaken(name.as_str().to_string()).into());
        }

        let branch = Branch {
            name: name.clone(),
            reasoning: reasoning.to_string(),
            created_at: self.clock.tick(),
        };
        branches.push(branch.clone());
        self.store.write_branches(&branches)?;
        self.events.emit(&Event::BranchCreated { name });
        Ok(branch)
    }

    /// Known branches: default, then registered, then observed on
    /// waypoints. Each name exactly once, discovery order preserved.
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let mut push = |name: &BranchName| {
            if seen.insert(name.clone()) {
                names.push(name.clone());
            }
        };

        push(&self.default_branch);
        for b in self.store.read_branches()? {
            push(&b.name);
        }
        for w in self.store.read_waypoints()? {
            push(&w.branch);
        }
        Ok(names)
    }

    /// Point the session at another known branch. Nothing is persisted.
    pub fn switch_branch(&self, session: &mut Session, name: &str) -> Result<BranchName> {
        let name = BranchName::new(name)?;
        if !self.list_branches()?.contains(&name) {
            return Err(OpError::BranchNotFound(name.as_str().to_string()).into());
        }
        session.branch = name.clone();
        Ok(name)
    }

    /// Structural copy of `source` onto `target`: fresh ids, statuses
    /// reset to derived ready, note links dropped, dependencies remapped
    /// within the copied set. Source waypoints are untouched.
    pub fn merge_branch(
        &mut self,
        source: &BranchName,
        target: &BranchName,
    ) -> Result<MergeOutcome> {
        let mut ws = self.load()?;
        let sources: Vec<Waypoint> = ws.iter().filter(|w| &w.branch == source).cloned().collect();
        if sources.is_empty() {
            return Ok(MergeOutcome {
                copied: Vec::new(),
                warning: Some(format!("branch `{source}` has no waypoints; nothing merged")),
            });
        }

        let mut minted = HashSet::new();
        let id_map: std::collections::HashMap<WaypointId, WaypointId> = sources
            .iter()
            .map(|w| {
                let fresh = self.fresh_id(&ws, &minted);
                minted.insert(fresh.clone());
                (w.id.clone(), fresh)
            })
            .collect();

        let mut copied = Vec::with_capacity(sources.len());
        for w in &sources {
            let now = self.clock.tick();
            let id = id_map[&w.id].clone();
            copied.push(id.clone());
            ws.push(Waypoint {
                id,
                title: w.title.clone(),
                description: w.description.clone(),
                status: Status::default(),
                // Edges inside the merged set follow their copies; edges
                // out of it keep pointing at the original branch.
                depends_on: w
                    .depends_on
                    .iter()
                    .map(|d| id_map.get(d).unwrap_or(d).clone())
                    .collect(),
                reasoning: w.reasoning.clone(),
                linked_note_ids: Vec::new(),
                branch: target.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        self.persist(
            &mut ws,
            Event::BranchMerged {
                source: source.clone(),
                target: target.clone(),
                copied: copied.len(),
            },
        )?;
        Ok(MergeOutcome {
            copied,
            warning: None,
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn fresh_id(&self, ws: &[Waypoint], minted: &HashSet<WaypointId>) -> WaypointId {
        loop {
            let id = WaypointId::generate(self.id_length);
            if !minted.contains(&id) && !ws.iter().any(|w| w.id == id) {
                return id;
            }
        }
    }

    /// Recompute, write, notify. The tail of every plain mutation.
    fn persist(&mut self, ws: &mut [Waypoint], event: Event) -> Result<()> {
        compute_statuses(ws);
        self.store.write_waypoints(ws)?;
        self.events.emit(&event);
        Ok(())
    }
}

fn find<'w>(ws: &'w [Waypoint], id: &WaypointId) -> Option<&'w Waypoint> {
    ws.iter().find(|w| &w.id == id)
}

fn position(ws: &[Waypoint], id: &WaypointId) -> Result<usize> {
    ws.iter()
        .position(|w| &w.id == id)
        .ok_or_else(|| OpError::WaypointNotFound(id.clone()).into())
}
