//! Note collaborator.
//!
//! Notes are external entities; this core only reads them and maintains
//! the waypoint back-reference on link, unlink, and delete. Everything
//! else about a note (content, anchoring, drift) lives outside.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{NoteId, WaypointId};
use crate::store::StoreError;

/// The slice of a note this core is allowed to see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: NoteId,
    /// Back-reference to the linked waypoint, if any.
    #[serde(default)]
    pub waypoint_id: Option<WaypointId>,
}

/// Narrow interface to the note system: lookup and back-reference update.
pub trait NoteDirectory {
    fn get(&self, id: &NoteId) -> Result<Option<NoteRecord>, StoreError>;

    /// Set or clear the back-reference. Returns the updated record, or
    /// `None` when the note does not exist.
    fn update(
        &mut self,
        id: &NoteId,
        waypoint: Option<&WaypointId>,
    ) -> Result<Option<NoteRecord>, StoreError>;
}

/// File-backed directory over `notes.json` in the workspace data dir.
///
/// The note system owns the file; this impl only rewrites the
/// `waypoint_id` field of existing records.
pub struct JsonNotes {
    path: PathBuf,
}

impl JsonNotes {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<NoteRecord>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_all(&self, records: &[NoteRecord]) -> Result<(), StoreError> {
        let mut data = serde_json::to_vec_pretty(records).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        data.push(b'\n');
        let dir = self
            .path
            .parent()
            .map(std::path::Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(temp.path(), &data).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        temp.persist(&self.path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl NoteDirectory for JsonNotes {
    fn get(&self, id: &NoteId) -> Result<Option<NoteRecord>, StoreError> {
        Ok(self.read_all()?.into_iter().find(|n| &n.id == id))
    }

    fn update(
        &mut self,
        id: &NoteId,
        waypoint: Option<&WaypointId>,
    ) -> Result<Option<NoteRecord>, StoreError> {
        let mut records = self.read_all()?;
        let Some(record) = records.iter_mut().find(|n| &n.id == id) else {
            return Ok(None);
        };
        record.waypoint_id = waypoint.cloned();
        let updated = record.clone();
        self.write_all(&records)?;
        Ok(Some(updated))
    }
}
