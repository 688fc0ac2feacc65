//! JSON-file storage: one pretty-printed file per collection under the
//! workspace data dir, written via temp file + rename in the same
//! directory so readers never observe a torn write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Storage, StoreError};
use crate::core::{Branch, Waypoint};

const WAYPOINTS_FILE: &str = "waypoints.json";
const BRANCHES_FILE: &str = "branches.json";

pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.root.join(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Read { path, source: e }),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt { path, source: e })
    }

    fn write_collection<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), StoreError> {
        let path = self.root.join(file);
        let mut data = serde_json::to_vec_pretty(records).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            source: e,
        })?;
        data.push(b'\n');
        atomic_write(&path, &data)
    }
}

impl Storage for JsonStore {
    fn read_waypoints(&self) -> Result<Vec<Waypoint>, StoreError> {
        self.read_collection(WAYPOINTS_FILE)
    }

    fn write_waypoints(&mut self, waypoints: &[Waypoint]) -> Result<(), StoreError> {
        self.write_collection(WAYPOINTS_FILE, waypoints)
    }

    fn read_branches(&self) -> Result<Vec<Branch>, StoreError> {
        self.read_collection(BRANCHES_FILE)
    }

    fn write_branches(&mut self, branches: &[Branch]) -> Result<(), StoreError> {
        self.write_collection(BRANCHES_FILE, branches)
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let dir = path.parent().ok_or_else(|| StoreError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other("collection path missing parent directory"),
    })?;
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    let temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(temp.path(), data).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    temp.persist(path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
