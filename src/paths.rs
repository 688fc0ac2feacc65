//! Workspace discovery.
//!
//! A workspace is a `.wayline` directory holding the collections and
//! config. Discovery walks up from the current directory, like repo
//! discovery; `WAYLINE_DIR` short-circuits it for scripts and tests.

use std::path::{Path, PathBuf};

/// Data directory name created by `init`.
pub const DATA_DIR_NAME: &str = ".wayline";

/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "WAYLINE_DIR";

/// Locate the workspace data dir for the current process.
pub fn discover() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV)
        && !dir.trim().is_empty()
    {
        let dir = PathBuf::from(dir);
        return dir.is_dir().then_some(dir);
    }

    let cwd = std::env::current_dir().ok()?;
    discover_from(&cwd)
}

/// Walk up from `start` looking for a `.wayline` dir.
pub fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
