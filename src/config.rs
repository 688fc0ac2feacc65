//! Workspace configuration: `config.toml` inside the data dir.
//!
//! Absent or unreadable config falls back to defaults with a warning;
//! a bad config file never blocks the engine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.toml";

fn default_branch() -> String {
    crate::core::BranchName::DEFAULT.to_string()
}

fn default_id_length() -> usize {
    6
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Branch new sessions start on.
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Suffix length for generated waypoint ids (min 3).
    #[serde(default = "default_id_length")]
    pub id_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
            id_length: default_id_length(),
        }
    }
}

/// Load config from the data dir, falling back to defaults.
pub fn load(data_dir: &Path) -> Config {
    let path = data_dir.join(CONFIG_FILE);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Config::default(),
        Err(e) => {
            tracing::warn!("failed to read {}: {e}; using defaults", path.display());
            return Config::default();
        }
    };
    match toml::from_str::<Config>(&contents) {
        Ok(mut cfg) => {
            if cfg.id_length < 3 {
                tracing::warn!("id_length {} below minimum; using 3", cfg.id_length);
                cfg.id_length = 3;
            }
            cfg
        }
        Err(e) => {
            tracing::warn!("failed to parse {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}

/// Write the config file, creating the data dir if needed.
pub fn write(data_dir: &Path, cfg: &Config) -> std::io::Result<()> {
    fs::create_dir_all(data_dir)?;
    let contents = toml::to_string_pretty(cfg)
        .map_err(|e| std::io::Error::other(format!("failed to render config: {e}")))?;
    atomic_write(&data_dir.join(CONFIG_FILE), contents.as_bytes())
}

fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let temp = tempfile::NamedTempFile::new_in(dir)?;
    fs::write(temp.path(), data)?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
