//! Identity atoms.
//!
//! WaypointId: waypoint identifier with prefix
//! NoteId: identifier of an external note entity
//! BranchName: named partition of the waypoint set

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CoreError, InvalidId};

/// Alphabet for waypoint ID suffixes.
const WAYPOINT_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Waypoint identifier - "wp-{suffix}" format.
///
/// Suffix is lowercase alphanumeric. Only the engine generates new IDs
/// (pub(crate)); everything else parses.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(String);

impl WaypointId {
    /// Parse and validate a waypoint ID string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if !s.starts_with("wp-") {
            return Err(InvalidId::Waypoint {
                raw: s.to_string(),
                reason: "must start with 'wp-'".into(),
            }
            .into());
        }

        let suffix = &s[3..];
        if suffix.is_empty() {
            return Err(InvalidId::Waypoint {
                raw: s.to_string(),
                reason: "missing suffix".into(),
            }
            .into());
        }

        let suffix = suffix.to_lowercase();
        for c in suffix.bytes() {
            if !WAYPOINT_ALPHABET.contains(&c) {
                return Err(InvalidId::Waypoint {
                    raw: s.to_string(),
                    reason: "contains non-alphanumeric character".into(),
                }
                .into());
            }
        }

        Ok(Self(format!("wp-{}", suffix)))
    }

    /// Generate a random ID with the given suffix length.
    ///
    /// Caller is responsible for uniqueness against the live collection.
    pub(crate) fn generate(len: usize) -> Self {
        use rand::Rng;
        assert!(len >= 3, "waypoint id suffix must be >=3 chars");

        let mut rng = rand::rng();
        let suffix: String = (0..len)
            .map(|_| {
                let idx = rng.random_range(0..WAYPOINT_ALPHABET.len());
                WAYPOINT_ALPHABET[idx] as char
            })
            .collect();

        Self(format!("wp-{}", suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WaypointId({:?})", self.0)
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Note identifier - opaque, minted by the note system, never here.
///
/// No validation beyond non-empty.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.is_empty() {
            Err(InvalidId::Note {
                raw: s,
                reason: "empty".into(),
            }
            .into())
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({:?})", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Branch name - non-empty after trimming.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// The branch every workspace starts on.
    pub const DEFAULT: &'static str = "main";

    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(InvalidId::Branch {
                raw: s,
                reason: "empty".into(),
            }
            .into())
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn default_branch() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BranchName({:?})", self.0)
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
