//! Time primitives.
//!
//! Single-process engine: wall clock milliseconds are enough. No causal
//! ordering, no replication tiebreaks.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Wall clock in unix milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallClock(pub u64);

impl WallClock {
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// RFC-3339 rendering for human output. Falls back to the raw
    /// millisecond count if the value is out of range for a date.
    pub fn to_rfc3339(&self) -> String {
        OffsetDateTime::from_unix_timestamp_nanos(self.0 as i128 * 1_000_000)
            .ok()
            .and_then(|dt| dt.format(&Rfc3339).ok())
            .unwrap_or_else(|| format!("{}ms", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rfc3339() {
        let ts = WallClock(1_700_000_000_000);
        assert_eq!(ts.to_rfc3339(), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(WallClock(2) > WallClock(1));
    }
}
