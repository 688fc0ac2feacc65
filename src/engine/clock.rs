//! Timestamp source for mutations.

use crate::core::WallClock;

/// Monotonic wall-clock ticker.
///
/// Guarantees each tick is strictly greater than the last, even when the
/// wall clock stalls within a millisecond or jumps backward. Mutations in
/// one process therefore always have distinct, ordered timestamps.
pub struct Clock {
    last_ms: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self { last_ms: 0 }
    }

    pub fn tick(&mut self) -> WallClock {
        let now = WallClock::now().0;
        self.last_ms = if now > self.last_ms {
            now
        } else {
            self.last_ms + 1
        };
        WallClock(self.last_ms)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
