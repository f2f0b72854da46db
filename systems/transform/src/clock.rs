use std::time::Duration;

use tile_twister_core::Timestamp;

/// Gates phase steps on elapsed wall-clock time.
///
/// The clock is polled on every tick rather than scheduled, so irregular
/// tick rates only change when a step fires, never how many fire at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationClock {
    interval: Duration,
    last_step: Timestamp,
}

impl AnimationClock {
    /// Creates a clock whose first step is due one interval after `started_at`.
    #[must_use]
    pub const fn new(interval: Duration, started_at: Timestamp) -> Self {
        Self {
            interval,
            last_step: started_at,
        }
    }

    /// Minimum time between two steps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant the most recent step fired, or the start time before the first one.
    #[must_use]
    pub const fn last_step(&self) -> Timestamp {
        self.last_step
    }

    /// Reports whether enough time elapsed to advance.
    #[must_use]
    pub fn is_due(&self, now: Timestamp) -> bool {
        now.since(self.last_step) >= self.interval
    }

    /// Records that a step fired at `now`.
    pub fn mark(&mut self, now: Timestamp) {
        self.last_step = now;
    }
}
