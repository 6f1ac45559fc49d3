//! Liveness blinker.
//!
//! Inverts its level each time the interval has passed since the last
//! toggle. The next interval is measured from the time the toggle was
//! observed, so a slow loop stretches the blink instead of bunching up
//! catch-up toggles.

use crate::time::{Millis, interval_passed};

/// Heartbeat output state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heartbeat {
    interval: Millis,
    last_toggle: Millis,
    level: bool,
}

impl Heartbeat {
    /// Starts low, with the first toggle one interval after time 0.
    pub const fn new(interval: Millis) -> Self {
        Self {
            interval,
            last_toggle: 0,
            level: false,
        }
    }

    /// Current output level.
    #[inline]
    pub const fn level(&self) -> bool { self.level }

    /// Toggle if the interval has passed. Returns the new level when it changed.
    pub fn poll(
        &mut self,
        now: Millis,
    ) -> Option<bool> {
        if !interval_passed(self.last_toggle, now, self.interval) {
            return None;
        }
        self.last_toggle = now;
        self.level = !self.level;
        Some(self.level)
    }
}
