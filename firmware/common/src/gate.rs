//! Debounce sampling gate.
//!
//! A button's line is only read once the debounce interval has passed
//! since the previous sample. With [`GatePolicy::Shared`] one timestamp
//! covers the whole bank: whichever button is stepped first after the
//! window opens takes the sample and the rest of the bank waits for the
//! next window. [`GatePolicy::PerButton`] gives each button its own
//! window.

use crate::time::{Millis, interval_passed};

/// How sampling windows are tracked across the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatePolicy {
    /// One last-sample timestamp for all buttons.
    Shared,
    /// One last-sample timestamp per button.
    PerButton,
}

/// Last-sample timestamps for `N` buttons.
#[derive(Clone, Debug)]
pub struct SampleGate<const N: usize> {
    policy: GatePolicy,
    interval: Millis,
    last_sample: [Millis; N],
}

impl<const N: usize> SampleGate<N> {
    /// All windows start at time 0.
    pub const fn new(
        policy: GatePolicy,
        interval: Millis,
    ) -> Self {
        Self {
            policy,
            interval,
            last_sample: [0; N],
        }
    }

    #[inline]
    pub const fn policy(&self) -> GatePolicy { self.policy }

    /// Open the window for `button` if the interval has passed, restarting it at `now`.
    pub fn try_open(
        &mut self,
        button: usize,
        now: Millis,
    ) -> bool {
        let slot = match self.policy {
            GatePolicy::Shared => 0,
            GatePolicy::PerButton => button,
        };
        let Some(last) = self.last_sample.get_mut(slot) else {
            return false;
        };
        if interval_passed(*last, now, self.interval) {
            *last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_window_opens_after_interval() {
        let mut gate: SampleGate<4> = SampleGate::new(GatePolicy::PerButton, 40);
        assert!(!gate.try_open(0, 0));
        assert!(!gate.try_open(0, 39));
        assert!(gate.try_open(0, 40));
    }

    #[test]
    fn test_window_restarts_at_sample_time() {
        let mut gate: SampleGate<4> = SampleGate::new(GatePolicy::PerButton, 40);
        assert!(gate.try_open(0, 55));
        assert!(!gate.try_open(0, 94));
        assert!(gate.try_open(0, 95));
    }

    #[test]
    fn test_shared_window_serves_one_button() {
        let mut gate: SampleGate<4> = SampleGate::new(GatePolicy::Shared, 40);
        assert!(gate.try_open(0, 40));
        assert!(!gate.try_open(1, 40));
        assert!(!gate.try_open(2, 40));
        assert!(!gate.try_open(3, 40));
        // Whoever comes first in the next window wins it
        assert!(gate.try_open(2, 80));
        assert!(!gate.try_open(0, 80));
    }

    #[test]
    fn test_per_button_windows_are_independent() {
        let mut gate: SampleGate<4> = SampleGate::new(GatePolicy::PerButton, 40);
        for button in 0..4 {
            assert!(gate.try_open(button, 40));
        }
        assert!(!gate.try_open(1, 60));
    }

    #[test]
    fn test_out_of_range_button_never_opens() {
        let mut gate: SampleGate<2> = SampleGate::new(GatePolicy::PerButton, 40);
        assert!(!gate.try_open(5, 1000));
    }

    #[test]
    fn test_window_across_clock_wrap() {
        let mut gate: SampleGate<1> = SampleGate::new(GatePolicy::PerButton, 40);
        assert!(gate.try_open(0, u32::MAX - 10));
        assert!(!gate.try_open(0, 20));
        assert!(gate.try_open(0, 29));
    }
}
