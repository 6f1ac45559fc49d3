//! Transition history.
//!
//! Keeps the most recent FSM moves in a fixed ring buffer so tests, the
//! simulator and the firmware can look back at what the buttons did
//! without any allocation.
//!
//! # Usage
//!
//! ```ignore
//! let mut log: EventLog<16> = EventLog::new();
//! log.push(transition);
//!
//! for entry in log.iter() {
//!     println!("{}", entry);
//! }
//! ```

use heapless::Deque;

use crate::bank::{ButtonIndex, Transition};

/// Ring buffer of the last `N` transitions.
///
/// Old entries are dropped when the buffer is full.
pub struct EventLog<const N: usize> {
    entries: Deque<Transition, N>,
}

impl<const N: usize> EventLog<N> {
    /// Create a new empty log.
    pub const fn new() -> Self { Self { entries: Deque::new() } }

    /// Record a transition, dropping the oldest one if full.
    pub fn push(
        &mut self,
        transition: Transition,
    ) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        self.entries.push_back(transition).ok();
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> { self.entries.iter() }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&Transition> { self.entries.back() }

    /// Number of logged confirmed releases for `button`.
    pub fn releases(
        &self,
        button: ButtonIndex,
    ) -> usize {
        self.entries.iter().filter(|t| t.fired && t.button == button).count()
    }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn clear(&mut self) { self.entries.clear(); }
}

impl<const N: usize> Default for EventLog<N> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::{ButtonEvent, ButtonState};

    fn transition(
        button: u8,
        fired: bool,
    ) -> Transition {
        Transition {
            button: ButtonIndex::new(button),
            event: ButtonEvent::NotPressed,
            from: ButtonState::Rising,
            to: ButtonState::Up,
            fired,
        }
    }

    #[test]
    fn test_push() {
        let mut log: EventLog<4> = EventLog::new();
        assert!(log.is_empty());

        log.push(transition(0, false));
        log.push(transition(1, true));
        assert_eq!(log.len(), 2);
        assert_eq!(log.latest(), Some(&transition(1, true)));
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut log: EventLog<3> = EventLog::new();
        for button in 0..5 {
            log.push(transition(button, false));
        }
        assert_eq!(log.len(), 3);

        let buttons: Vec<usize> = log.iter().map(|t| t.button.get()).collect();
        assert_eq!(buttons, vec![2, 3, 4]);
    }

    #[test]
    fn test_releases_counts_fired_only() {
        let mut log: EventLog<8> = EventLog::new();
        log.push(transition(0, true));
        log.push(transition(0, false));
        log.push(transition(1, true));
        log.push(transition(0, true));

        assert_eq!(log.releases(ButtonIndex::new(0)), 2);
        assert_eq!(log.releases(ButtonIndex::new(1)), 1);
        assert_eq!(log.releases(ButtonIndex::new(2)), 0);

        log.clear();
        assert!(log.is_empty());
    }
}
