//! Millisecond time source.
//!
//! Timestamps are 32-bit millisecond counts that wrap every ~49.7 days
//! (2^32 ms). Every interval check goes through [`elapsed`], which uses
//! `wrapping_sub`, so intervals stay correct across the wrap as long as
//! they are shorter than half the counter range.

/// Milliseconds since an arbitrary epoch (usually boot). Wraps at `u32::MAX`.
pub type Millis = u32;

/// Monotonic millisecond counter.
pub trait Clock {
    /// Current time. Never decreases, except for the wrap at `u32::MAX`.
    fn now_ms(&self) -> Millis;
}

/// Milliseconds from `since` to `now`, handling counter wrap.
#[inline]
pub const fn elapsed(
    since: Millis,
    now: Millis,
) -> Millis {
    now.wrapping_sub(since)
}

/// True once at least `interval` ms separate `since` and `now`.
#[inline]
pub const fn interval_passed(
    since: Millis,
    now: Millis,
    interval: Millis,
) -> bool {
    elapsed(since, now) >= interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_normal() {
        assert_eq!(elapsed(100, 200), 100);
        assert_eq!(elapsed(0, 40), 40);
    }

    #[test]
    fn test_elapsed_wrap() {
        // Wrap from near max to near zero
        assert_eq!(elapsed(u32::MAX - 9, 10), 20);
    }

    #[test]
    fn test_interval_passed() {
        assert!(!interval_passed(0, 39, 40));
        assert!(interval_passed(0, 40, 40));
        assert!(interval_passed(u32::MAX - 20, 19, 40));
        assert!(!interval_passed(u32::MAX - 20, 18, 40));
    }
}
