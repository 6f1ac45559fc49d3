use debounce_common::time::{Clock, Millis};
use embassy_time::Instant;

/// Milliseconds since boot from the embassy time driver.
///
/// Truncated to 32 bits, so it wraps after ~49.7 days like the loop expects.
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now_ms(&self) -> Millis { Instant::now().as_millis() as Millis }
}
