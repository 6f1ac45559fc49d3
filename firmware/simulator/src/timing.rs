//! Timing constants for the simulator.

use debounce_common::Millis;

/// Virtual time between two loop iterations.
///
/// The firmware loop spins far faster than this; 1 ms is the clock resolution.
pub const LOOP_TICK_MS: Millis = 1;

/// How long to keep running after the last scripted event, so pending
/// releases settle and the heartbeat gets a chance to blink.
pub const TAIL_MS: Millis = 500;
