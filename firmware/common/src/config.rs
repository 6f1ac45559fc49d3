//! Compile-time configuration.
//!
//! Nothing here can change at runtime: the button count, intervals and
//! wiring are fixed when the firmware is built.

use crate::gate::GatePolicy;
use crate::io::{Bits, Polarity};
use crate::time::Millis;

// =============================================================================
// Lines
// =============================================================================

/// Number of debounced buttons (one FSM each).
pub const BUTTON_COUNT: usize = 4;

/// Number of LEDs toggled by buttons. LED `i` belongs to button `i`.
pub const LED_COUNT: usize = 4;

/// Button wiring: internal pull-ups, so a held button reads low.
pub const INPUT_POLARITY: Polarity = Polarity::ActiveLow;

// =============================================================================
// Timing
// =============================================================================

/// Minimum time between two samples of a button's line.
pub const DEBOUNCE_INTERVAL_MS: Millis = 40;

/// Heartbeat LED toggles once per interval (a full blink takes two).
pub const HEARTBEAT_INTERVAL_MS: Millis = 1000;

/// Sampling windows are tracked per button so one button never delays another.
pub const GATE_POLICY: GatePolicy = GatePolicy::PerButton;

// =============================================================================
// Diagnostics
// =============================================================================

/// Number of recent transitions kept by the control loop's event log.
pub const EVENT_LOG_SIZE: usize = 16;

const _: () = assert!(BUTTON_COUNT <= Bits::BITS as usize);
const _: () = assert!(LED_COUNT <= Bits::BITS as usize);
const _: () = assert!(LED_COUNT >= BUTTON_COUNT, "every button needs an LED to toggle");
const _: () = assert!(DEBOUNCE_INTERVAL_MS > 0 && HEARTBEAT_INTERVAL_MS > 0);

// =============================================================================
// Grouped Settings
// =============================================================================

/// Settings for a [`ButtonBank`](crate::bank::ButtonBank).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankConfig {
    pub debounce_interval_ms: Millis,
    pub polarity: Polarity,
    pub gate: GatePolicy,
}

impl BankConfig {
    pub const DEFAULT: Self = Self {
        debounce_interval_ms: DEBOUNCE_INTERVAL_MS,
        polarity: INPUT_POLARITY,
        gate: GATE_POLICY,
    };
}

impl Default for BankConfig {
    fn default() -> Self { Self::DEFAULT }
}

/// Settings for a [`ControlLoop`](crate::control::ControlLoop).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopConfig {
    pub bank: BankConfig,
    pub heartbeat_interval_ms: Millis,
}

impl LoopConfig {
    pub const DEFAULT: Self = Self {
        bank: BankConfig::DEFAULT,
        heartbeat_interval_ms: HEARTBEAT_INTERVAL_MS,
    };
}

impl Default for LoopConfig {
    fn default() -> Self { Self::DEFAULT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(BUTTON_COUNT, 4);
        assert_eq!(LED_COUNT, 4);
        assert_eq!(DEBOUNCE_INTERVAL_MS, 40);
        assert_eq!(HEARTBEAT_INTERVAL_MS, 1000);
        assert_eq!(LoopConfig::default().bank, BankConfig::default());
        assert_eq!(BankConfig::DEFAULT.polarity, Polarity::ActiveLow);
    }
}
