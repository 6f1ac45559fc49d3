//! Button debounce library - the testable core of the firmware.
//!
//! This crate contains platform-agnostic code shared between the simulator
//! and the Pico 2 hardware implementation:
//!
//! - [`config`]: Compile-time configuration (counts, intervals, polarity)
//! - [`time`]: Millisecond clock abstraction with wrap-safe arithmetic
//! - [`io`]: Bit-packed input/output traits and `embedded-hal` pin adapters
//! - [`fsm`]: Button states, events and the static transition table
//! - [`gate`]: Debounce sampling gate (shared or per-button)
//! - [`bank`]: Per-button FSM instances and the `step` engine
//! - [`handler`]: Callbacks fired on a confirmed release
//! - [`heartbeat`]: Liveness blinker
//! - [`event_log`]: Ring buffer of recent transitions
//! - [`control`]: One iteration of the main loop
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p debounce-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware links this crate as `no_std`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod bank;
pub mod config;
pub mod control;
pub mod event_log;
pub mod fsm;
pub mod gate;
pub mod handler;
pub mod heartbeat;
pub mod io;
pub mod time;

// Re-export commonly used items
pub use bank::{ButtonBank, ButtonIndex, StepOutcome, Transition};
pub use config::{BUTTON_COUNT, BankConfig, LED_COUNT, LoopConfig};
pub use control::{ControlLoop, TickReport};
pub use fsm::{ButtonEvent, ButtonState, TRANSITION_TABLE, TransitionRule};
pub use handler::{ButtonHandler, ToggleLed};
pub use io::{Bits, InputSampler, OutputDriver, Polarity};
pub use time::{Clock, Millis};
