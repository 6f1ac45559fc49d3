//! Button Debounce Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Four push buttons each drive a debounce state machine. A confirmed
//! press-then-release toggles the LED with the same index, and the
//! on-board LED blinks as a heartbeat.
//!
//! # Architecture
//!
//! A single loop, no tasks and no interrupts of our own:
//! - Read the millisecond clock
//! - Toggle the heartbeat if its interval has passed
//! - Step every button FSM once (each samples at most every 40 ms)
//!
//! See [`board`] for the pin assignment.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

#[cfg(target_arch = "arm")]
mod board;
#[cfg(target_arch = "arm")]
mod clock;

#[cfg(target_arch = "arm")]
use debounce_common::{BUTTON_COUNT, ControlLoop, LoopConfig, ToggleLed};
#[cfg(target_arch = "arm")]
use debounce_common::time::Clock;
#[cfg(target_arch = "arm")]
use defmt::{debug, info};
#[cfg(target_arch = "arm")]
use embassy_executor::Spawner;
#[cfg(target_arch = "arm")]
use embassy_rp::gpio::Level;
#[cfg(target_arch = "arm")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_arch = "arm")]
use crate::board::Board;
#[cfg(target_arch = "arm")]
use crate::clock::EmbassyClock;

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-debounce"),
    embassy_rp::binary_info::rp_program_description!(c"Four-button debounce FSM with LED toggle and heartbeat"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

// =============================================================================
// Main Entry Point
// =============================================================================

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Button debounce starting...");

    let p = embassy_rp::init(Default::default());
    let mut board = Board::new(p);

    let config = LoopConfig::DEFAULT;
    info!(
        "Config: debounce={=u32}ms heartbeat={=u32}ms polarity={} gate={}",
        config.bank.debounce_interval_ms,
        config.heartbeat_interval_ms,
        config.bank.polarity,
        config.bank.gate,
    );

    let clock = EmbassyClock;
    let mut control = ControlLoop::new([ToggleLed; BUTTON_COUNT], &config);

    info!("Entering main loop");

    loop {
        let report = control.tick(clock.now_ms(), &mut board.buttons, &mut board.leds);

        if let Some(level) = report.heartbeat {
            board.heartbeat.set_level(Level::from(level));
        }

        for transition in &report.transitions {
            if transition.fired {
                info!("{}", transition);
            } else {
                debug!("{}", transition);
            }
        }
    }
}

// Host builds only check that the workspace compiles.
#[cfg(not(target_arch = "arm"))]
fn main() {
    println!("pico2 firmware targets thumbv8m.main-none-eabihf; use the simulator on the host.");
}
