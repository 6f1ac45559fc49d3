//! Pin assignment for the Pico 2 board.
//!
//! | Function  | GPIO    | Mode                        |
//! |-----------|---------|-----------------------------|
//! | Buttons   | 12..=15 | input, pull-up, active-low  |
//! | LEDs      | 2..=5   | push-pull output, start low |
//! | Heartbeat | 25      | on-board LED, start low     |
//!
//! Button `i` toggles LED `i`.

use debounce_common::config::{BUTTON_COUNT, LED_COUNT};
use debounce_common::io::{PinInputs, PinOutputs};
use embassy_rp::Peripherals;
use embassy_rp::gpio::{Input, Level, Output, Pull};

pub struct Board {
    pub buttons: PinInputs<Input<'static>, BUTTON_COUNT>,
    pub leds: PinOutputs<Output<'static>, LED_COUNT>,
    pub heartbeat: Output<'static>,
}

impl Board {
    pub fn new(p: Peripherals) -> Self {
        let buttons = PinInputs::new([
            Input::new(p.PIN_12, Pull::Up),
            Input::new(p.PIN_13, Pull::Up),
            Input::new(p.PIN_14, Pull::Up),
            Input::new(p.PIN_15, Pull::Up),
        ]);

        let leds = PinOutputs::new([
            Output::new(p.PIN_2, Level::Low),
            Output::new(p.PIN_3, Level::Low),
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
        ]);

        Self {
            buttons,
            leds,
            heartbeat: Output::new(p.PIN_25, Level::Low),
        }
    }
}
