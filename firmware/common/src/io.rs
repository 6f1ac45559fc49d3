//! Bit-packed line access.
//!
//! The FSM only ever sees a bit-set: bit `i` is the level of line `i`.
//! [`PinInputs`] and [`PinOutputs`] build that view from arrays of
//! `embedded-hal` 1.0 pins, so any HAL whose GPIO types are infallible
//! (embassy-rp's `Input` / `Output`, for example) can drive the bank.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, PinState, StatefulOutputPin};

/// Packed line levels, one bit per line. 16 lines max.
pub type Bits = u16;

/// Reads the live level of every input line at once.
pub trait InputSampler {
    fn read_bits(&mut self) -> Bits;
}

/// Reads back and writes the level of every output line at once.
pub trait OutputDriver {
    fn read_bits(&mut self) -> Bits;
    fn write_bits(
        &mut self,
        bits: Bits,
    );
}

/// Electrical level that means "pressed".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pull-up wiring: line reads low while the button is held.
    #[default]
    ActiveLow,
    /// Pull-down wiring: line reads high while the button is held.
    ActiveHigh,
}

impl Polarity {
    /// Whether a line at `level_high` means the button is held.
    #[inline]
    pub const fn is_pressed(
        self,
        level_high: bool,
    ) -> bool {
        match self {
            Self::ActiveLow => !level_high,
            Self::ActiveHigh => level_high,
        }
    }
}

#[inline]
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

// =============================================================================
// Pin Adapters
// =============================================================================

/// `N` input pins read as one bit-set (pin `i` -> bit `i`).
pub struct PinInputs<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> PinInputs<P, N> {
    pub const fn new(pins: [P; N]) -> Self {
        const { assert!(N <= Bits::BITS as usize, "too many lines for Bits") };
        Self { pins }
    }
}

impl<P, const N: usize> InputSampler for PinInputs<P, N>
where
    P: InputPin<Error = Infallible>,
{
    fn read_bits(&mut self) -> Bits {
        self.pins
            .iter_mut()
            .enumerate()
            .fold(0, |bits, (i, pin)| if infallible(pin.is_high()) { bits | (1 << i) } else { bits })
    }
}

/// `N` output pins driven from one bit-set (bit `i` -> pin `i`).
pub struct PinOutputs<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> PinOutputs<P, N> {
    pub const fn new(pins: [P; N]) -> Self {
        const { assert!(N <= Bits::BITS as usize, "too many lines for Bits") };
        Self { pins }
    }
}

impl<P, const N: usize> OutputDriver for PinOutputs<P, N>
where
    P: StatefulOutputPin<Error = Infallible>,
{
    fn read_bits(&mut self) -> Bits {
        self.pins
            .iter_mut()
            .enumerate()
            .fold(0, |bits, (i, pin)| if infallible(pin.is_set_high()) { bits | (1 << i) } else { bits })
    }

    fn write_bits(
        &mut self,
        bits: Bits,
    ) {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            infallible(pin.set_state(PinState::from(bits & (1 << i) != 0)));
        }
    }
}

/// In-memory output register, for hosts without real pins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputLatch {
    bits: Bits,
}

impl OutputLatch {
    pub const fn new() -> Self { Self { bits: 0 } }

    /// Current register value.
    #[inline]
    pub const fn bits(&self) -> Bits { self.bits }
}

impl OutputDriver for OutputLatch {
    fn read_bits(&mut self) -> Bits { self.bits }

    fn write_bits(
        &mut self,
        bits: Bits,
    ) {
        self.bits = bits;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_hal::digital::{ErrorType, OutputPin};

    use super::*;

    struct FakeInput(bool);

    impl ErrorType for FakeInput {
        type Error = Infallible;
    }

    impl InputPin for FakeInput {
        fn is_high(&mut self) -> Result<bool, Infallible> { Ok(self.0) }

        fn is_low(&mut self) -> Result<bool, Infallible> { Ok(!self.0) }
    }

    #[derive(Default)]
    struct FakeOutput(bool);

    impl ErrorType for FakeOutput {
        type Error = Infallible;
    }

    impl OutputPin for FakeOutput {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0 = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for FakeOutput {
        fn is_set_high(&mut self) -> Result<bool, Infallible> { Ok(self.0) }

        fn is_set_low(&mut self) -> Result<bool, Infallible> { Ok(!self.0) }
    }

    #[test]
    fn test_polarity() {
        assert!(Polarity::ActiveLow.is_pressed(false));
        assert!(!Polarity::ActiveLow.is_pressed(true));
        assert!(Polarity::ActiveHigh.is_pressed(true));
        assert!(!Polarity::ActiveHigh.is_pressed(false));
        assert_eq!(Polarity::default(), Polarity::ActiveLow);
    }

    #[test]
    fn test_pin_inputs_pack_in_line_order() {
        let mut inputs = PinInputs::new([FakeInput(true), FakeInput(false), FakeInput(true), FakeInput(true)]);
        assert_eq!(inputs.read_bits(), 0b1101);
    }

    #[test]
    fn test_pin_outputs_write_and_read_back() {
        let mut outputs: PinOutputs<FakeOutput, 4> = PinOutputs::new(Default::default());
        assert_eq!(outputs.read_bits(), 0);

        outputs.write_bits(0b0101);
        assert_eq!(outputs.read_bits(), 0b0101);
        assert!(outputs.pins[0].0);
        assert!(!outputs.pins[1].0);
        assert!(outputs.pins[2].0);
        assert!(!outputs.pins[3].0);
    }

    #[test]
    fn test_pin_outputs_ignore_bits_beyond_width() {
        let mut outputs: PinOutputs<FakeOutput, 2> = PinOutputs::new(Default::default());
        outputs.write_bits(0b1111);
        assert_eq!(outputs.read_bits(), 0b11);
    }

    #[test]
    fn test_output_latch() {
        let mut latch = OutputLatch::new();
        assert_eq!(latch.bits(), 0);
        latch.write_bits(0b1000);
        assert_eq!(OutputDriver::read_bits(&mut latch), 0b1000);
    }
}
