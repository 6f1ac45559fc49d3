//! Button callbacks.
//!
//! A handler is bound to every button and runs when the FSM confirms a
//! release. Closures and `fn` items taking `(ButtonIndex, &mut O)` are
//! handlers too.

use crate::bank::ButtonIndex;
use crate::io::OutputDriver;

/// Action run on a confirmed press-then-release.
pub trait ButtonHandler<O: ?Sized> {
    fn on_release(
        &mut self,
        button: ButtonIndex,
        outputs: &mut O,
    );
}

impl<O: ?Sized, F> ButtonHandler<O> for F
where
    F: FnMut(ButtonIndex, &mut O),
{
    #[inline]
    fn on_release(
        &mut self,
        button: ButtonIndex,
        outputs: &mut O,
    ) {
        self(button, outputs);
    }
}

/// Flips the output line with the same index as the button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleLed;

impl<O: OutputDriver + ?Sized> ButtonHandler<O> for ToggleLed {
    fn on_release(
        &mut self,
        button: ButtonIndex,
        outputs: &mut O,
    ) {
        let bits = outputs.read_bits();
        outputs.write_bits(bits ^ button.mask());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::OutputLatch;

    #[test]
    fn test_toggle_flips_only_its_line() {
        let mut leds = OutputLatch::new();
        leds.write_bits(0b1000);

        ToggleLed.on_release(ButtonIndex::new(1), &mut leds);
        assert_eq!(leds.bits(), 0b1010);

        ToggleLed.on_release(ButtonIndex::new(1), &mut leds);
        assert_eq!(leds.bits(), 0b1000);
    }

    #[test]
    fn test_closure_handler() {
        let mut seen = Vec::new();
        let mut leds = OutputLatch::new();
        let mut handler = |button: ButtonIndex, _: &mut OutputLatch| seen.push(button.get());

        handler.on_release(ButtonIndex::new(2), &mut leds);
        handler.on_release(ButtonIndex::new(0), &mut leds);
        assert_eq!(seen, vec![2, 0]);
    }
}
