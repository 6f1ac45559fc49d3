//! Debounce engine: one FSM instance per button.
//!
//! [`ButtonBank::step`] is called once per button per loop iteration. It
//! samples the button's line when the debounce gate allows it, runs the
//! sampled event through the transition table and fires the bound handler
//! on the callback edge. A sampled event is consumed by the step that
//! sees it, so the table is evaluated at most once per sample.

use core::fmt;

use crate::config::BankConfig;
use crate::fsm::{ButtonEvent, ButtonState, TRANSITION_TABLE, TransitionRule};
use crate::gate::SampleGate;
use crate::handler::ButtonHandler;
use crate::io::{Bits, InputSampler, OutputDriver, Polarity};
use crate::time::Millis;

/// Typed index of a button (and of the LED it toggles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonIndex(u8);

impl ButtonIndex {
    #[inline]
    pub const fn new(index: u8) -> Self { Self(index) }

    #[inline]
    pub const fn get(self) -> usize { self.0 as usize }

    /// Single-bit selector for this button's line.
    #[inline]
    pub const fn mask(self) -> Bits { 1 << self.0 }
}

impl fmt::Display for ButtonIndex {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A move applied by [`ButtonBank::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub button: ButtonIndex,
    pub event: ButtonEvent,
    pub from: ButtonState,
    pub to: ButtonState,
    /// The handler ran during this move.
    pub fired: bool,
}

impl fmt::Display for Transition {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "button {}: {} + {} -> {}", self.button, self.from, self.event, self.to)?;
        if self.fired {
            f.write_str(" (fired)")?;
        }
        Ok(())
    }
}

/// What a single [`ButtonBank::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// No fresh sample, nothing evaluated.
    Idle,
    /// A sample was taken but no rule matches the button's state.
    Ignored { event: ButtonEvent },
    /// A rule matched and the button moved.
    Moved(Transition),
}

impl StepOutcome {
    /// The applied move, if any.
    #[inline]
    pub const fn transition(&self) -> Option<Transition> {
        match self {
            Self::Moved(transition) => Some(*transition),
            Self::Idle | Self::Ignored { .. } => None,
        }
    }
}

// =============================================================================
// Button Instances
// =============================================================================

/// Per-button FSM record.
struct Button<H> {
    state: ButtonState,
    pending: ButtonEvent,
    handler: H,
    mask: Bits,
}

impl<H> Button<H> {
    const fn new(
        index: ButtonIndex,
        handler: H,
    ) -> Self {
        Self {
            state: ButtonState::Up,
            pending: ButtonEvent::None,
            handler,
            mask: index.mask(),
        }
    }
}

/// All debounced buttons of the board.
///
/// Owns the FSM instances and the sampling gate. The transition table is
/// shared static data.
pub struct ButtonBank<H, const N: usize> {
    buttons: [Button<H>; N],
    gate: SampleGate<N>,
    polarity: Polarity,
    table: &'static [TransitionRule],
}

impl<H, const N: usize> ButtonBank<H, N> {
    /// Every button starts `Up` with no pending event, bound to its handler.
    pub fn new(
        handlers: [H; N],
        config: &BankConfig,
    ) -> Self {
        Self::with_table(handlers, config, &TRANSITION_TABLE)
    }

    /// Bank driven by a custom table.
    pub fn with_table(
        handlers: [H; N],
        config: &BankConfig,
        table: &'static [TransitionRule],
    ) -> Self {
        const { assert!(N <= Bits::BITS as usize, "too many buttons for Bits") };

        let mut next = 0u8;
        let buttons = handlers.map(|handler| {
            let button = Button::new(ButtonIndex::new(next), handler);
            next += 1;
            button
        });

        Self {
            buttons,
            gate: SampleGate::new(config.gate, config.debounce_interval_ms),
            polarity: config.polarity,
            table,
        }
    }

    /// Number of buttons.
    #[inline]
    pub const fn len(&self) -> usize { N }

    #[inline]
    pub const fn is_empty(&self) -> bool { N == 0 }

    /// Indices of all buttons, in scan order.
    pub fn indices(&self) -> impl Iterator<Item = ButtonIndex> + use<H, N> { (0..N as u8).map(ButtonIndex::new) }

    /// Debounced state of `button`.
    pub fn state(
        &self,
        button: ButtonIndex,
    ) -> Option<ButtonState> {
        self.buttons.get(button.get()).map(|b| b.state)
    }

    /// Sampled event waiting for the next step of `button`.
    pub fn pending_event(
        &self,
        button: ButtonIndex,
    ) -> Option<ButtonEvent> {
        self.buttons.get(button.get()).map(|b| b.pending)
    }

    /// Debounced states of all buttons.
    pub fn states(&self) -> [ButtonState; N] { core::array::from_fn(|i| self.buttons[i].state) }

    /// Advance the FSM of one button.
    ///
    /// Samples the line if the gate is open, then scans the whole table for
    /// rules matching the state held when the step began. For each match
    /// the handler runs first if the rule fires, then the state moves; the
    /// last match wins. The sampled event is cleared afterwards either way.
    pub fn step<I, O>(
        &mut self,
        index: ButtonIndex,
        now: Millis,
        inputs: &mut I,
        outputs: &mut O,
    ) -> StepOutcome
    where
        I: InputSampler + ?Sized,
        O: OutputDriver + ?Sized,
        H: ButtonHandler<O>,
    {
        let Some(button) = self.buttons.get_mut(index.get()) else {
            return StepOutcome::Idle;
        };

        if self.gate.try_open(index.get(), now) {
            let level_high = inputs.read_bits() & button.mask != 0;
            button.pending = ButtonEvent::from_level(level_high, self.polarity);
        }

        let event = button.pending;
        if event == ButtonEvent::None {
            return StepOutcome::Idle;
        }

        let from = button.state;
        let mut moved: Option<Transition> = None;
        for rule in self.table.iter().filter(|rule| rule.matches(from, event)) {
            if rule.fires_callback {
                button.handler.on_release(index, outputs);
            }
            button.state = rule.to;
            let fired = rule.fires_callback || moved.is_some_and(|t| t.fired);
            moved = Some(Transition {
                button: index,
                event,
                from,
                to: rule.to,
                fired,
            });
        }

        button.pending = ButtonEvent::None;

        match moved {
            Some(transition) => StepOutcome::Moved(transition),
            None => StepOutcome::Ignored { event },
        }
    }

    /// Step every button in index order, reporting each applied move.
    pub fn step_all<I, O>(
        &mut self,
        now: Millis,
        inputs: &mut I,
        outputs: &mut O,
        mut on_transition: impl FnMut(Transition),
    ) where
        I: InputSampler + ?Sized,
        O: OutputDriver + ?Sized,
        H: ButtonHandler<O>,
    {
        for index in self.indices() {
            if let StepOutcome::Moved(transition) = self.step(index, now, inputs, outputs) {
                on_transition(transition);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
