//! Debounce state machine: states, events and the transition table.
//!
//! Each button walks `Up -> Falling -> Down -> Rising -> Up` as samples
//! confirm a press and then a release. A single contrary sample in
//! `Falling` or `Rising` sends it back where it came from, which is what
//! filters contact bounce.
//!
//! The table is plain data scanned in order. Exactly one rule carries
//! `fires_callback`: the confirmed release `Rising + NotPressed -> Up`.
//! [`validate`] checks these properties and runs on [`TRANSITION_TABLE`]
//! at compile time.

use core::fmt;

use crate::io::Polarity;

/// Debounced phase of one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Press confirmed, button held.
    Down,
    /// Released and idle.
    Up,
    /// One pressed sample seen from `Up`, waiting for confirmation.
    Falling,
    /// One released sample seen from `Down`, waiting for confirmation.
    Rising,
}

/// Result of sampling a button's line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Pressed,
    NotPressed,
    /// No fresh sample this tick.
    None,
}

impl ButtonEvent {
    /// Event for a line currently at `level_high`, given the wiring polarity.
    #[inline]
    pub const fn from_level(
        level_high: bool,
        polarity: Polarity,
    ) -> Self {
        if polarity.is_pressed(level_high) { Self::Pressed } else { Self::NotPressed }
    }
}

impl fmt::Display for ButtonState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Down => "DOWN",
            Self::Up => "UP",
            Self::Falling => "FALLING",
            Self::Rising => "RISING",
        })
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Pressed => "PRESSED",
            Self::NotPressed => "NOT_PRESSED",
            Self::None => "NONE",
        })
    }
}

// =============================================================================
// Transition Rules
// =============================================================================

/// One row of the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionRule {
    pub from: ButtonState,
    pub on: ButtonEvent,
    pub to: ButtonState,
    /// Run the button's handler before moving to `to`.
    pub fires_callback: bool,
}

impl TransitionRule {
    pub const fn new(
        from: ButtonState,
        on: ButtonEvent,
        to: ButtonState,
    ) -> Self {
        Self { from, on, to, fires_callback: false }
    }

    /// Same as [`TransitionRule::new`], tagged as the callback edge.
    pub const fn firing(
        from: ButtonState,
        on: ButtonEvent,
        to: ButtonState,
    ) -> Self {
        Self { from, on, to, fires_callback: true }
    }

    /// Whether this row applies to `state` receiving `event`.
    #[inline]
    pub const fn matches(
        &self,
        state: ButtonState,
        event: ButtonEvent,
    ) -> bool {
        self.from as u8 == state as u8 && self.on as u8 == event as u8
    }
}

/// Debounce table. Rows are scanned top to bottom.
pub const TRANSITION_TABLE: [TransitionRule; 6] = [
    TransitionRule::new(ButtonState::Up, ButtonEvent::Pressed, ButtonState::Falling),
    TransitionRule::new(ButtonState::Falling, ButtonEvent::NotPressed, ButtonState::Up),
    TransitionRule::new(ButtonState::Falling, ButtonEvent::Pressed, ButtonState::Down),
    TransitionRule::firing(ButtonState::Rising, ButtonEvent::NotPressed, ButtonState::Up),
    TransitionRule::new(ButtonState::Down, ButtonEvent::NotPressed, ButtonState::Rising),
    TransitionRule::new(ButtonState::Rising, ButtonEvent::Pressed, ButtonState::Down),
];

const _: () = assert!(validate(&TRANSITION_TABLE).is_ok(), "malformed debounce transition table");

/// Defects [`validate`] can find in a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Row `index` repeats the (state, event) pair of an earlier row.
    DuplicatePair { index: usize },
    /// Row `index` is keyed on `ButtonEvent::None`, which never reaches the scan.
    NoneEvent { index: usize },
    /// No row fires the callback.
    MissingCallbackEdge,
    /// More than one row fires the callback.
    MultipleCallbackEdges,
}

/// Check a table for duplicate pairs, `None` rows and a single callback edge.
pub const fn validate(table: &[TransitionRule]) -> Result<(), TableError> {
    let mut firing = 0;
    let mut i = 0;
    while i < table.len() {
        let rule = &table[i];
        if rule.on as u8 == ButtonEvent::None as u8 {
            return Err(TableError::NoneEvent { index: i });
        }
        let mut j = 0;
        while j < i {
            if table[j].matches(rule.from, rule.on) {
                return Err(TableError::DuplicatePair { index: i });
            }
            j += 1;
        }
        if rule.fires_callback {
            firing += 1;
        }
        i += 1;
    }
    match firing {
        0 => Err(TableError::MissingCallbackEdge),
        1 => Ok(()),
        _ => Err(TableError::MultipleCallbackEdges),
    }
}

// =============================================================================
// Tests
// =============================================================================
