//! Scripted button line levels.
//!
//! A script is a list of `<time_ms> <levels>` lines. `levels` has one binary
//! digit per button, highest button first, `1` meaning the line is high.
//! Each event holds until the next one. Before the first event every line is
//! high, which is "released" for the pull-up buttons on the board.
//!
//! ```text
//! # button 0 pressed with contact bounce
//! 200 1110
//! 203 1111
//! 206 1110
//! 300 1111
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use debounce_common::io::InputSampler;
use debounce_common::{BUTTON_COUNT, Bits, Millis};
use thiserror::Error;

/// Every line high.
pub const ALL_HIGH: Bits = ((1u32 << BUTTON_COUNT) - 1) as Bits;

/// Built-in demo: a bouncy press on button 0, a glitch on button 2 that must
/// be filtered out, and a clean press on button 3.
pub const DEMO: &str = "\
# time  levels (button 3..0)
0       1111
# button 0: bouncy press, held, released
200     1110
203     1111
206     1110
300     1111
# button 2: two short glitches, never a full press
405     1011
425     1111
470     1011
490     1111
# button 3: clean press and release
600     0111
700     1111
";

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: bad time `{text}`")]
    BadTime { line: usize, text: String },

    #[error("line {line}: bad levels `{text}`, expected 0/1 digits")]
    BadLevels { line: usize, text: String },

    #[error("line {line}: expected {expected} level digits, found {found}")]
    WrongWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: time {at} ms is before the previous event at {previous} ms")]
    TimeWentBackwards {
        line: usize,
        at: Millis,
        previous: Millis,
    },
}

/// One scripted change of the line levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptEvent {
    pub at: Millis,
    pub levels: Bits,
}

/// Parsed script, events in time order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    events: Vec<ScriptEvent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn demo() -> Self {
        match Self::parse(DEMO) {
            Ok(script) => script,
            Err(e) => unreachable!("built-in demo script is malformed: {e}"),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut events: Vec<ScriptEvent> = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let (time, levels) = content.split_once(char::is_whitespace).unwrap_or((content, ""));
            let at = time.parse::<Millis>().map_err(|_| ScriptError::BadTime {
                line,
                text: time.to_string(),
            })?;
            let levels = parse_levels(line, levels.trim())?;

            if let Some(previous) = events.last().map(|e| e.at)
                && at < previous
            {
                return Err(ScriptError::TimeWentBackwards { line, at, previous });
            }

            events.push(ScriptEvent { at, levels });
        }

        Ok(Self { events })
    }

    #[inline]
    pub fn events(&self) -> &[ScriptEvent] { &self.events }

    /// Time of the last event, 0 for an empty script.
    pub fn end(&self) -> Millis { self.events.last().map_or(0, |e| e.at) }

    /// Line levels in effect at `now`.
    pub fn levels_at(
        &self,
        now: Millis,
    ) -> Bits {
        let applied = self.events.partition_point(|e| e.at <= now);
        applied.checked_sub(1).map_or(ALL_HIGH, |i| self.events[i].levels)
    }
}

fn parse_levels(
    line: usize,
    text: &str,
) -> Result<Bits, ScriptError> {
    let bad = || ScriptError::BadLevels {
        line,
        text: text.to_string(),
    };

    if text.is_empty() || !text.chars().all(|c| c == '0' || c == '1') {
        return Err(bad());
    }
    if text.len() != BUTTON_COUNT {
        return Err(ScriptError::WrongWidth {
            line,
            expected: BUTTON_COUNT,
            found: text.len(),
        });
    }

    Ok(text.bytes().fold(0, |bits, digit| (bits << 1) | Bits::from(digit == b'1')))
}

// =============================================================================
// Input Replay
// =============================================================================

/// Input lines driven by a script, read at the time last set with [`Self::seek`].
pub struct ScriptedInputs<'a> {
    script: &'a Script,
    now: Millis,
}

impl<'a> ScriptedInputs<'a> {
    pub const fn new(script: &'a Script) -> Self { Self { script, now: 0 } }

    #[inline]
    pub fn seek(
        &mut self,
        now: Millis,
    ) {
        self.now = now;
    }
}

impl InputSampler for ScriptedInputs<'_> {
    fn read_bits(&mut self) -> Bits { self.script.levels_at(self.now) }
}
