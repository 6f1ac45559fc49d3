//! Main loop body.
//!
//! The firmware runs [`ControlLoop::tick`] back-to-back forever: first the
//! heartbeat check, then one FSM step for every button. Nothing in a tick
//! waits, so a tick takes a few microseconds on target.

use heapless::Vec;

use crate::bank::{ButtonBank, Transition};
use crate::config::{EVENT_LOG_SIZE, LoopConfig};
use crate::event_log::EventLog;
use crate::handler::ButtonHandler;
use crate::heartbeat::Heartbeat;
use crate::io::{InputSampler, OutputDriver};
use crate::time::Millis;

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport<const N: usize> {
    /// New heartbeat level, if it toggled.
    pub heartbeat: Option<bool>,
    /// Moves applied this tick, in button order.
    pub transitions: Vec<Transition, N>,
}

impl<const N: usize> TickReport<N> {
    /// Whether any handler ran this tick.
    pub fn any_fired(&self) -> bool { self.transitions.iter().any(|t| t.fired) }
}

/// Button bank plus heartbeat, stepped together.
pub struct ControlLoop<H, const N: usize> {
    bank: ButtonBank<H, N>,
    heartbeat: Heartbeat,
    log: EventLog<EVENT_LOG_SIZE>,
}

impl<H, const N: usize> ControlLoop<H, N> {
    pub fn new(
        handlers: [H; N],
        config: &LoopConfig,
    ) -> Self {
        Self {
            bank: ButtonBank::new(handlers, &config.bank),
            heartbeat: Heartbeat::new(config.heartbeat_interval_ms),
            log: EventLog::new(),
        }
    }

    /// Run one loop iteration at time `now`.
    pub fn tick<I, O>(
        &mut self,
        now: Millis,
        inputs: &mut I,
        outputs: &mut O,
    ) -> TickReport<N>
    where
        I: InputSampler + ?Sized,
        O: OutputDriver + ?Sized,
        H: ButtonHandler<O>,
    {
        let mut report = TickReport {
            heartbeat: self.heartbeat.poll(now),
            transitions: Vec::new(),
        };

        let log = &mut self.log;
        self.bank.step_all(now, inputs, outputs, |transition| {
            log.push(transition);
            // At most one move per button per tick, so this never overflows
            report.transitions.push(transition).ok();
        });

        report
    }

    #[inline]
    pub const fn bank(&self) -> &ButtonBank<H, N> { &self.bank }

    #[inline]
    pub const fn heartbeat(&self) -> &Heartbeat { &self.heartbeat }

    /// Recent transitions across all buttons.
    #[inline]
    pub const fn log(&self) -> &EventLog<EVENT_LOG_SIZE> { &self.log }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::ButtonIndex;
    use crate::fsm::ButtonState;
    use crate::handler::ToggleLed;
    use crate::io::{Bits, OutputLatch};

    struct Lines(Bits);

    impl InputSampler for Lines {
        fn read_bits(&mut self) -> Bits { self.0 }
    }

    fn control() -> ControlLoop<ToggleLed, 4> { ControlLoop::new([ToggleLed; 4], &LoopConfig::DEFAULT) }

    /// Tick every millisecond from `start` to `end` inclusive, returning all reports.
    fn run(
        control: &mut ControlLoop<ToggleLed, 4>,
        start: Millis,
        end: Millis,
        lines: &mut Lines,
        leds: &mut OutputLatch,
    ) -> std::vec::Vec<TickReport<4>> {
        (start..=end).map(|now| control.tick(now, &mut *lines, &mut *leds)).collect()
    }

    #[test]
    fn test_idle_loop_only_blinks() {
        let mut control = control();
        let mut lines = Lines(0b1111);
        let mut leds = OutputLatch::new();

        let reports = run(&mut control, 0, 3000, &mut lines, &mut leds);
        let toggles: std::vec::Vec<bool> = reports.iter().filter_map(|r| r.heartbeat).collect();
        assert_eq!(toggles, vec![true, false, true]);
        assert!(reports.iter().all(|r| r.transitions.is_empty()));
        assert_eq!(leds.bits(), 0);
        assert!(control.log().is_empty());
    }

    #[test]
    fn test_press_and_release_toggles_led() {
        let mut control = control();
        let mut lines = Lines(0b1111);
        let mut leds = OutputLatch::new();

        run(&mut control, 0, 99, &mut lines, &mut leds);
        lines.0 = 0b0111;
        run(&mut control, 100, 299, &mut lines, &mut leds);
        assert_eq!(control.bank().state(ButtonIndex::new(3)), Some(ButtonState::Down));

        lines.0 = 0b1111;
        let reports = run(&mut control, 300, 500, &mut lines, &mut leds);
        assert_eq!(reports.iter().filter(|r| r.any_fired()).count(), 1);
        assert_eq!(leds.bits(), 0b1000);
        assert_eq!(control.log().releases(ButtonIndex::new(3)), 1);
        assert_eq!(control.log().latest().map(|t| t.to), Some(ButtonState::Up));
    }

    #[test]
    fn test_heartbeat_ignores_button_activity() {
        let mut control = control();
        let mut lines = Lines(0b0000);
        let mut leds = OutputLatch::new();

        let reports = run(&mut control, 0, 2000, &mut lines, &mut leds);
        let toggled_at: std::vec::Vec<usize> =
            reports.iter().enumerate().filter(|(_, r)| r.heartbeat.is_some()).map(|(now, _)| now).collect();
        assert_eq!(toggled_at, vec![1000, 2000]);
        assert!(!control.heartbeat().level());
    }

    #[test]
    fn test_all_buttons_move_in_one_tick() {
        let mut control = control();
        let mut lines = Lines(0b0000);
        let mut leds = OutputLatch::new();

        run(&mut control, 0, 39, &mut lines, &mut leds);
        let report = control.tick(40, &mut lines, &mut leds);
        let buttons: std::vec::Vec<usize> = report.transitions.iter().map(|t| t.button.get()).collect();
        assert_eq!(buttons, vec![0, 1, 2, 3]);
        assert!(!report.any_fired());
    }
}
