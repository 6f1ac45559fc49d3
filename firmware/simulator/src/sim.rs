//! Scripted run of the control loop against a virtual clock.

use debounce_common::io::OutputLatch;
use debounce_common::{BUTTON_COUNT, Bits, Clock, ControlLoop, LoopConfig, Millis, ToggleLed};
use log::{debug, info};

use crate::script::{Script, ScriptedInputs};
use crate::timing::{LOOP_TICK_MS, TAIL_MS};

/// Clock advanced by the simulation instead of by real time.
#[derive(Clone, Copy, Debug, Default)]
pub struct VirtualClock {
    now: Millis,
}

impl VirtualClock {
    #[inline]
    pub fn set(
        &mut self,
        now: Millis,
    ) {
        self.now = now;
    }
}

impl Clock for VirtualClock {
    #[inline]
    fn now_ms(&self) -> Millis { self.now }
}

/// End state of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// LED line levels when the run stopped.
    pub leds: Bits,
    pub heartbeat_toggles: u32,
    /// Confirmed releases per button.
    pub releases: [u32; BUTTON_COUNT],
}

pub struct Simulation<'a> {
    script: &'a Script,
    clock: VirtualClock,
    control: ControlLoop<ToggleLed, BUTTON_COUNT>,
    leds: OutputLatch,
}

impl<'a> Simulation<'a> {
    pub fn new(
        script: &'a Script,
        config: &LoopConfig,
    ) -> Self {
        Self {
            script,
            clock: VirtualClock::default(),
            control: ControlLoop::new([ToggleLed; BUTTON_COUNT], config),
            leds: OutputLatch::new(),
        }
    }

    /// Tick from 0 until [`TAIL_MS`] past the last scripted event.
    pub fn run(&mut self) -> Summary {
        let end = self.script.end().saturating_add(TAIL_MS);
        let mut inputs = ScriptedInputs::new(self.script);
        let mut summary = Summary::default();

        for now in (0..=end).step_by(LOOP_TICK_MS as usize) {
            self.clock.set(now);
            inputs.seek(now);

            let report = self.control.tick(self.clock.now_ms(), &mut inputs, &mut self.leds);

            if let Some(level) = report.heartbeat {
                summary.heartbeat_toggles += 1;
                info!("{now:>6} ms  heartbeat {}", if level { "on" } else { "off" });
            }

            for transition in &report.transitions {
                debug!("{now:>6} ms  {transition}");
                if transition.fired {
                    summary.releases[transition.button.get()] += 1;
                    info!("{now:>6} ms  button {} released, LEDs {:04b}", transition.button, self.leds.bits());
                }
            }
        }

        summary.leds = self.leds.bits();
        summary
    }

    #[inline]
    pub fn control(&self) -> &ControlLoop<ToggleLed, BUTTON_COUNT> { &self.control }
}
