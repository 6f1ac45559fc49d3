//! Button Debounce Simulator for Desktop.
//!
//! Replays a script of raw button line levels (bounce included) through the
//! same control loop the firmware runs, against a virtual millisecond clock,
//! and reports what the LEDs and heartbeat did.
//!
//! ```bash
//! cargo run -p debounce-simulator                       # built-in demo
//! cargo run -p debounce-simulator -- presses.script     # own script
//! RUST_LOG=debug cargo run -p debounce-simulator -- --shared-gate
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod script;
mod sim;
mod timing;

use std::env;
use std::error::Error;
use std::path::PathBuf;

use debounce_common::gate::GatePolicy;
use debounce_common::{BankConfig, LoopConfig};
use log::info;

use crate::script::Script;
use crate::sim::Simulation;

const USAGE: &str = "usage: simulator [--shared-gate] [SCRIPT]";

/// Command line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    shared_gate: bool,
    script: Option<PathBuf>,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut options = Self::default();

        for arg in args {
            match arg.as_str() {
                "--shared-gate" => options.shared_gate = true,
                "-h" | "--help" => return Err(USAGE.to_string()),
                flag if flag.starts_with('-') => return Err(format!("unknown option `{flag}`\n{USAGE}")),
                path if options.script.is_none() => options.script = Some(PathBuf::from(path)),
                _ => return Err(format!("more than one script given\n{USAGE}")),
            }
        }

        Ok(options)
    }

    fn loop_config(&self) -> LoopConfig {
        let gate = if self.shared_gate {
            GatePolicy::Shared
        } else {
            GatePolicy::PerButton
        };

        LoopConfig {
            bank: BankConfig {
                gate,
                ..BankConfig::DEFAULT
            },
            ..LoopConfig::DEFAULT
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse(env::args().skip(1))?;
    let config = options.loop_config();

    let script = match &options.script {
        Some(path) => {
            info!("Loading script {}", path.display());
            Script::load(path)?
        }
        None => {
            info!("No script given, running the built-in demo");
            Script::demo()
        }
    };

    info!(
        "Debounce {} ms, heartbeat {} ms, {:?} gate, {} events",
        config.bank.debounce_interval_ms,
        config.heartbeat_interval_ms,
        config.bank.gate,
        script.events().len(),
    );

    let mut sim = Simulation::new(&script, &config);
    let summary = sim.run();
    info!("Final states: {:?}", sim.control().bank().states());

    println!("LEDs:              {:04b}", summary.leds);
    println!("Heartbeat toggles: {}", summary.heartbeat_toggles);
    for (button, releases) in summary.releases.iter().enumerate() {
        println!("Button {button} releases: {releases}");
    }

    Ok(())
}
