//! Headless simulator driver.
//!
//! Reads a JSON script from standard input:
//!
//! ```json
//! { "seed": 0, "width": 40, "height": 20, "dt": 1.0,
//!   "steps": [ { "key": "right", "ticks": 10 } ] }
//! ```
//!
//! drives the core, and writes the deterministic state snapshot (player,
//! camera, tick) as JSON to standard output. Exits zero on success,
//! non-zero on parse or simulation error.

use std::io::Read;
use std::process::ExitCode;

use serde::Deserialize;
use voidharvest::{Controller, SimOptions};

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    key: String,
    #[serde(default)]
    ticks: u32,
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    width: i32,
    #[serde(default)]
    height: i32,
    #[serde(default)]
    dt: f64,
    #[serde(default)]
    steps: Vec<Step>,
}

fn main() -> ExitCode {
    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    let script: Script = match serde_json::from_str(&input) {
        Ok(script) => script,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut controller = Controller::new(SimOptions {
        seed: script.seed,
        width: script.width,
        height: script.height,
    });
    let dt = if script.dt == 0.0 { 1.0 } else { script.dt };
    for step in &script.steps {
        if !step.key.is_empty() {
            controller.inject_key(&step.key);
        }
        let ticks = step.ticks.max(1);
        controller.tick(ticks, dt);
    }

    match controller.state_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
