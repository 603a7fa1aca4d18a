//! Leash Run headless driver
//!
//! Plays one session with a simple autopilot at the fixed tick, logging as
//! it goes, and prints the final snapshot as JSON.
//!
//! Usage: `leash-run [seed] [terminal|continuous] [rules.json]`

use std::path::PathBuf;

use leash_run::consts::MAX_SUBSTEPS;
use leash_run::sim::{Direction, Engine, Snapshot, Status};
use leash_run::{Mode, Rules};

/// Simulated display refresh driving the accumulator
const FRAME_DT: f32 = 1.0 / 60.0;
/// Dash at most this often (ticks)
const DASH_EVERY_TICKS: u64 = 25;

/// Fixed-timestep driver around the engine
struct Runner {
    engine: Engine,
    accumulator: f32,
    last_distraction: bool,
}

impl Runner {
    fn new(seed: u64, rules: Rules) -> Self {
        let mut engine = Engine::new(seed, rules);
        engine.set_movement(Direction::Forward, true);
        Self {
            engine,
            accumulator: 0.0,
            last_distraction: false,
        }
    }

    /// Run as many ticks as the elapsed frame time allows
    fn update(&mut self, dt: f32) -> Snapshot {
        let tick_dt = self.engine.rules().tick_seconds();
        self.accumulator += dt.min(0.25);

        let mut substeps = 0;
        while self.accumulator >= tick_dt && substeps < MAX_SUBSTEPS {
            self.autopilot();
            self.engine.tick();
            self.accumulator -= tick_dt;
            substeps += 1;
        }
        self.engine.snapshot()
    }

    /// Answer distractions with the likeliest option, dash on open road
    fn autopilot(&mut self) {
        let session = self.engine.session();
        let best = session.active_distraction.as_ref().and_then(|d| {
            d.options
                .iter()
                .max_by(|a, b| a.success_probability.total_cmp(&b.success_probability))
                .map(|o| o.id.clone())
        });

        match best {
            Some(option_id) => {
                if !self.last_distraction {
                    log::info!("Distraction: {}", session.message);
                }
                self.last_distraction = true;
                let snap = self.engine.choose_action(&option_id);
                log::info!("Chose {option_id}: {}", snap.message);
            }
            None => {
                self.last_distraction = false;
                if session.ticks % DASH_EVERY_TICKS == 0 {
                    self.engine.dash();
                }
            }
        }
    }
}

fn parse_args() -> (u64, Rules) {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    let mode = args.next().and_then(|s| Mode::from_str(&s));
    let rules_path = args.next().map(PathBuf::from);

    let mut rules = Rules::load(rules_path.as_deref());
    if let Some(mode) = mode {
        rules.mode = mode;
    }
    (seed, rules)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let (seed, rules) = parse_args();
    log::info!("Leash Run (headless) starting, {} mode", rules.mode.as_str());

    let mut runner = Runner::new(seed, rules);
    let mut snapshot = runner.engine.snapshot();
    let mut last_laps = 0;

    while snapshot.status == Status::Playing && snapshot.time_left_seconds > 0 {
        snapshot = runner.update(FRAME_DT);
        if snapshot.laps != last_laps {
            last_laps = snapshot.laps;
            log::info!("Lap {last_laps}, score {}", snapshot.score);
        }
        log::trace!(
            "x={:.0} progress={}% drive={:.0} ({}) pull={:.0}",
            snapshot.position.x,
            snapshot.progress_pct,
            snapshot.drive.speed,
            snapshot.drive.factor.label,
            snapshot.drive.pull_speed
        );
    }

    log::info!(
        "Finished: {:?}, score {}, laps {}",
        snapshot.status,
        snapshot.score,
        snapshot.laps
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Cannot serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless driver is native only
}
