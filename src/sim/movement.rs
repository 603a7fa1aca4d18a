//! Tug-of-war movement
//!
//! The dog's own drive velocity and the handler's pull share one position.
//! The drive is resampled at random; the pull fades while held and recovers
//! while released.

use super::distraction::{Distraction, DriveBias};
use super::random::RandomSource;
use super::state::{Direction, DriveFactor, Session};
use crate::Rules;

/// Mood-driven drive factors: label and speed multiplier
const MOODS: [(&str, f32); 4] = [
    ("curious", 1.0),
    ("sniffing", 0.8),
    ("zoomies", 1.3),
    ("sulking", 0.9),
];

/// Result of one drive resample
#[derive(Debug, Clone, PartialEq)]
pub struct Drive {
    pub velocity: f32,
    pub factor: DriveFactor,
}

/// Pick a new drive velocity for the current context
pub fn sample_drive(
    distraction: Option<&Distraction>,
    stubbornness: f32,
    rules: &Rules,
    rng: &mut dyn RandomSource,
) -> Drive {
    let stubborn_gain = 1.0 + (stubbornness / rules.max_stubbornness) * rules.stubbornness_speed_gain;

    let Some(distraction) = distraction else {
        let index = ((rng.next_unit() * MOODS.len() as f32) as usize).min(MOODS.len() - 1);
        let (label, multiplier) = MOODS[index];
        let direction = coin_direction(rng);
        let speed = rng.range(rules.drive_base_min, rules.drive_base_max) * multiplier * stubborn_gain;
        return Drive {
            velocity: direction.sign() * speed,
            factor: DriveFactor::internal(label),
        };
    };

    let label = distraction.category.as_str();
    match distraction.bias {
        DriveBias::Chase(toward) => {
            let direction = if rng.chance(rules.drive_chase_follow_chance) {
                toward
            } else {
                toward.opposite()
            };
            let speed = rng.range(rules.drive_chase_min, rules.drive_chase_max) * stubborn_gain;
            Drive {
                velocity: direction.sign() * speed,
                factor: DriveFactor::external(label),
            }
        }
        DriveBias::Stop(probability) => {
            if rng.chance(probability) {
                return Drive {
                    velocity: 0.0,
                    factor: DriveFactor::external(label),
                };
            }
            let direction = coin_direction(rng);
            let speed = rng.range(rules.drive_base_min, rules.drive_base_max) * stubborn_gain;
            Drive {
                velocity: direction.sign() * speed,
                factor: DriveFactor::external(label),
            }
        }
        DriveBias::Wander => {
            let direction = coin_direction(rng);
            let speed = rng.range(rules.drive_base_min, rules.drive_base_max) * stubborn_gain;
            Drive {
                velocity: direction.sign() * speed,
                factor: DriveFactor::external(label),
            }
        }
    }
}

fn coin_direction(rng: &mut dyn RandomSource) -> Direction {
    if rng.chance(0.5) {
        Direction::Forward
    } else {
        Direction::Back
    }
}

/// Resample the drive on a hazard-rate draw, or unconditionally when the
/// distraction context just changed
pub fn update_drive(
    session: &mut Session,
    context_changed: bool,
    dt: f32,
    rules: &Rules,
    rng: &mut dyn RandomSource,
) -> bool {
    let resample =
        context_changed || rng.chance_per_second(rules.drive_resample_chance_per_second, dt);
    if !resample {
        return false;
    }

    let drive = sample_drive(
        session.active_distraction.as_ref(),
        session.stubbornness,
        rules,
        rng,
    );
    log::debug!(
        "Drive resampled: {:.0} px/s ({:?} {})",
        drive.velocity,
        drive.factor.source,
        drive.factor.label
    );
    session.drive_velocity = drive.velocity;
    session.drive_factor = drive.factor;
    true
}

/// Fade the pull while held, recover it while released
///
/// Holding both keys cancels out and counts as released.
pub fn update_pull(pull_speed: f32, pulling: bool, dt: f32, rules: &Rules) -> f32 {
    if pulling {
        (pull_speed - rules.pull_decay_per_second * dt).max(rules.pull_floor)
    } else {
        (pull_speed + rules.pull_recover_per_second * dt).min(rules.pull_ceiling)
    }
}

/// Position delta for one tick (before clamping)
pub fn step(session: &Session, dt: f32, rules: &Rules) -> f32 {
    let human = session.movement.sign() * session.pull_speed;
    let terrain = rules.terrain_multiplier(session.position.x);
    let slow = if session.active_distraction.is_some() {
        rules.distraction_slow_multiplier
    } else {
        1.0
    };
    (session.drive_velocity + human) * terrain * slow * dt
}

/// Advance position by one tick; progress follows x
///
/// Returns the actual (clamped) displacement.
pub fn integrate(session: &mut Session, dt: f32, rules: &Rules) -> f32 {
    let before = session.position.x;
    let delta = step(session, dt, rules);
    session.set_x(before + delta, rules);
    if let Some(direction) = Direction::of(delta) {
        session.facing = direction;
    }
    session.position.x - before
}
