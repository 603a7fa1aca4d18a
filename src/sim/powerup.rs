//! Power-up pickups
//!
//! Pickups spawn a little ahead of the dog and are collected by walking
//! into them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::state::Session;
use crate::Rules;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Calms the dog down
    TreatBag,
    /// Jumps forward along the track
    SpeedBoost,
    /// Adds time to the clock
    TimeBonus,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::TreatBag,
        PowerUpKind::SpeedBoost,
        PowerUpKind::TimeBonus,
    ];

    /// Uniform pick from one roll
    pub fn from_roll(roll: f32) -> Self {
        let index = ((roll * Self::ALL.len() as f32) as usize).min(Self::ALL.len() - 1);
        Self::ALL[index]
    }

    pub fn title(&self) -> &'static str {
        match self {
            PowerUpKind::TreatBag => "Snack Pickup",
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::TimeBonus => "Time Bonus",
        }
    }

    pub fn pickup_text(&self) -> &'static str {
        match self {
            PowerUpKind::TreatBag => "The shiba relaxes and focuses.",
            PowerUpKind::SpeedBoost => "The shiba zooms forward!",
            PowerUpKind::TimeBonus => "You gain extra time.",
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// Maybe spawn a pickup this tick
///
/// Suppressed while one is active and once the goal is closer than the
/// minimum spawn distance.
pub fn try_spawn_power_up(
    current: Option<PowerUp>,
    progress: f32,
    dt_seconds: f32,
    rules: &Rules,
    rng: &mut dyn RandomSource,
) -> Option<PowerUp> {
    if current.is_some() {
        return current;
    }
    let target = rules.target_progress;
    if progress >= target - rules.power_up_min_ahead {
        return None;
    }
    if !rng.chance_per_second(rules.power_up_chance_per_second, dt_seconds) {
        return None;
    }

    let ahead = rng.range(rules.power_up_min_ahead, rules.power_up_max_ahead);
    let spawn_progress = (progress + ahead).min(target - 1.0);
    let kind = PowerUpKind::from_roll(rng.next_unit());
    let pos = Vec2::new(
        crate::x_from_progress(spawn_progress, target),
        TRACK_Y - POWER_UP_LIFT,
    );

    log::debug!("Spawned {:?} at x={:.0}", kind, pos.x);
    Some(PowerUp { kind, pos })
}

/// Collect the active pickup if the walker touches it
///
/// Returns the collected kind.
pub fn apply_pickup(session: &mut Session, rules: &Rules) -> Option<PowerUpKind> {
    let power_up = session.active_power_up?;
    if session.position.distance(power_up.pos) > PICKUP_RADIUS {
        return None;
    }

    session.active_power_up = None;
    match power_up.kind {
        PowerUpKind::TreatBag => {
            session.add_stubbornness(-rules.power_up_stubbornness_drop, rules);
        }
        PowerUpKind::SpeedBoost => {
            let jump = rules.power_up_progress_boost * 6.0;
            session.set_x(session.position.x + jump, rules);
        }
        PowerUpKind::TimeBonus => {
            session.add_time(rules.power_up_time_bonus_ms as i64);
        }
    }

    session.message = format!(
        "Power-up: {}. {}",
        power_up.kind.title(),
        power_up.kind.pickup_text()
    );
    session.score += rules.power_up_score;
    log::debug!("Collected {:?}", power_up.kind);
    Some(power_up.kind)
}
