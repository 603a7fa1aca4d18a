//! Session state and core simulation types
//!
//! Everything a playthrough needs lives in [`Session`]; restart replaces it
//! wholesale.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::distraction::Distraction;
use super::powerup::PowerUp;
use crate::Rules;
use crate::consts::*;

/// Session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// Horizontal direction along the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the start (screen left)
    Back,
    /// Toward the park (screen right)
    Forward,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Back => -1.0,
            Direction::Forward => 1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Back => Direction::Forward,
            Direction::Forward => Direction::Back,
        }
    }

    /// Direction of a signed speed, `None` for zero
    pub fn of(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Forward)
        } else if value < 0.0 {
            Some(Direction::Back)
        } else {
            None
        }
    }
}

/// Held movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementIntent {
    pub back: bool,
    pub forward: bool,
}

impl MovementIntent {
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Back => self.back = pressed,
            Direction::Forward => self.forward = pressed,
        }
    }

    /// Sign of the human pull: +1, -1 or 0 when neither (or both) are held
    pub fn sign(&self) -> f32 {
        (self.forward as i8 - self.back as i8) as f32
    }

    pub fn is_pulling(&self) -> bool {
        self.sign() != 0.0
    }
}

/// Where the dog's current drive comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveSource {
    /// Mood
    Internal,
    /// Something in the scene
    External,
}

/// Display tag explaining the current drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveFactor {
    pub source: DriveSource,
    pub label: String,
}

impl DriveFactor {
    pub fn internal(label: &str) -> Self {
        Self {
            source: DriveSource::Internal,
            label: label.to_string(),
        }
    }

    pub fn external(label: &str) -> Self {
        Self {
            source: DriveSource::External,
            label: label.to_string(),
        }
    }
}

impl Default for DriveFactor {
    fn default() -> Self {
        Self::internal("calm")
    }
}

/// An actor crossing the scene on its own (the cat)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobileObstacle {
    pub pos: Vec2,
    pub vel_x: f32,
}

impl MobileObstacle {
    /// Spawn just outside the edge it walks in from
    pub fn entering(heading: Direction, speed: f32) -> Self {
        let x = match heading {
            Direction::Forward => -OBSTACLE_SPAWN_MARGIN,
            Direction::Back => SCENE_WIDTH + OBSTACLE_SPAWN_MARGIN,
        };
        Self {
            pos: Vec2::new(x, TRACK_Y + 2.0),
            vel_x: heading.sign() * speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.vel_x * dt;
    }

    pub fn is_off_scene(&self) -> bool {
        self.pos.x < -OBSTACLE_CULL_MARGIN || self.pos.x > SCENE_WIDTH + OBSTACLE_CULL_MARGIN
    }
}

/// Transient banner shown in continuous mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMessage {
    pub text: String,
    pub remaining_ms: u32,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: f32,
    /// Derived from `position.x`, kept for display
    pub progress: f32,
    pub time_left_ms: u32,
    pub stubbornness: f32,
    pub status: Status,
    pub position: Vec2,
    pub facing: Direction,
    pub movement: MovementIntent,
    /// Signed speed of the dog's own drive (px/s)
    pub drive_velocity: f32,
    /// Magnitude of the handler's pull (px/s)
    pub pull_speed: f32,
    pub drive_factor: DriveFactor,
    pub active_distraction: Option<Distraction>,
    pub active_power_up: Option<PowerUp>,
    pub mobile_obstacle: Option<MobileObstacle>,
    pub distraction_age_ms: u32,
    /// Last narration line
    pub message: String,
    pub flow_message: Option<FlowMessage>,
    /// Goals reached in continuous mode
    pub laps: u32,
    /// Simulation tick counter
    pub ticks: u64,
}

/// Opening narration
pub const START_MESSAGE: &str = "Walk the shiba to the park.";
/// Narration after a restart
pub const RESTART_MESSAGE: &str = "Fresh start: walk the shiba to the park.";

impl Session {
    /// Create a new session at the start of the track
    pub fn new(rules: &Rules) -> Self {
        Self::with_message(rules, START_MESSAGE)
    }

    /// Session used by restart
    pub fn restarted(rules: &Rules) -> Self {
        Self::with_message(rules, RESTART_MESSAGE)
    }

    fn with_message(rules: &Rules, message: &str) -> Self {
        Self {
            score: 0.0,
            progress: 0.0,
            time_left_ms: rules.start_time_ms,
            stubbornness: rules.start_stubbornness,
            status: Status::Playing,
            position: Vec2::new(TRACK_START_X, TRACK_Y),
            facing: Direction::Forward,
            movement: MovementIntent::default(),
            drive_velocity: 0.0,
            pull_speed: rules.pull_ceiling,
            drive_factor: DriveFactor::default(),
            active_distraction: None,
            active_power_up: None,
            mobile_obstacle: None,
            distraction_age_ms: 0,
            message: message.to_string(),
            flow_message: None,
            laps: 0,
            ticks: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    /// Move to a world x, keeping progress in sync
    pub fn set_x(&mut self, x: f32, rules: &Rules) {
        self.position.x = crate::clamp_to_track(x);
        self.progress = crate::progress_from_x(self.position.x, rules.target_progress);
    }

    /// Add to stubbornness, clamped to `[0, max]`
    pub fn add_stubbornness(&mut self, delta: f32, rules: &Rules) {
        self.stubbornness = (self.stubbornness + delta).clamp(0.0, rules.max_stubbornness);
    }

    /// Add (or remove) time, floored at zero
    pub fn add_time(&mut self, delta_ms: i64) {
        self.time_left_ms = (self.time_left_ms as i64 + delta_ms).clamp(0, u32::MAX as i64) as u32;
    }

    /// Drop the distraction together with anything it brought along
    pub fn clear_distraction(&mut self) {
        self.active_distraction = None;
        self.mobile_obstacle = None;
        self.distraction_age_ms = 0;
    }
}
