//! Leash Run - a dog-walking arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (events, movement, option resolution, state machine)
//! - `rules`: Data-driven game balance and mode selection

pub mod rules;
pub mod sim;

pub use rules::{Mode, Rules};
pub use sim::{Command, Engine, Snapshot};

/// Track and scene geometry (world pixels)
pub mod consts {
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scene width; the track sits inside it
    pub const SCENE_WIDTH: f32 = 1280.0;

    /// Walking path
    pub const PATH_Y: f32 = 452.0;
    /// Handler start marker
    pub const TRACK_START_X: f32 = 130.0;
    /// Park gate
    pub const TRACK_GOAL_X: f32 = SCENE_WIDTH - 180.0;
    /// Vertical line the handler and dog walk along
    pub const TRACK_Y: f32 = PATH_Y + 18.0;

    /// Pickups float a little above the path
    pub const POWER_UP_LIFT: f32 = 28.0;
    /// Contact distance for collecting a pickup
    pub const PICKUP_RADIUS: f32 = 40.0;

    /// Cat actor spawns this far outside the scene edge
    pub const OBSTACLE_SPAWN_MARGIN: f32 = 70.0;
    /// Cat actor is culled once it is this far outside the scene
    pub const OBSTACLE_CULL_MARGIN: f32 = 90.0;
}

use consts::{TRACK_GOAL_X, TRACK_START_X};

/// Project a world x onto `[0, target]` progress points
#[inline]
pub fn progress_from_x(x: f32, target: f32) -> f32 {
    let ratio = (x - TRACK_START_X) / (TRACK_GOAL_X - TRACK_START_X);
    (ratio * target).clamp(0.0, target)
}

/// Inverse of [`progress_from_x`]
#[inline]
pub fn x_from_progress(progress: f32, target: f32) -> f32 {
    TRACK_START_X + (TRACK_GOAL_X - TRACK_START_X) * (progress / target)
}

/// World pixels covered by one progress point
#[inline]
pub fn pixels_per_progress(target: f32) -> f32 {
    (TRACK_GOAL_X - TRACK_START_X) / target
}

/// Clamp a world x into the walkable track
#[inline]
pub fn clamp_to_track(x: f32) -> f32 {
    x.clamp(TRACK_START_X, TRACK_GOAL_X)
}

/// Hazard-rate conversion: chance that an event with per-second
/// probability `rate` fires at least once within `seconds`
#[inline]
pub fn hazard_chance(rate: f32, seconds: f32) -> f32 {
    1.0 - (1.0 - rate).powf(seconds)
}
