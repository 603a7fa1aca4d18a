//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Every random draw goes through the injected `RandomSource`
//! - One transition function, no ambient state
//! - No rendering or platform dependencies

pub mod distraction;
pub mod movement;
pub mod powerup;
pub mod random;
pub mod resolve;
pub mod snapshot;
pub mod state;
pub mod tick;

#[cfg(test)]
mod properties;

pub use distraction::{
    Distraction, DistractionCategory, DistractionOption, DistractionVisual, DriveBias, Effects,
    try_spawn_distraction,
};
pub use powerup::{PowerUp, PowerUpKind, try_spawn_power_up};
pub use random::{RandomSource, ScriptedRandom, seeded};
pub use resolve::{Outcome, resolve_option};
pub use snapshot::Snapshot;
pub use state::{Direction, DriveFactor, DriveSource, MobileObstacle, Session, Status};
pub use tick::{Command, Engine, transition};
