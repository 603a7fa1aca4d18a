//! Read-only view handed to renderers and HUDs
//!
//! Built atomically at the end of every transition; nothing in here feeds
//! back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::distraction::{DistractionCategory, DistractionVisual};
use super::powerup::PowerUpKind;
use super::state::{Direction, DriveFactor, Session, Status};
use crate::{Mode, Rules};

/// Option button binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionView {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistractionView {
    pub category: DistractionCategory,
    pub narration: String,
    pub visual: DistractionVisual,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// Tug-of-war telemetry for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveView {
    pub speed: f32,
    /// Direction of the dog's own drive (last heading when standing still)
    pub direction: Direction,
    pub pull_speed: f32,
    pub factor: DriveFactor,
}

/// Immutable session snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub status: Status,
    pub progress_pct: u32,
    pub time_left_seconds: u32,
    pub score: i64,
    pub stubbornness: u32,
    pub position: Vec2,
    pub facing: Direction,
    pub distraction: Option<DistractionView>,
    pub power_up: Option<PowerUpView>,
    pub obstacle: Option<Vec2>,
    pub drive: DriveView,
    pub flow_message: Option<String>,
    pub message: String,
    pub laps: u32,
}

impl Snapshot {
    pub fn capture(session: &Session, rules: &Rules) -> Self {
        let progress_pct = (session.progress / rules.target_progress * 100.0)
            .round()
            .clamp(0.0, 100.0) as u32;

        Self {
            mode: rules.mode,
            status: session.status,
            progress_pct,
            time_left_seconds: session.time_left_ms.div_ceil(1000),
            score: session.score.round() as i64,
            stubbornness: session.stubbornness.round() as u32,
            position: session.position,
            facing: session.facing,
            distraction: session.active_distraction.as_ref().map(|d| DistractionView {
                category: d.category,
                narration: d.narration.clone(),
                visual: d.visual,
                options: d
                    .options
                    .iter()
                    .map(|o| OptionView {
                        id: o.id.clone(),
                        label: o.label.clone(),
                    })
                    .collect(),
            }),
            power_up: session.active_power_up.map(|p| PowerUpView {
                kind: p.kind,
                pos: p.pos,
            }),
            obstacle: session.mobile_obstacle.map(|o| o.pos),
            drive: DriveView {
                speed: session.drive_velocity.abs(),
                direction: Direction::of(session.drive_velocity).unwrap_or(session.facing),
                pull_speed: session.pull_speed,
                factor: session.drive_factor.clone(),
            },
            flow_message: session.flow_message.as_ref().map(|m| m.text.clone()),
            message: session.message.clone(),
            laps: session.laps,
        }
    }
}
