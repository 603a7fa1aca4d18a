//! Game rules and balance tuning
//!
//! Loaded from JSON when a rules file is given, otherwise the built-in
//! defaults are used.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How the session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Reaching the park wins; running out of time or patience loses
    Terminal,
    /// Reaching the park loops the walk in place and keeps scoring
    #[default]
    Continuous,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Terminal => "Terminal",
            Mode::Continuous => "Continuous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terminal" | "classic" => Some(Mode::Terminal),
            "continuous" | "loop" | "endless" => Some(Mode::Continuous),
            _ => None,
        }
    }

    /// Whether time and stubbornness can end the session
    pub fn has_loss(&self) -> bool {
        matches!(self, Mode::Terminal)
    }
}

/// A stretch of track that slows everyone down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainZone {
    pub start: f32,
    pub end: f32,
}

impl TerrainZone {
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x <= self.end
    }
}

/// Numeric constants driving the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub mode: Mode,

    // === Session ===
    /// Progress points needed to reach the park
    pub target_progress: f32,
    pub max_stubbornness: f32,
    pub start_time_ms: u32,
    pub start_stubbornness: f32,
    /// Fixed timestep length
    pub tick_ms: u32,

    // === Spawning (per-second probabilities) ===
    pub distraction_chance_per_second: f32,
    pub power_up_chance_per_second: f32,
    /// Pickups appear at least this many progress points ahead
    pub power_up_min_ahead: f32,
    pub power_up_max_ahead: f32,

    // === Stubbornness ===
    /// Accrued per second while a distraction is active
    pub passive_stubbornness_per_second: f32,
    /// Penalty for dashing into an active distraction
    pub blocked_dash_penalty: f32,

    // === Dash ===
    pub dash_distance: f32,
    pub dash_score: f32,

    // === Power-ups ===
    pub power_up_progress_boost: f32,
    pub power_up_time_bonus_ms: u32,
    pub power_up_stubbornness_drop: f32,
    pub power_up_score: f32,

    // === Movement ===
    /// Drive resamples happen on a hazard-rate draw
    pub drive_resample_chance_per_second: f32,
    pub drive_base_min: f32,
    pub drive_base_max: f32,
    pub drive_chase_min: f32,
    pub drive_chase_max: f32,
    /// Chance that a chasing dog heads the stimulus' way
    pub drive_chase_follow_chance: f32,
    /// Extra drive speed at full stubbornness (fraction of base)
    pub stubbornness_speed_gain: f32,
    pub pull_ceiling: f32,
    pub pull_floor: f32,
    pub pull_decay_per_second: f32,
    pub pull_recover_per_second: f32,
    pub hill_multiplier: f32,
    pub distraction_slow_multiplier: f32,
    pub hills: Vec<TerrainZone>,

    // === Score ===
    /// Score per pixel of forward movement
    pub score_per_forward_px: f32,
    pub score_per_progress_point: f32,
    pub score_per_stubbornness_point: f32,
    pub time_ms_per_score: f32,

    // === Cat actor ===
    pub obstacle_speed: f32,

    // === Continuous mode ===
    pub lap_bonus: f32,
    pub flow_message_ms: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            mode: Mode::Continuous,

            target_progress: 100.0,
            max_stubbornness: 100.0,
            start_time_ms: 60_000,
            start_stubbornness: 10.0,
            tick_ms: 100,

            distraction_chance_per_second: 0.2,
            power_up_chance_per_second: 0.14,
            power_up_min_ahead: 12.0,
            power_up_max_ahead: 18.0,

            passive_stubbornness_per_second: 7.0,
            blocked_dash_penalty: 4.0,

            dash_distance: 70.0,
            dash_score: 18.0,

            power_up_progress_boost: 6.0,
            power_up_time_bonus_ms: 4_000,
            power_up_stubbornness_drop: 14.0,
            power_up_score: 14.0,

            drive_resample_chance_per_second: 0.6,
            drive_base_min: 40.0,
            drive_base_max: 140.0,
            drive_chase_min: 165.0,
            drive_chase_max: 260.0,
            drive_chase_follow_chance: 0.9,
            stubbornness_speed_gain: 0.35,
            pull_ceiling: 300.0,
            pull_floor: 120.0,
            pull_decay_per_second: 60.0,
            pull_recover_per_second: 90.0,
            hill_multiplier: 0.72,
            distraction_slow_multiplier: 0.55,
            hills: vec![
                TerrainZone { start: 290.0, end: 430.0 },
                TerrainZone { start: 610.0, end: 760.0 },
                TerrainZone { start: 930.0, end: 1080.0 },
            ],

            score_per_forward_px: 0.08,
            score_per_progress_point: 9.0,
            score_per_stubbornness_point: 2.0,
            time_ms_per_score: 300.0,

            obstacle_speed: 260.0,

            lap_bonus: 100.0,
            flow_message_ms: 2_200,
        }
    }
}

impl Rules {
    /// Defaults with the given mode
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Tick length in seconds
    pub fn tick_seconds(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Terrain speed multiplier at world x
    pub fn terrain_multiplier(&self, x: f32) -> f32 {
        if self.hills.iter().any(|zone| zone.contains(x)) {
            self.hill_multiplier
        } else {
            1.0
        }
    }

    /// Parse rules from JSON (missing fields take their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let rules: Self = serde_json::from_str(json)?;
        Ok(rules.sanitized())
    }

    /// Load rules from a JSON file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default rules");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(rules) => {
                    log::info!("Loaded rules from {}", path.display());
                    rules
                }
                Err(err) => {
                    log::warn!("Invalid rules file {}: {err}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read rules file {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        let rate = |name: &str, value: f32| -> f32 {
            let fixed = value.clamp(0.0, 0.999);
            if fixed != value {
                log::warn!("Rule {name}={value} outside [0, 1), clamped to {fixed}");
            }
            fixed
        };
        self.distraction_chance_per_second =
            rate("distraction_chance_per_second", self.distraction_chance_per_second);
        self.power_up_chance_per_second =
            rate("power_up_chance_per_second", self.power_up_chance_per_second);
        self.drive_resample_chance_per_second = rate(
            "drive_resample_chance_per_second",
            self.drive_resample_chance_per_second,
        );
        self.drive_chase_follow_chance = self.drive_chase_follow_chance.clamp(0.0, 1.0);

        if self.target_progress <= 0.0 {
            log::warn!("Rule target_progress must be positive, using 100");
            self.target_progress = 100.0;
        }
        if self.max_stubbornness <= 0.0 {
            self.max_stubbornness = 100.0;
        }
        self.start_stubbornness = self.start_stubbornness.clamp(0.0, self.max_stubbornness);
        if self.tick_ms == 0 {
            log::warn!("Rule tick_ms must be positive, using 100");
            self.tick_ms = 100;
        }

        let non_negative = |name: &str, value: &mut f32| {
            if *value < 0.0 {
                log::warn!("Rule {name}={value} is negative, clamped to 0");
                *value = 0.0;
            }
        };
        non_negative("drive_base_min", &mut self.drive_base_min);
        non_negative("drive_base_max", &mut self.drive_base_max);
        non_negative("drive_chase_min", &mut self.drive_chase_min);
        non_negative("drive_chase_max", &mut self.drive_chase_max);
        non_negative("pull_floor", &mut self.pull_floor);
        non_negative("pull_ceiling", &mut self.pull_ceiling);
        non_negative("pull_decay_per_second", &mut self.pull_decay_per_second);
        non_negative("pull_recover_per_second", &mut self.pull_recover_per_second);
        non_negative("hill_multiplier", &mut self.hill_multiplier);
        non_negative("distraction_slow_multiplier", &mut self.distraction_slow_multiplier);
        if self.time_ms_per_score <= 0.0 {
            log::warn!("Rule time_ms_per_score must be positive, using 300");
            self.time_ms_per_score = 300.0;
        }

        let ordered = |min: &mut f32, max: &mut f32| {
            if *min > *max {
                std::mem::swap(min, max);
            }
        };
        ordered(&mut self.drive_base_min, &mut self.drive_base_max);
        ordered(&mut self.drive_chase_min, &mut self.drive_chase_max);
        ordered(&mut self.power_up_min_ahead, &mut self.power_up_max_ahead);
        ordered(&mut self.pull_floor, &mut self.pull_ceiling);

        self
    }
}
