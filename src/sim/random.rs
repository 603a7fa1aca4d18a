//! Injected randomness
//!
//! Every draw the simulation makes goes through [`RandomSource`], so a
//! seeded PCG stream or a scripted sequence fully determines a playthrough.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::hazard_chance;

/// Uniform random draws
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Uniform draw in `[min, max)`
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }

    /// Bernoulli trial
    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }

    /// Hazard-rate trial for an event with per-second probability `rate`
    /// over a window of `seconds`
    fn chance_per_second(&mut self, rate: f32, seconds: f32) -> bool {
        self.chance(hazard_chance(rate, seconds))
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded PCG stream used for real sessions
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed sequence of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.5);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 0.999_999);
        }
        Self { values, cursor: 0 }
    }

    /// Always returns the same draw
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
