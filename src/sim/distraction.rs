//! Distraction events
//!
//! A distraction is a short-lived event the player answers by picking one of
//! four options. Each category first rolls the dog's expected reaction from
//! context, then independently rerolls it to the opposite reaction with a
//! small fixed chance so the context never gives the answer away.

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::state::Direction;

/// Chance that the dog does the opposite of what the context suggests
pub const OPPOSITE_BEHAVIOR_CHANCE: f32 = 0.24;

/// Chance that a cat sighting turns into a chase
pub const CAT_CHASE_CHANCE: f32 = 0.66;

/// Distraction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistractionCategory {
    CatWalk,
    DogWalk,
    Rain,
}

impl DistractionCategory {
    /// Pick a category from one uniform roll (36% / 36% / 28%)
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.36 {
            DistractionCategory::CatWalk
        } else if roll < 0.72 {
            DistractionCategory::DogWalk
        } else {
            DistractionCategory::Rain
        }
    }

    /// Unresolved distractions clear themselves after this long
    pub fn lifetime_ms(&self) -> u32 {
        match self {
            DistractionCategory::CatWalk => 3_800,
            DistractionCategory::DogWalk => 3_200,
            DistractionCategory::Rain => 4_200,
        }
    }

    /// Narration when the distraction times out
    pub fn timeout_text(&self) -> &'static str {
        match self {
            DistractionCategory::CatWalk => "The cat dashed away.",
            DistractionCategory::DogWalk => "The other dog wandered off.",
            DistractionCategory::Rain => "The rain stopped.",
        }
    }

    /// Whether this category brings a moving actor into the scene
    pub fn has_obstacle(&self) -> bool {
        matches!(self, DistractionCategory::CatWalk)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistractionCategory::CatWalk => "cat",
            DistractionCategory::DogWalk => "dog",
            DistractionCategory::Rain => "rain",
        }
    }
}

/// Which way the cat walks relative to the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatHeading {
    Same,
    Opposite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DogSize {
    Small,
    Medium,
    Large,
}

impl DogSize {
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.4 {
            DogSize::Small
        } else if roll < 0.78 {
            DogSize::Medium
        } else {
            DogSize::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DogSize::Small => "small",
            DogSize::Medium => "medium",
            DogSize::Large => "large",
        }
    }
}

/// What the dog wants to do in the rain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainIntent {
    Stay,
    Tree,
}

/// Category-specific parameters for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DistractionVisual {
    CatWalk {
        heading: CatHeading,
        /// Direction the dog lunges, if it chases at all
        chase: Option<Direction>,
    },
    DogWalk {
        size: DogSize,
    },
    Rain {
        intent: RainIntent,
    },
}

/// How an active distraction biases the dog's own drive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DriveBias {
    /// Mostly pulls toward the stimulus, at chase speed
    Chase(Direction),
    /// Plants its feet with the given probability per resample
    Stop(f32),
    /// Unbiased, but the stimulus is the cause
    Wander,
}

/// Deltas applied by an option outcome
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Effects {
    /// Progress points (converted to track distance)
    pub progress: Option<f32>,
    pub stubbornness: Option<f32>,
    pub time_ms: Option<i32>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn progress(mut self, points: f32) -> Self {
        self.progress = Some(points);
        self
    }

    pub fn stubbornness(mut self, points: f32) -> Self {
        self.stubbornness = Some(points);
        self
    }

    pub fn time_ms(mut self, ms: i32) -> Self {
        self.time_ms = Some(ms);
        self
    }
}

/// A player response to a distraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistractionOption {
    pub id: String,
    pub label: String,
    pub success_probability: f32,
    pub success_text: String,
    pub fail_text: String,
    pub success_effects: Effects,
    pub fail_effects: Effects,
    pub dismiss_on_success: bool,
    pub dismiss_on_fail: bool,
}

impl DistractionOption {
    pub fn new(
        id: &str,
        label: &str,
        success_probability: f32,
        success_text: &str,
        fail_text: &str,
        success_effects: Effects,
        fail_effects: Effects,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            success_probability,
            success_text: success_text.to_string(),
            fail_text: fail_text.to_string(),
            success_effects,
            fail_effects,
            dismiss_on_success: true,
            dismiss_on_fail: false,
        }
    }
}

/// An active distraction event (immutable once built)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distraction {
    pub category: DistractionCategory,
    pub narration: String,
    pub visual: DistractionVisual,
    pub bias: DriveBias,
    pub options: [DistractionOption; 4],
}

impl Distraction {
    pub fn option(&self, id: &str) -> Option<&DistractionOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Build a random distraction of any category
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        match DistractionCategory::from_roll(rng.next_unit()) {
            DistractionCategory::CatWalk => build_cat_walk(rng),
            DistractionCategory::DogWalk => build_dog_walk(rng),
            DistractionCategory::Rain => build_rain(rng),
        }
    }
}

/// Maybe spawn a distraction this tick (at most one active at a time)
pub fn try_spawn_distraction(
    current: Option<Distraction>,
    dt_seconds: f32,
    rate: f32,
    rng: &mut dyn RandomSource,
) -> Option<Distraction> {
    if current.is_some() {
        return current;
    }
    if !rng.chance_per_second(rate, dt_seconds) {
        return None;
    }
    let distraction = Distraction::random(rng);
    log::debug!(
        "Spawned {} distraction: {}",
        distraction.category.as_str(),
        distraction.narration
    );
    Some(distraction)
}

/// Independent reroll to the opposite reaction
fn maybe_flip<T>(rng: &mut dyn RandomSource, expected: T, opposite: T) -> T {
    if rng.chance(OPPOSITE_BEHAVIOR_CHANCE) {
        opposite
    } else {
        expected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatIntent {
    SpeedUp,
    ChangeDirection,
}

pub fn build_cat_walk(rng: &mut dyn RandomSource) -> Distraction {
    let heading = if rng.chance(0.5) {
        CatHeading::Same
    } else {
        CatHeading::Opposite
    };
    let intent = match heading {
        CatHeading::Same => maybe_flip(rng, CatIntent::SpeedUp, CatIntent::ChangeDirection),
        CatHeading::Opposite => maybe_flip(rng, CatIntent::ChangeDirection, CatIntent::SpeedUp),
    };
    let chase = rng.chance(CAT_CHASE_CHANCE).then_some(match heading {
        CatHeading::Same => Direction::Forward,
        CatHeading::Opposite => Direction::Back,
    });

    let narration = match (heading, intent) {
        (CatHeading::Same, CatIntent::SpeedUp) => {
            "A cat trots along your route. The shiba wants to speed up and follow it."
        }
        (CatHeading::Same, CatIntent::ChangeDirection) => {
            "A cat trots along your route, but the shiba suddenly wants to turn away."
        }
        (CatHeading::Opposite, CatIntent::ChangeDirection) => {
            "A cat crosses against your route. The shiba tries to turn around."
        }
        (CatHeading::Opposite, CatIntent::SpeedUp) => {
            "A cat crosses the other way, yet the shiba wants to charge ahead."
        }
    };

    let options = match intent {
        CatIntent::SpeedUp => [
            DistractionOption::new(
                "cat_match",
                "Match pace forward",
                0.78,
                "Great timing. The shiba turns the excitement into speed.",
                "Too much pull. The shiba gets jittery.",
                Effects::none().progress(7.0).stubbornness(-4.0),
                Effects::none().stubbornness(4.0),
            ),
            DistractionOption::new(
                "cat_call",
                "Call and cue",
                0.58,
                "The cue lands. The shiba settles into a rhythm.",
                "The cue is ignored. Eyes locked on the cat.",
                Effects::none().progress(4.0).stubbornness(-3.0),
                Effects::none().stubbornness(4.0),
            ),
            DistractionOption::new(
                "cat_treat",
                "Treat redirect",
                0.72,
                "Treat accepted. The shiba follows you instead of the cat.",
                "Treat ignored. Still fixated.",
                Effects::none().progress(5.0).stubbornness(-6.0),
                Effects::none().stubbornness(3.0),
            ),
            DistractionOption::new(
                "cat_back",
                "Step backward",
                0.40,
                "The reset works, at the cost of momentum.",
                "The reset fails and eats extra time.",
                Effects::none()
                    .progress(-2.0)
                    .time_ms(-1_200)
                    .stubbornness(-2.0),
                Effects::none().time_ms(-2_400).stubbornness(2.0),
            ),
        ],
        CatIntent::ChangeDirection => [
            DistractionOption::new(
                "cat_back",
                "Step backward",
                0.76,
                "Good read. The shiba relaxes and reorients.",
                "Bad timing. The shiba digs in harder.",
                Effects::none().progress(-1.0).stubbornness(-5.0),
                Effects::none().stubbornness(4.0),
            ),
            DistractionOption::new(
                "cat_turn",
                "Turn around briefly",
                0.70,
                "A quick loop recenters the shiba.",
                "The detour burns time and focus.",
                Effects::none()
                    .progress(-2.0)
                    .stubbornness(-3.0)
                    .time_ms(-1_200),
                Effects::none().stubbornness(3.0).time_ms(-2_500),
            ),
            DistractionOption::new(
                "cat_treat",
                "Treat redirect",
                0.60,
                "The treat keeps the shiba on your route.",
                "The treat gets ignored this time.",
                Effects::none().progress(3.0).stubbornness(-4.0),
                Effects::none().stubbornness(3.0),
            ),
            DistractionOption::new(
                "cat_wait",
                "Pause and wait",
                0.45,
                "Patience pays off. The shiba calms down.",
                "Waiting only drains the clock.",
                Effects::none().stubbornness(-5.0).time_ms(-1_400),
                Effects::none().stubbornness(2.0).time_ms(-3_000),
            ),
        ],
    };

    Distraction {
        category: DistractionCategory::CatWalk,
        narration: narration.to_string(),
        visual: DistractionVisual::CatWalk { heading, chase },
        bias: match chase {
            Some(direction) => DriveBias::Chase(direction),
            None => DriveBias::Wander,
        },
        options,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DogIntent {
    Follow,
    RunAway,
}

pub fn build_dog_walk(rng: &mut dyn RandomSource) -> Distraction {
    let size = DogSize::from_roll(rng.next_unit());
    let intent = match size {
        DogSize::Large => maybe_flip(rng, DogIntent::RunAway, DogIntent::Follow),
        DogSize::Small | DogSize::Medium => {
            maybe_flip(rng, DogIntent::Follow, DogIntent::RunAway)
        }
    };

    let narration = match intent {
        DogIntent::Follow => format!(
            "A {} dog passes by. The shiba wants to tag along with it.",
            size.as_str()
        ),
        DogIntent::RunAway => format!(
            "A {} dog passes by. The shiba wants to get away from it.",
            size.as_str()
        ),
    };

    let options = match intent {
        DogIntent::Follow => [
            DistractionOption::new(
                "dog_follow",
                "Walk same direction",
                0.74,
                "Nice read. That energy becomes progress.",
                "The shiba overcommits and loses focus.",
                Effects::none().progress(6.0).stubbornness(-3.0),
                Effects::none().stubbornness(4.0),
            ),
            DistractionOption::new(
                "dog_focus",
                "Focus game",
                0.55,
                "The focus game clicks.",
                "Too excited to focus.",
                Effects::none().progress(4.0).stubbornness(-3.0),
                Effects::none().stubbornness(4.0),
            ),
            DistractionOption::new(
                "dog_treat",
                "Treat and lead",
                0.69,
                "The treat works and the shiba stays with you.",
                "The treat misses the moment.",
                Effects::none().progress(5.0).stubbornness(-4.0),
                Effects::none().stubbornness(3.0),
            ),
            DistractionOption::new(
                "dog_distance",
                "Create distance",
                0.42,
                "Distance helps, but slows the pace.",
                "The move fails and costs time.",
                Effects::none()
                    .progress(-2.0)
                    .stubbornness(-2.0)
                    .time_ms(-1_200),
                Effects::none().stubbornness(2.0).time_ms(-2_200),
            ),
        ],
        DogIntent::RunAway => [
            DistractionOption::new(
                "dog_distance",
                "Create distance",
                0.77,
                "Good call. The shiba feels safer right away.",
                "The shiba still panics and pulls.",
                Effects::none().progress(-1.0).stubbornness(-6.0),
                Effects::none().stubbornness(5.0),
            ),
            DistractionOption::new(
                "dog_cover",
                "Move behind tree",
                0.65,
                "Cover works. The shiba settles.",
                "Getting to cover is slow and messy.",
                Effects::none().stubbornness(-5.0).time_ms(-1_300),
                Effects::none().stubbornness(3.0).time_ms(-2_400),
            ),
            DistractionOption::new(
                "dog_voice",
                "Calm voice",
                0.52,
                "Your voice takes the edge off.",
                "Your voice gets ignored.",
                Effects::none().stubbornness(-4.0).progress(2.0),
                Effects::none().stubbornness(4.0),
            ),
            DistractionOption::new(
                "dog_brisk",
                "Brisk forward pass",
                0.46,
                "Pushing past works surprisingly well.",
                "The shiba freezes and refuses.",
                Effects::none().progress(5.0).stubbornness(-2.0),
                Effects::none().stubbornness(5.0),
            ),
        ],
    };

    Distraction {
        category: DistractionCategory::DogWalk,
        narration,
        visual: DistractionVisual::DogWalk { size },
        bias: match intent {
            DogIntent::Follow => DriveBias::Chase(Direction::Forward),
            DogIntent::RunAway => DriveBias::Chase(Direction::Back),
        },
        options,
    }
}

pub fn build_rain(rng: &mut dyn RandomSource) -> Distraction {
    let expected = if rng.chance(0.5) {
        RainIntent::Stay
    } else {
        RainIntent::Tree
    };
    let intent = match expected {
        RainIntent::Stay => maybe_flip(rng, RainIntent::Stay, RainIntent::Tree),
        RainIntent::Tree => maybe_flip(rng, RainIntent::Tree, RainIntent::Stay),
    };

    let narration = match intent {
        RainIntent::Stay => "Rain starts suddenly. The shiba wants to stay put and wait it out.",
        RainIntent::Tree => "Rain starts suddenly. The shiba heads for cover under a tree.",
    };

    let options = match intent {
        RainIntent::Stay => [
            DistractionOption::new(
                "rain_wait",
                "Wait briefly",
                0.73,
                "A short wait works. The shiba calms.",
                "Waiting too long kills the momentum.",
                Effects::none().stubbornness(-5.0).time_ms(-1_300),
                Effects::none().stubbornness(2.0).time_ms(-2_900),
            ),
            DistractionOption::new(
                "rain_jacket",
                "Put on rain jacket",
                0.62,
                "The jacket gets the shiba moving again.",
                "The jacket is a clumsy fight.",
                Effects::none()
                    .progress(3.0)
                    .stubbornness(-4.0)
                    .time_ms(-1_200),
                Effects::none().stubbornness(3.0).time_ms(-2_400),
            ),
            DistractionOption::new(
                "rain_dash",
                "Dash forward",
                0.44,
                "The dash works and the shiba follows.",
                "The dash backfires and she resists.",
                Effects::none().progress(6.0).stubbornness(-1.0),
                Effects::none().stubbornness(4.0),
            ),
            DistractionOption::new(
                "rain_tree",
                "Guide to tree cover",
                0.58,
                "A moment under the tree resets her.",
                "The tree detour wastes time.",
                Effects::none()
                    .progress(-1.0)
                    .stubbornness(-3.0)
                    .time_ms(-1_400),
                Effects::none().stubbornness(2.0).time_ms(-2_800),
            ),
        ],
        RainIntent::Tree => [
            DistractionOption::new(
                "rain_tree",
                "Guide to tree cover",
                0.78,
                "Perfect. She feels safe under the tree.",
                "The move fails and she gets stubborn.",
                Effects::none().stubbornness(-6.0).time_ms(-1_200),
                Effects::none().stubbornness(4.0).time_ms(-2_300),
            ),
            DistractionOption::new(
                "rain_jacket",
                "Put on rain jacket",
                0.64,
                "The jacket works as portable shelter.",
                "The jacket stalls everything.",
                Effects::none()
                    .progress(3.0)
                    .stubbornness(-3.0)
                    .time_ms(-1_300),
                Effects::none().stubbornness(3.0).time_ms(-2_600),
            ),
            DistractionOption::new(
                "rain_voice",
                "Reassure and cue",
                0.47,
                "She listens and stays with you.",
                "The rain drowns out your cue.",
                Effects::none().stubbornness(-4.0).progress(2.0),
                Effects::none().stubbornness(3.0),
            ),
            DistractionOption::new(
                "rain_push",
                "Keep moving forward",
                0.40,
                "It works this time.",
                "Too much pressure in the rain.",
                Effects::none().progress(5.0).stubbornness(-1.0),
                Effects::none().stubbornness(5.0),
            ),
        ],
    };

    Distraction {
        category: DistractionCategory::Rain,
        narration: narration.to_string(),
        visual: DistractionVisual::Rain { intent },
        bias: match intent {
            RainIntent::Stay => DriveBias::Stop(0.7),
            RainIntent::Tree => DriveBias::Stop(0.55),
        },
        options,
    }
}
