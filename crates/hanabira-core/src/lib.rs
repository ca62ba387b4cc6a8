//! Core types shared by the hanabira crates.

use serde::{Deserialize, Serialize};

/// Minimum time between two executed simulation ticks (~30fps cap).
pub const FRAME_INTERVAL_MS: f64 = 33.0;

/// Delay between mounting the orchestrator and starting any effect.
pub const ACTIVATION_DELAY_MS: f64 = 300.0;

/// Delay before the petal field loads its second batch.
pub const PETAL_TOPUP_DELAY_MS: f64 = 500.0;

/// Y coordinate at which falling particles are spawned, just above the top edge.
pub const SPAWN_Y: f32 = -20.0;

/// One of the ambient effects the engine can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Falling cherry blossom petals.
    Sakura,
    /// Falling snowflakes.
    Snow,
    /// A static field of twinkling stars.
    Stars,
}

impl Effect {
    /// All effects in mount order.
    pub const ALL: [Effect; 3] = [Effect::Sakura, Effect::Snow, Effect::Stars];

    /// Get the display name of the effect.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Sakura => "sakura",
            Effect::Snow => "snow",
            Effect::Stars => "stars",
        }
    }

    /// Number of particles seeded when the effect starts.
    pub fn initial_population(&self) -> usize {
        match self {
            Effect::Sakura => 10,
            Effect::Snow => 30,
            Effect::Stars => 50,
        }
    }

    /// Population the field settles at once fully loaded.
    pub fn target_population(&self) -> usize {
        match self {
            Effect::Sakura => 20,
            Effect::Snow => 30,
            Effect::Stars => 50,
        }
    }

    /// Delay of the one-shot staggered load, if the effect seeds in two phases.
    pub fn staggered_load_delay_ms(&self) -> Option<f64> {
        match self {
            Effect::Sakura => Some(PETAL_TOPUP_DELAY_MS),
            Effect::Snow | Effect::Stars => None,
        }
    }

    /// Whether the whole population is regenerated on every resize.
    pub fn reseeds_on_resize(&self) -> bool {
        matches!(self, Effect::Stars)
    }
}

/// Which effects are switched on.
///
/// Missing keys deserialize as `false`, so `{ "stars": true }` is a valid
/// configuration enabling only the star field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub sakura: bool,
    pub snow: bool,
    pub stars: bool,
}

impl EffectsConfig {
    /// Check whether the given effect is switched on.
    pub fn is_enabled(&self, effect: Effect) -> bool {
        match effect {
            Effect::Sakura => self.sakura,
            Effect::Snow => self.snow,
            Effect::Stars => self.stars,
        }
    }

    /// Iterate over the enabled effects in mount order.
    pub fn enabled(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(|e| self.is_enabled(*e))
    }

    /// Check whether at least one effect is switched on.
    pub fn any(&self) -> bool {
        self.sakura || self.snow || self.stars
    }
}

/// Size of the drawable area in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
