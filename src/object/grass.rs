//! Growing grass
//!
//! Grass is food that matures with age. Its stage is a pure function of how
//! many ticks it has existed, and only ever moves forward:
//!
//! ```text
//! Seed --(sprout_tick)--> Sprout --(mature_tick)--> Mature
//! ```
//!
//! Calories come from a fixed per-stage table in [`GrassConfig`]. The registry
//! calls [`Grass::grow`] whenever it ages the plant, so the stage always
//! matches the current age between ticks.

use crate::config::GrassConfig;
use crate::render::Sprite;

pub const GRASS_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GrowthStage {
    Seed,
    Sprout,
    Mature,
}

impl GrowthStage {
    /// Stage a plant of the given age should be at.
    pub fn for_age(exist_ticks: u64, config: &GrassConfig) -> Self {
        if exist_ticks >= config.mature_tick {
            GrowthStage::Mature
        } else if exist_ticks >= config.sprout_tick {
            GrowthStage::Sprout
        } else {
            GrowthStage::Seed
        }
    }

    pub fn calories(&self, config: &GrassConfig) -> f32 {
        match self {
            GrowthStage::Seed => config.seed_calories,
            GrowthStage::Sprout => config.sprout_calories,
            GrowthStage::Mature => config.mature_calories,
        }
    }

    pub fn sprite(&self) -> Sprite {
        match self {
            GrowthStage::Seed => Sprite::Seed,
            GrowthStage::Sprout => Sprite::Sprout,
            GrowthStage::Mature => Sprite::MatureGrass,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grass {
    pub stage: GrowthStage,
    pub calories: f32,
    /// Thresholds and calories this plant was planted with
    config: GrassConfig,
}

impl Grass {
    pub fn new(config: &GrassConfig) -> Self {
        Grass {
            stage: GrowthStage::Seed,
            calories: GrowthStage::Seed.calories(config),
            config: config.clone(),
        }
    }

    /// Advances the growth stage from the plant's age. No-op once mature.
    pub fn grow(&mut self, exist_ticks: u64) {
        if self.stage == GrowthStage::Mature {
            return;
        }

        // max() keeps growth one-directional
        let stage = self.stage.max(GrowthStage::for_age(exist_ticks, &self.config));
        if stage != self.stage {
            self.stage = stage;
            self.calories = stage.calories(&self.config);
        }
    }

    pub fn pre_update(&mut self, exist_ticks: u64) {
        self.grow(exist_ticks);
    }
}
