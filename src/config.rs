//! Simulation configuration
//!
//! All tuning values live in one JSON document so they can be changed without a
//! rebuild. Every section is `#[serde(default)]`, so a config file only needs the
//! keys it overrides:
//!
//! ```json
//! {
//!     "seed": 7,
//!     "creature": { "max_speed": 3.0 },
//!     "gui": { "starting_budget": 150 }
//! }
//! ```
//!
//! Lookup order (see [`SimConfig::locate`]):
//! 1. Path given on the command line
//! 2. `<config dir>/calpal/config.json`
//! 3. `assets/config/calpal.json`
//! 4. Built-in defaults

use crate::error::ConfigError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Relative path of the config shipped next to the binary.
pub const BUNDLED_CONFIG_PATH: &str = "assets/config/calpal.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frame rate cap for the main loop
    pub target_fps: u32,
    /// How many ticks are averaged before the FPS caption is refreshed
    pub fps_sample_ticks: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "CalPal".to_string(),
            width: 900,
            height: 900,
            target_fps: 120,
            fps_sample_ticks: 30,
        }
    }
}

/// What happens to a creature once hunger or thirst runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathPolicy {
    /// Mark the creature for removal; it disappears on the next prune.
    Remove,
    /// Keep the creature in the scene as an inert corpse.
    Linger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub max_speed: f32,
    pub max_force: f32,
    /// Distance at which a creature snaps to its target
    pub arrival_radius: f32,
    /// Distance below which desired speed ramps down linearly
    pub slow_radius: f32,
    /// Collidable objects closer than this push the creature away
    pub avoid_radius: f32,
    /// Multiplier turning elapsed seconds into integration steps
    pub time_scale: f32,
    /// Upper bound of the random per-second drain applied to hunger or thirst
    pub drain_per_second: f32,
    /// A need ratio above this starts a seek for the scarcer resource
    pub seek_ratio: f32,
    pub seek_threshold_min: f32,
    pub seek_threshold_max: f32,
    pub death_policy: DeathPolicy,
    pub size: u32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        CreatureConfig {
            max_speed: 2.0,
            max_force: 0.1,
            arrival_radius: 10.0,
            slow_radius: 100.0,
            avoid_radius: 200.0,
            time_scale: 100.0,
            drain_per_second: 4.0,
            seek_ratio: 2.0,
            seek_threshold_min: 25.0,
            seek_threshold_max: 50.0,
            death_policy: DeathPolicy::Remove,
            size: 48,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Age in ticks at which a seed becomes a sprout
    pub sprout_tick: u64,
    /// Age in ticks at which a sprout becomes mature
    pub mature_tick: u64,
    pub seed_calories: f32,
    pub sprout_calories: f32,
    pub mature_calories: f32,
}

impl Default for GrassConfig {
    fn default() -> Self {
        GrassConfig {
            sprout_tick: 600,
            mature_tick: 1800,
            seed_calories: 10.0,
            sprout_calories: 30.0,
            mature_calories: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub kibble_calories: f32,
    pub kibble_happiness: f32,
    pub kibble_lifetime_ticks: Option<i64>,
    pub snack_calories: f32,
    pub snack_happiness: f32,
    pub snack_lifetime_ticks: Option<i64>,
}

impl Default for FoodConfig {
    fn default() -> Self {
        FoodConfig {
            kibble_calories: 40.0,
            kibble_happiness: 5.0,
            kibble_lifetime_ticks: None,
            snack_calories: 25.0,
            snack_happiness: 25.0,
            snack_lifetime_ticks: Some(3600),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub starting_budget: u32,
    pub max_budget: u32,
    /// Calories regained per second (0 disables regeneration)
    pub regen_per_second: f32,
    pub grass_cost: u32,
    pub kibble_cost: u32,
    pub snack_cost: u32,
    /// Cost of the `e` key, which buys nothing
    pub spend_cost: u32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        GuiConfig {
            starting_budget: 1000,
            max_budget: 1000,
            regen_per_second: 5.0,
            grass_cost: 100,
            kibble_cost: 200,
            snack_cost: 300,
            spend_cost: 10,
        }
    }
}

/// Initial scene, positioned in 900-unit layout space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub creatures: usize,
    pub grass: usize,
    pub pond: [f32; 2],
    pub shack: [f32; 2],
    /// Ticks per pond ripple frame
    pub pond_ripple_period: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            creatures: 3,
            grass: 4,
            pond: [225.0, 675.0],
            shack: [700.0, 200.0],
            pond_ripple_period: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub creature: CreatureConfig,
    pub grass: GrassConfig,
    pub food: FoodConfig,
    pub gui: GuiConfig,
    pub scene: SceneConfig,
    /// Sprite name -> PNG path. Sprites not listed are drawn as placeholders.
    pub sprites: HashMap<String, String>,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl SimConfig {
    /// Reads and validates a config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Picks the first config file that exists, in lookup order.
    ///
    /// An explicit path is returned even if it does not exist, so that a typo on
    /// the command line surfaces as an I/O error instead of silently falling back.
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        if explicit.is_some() {
            return explicit;
        }

        let user_config = dirs::config_dir().map(|dir| dir.join("calpal").join("config.json"));
        if let Some(path) = user_config.filter(|path| path.exists()) {
            return Some(path);
        }

        let bundled = PathBuf::from(BUNDLED_CONFIG_PATH);
        bundled.exists().then_some(bundled)
    }

    /// Loads the config following the lookup order, falling back to defaults.
    pub fn load(explicit: Option<PathBuf>) -> Result<(Self, ConfigSource), ConfigError> {
        match Self::locate(explicit) {
            Some(path) => {
                let config = Self::load_from_file(&path)?;
                info!("Loaded config from {}", path.display());
                Ok((config, ConfigSource::File(path)))
            }
            None => {
                warn!("No config file found, using built-in defaults");
                Ok((Self::default(), ConfigSource::Defaults))
            }
        }
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be non-zero"));
        }
        if self.window.target_fps == 0 {
            return Err(invalid("window.target_fps", "must be non-zero"));
        }
        if self.window.fps_sample_ticks == 0 {
            return Err(invalid("window.fps_sample_ticks", "must be non-zero"));
        }
        if self.creature.max_speed <= 0.0 {
            return Err(invalid("creature.max_speed", "must be positive"));
        }
        if self.creature.max_force <= 0.0 {
            return Err(invalid("creature.max_force", "must be positive"));
        }
        if self.creature.slow_radius <= 0.0 {
            return Err(invalid("creature.slow_radius", "must be positive"));
        }
        if self.creature.drain_per_second < 0.0 {
            return Err(invalid("creature.drain_per_second", "must not be negative"));
        }
        if self.creature.seek_threshold_min > self.creature.seek_threshold_max {
            return Err(invalid(
                "creature.seek_threshold_min",
                "must not exceed seek_threshold_max",
            ));
        }
        if self.grass.sprout_tick >= self.grass.mature_tick {
            return Err(invalid("grass.sprout_tick", "must be below mature_tick"));
        }
        if self.gui.starting_budget > self.gui.max_budget {
            return Err(invalid("gui.starting_budget", "must not exceed max_budget"));
        }
        if self.gui.regen_per_second < 0.0 {
            return Err(invalid("gui.regen_per_second", "must not be negative"));
        }
        if self.scene.pond_ripple_period == 0 {
            return Err(invalid("scene.pond_ripple_period", "must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.target_fps, 120);
        assert_eq!(config.window.fps_sample_ticks, 30);
        assert_eq!(config.gui.grass_cost, 100);
        assert_eq!(config.gui.kibble_cost, 200);
        assert_eq!(config.gui.snack_cost, 300);
        assert_eq!(config.gui.spend_cost, 10);
        assert_eq!(config.creature.avoid_radius, 200.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "gui": { "starting_budget": 150 } }"#)
            .expect("valid json");

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.gui.starting_budget, 150);
        assert_eq!(config.gui.grass_cost, 100);
        assert_eq!(config.creature.max_speed, 2.0);
    }

    #[test]
    fn test_death_policy_snake_case() {
        let config = SimConfig::from_json(r#"{ "creature": { "death_policy": "linger" } }"#)
            .expect("valid json");
        assert_eq!(config.creature.death_policy, DeathPolicy::Linger);
    }

    #[test]
    fn test_validate_rejects_inverted_grass_thresholds() {
        let mut config = SimConfig::default();
        config.grass.sprout_tick = 2000;

        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "grass.sprout_tick"),
            other => panic!("expected invalid grass thresholds, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_inverted_seek_range() {
        let mut config = SimConfig::default();
        config.creature.seek_threshold_min = 60.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bundled_config_parses_and_validates() {
        let config = SimConfig::from_json(include_str!("../assets/config/calpal.json"))
            .expect("bundled config parses");
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, None);
        assert_eq!(config.food.snack_lifetime_ticks, Some(3600));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let result = SimConfig::load(Some(PathBuf::from("does/not/exist.json")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
