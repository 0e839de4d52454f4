//! Game configuration.
//!
//! Loaded from an optional JSON file; every field has a default so an empty
//! object is a valid config. Rule data (stats, terrain, costs) is not
//! configurable.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::battle::{AiStyle, BattleConfig, Scenario};
use crate::error::ConfigError;

/// Default tree scattering seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default fraction of eligible overworld tiles that get a tree.
pub const DEFAULT_TREE_DENSITY: f64 = 0.15;

/// Default enemy phase delay in milliseconds.
pub const DEFAULT_ENEMY_PHASE_DELAY_MS: u64 = 400;

/// Tunable game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed for overworld tree scattering.
    pub seed: u64,
    /// Tree density in `0.0..=1.0`.
    pub tree_density: f64,
    /// Pause before the enemy phase, in milliseconds.
    pub enemy_phase_delay_ms: u64,
    /// Roster seeding policy.
    pub scenario: Scenario,
    /// AI step preference order.
    pub ai_style: AiStyle,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tree_density: DEFAULT_TREE_DENSITY,
            enemy_phase_delay_ms: DEFAULT_ENEMY_PHASE_DELAY_MS,
            scenario: Scenario::default(),
            ai_style: AiStyle::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON for
    /// this struct, or holds an out-of-range value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.tree_density) {
            return Err(ConfigError::Invalid {
                field: "tree_density",
                reason: format!("{} is outside 0.0..=1.0", self.tree_density),
            });
        }
        Ok(())
    }

    /// Battle settings derived from this config.
    #[must_use]
    pub const fn battle(&self) -> BattleConfig {
        BattleConfig {
            enemy_phase_delay: Duration::from_millis(self.enemy_phase_delay_ms),
            ai_style: self.ai_style,
            scenario: self.scenario,
        }
    }
}
