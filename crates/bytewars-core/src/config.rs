//! Lane geometry and economy configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
pub use crate::error::ConfigError;

/// Geometry of the lane and the energy economy for a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Left edge of the player base.
    pub player_base_x: f64,
    /// Left edge of the enemy base.
    pub enemy_base_x: f64,
    pub base_width: f64,
    pub base_height: f64,
    pub unit_lane_y: f64,
    pub initial_energy: f64,
    pub max_energy: f64,
    /// Energy per second.
    pub energy_regen_rate: f64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player_base_x: PLAYER_BASE_X,
            enemy_base_x: ENEMY_BASE_X,
            base_width: BASE_WIDTH,
            base_height: BASE_HEIGHT,
            unit_lane_y: UNIT_LANE_Y,
            initial_energy: INITIAL_ENERGY,
            max_energy: MAX_ENERGY,
            energy_regen_rate: ENERGY_REGEN_RATE,
        }
    }
}

impl LaneConfig {
    /// Parse a (possibly partial) config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LaneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemy_base_x <= self.player_base_x + self.base_width {
            return Err(ConfigError::Invalid(
                "enemy base must sit to the right of the player base",
            ));
        }
        if self.base_width <= 0.0 {
            return Err(ConfigError::Invalid("base width must be positive"));
        }
        if self.max_energy <= 0.0 {
            return Err(ConfigError::Invalid("max energy must be positive"));
        }
        if self.initial_energy < 0.0 || self.initial_energy > self.max_energy {
            return Err(ConfigError::Invalid(
                "initial energy must lie within [0, max energy]",
            ));
        }
        if self.energy_regen_rate < 0.0 {
            return Err(ConfigError::Invalid("energy regen must not be negative"));
        }
        Ok(())
    }

    /// Where freshly deployed player units appear.
    pub fn player_spawn_x(&self) -> f64 {
        self.player_base_x + self.base_width + SPAWN_OFFSET
    }

    /// Where freshly spawned enemy units appear.
    pub fn enemy_spawn_x(&self) -> f64 {
        self.enemy_base_x - self.base_width - SPAWN_OFFSET
    }
}
