//! Immutable stat templates for units, enemies, and stages.
//!
//! Archetypes are pure data. Live combatants are created from them by the
//! simulation and never write back.

use serde::{Deserialize, Serialize};

use crate::enums::Special;
use crate::error::CatalogError;

/// A deployable player unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitArchetype {
    pub id: String,
    pub name: String,
    pub hp: f64,
    pub attack: f64,
    /// Attacks per second.
    pub attack_speed: f64,
    /// Reach in lane units.
    pub range: f64,
    /// Lane units per tick.
    pub speed: f64,
    /// Energy cost to deploy.
    pub cost: u32,
    /// Redeploy cooldown in seconds.
    pub cooldown_secs: f64,
    #[serde(default)]
    pub special: Special,
    #[serde(default)]
    pub is_boss: bool,
}

/// An enemy type spawned by the wave policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub id: String,
    pub name: String,
    pub hp: f64,
    pub attack: f64,
    pub attack_speed: f64,
    pub range: f64,
    pub speed: f64,
    #[serde(default)]
    pub special: Special,
    /// Relative selection frequency. Zero keeps the enemy out of random
    /// draws while still allowing scripted spawns.
    pub spawn_weight: f64,
    #[serde(default)]
    pub is_boss: bool,
}

/// Per-stage difficulty parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub player_base_hp: f64,
    pub enemy_base_hp: f64,
    pub spawn_interval_secs: f64,
    /// Enemy ids the wave policy may draw from.
    pub enemy_ids: Vec<String>,
    pub max_enemies_per_wave: u32,
    pub total_waves: u32,
}

impl UnitArchetype {
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason| CatalogError::InvalidUnit {
            id: self.id.clone(),
            reason,
        };
        if self.cost == 0 {
            return Err(invalid("cost must be positive"));
        }
        if self.hp <= 0.0 {
            return Err(invalid("hp must be positive"));
        }
        if self.attack_speed <= 0.0 {
            return Err(invalid("attack speed must be positive"));
        }
        if self.cooldown_secs < 0.0 {
            return Err(invalid("cooldown must not be negative"));
        }
        self.special.validate().map_err(invalid)
    }
}

impl EnemyArchetype {
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason| CatalogError::InvalidEnemy {
            id: self.id.clone(),
            reason,
        };
        if self.hp <= 0.0 {
            return Err(invalid("hp must be positive"));
        }
        if self.attack_speed <= 0.0 {
            return Err(invalid("attack speed must be positive"));
        }
        if self.spawn_weight < 0.0 || !self.spawn_weight.is_finite() {
            return Err(invalid("spawn weight must be a finite non-negative number"));
        }
        self.special.validate().map_err(invalid)
    }
}

impl StageDefinition {
    /// Checks structural invariants. An empty or unknown enemy pool is
    /// allowed: such a stage simply never spawns.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason| CatalogError::InvalidStage {
            id: self.id,
            reason,
        };
        if self.total_waves < 1 {
            return Err(invalid("total waves must be at least 1"));
        }
        if self.player_base_hp <= 0.0 || self.enemy_base_hp <= 0.0 {
            return Err(invalid("base hp must be positive"));
        }
        if self.spawn_interval_secs <= 0.0 {
            return Err(invalid("spawn interval must be positive"));
        }
        Ok(())
    }
}
