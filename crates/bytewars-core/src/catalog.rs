//! Read-only archetype and stage catalogs.
//!
//! A `Catalog` is loaded once (built-in tables or JSON) and shared by
//! reference across matches. Lookups return `Option` rather than failing.

use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::archetypes::{EnemyArchetype, StageDefinition, UnitArchetype};
use crate::enums::Special;
use crate::error::CatalogError;

/// All archetype and stage tables for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub units: Vec<UnitArchetype>,
    pub enemies: Vec<EnemyArchetype>,
    pub stages: Vec<StageDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The shipped unit roster, enemy roster, and stage ladder.
    pub fn builtin() -> Self {
        Self {
            units: builtin_units(),
            enemies: builtin_enemies(),
            stages: builtin_stages(),
        }
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every record's invariants and id uniqueness within each table.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut unit_ids = HashSet::new();
        for unit in &self.units {
            unit.validate()?;
            if !unit_ids.insert(unit.id.as_str()) {
                return Err(CatalogError::DuplicateId(unit.id.clone()));
            }
        }

        let mut enemy_ids = HashSet::new();
        for enemy in &self.enemies {
            enemy.validate()?;
            if !enemy_ids.insert(enemy.id.as_str()) {
                return Err(CatalogError::DuplicateId(enemy.id.clone()));
            }
        }

        let mut stage_ids = HashSet::new();
        for stage in &self.stages {
            stage.validate()?;
            if !stage_ids.insert(stage.id) {
                return Err(CatalogError::DuplicateId(stage.id.to_string()));
            }
        }
        Ok(())
    }

    pub fn unit(&self, id: &str) -> Option<&UnitArchetype> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyArchetype> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn stage(&self, id: u32) -> Option<&StageDefinition> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// The stage with id `current_id + 1`, if any.
    pub fn next_stage(&self, current_id: u32) -> Option<&StageDefinition> {
        self.stage(current_id.checked_add(1)?)
    }

    /// Look up a stage, falling back to the first stage for unknown ids.
    pub fn stage_or_first(&self, id: u32) -> Option<&StageDefinition> {
        self.stage(id).or_else(|| self.stages.first())
    }

    /// Weighted random pick among enemies whose id is in `allowed`.
    ///
    /// Candidates keep catalog order. Zero-weight enemies are never drawn,
    /// and a pool with no positive weight yields `None`.
    pub fn select_enemy<R: Rng + ?Sized>(
        &self,
        allowed: &[String],
        rng: &mut R,
    ) -> Option<&EnemyArchetype> {
        let candidates: Vec<&EnemyArchetype> = self
            .enemies
            .iter()
            .filter(|e| allowed.iter().any(|id| *id == e.id))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let dist = WeightedIndex::new(candidates.iter().map(|e| e.spawn_weight)).ok()?;
        Some(candidates[dist.sample(rng)])
    }
}

fn builtin_units() -> Vec<UnitArchetype> {
    let unit = |id: &str,
                name: &str,
                hp,
                attack,
                attack_speed,
                range,
                speed,
                cost,
                cooldown_secs| UnitArchetype {
        id: id.to_string(),
        name: name.to_string(),
        hp,
        attack,
        attack_speed,
        range,
        speed,
        cost,
        cooldown_secs,
        special: Special::None,
        is_boss: false,
    };

    vec![
        // Fast, cheap scout.
        unit("byterunner", "ByteRunner", 80.0, 15.0, 1.5, 15.0, 3.0, 2, 2.0),
        // Heavy tank.
        unit("shieldgolem", "ShieldGolem", 400.0, 25.0, 0.8, 20.0, 1.0, 5, 8.0),
        unit("arcslinger", "ArcSlinger", 120.0, 20.0, 1.2, 150.0, 1.5, 3, 4.0),
        UnitArchetype {
            special: Special::Aoe { radius: 60.0 },
            ..unit("novaburst", "NovaBurst", 150.0, 40.0, 0.6, 100.0, 1.2, 6, 10.0)
        },
        UnitArchetype {
            special: Special::Aura { multiplier: 1.3 },
            ..unit("syncdrone", "SyncDrone", 100.0, 10.0, 1.0, 80.0, 1.5, 4, 6.0)
        },
        // Burns out after 8 seconds.
        UnitArchetype {
            special: Special::Summon {
                duration_ticks: 480,
            },
            ..unit("hexbit", "HexBit", 60.0, 50.0, 2.0, 25.0, 2.5, 5, 5.0)
        },
    ]
}

fn builtin_enemies() -> Vec<EnemyArchetype> {
    let enemy = |id: &str,
                 name: &str,
                 hp,
                 attack,
                 attack_speed,
                 range,
                 speed,
                 spawn_weight| EnemyArchetype {
        id: id.to_string(),
        name: name.to_string(),
        hp,
        attack,
        attack_speed,
        range,
        speed,
        special: Special::None,
        spawn_weight,
        is_boss: false,
    };

    vec![
        enemy("glitch", "Glitch", 60.0, 10.0, 1.2, 15.0, 1.5, 4.0),
        enemy("fortress", "Fortress", 300.0, 20.0, 0.7, 20.0, 0.8, 2.0),
        enemy("zapper", "Zapper", 80.0, 25.0, 1.0, 120.0, 1.2, 2.0),
        enemy("rush", "Rush", 40.0, 15.0, 1.5, 12.0, 4.0, 1.0),
        EnemyArchetype {
            is_boss: true,
            ..enemy("cyber_overlord", "Cyber Overlord", 800.0, 40.0, 2.0, 20.0, 0.8, 0.0)
        },
    ]
}

fn builtin_stages() -> Vec<StageDefinition> {
    let stage = |id,
                 name: &str,
                 description: &str,
                 enemy_base_hp,
                 player_base_hp,
                 spawn_interval_secs,
                 enemy_ids: &[&str],
                 max_enemies_per_wave,
                 total_waves| StageDefinition {
        id,
        name: name.to_string(),
        description: description.to_string(),
        player_base_hp,
        enemy_base_hp,
        spawn_interval_secs,
        enemy_ids: enemy_ids.iter().map(|s| s.to_string()).collect(),
        max_enemies_per_wave,
        total_waves,
    };

    vec![
        stage(
            1,
            "Gateway Protocol",
            "Tutorial stage. Learn the basics of unit deployment.",
            500.0,
            500.0,
            3.5,
            &["glitch"],
            2,
            10,
        ),
        stage(
            2,
            "Firewall Breach",
            "Heavy units appear. Prepare your defenses.",
            800.0,
            600.0,
            2.8,
            &["glitch", "fortress"],
            3,
            12,
        ),
        stage(
            3,
            "System Override",
            "All enemy types active. Maximum difficulty.",
            1200.0,
            700.0,
            2.2,
            &["glitch", "fortress", "zapper", "rush"],
            4,
            15,
        ),
        stage(
            4,
            "Neural Network",
            "Fast enemies incoming! Prepare your defenses.",
            1500.0,
            1000.0,
            2.5,
            &["rush", "glitch"],
            6,
            15,
        ),
        stage(
            5,
            "Data Core",
            "Heavy armor detected. High damage required.",
            2000.0,
            1200.0,
            4.0,
            &["fortress", "zapper"],
            4,
            12,
        ),
        stage(
            6,
            "System Root",
            "The source of corruption. Defeat the Overlord!",
            5000.0,
            2000.0,
            3.0,
            &["glitch", "fortress", "rush", "cyber_overlord"],
            3,
            10,
        ),
    ]
}
