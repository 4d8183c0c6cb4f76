//! Game state snapshot: the read-only view handed to the presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Faction, MatchResult};

/// Complete visible state of a match at a tick boundary.
///
/// Holds copies only; nothing in here aliases live entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub stage_id: u32,
    pub frame: u64,
    pub player_base_hp: f64,
    pub player_base_max_hp: f64,
    pub enemy_base_hp: f64,
    pub enemy_base_max_hp: f64,
    /// Whole energy units available.
    pub energy: u32,
    pub max_energy: u32,
    /// Remaining redeploy cooldown per unit archetype, in milliseconds.
    pub cooldowns: BTreeMap<String, f64>,
    pub is_running: bool,
    pub is_paused: bool,
    pub result: MatchResult,
    pub current_wave: u32,
    pub total_waves: u32,
    pub screen_shake: f64,
    pub units: Vec<UnitView>,
}

/// A unit on the lane, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: u64,
    pub archetype_id: String,
    pub faction: Faction,
    pub x: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub is_attacking: bool,
    pub hit_flash: u32,
}
