//! Factories for match setup: bases and freshly spawned units.

use bytewars_core::archetypes::{EnemyArchetype, StageDefinition, UnitArchetype};
use bytewars_core::config::LaneConfig;
use bytewars_core::enums::Faction;
use bytewars_core::types::LanePosition;

use crate::entity::{Base, Unit};

/// Build the player and enemy bases at full stage health.
pub fn build_bases(stage: &StageDefinition, lane: &LaneConfig) -> (Base, Base) {
    (
        Base::new(Faction::Player, stage.player_base_hp, lane),
        Base::new(Faction::Enemy, stage.enemy_base_hp, lane),
    )
}

/// A deployed player unit, placed just outside the player base.
pub fn deploy_unit(id: u64, archetype: &UnitArchetype, lane: &LaneConfig) -> Unit {
    let position = LanePosition::new(lane.player_spawn_x(), lane.unit_lane_y);
    Unit::from_unit_archetype(id, archetype, Faction::Player, position)
}

/// An enemy unit, placed just outside the enemy base.
pub fn enemy_unit(id: u64, archetype: &EnemyArchetype, lane: &LaneConfig) -> Unit {
    let position = LanePosition::new(lane.enemy_spawn_x(), lane.unit_lane_y);
    Unit::from_enemy_archetype(id, archetype, Faction::Enemy, position)
}
