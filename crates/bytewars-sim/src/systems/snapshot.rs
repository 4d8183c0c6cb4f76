//! Snapshot system: builds a `GameStateSnapshot` from the current match.
//!
//! Read-only; never mutates the state.

use bytewars_core::state::{GameStateSnapshot, UnitView};

use crate::engine::GameState;
use crate::entity::Unit;

pub fn build_snapshot(state: &GameState) -> GameStateSnapshot {
    GameStateSnapshot {
        stage_id: state.stage.id,
        frame: state.time.frame,
        player_base_hp: state.player_base.hp,
        player_base_max_hp: state.player_base.max_hp,
        enemy_base_hp: state.enemy_base.hp,
        enemy_base_max_hp: state.enemy_base.max_hp,
        energy: state.energy.current().floor() as u32,
        max_energy: state.energy.max().floor() as u32,
        cooldowns: state.cooldowns.as_map().clone(),
        is_running: state.running,
        is_paused: state.paused,
        result: state.result,
        current_wave: state.waves.current_wave(),
        total_waves: state.stage.total_waves,
        screen_shake: state.feedback.screen_shake(),
        units: state
            .player_units
            .iter()
            .chain(state.enemy_units.iter())
            .map(build_unit_view)
            .collect(),
    }
}

fn build_unit_view(unit: &Unit) -> UnitView {
    UnitView {
        id: unit.id,
        archetype_id: unit.archetype_id.clone(),
        faction: unit.faction,
        x: unit.position.x,
        hp: unit.hp,
        max_hp: unit.max_hp,
        is_attacking: unit.is_attacking,
        hit_flash: unit.hit_flash_timer,
    }
}
