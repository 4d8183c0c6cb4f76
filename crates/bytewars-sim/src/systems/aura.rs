//! Aura pass: recompute every unit's attack speed from scratch.
//!
//! All units are reset to base speed first, then each living player aura
//! unit buffs the other living player units within `AURA_RADIUS`. Overlaps
//! do not stack; the aura applied last in roster order wins.

use bytewars_core::constants::AURA_RADIUS;

use crate::entity::Unit;

pub fn run(player_units: &mut [Unit], enemy_units: &mut [Unit]) {
    for unit in player_units.iter_mut().chain(enemy_units.iter_mut()) {
        unit.reset_attack_speed();
    }

    let sources: Vec<(u64, f64, f64)> = player_units
        .iter()
        .filter(|u| u.is_alive())
        .filter_map(|u| u.aura_multiplier().map(|m| (u.id, u.position.x, m)))
        .collect();

    for (source_id, source_x, multiplier) in sources {
        for ally in player_units.iter_mut() {
            if ally.id != source_id
                && ally.is_alive()
                && (ally.position.x - source_x).abs() <= AURA_RADIUS
            {
                ally.apply_aura_buff(multiplier);
            }
        }
    }
}
