//! Cleanup: evict dead units and decay per-tick cosmetic timers.

use crate::entity::{Base, Unit};
use crate::feedback::Feedback;

/// Drop every unit with hp 0, preserving roster order.
pub fn evict_dead(units: &mut Vec<Unit>) {
    units.retain(Unit::is_alive);
}

pub fn decay_cosmetics(
    player_units: &mut [Unit],
    enemy_units: &mut [Unit],
    player_base: &mut Base,
    enemy_base: &mut Base,
    feedback: &mut Feedback,
    dt_ms: f64,
) {
    for unit in player_units.iter_mut().chain(enemy_units.iter_mut()) {
        unit.decay_hit_flash();
    }
    player_base.decay_hit_flash();
    enemy_base.decay_hit_flash();
    feedback.decay_screen_shake(dt_ms);
}
