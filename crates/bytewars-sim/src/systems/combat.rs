//! Combat system: targeting, movement and damage for one attacking side.
//!
//! Called twice per tick, players first. Each living attacker either burns
//! out (summons), engages the nearest living defender, hits the opposing
//! base, or advances along the lane. The base is only a target once the
//! opposing roster has no living units at all; a living defender anywhere
//! on the lane keeps the attacker walking toward it.

use bytewars_core::config::LaneConfig;
use bytewars_core::constants::*;
use bytewars_core::enums::{ParticleKind, SoundCue};
use bytewars_core::types::lane_distance;

use crate::entity::{Base, Unit};
use crate::feedback::Feedback;

/// Resolve one side's attacks against the opposing roster and base.
pub fn run(
    attackers: &mut [Unit],
    defenders: &mut [Unit],
    target_base: &mut Base,
    lane: &LaneConfig,
    feedback: &mut Feedback,
) {
    for attacker in attackers.iter_mut() {
        if !attacker.is_alive() {
            continue;
        }

        if attacker.update_life() {
            attacker.hp = 0.0;
            continue;
        }

        attacker.update_cooldown();

        match nearest_defender(attacker, defenders) {
            Some((index, distance)) if distance <= attacker.range => {
                attacker.is_attacking = true;
                if attacker.can_attack() {
                    strike(attacker, defenders, index, feedback);
                    attacker.start_attack();
                }
            }
            None if (attacker.position.x - target_base.center_x()).abs() <= attacker.range => {
                attacker.is_attacking = true;
                if attacker.can_attack() {
                    hit_base(attacker.attack, target_base, lane, feedback);
                    attacker.start_attack();
                }
            }
            _ => {
                attacker.is_attacking = false;
                attacker.move_forward();
            }
        }
    }
}

/// Index and distance of the closest living defender. Ties keep the
/// earliest in roster order.
fn nearest_defender(attacker: &Unit, defenders: &[Unit]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, defender) in defenders.iter().enumerate() {
        if !defender.is_alive() {
            continue;
        }
        let distance = lane_distance(&attacker.position, &defender.position);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best
}

fn strike(attacker: &Unit, defenders: &mut [Unit], target: usize, feedback: &mut Feedback) {
    match attacker.aoe_radius() {
        Some(radius) => {
            let center = defenders[target].position;
            for defender in defenders.iter_mut() {
                if defender.is_alive() && lane_distance(&defender.position, &center) <= radius {
                    deal_damage(defender, attacker.attack, feedback);
                }
            }
        }
        None => deal_damage(&mut defenders[target], attacker.attack, feedback),
    }
}

fn deal_damage(target: &mut Unit, amount: f64, feedback: &mut Feedback) {
    target.take_damage(amount);

    let (x, y) = (target.position.x, target.position.y);
    feedback.particles(x, y - SPARK_OFFSET_Y, HIT_SPARK_COUNT, ParticleKind::Spark);
    feedback.damage_text(x, y - DAMAGE_TEXT_OFFSET_Y, amount, target.faction);
    feedback.sound(SoundCue::Hit);

    if !target.is_alive() {
        feedback.particles(
            x,
            y - SPARK_OFFSET_Y,
            KILL_EXPLOSION_COUNT,
            ParticleKind::Explosion,
        );
        feedback.sound(SoundCue::Explosion);
    }
}

fn hit_base(amount: f64, base: &mut Base, lane: &LaneConfig, feedback: &mut Feedback) {
    base.take_damage(amount);

    let x = base.center_x();
    feedback.shake(BASE_HIT_SCREEN_SHAKE);
    feedback.particles(
        x,
        lane.canvas_height - BASE_SPARK_OFFSET_Y,
        BASE_SPARK_COUNT,
        ParticleKind::Spark,
    );
    feedback.damage_text(x, lane.canvas_height - BASE_TEXT_OFFSET_Y, amount, base.faction);
    feedback.sound(SoundCue::Explosion);
}
