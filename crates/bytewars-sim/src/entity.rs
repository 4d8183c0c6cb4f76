//! Mutable combat actors: lane units and the two bases.
//!
//! Units are created from archetypes and owned by the `GameState` that
//! spawned them. All per-tick mutation goes through the methods here.

use bytewars_core::archetypes::{EnemyArchetype, UnitArchetype};
use bytewars_core::config::LaneConfig;
use bytewars_core::constants::*;
use bytewars_core::enums::{Faction, Special};
use bytewars_core::types::LanePosition;

/// A live combatant on the lane.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Unique within a match, increasing in spawn order.
    pub id: u64,
    pub archetype_id: String,
    pub faction: Faction,
    pub position: LanePosition,
    pub hp: f64,
    pub max_hp: f64,
    pub attack: f64,
    /// Attack speed from the archetype, before any aura.
    pub base_attack_speed: f64,
    /// Attack speed after this tick's aura pass.
    pub attack_speed: f64,
    pub range: f64,
    pub speed: f64,
    pub special: Special,
    pub is_boss: bool,

    // --- Combat state ---
    /// Ticks until the next attack is allowed.
    pub attack_cooldown_ticks: u32,
    pub is_attacking: bool,
    /// Cosmetic; counts down every tick.
    pub hit_flash_timer: u32,
    /// Ticks left before a summon burns out. `None` for other units.
    pub remaining_life_ticks: Option<i64>,
}

impl Unit {
    /// Instantiate a player-roster archetype.
    pub fn from_unit_archetype(
        id: u64,
        archetype: &UnitArchetype,
        faction: Faction,
        position: LanePosition,
    ) -> Self {
        Self::new(
            id,
            &archetype.id,
            faction,
            position,
            CombatStats {
                hp: archetype.hp,
                attack: archetype.attack,
                attack_speed: archetype.attack_speed,
                range: archetype.range,
                speed: archetype.speed,
                special: archetype.special,
                is_boss: archetype.is_boss,
            },
        )
    }

    /// Instantiate an enemy archetype.
    pub fn from_enemy_archetype(
        id: u64,
        archetype: &EnemyArchetype,
        faction: Faction,
        position: LanePosition,
    ) -> Self {
        Self::new(
            id,
            &archetype.id,
            faction,
            position,
            CombatStats {
                hp: archetype.hp,
                attack: archetype.attack,
                attack_speed: archetype.attack_speed,
                range: archetype.range,
                speed: archetype.speed,
                special: archetype.special,
                is_boss: archetype.is_boss,
            },
        )
    }

    fn new(
        id: u64,
        archetype_id: &str,
        faction: Faction,
        position: LanePosition,
        stats: CombatStats,
    ) -> Self {
        let remaining_life_ticks = match stats.special {
            Special::Summon { duration_ticks } => Some(i64::from(duration_ticks)),
            _ => None,
        };

        Self {
            id,
            archetype_id: archetype_id.to_string(),
            faction,
            position,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            base_attack_speed: stats.attack_speed,
            attack_speed: stats.attack_speed,
            range: stats.range,
            speed: stats.speed,
            special: stats.special,
            is_boss: stats.is_boss,
            attack_cooldown_ticks: 0,
            is_attacking: false,
            hit_flash_timer: 0,
            remaining_life_ticks,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn direction(&self) -> f64 {
        self.faction.direction()
    }

    /// Step toward the opposing base unless engaged or dead.
    pub fn move_forward(&mut self) {
        if !self.is_attacking && self.is_alive() {
            self.position.x += self.speed * self.direction();
        }
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0);
        self.hit_flash_timer = UNIT_HIT_FLASH_TICKS;
    }

    pub fn update_cooldown(&mut self) {
        self.attack_cooldown_ticks = self.attack_cooldown_ticks.saturating_sub(1);
    }

    /// Burn one tick of summon lifetime. Returns true once it has run out.
    pub fn update_life(&mut self) -> bool {
        match self.remaining_life_ticks.as_mut() {
            Some(life) => {
                *life -= 1;
                *life <= 0
            }
            None => false,
        }
    }

    pub fn can_attack(&self) -> bool {
        self.attack_cooldown_ticks == 0 && self.is_alive()
    }

    /// Arm the attack timer from the current (possibly buffed) attack speed.
    pub fn start_attack(&mut self) {
        self.attack_cooldown_ticks = (f64::from(TICK_RATE) / self.attack_speed).round() as u32;
        self.is_attacking = true;
    }

    pub fn apply_aura_buff(&mut self, multiplier: f64) {
        self.attack_speed = self.base_attack_speed * multiplier;
    }

    pub fn reset_attack_speed(&mut self) {
        self.attack_speed = self.base_attack_speed;
    }

    pub fn aoe_radius(&self) -> Option<f64> {
        match self.special {
            Special::Aoe { radius } => Some(radius),
            _ => None,
        }
    }

    pub fn aura_multiplier(&self) -> Option<f64> {
        match self.special {
            Special::Aura { multiplier } => Some(multiplier),
            _ => None,
        }
    }

    pub fn decay_hit_flash(&mut self) {
        self.hit_flash_timer = self.hit_flash_timer.saturating_sub(1);
    }
}

/// Stats shared by unit and enemy archetypes.
struct CombatStats {
    hp: f64,
    attack: f64,
    attack_speed: f64,
    range: f64,
    speed: f64,
    special: Special,
    is_boss: bool,
}

/// A faction's headquarters. Stationary; loses the match at 0 hp.
#[derive(Debug, Clone, PartialEq)]
pub struct Base {
    pub faction: Faction,
    pub hp: f64,
    pub max_hp: f64,
    /// Top-left corner.
    pub position: LanePosition,
    pub width: f64,
    pub height: f64,
    pub hit_flash_timer: u32,
}

impl Base {
    pub fn new(faction: Faction, hp: f64, lane: &LaneConfig) -> Self {
        let x = match faction {
            Faction::Player => lane.player_base_x,
            Faction::Enemy => lane.enemy_base_x,
        };

        Self {
            faction,
            hp,
            max_hp: hp,
            position: LanePosition::new(x, lane.unit_lane_y - BASE_LANE_OFFSET_Y),
            width: lane.base_width,
            height: lane.base_height,
            hit_flash_timer: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Horizontal center; the point attackers measure range against.
    pub fn center_x(&self) -> f64 {
        self.position.x + self.width / 2.0
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0);
        self.hit_flash_timer = BASE_HIT_FLASH_TICKS;
    }

    pub fn decay_hit_flash(&mut self) {
        self.hit_flash_timer = self.hit_flash_timer.saturating_sub(1);
    }
}
