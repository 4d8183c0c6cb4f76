//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side of the lane a unit or base fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    /// Sign of movement along x: the player advances right, the enemy left.
    pub fn direction(self) -> f64 {
        match self {
            Faction::Player => 1.0,
            Faction::Enemy => -1.0,
        }
    }
}

/// Special ability carried by an archetype, with its parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Special {
    #[default]
    None,
    /// Damage splashes to every defender within `radius` of the primary target.
    Aoe { radius: f64 },
    /// Passive attack-speed multiplier for nearby allies.
    Aura { multiplier: f64 },
    /// Self-destructs after `duration_ticks`.
    Summon { duration_ticks: u32 },
}

impl Special {
    /// Reject parameters that would stall or invert combat.
    pub fn validate(&self) -> Result<(), &'static str> {
        match *self {
            Special::Aoe { radius } if radius.is_nan() || radius < 0.0 => {
                Err("aoe radius must not be negative")
            }
            Special::Aura { multiplier } if multiplier <= 0.0 || !multiplier.is_finite() => {
                Err("aura multiplier must be a positive finite number")
            }
            Special::Summon { duration_ticks: 0 } => Err("summon duration must be positive"),
            _ => Ok(()),
        }
    }
}

/// Outcome of a match. Leaves `Ongoing` exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    #[default]
    Ongoing,
    Win,
    Lose,
}

/// Sound cues requested by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Spawn,
    Hit,
    Explosion,
}

/// Particle burst style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Spark,
    Explosion,
}
