//! Events emitted by the simulation for audio and visual feedback.
//!
//! These are one-way notifications. The simulation never reads them back.

use serde::{Deserialize, Serialize};

use crate::enums::{Faction, ParticleKind, SoundCue};

/// Audio cue for the frontend sound system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub cue: SoundCue,
}

/// Visual effect requests for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FxEvent {
    /// Spawn `count` particles at a point.
    Particles {
        x: f64,
        y: f64,
        count: u32,
        kind: ParticleKind,
    },
    /// Floating damage number.
    DamageText {
        x: f64,
        y: f64,
        amount: f64,
        /// Side that took the damage.
        target: Faction,
    },
    /// Shake the screen with the given magnitude.
    ScreenShake { magnitude: f64 },
}
