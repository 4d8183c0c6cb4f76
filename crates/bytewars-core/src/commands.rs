//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are applied at frame boundaries, never in the middle of a tick.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Deploy a unit from the player roster. Rejected silently when energy,
    /// cooldown, or match state do not allow it.
    SpawnUnit { archetype_id: String },
    /// Attach the scheduler to the frame source and mark the match running.
    Start,
    /// Detach the scheduler from the frame source.
    Stop,
    /// Suspend simulation stepping.
    Pause,
    /// Resume simulation stepping.
    Resume,
    /// Reinitialise all match state to the stage defaults.
    Reset,
}
