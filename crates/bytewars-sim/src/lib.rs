//! Simulation engine for ByteWars.
//!
//! Owns per-match state, runs the combat systems at a fixed tick rate,
//! and produces `GameStateSnapshot`s for the presentation layer.

pub mod engine;
pub mod entity;
pub mod feedback;
pub mod game_loop;
pub mod systems;
pub mod world_setup;

pub use bytewars_core as core;
pub use engine::{GameState, SimConfig};
pub use game_loop::GameLoop;

#[cfg(test)]
mod tests;
