//! ByteWars headless host.
//!
//! Runs a match on a dedicated game-loop thread that acts as the frame
//! source for the simulation's fixed-timestep scheduler. Commands arrive
//! over a channel; the latest snapshot is published to a shared slot.

pub mod control;
pub mod game_loop;
pub mod state;

pub use bytewars_core as core;
