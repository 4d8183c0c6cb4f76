//! Systems that operate on a match each tick.
//!
//! Systems are plain functions over the pieces of `GameState` they touch.
//! They hold no state of their own beyond the small ledgers defined here.

pub mod aura;
pub mod cleanup;
pub mod combat;
pub mod economy;
pub mod snapshot;
pub mod wave_spawner;
