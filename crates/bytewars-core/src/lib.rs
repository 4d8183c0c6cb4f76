//! Core types and definitions for the ByteWars lane simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! archetype records, catalogs, lane configuration, commands, events,
//! state snapshots, and constants. It has no dependency on any runtime.

pub mod archetypes;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
