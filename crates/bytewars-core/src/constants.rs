//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per fixed simulation step.
pub const STEP_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Upper bound on real elapsed time consumed by a single frame callback (ms).
/// Anything beyond this is dropped instead of being caught up.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

// --- Lane geometry defaults ---

pub const CANVAS_WIDTH: f64 = 1200.0;
pub const CANVAS_HEIGHT: f64 = 400.0;
pub const PLAYER_BASE_X: f64 = 50.0;
pub const ENEMY_BASE_X: f64 = 1150.0;
pub const BASE_WIDTH: f64 = 60.0;
pub const BASE_HEIGHT: f64 = 120.0;

/// Vertical position of the unit lane.
pub const UNIT_LANE_Y: f64 = 280.0;

/// Gap between a base's edge and a freshly spawned unit.
pub const SPAWN_OFFSET: f64 = 10.0;

/// Bases are drawn this far above the lane.
pub const BASE_LANE_OFFSET_Y: f64 = 60.0;

// --- Economy ---

pub const INITIAL_ENERGY: f64 = 5.0;
pub const MAX_ENERGY: f64 = 10.0;

/// Energy regenerated per second.
pub const ENERGY_REGEN_RATE: f64 = 1.0;

// --- Combat ---

/// Horizontal reach of a support unit's aura.
pub const AURA_RADIUS: f64 = 100.0;

/// Hit flash duration for units (ticks).
pub const UNIT_HIT_FLASH_TICKS: u32 = 10;

/// Hit flash duration for bases (ticks).
pub const BASE_HIT_FLASH_TICKS: u32 = 15;

/// Screen shake magnitude applied when a base is struck.
pub const BASE_HIT_SCREEN_SHAKE: f64 = 5.0;

/// Screen shake decays by `dt / SCREEN_SHAKE_DECAY_MS` per tick.
pub const SCREEN_SHAKE_DECAY_MS: f64 = 16.0;

// --- Effects ---

pub const HIT_SPARK_COUNT: u32 = 3;
pub const KILL_EXPLOSION_COUNT: u32 = 10;
pub const BASE_SPARK_COUNT: u32 = 5;

/// Damage numbers float this far above the unit.
pub const DAMAGE_TEXT_OFFSET_Y: f64 = 40.0;

/// Hit sparks are emitted this far above the unit.
pub const SPARK_OFFSET_Y: f64 = 20.0;

/// Base-hit sparks and damage numbers sit this far above the canvas bottom.
pub const BASE_SPARK_OFFSET_Y: f64 = 60.0;
pub const BASE_TEXT_OFFSET_Y: f64 = 100.0;
