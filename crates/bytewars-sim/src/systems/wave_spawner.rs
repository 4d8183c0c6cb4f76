//! Wave spawning policy: a fixed-interval spawn timer and spawn-count waves.
//!
//! Waves advance by how many enemies they have produced, not by elapsed
//! time or by clearing the lane. The tick that closes a full wave advances
//! the wave counter instead of spawning.

use bytewars_core::archetypes::StageDefinition;

/// What the spawn timer should do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStep {
    /// All waves are done; nothing spawns.
    Finished,
    /// The current wave was full; moved on to this wave index.
    Advanced(u32),
    /// The current wave has room for another enemy.
    Spawn,
}

/// Wave and spawn-timer bookkeeping for one match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveProgress {
    current_wave: u32,
    spawned_this_wave: u32,
    /// Seconds since the timer last fired.
    spawn_accumulator_secs: f64,
}

impl WaveProgress {
    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn spawned_this_wave(&self) -> u32 {
        self.spawned_this_wave
    }

    /// Advance the spawn timer. Returns true (and rewinds it) when the
    /// stage's spawn interval has elapsed.
    pub fn tick_timer(&mut self, dt_ms: f64, interval_secs: f64) -> bool {
        self.spawn_accumulator_secs += dt_ms / 1000.0;
        if self.spawn_accumulator_secs >= interval_secs {
            self.spawn_accumulator_secs = 0.0;
            true
        } else {
            false
        }
    }

    /// Decide the outcome of a spawn attempt, advancing the wave when the
    /// current one is full.
    pub fn next_step(&mut self, stage: &StageDefinition) -> WaveStep {
        if self.current_wave >= stage.total_waves {
            return WaveStep::Finished;
        }
        if self.spawned_this_wave >= stage.max_enemies_per_wave {
            self.current_wave += 1;
            self.spawned_this_wave = 0;
            return WaveStep::Advanced(self.current_wave);
        }
        WaveStep::Spawn
    }

    /// Count an enemy that was actually placed on the lane.
    pub fn record_spawn(&mut self) {
        self.spawned_this_wave += 1;
    }
}
