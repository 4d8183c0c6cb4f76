//! Simulation engine: one match on one stage.
//!
//! `GameState` owns both bases, both rosters, the energy economy and the
//! wave spawner, runs every system in a fixed order each tick and produces
//! `GameStateSnapshot`s. Completely headless, so matches are reproducible
//! from a seed in tests.

use std::sync::Arc;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bytewars_core::archetypes::StageDefinition;
use bytewars_core::catalog::Catalog;
use bytewars_core::commands::PlayerCommand;
use bytewars_core::config::LaneConfig;
use bytewars_core::enums::{MatchResult, SoundCue};
use bytewars_core::events::{AudioEvent, FxEvent};
use bytewars_core::state::GameStateSnapshot;
use bytewars_core::types::SimTime;

use crate::entity::{Base, Unit};
use crate::feedback::Feedback;
use crate::systems;
use crate::systems::economy::{CooldownTable, EnergyPool};
use crate::systems::wave_spawner::{WaveProgress, WaveStep};
use crate::world_setup;

/// Configuration for starting a new match.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    pub lane: LaneConfig,
    /// Archetype and stage data, shared between matches.
    pub catalog: Arc<Catalog>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            lane: LaneConfig::default(),
            catalog: Arc::new(Catalog::builtin()),
        }
    }
}

/// All mutable state of a single match.
pub struct GameState {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) lane: LaneConfig,
    pub(crate) stage: StageDefinition,
    seed: u64,
    rng: ChaCha8Rng,

    pub(crate) player_base: Base,
    pub(crate) enemy_base: Base,
    /// Spawn order; iteration order for targeting and ties.
    pub(crate) player_units: Vec<Unit>,
    pub(crate) enemy_units: Vec<Unit>,
    next_unit_id: u64,

    pub(crate) energy: EnergyPool,
    pub(crate) cooldowns: CooldownTable,
    pub(crate) waves: WaveProgress,

    pub(crate) result: MatchResult,
    pub(crate) running: bool,
    pub(crate) paused: bool,
    pub(crate) time: SimTime,
    pub(crate) feedback: Feedback,
}

impl GameState {
    /// Set up a fresh, not yet running match on `stage`.
    pub fn new(stage: StageDefinition, config: SimConfig) -> Self {
        let SimConfig {
            seed,
            lane,
            catalog,
        } = config;

        for id in &stage.enemy_ids {
            if catalog.enemy(id).is_none() {
                warn!("Stage {} references unknown enemy '{}'", stage.id, id);
            }
        }

        let (player_base, enemy_base) = world_setup::build_bases(&stage, &lane);
        let cooldowns = CooldownTable::ready(catalog.units.iter().map(|u| u.id.as_str()));

        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            energy: EnergyPool::new(&lane),
            cooldowns,
            player_base,
            enemy_base,
            player_units: Vec::new(),
            enemy_units: Vec::new(),
            next_unit_id: 0,
            waves: WaveProgress::default(),
            result: MatchResult::Ongoing,
            running: false,
            paused: false,
            time: SimTime::default(),
            feedback: Feedback::default(),
            catalog,
            lane,
            stage,
        }
    }

    /// Set up a match by stage id. Unknown ids fall back to the first
    /// stage; `None` only when the catalog has no stages at all.
    pub fn for_stage(stage_id: u32, config: SimConfig) -> Option<Self> {
        let stage = config.catalog.stage_or_first(stage_id)?.clone();
        Some(Self::new(stage, config))
    }

    // --- Lifecycle ---

    pub fn start(&mut self) {
        self.running = true;
        self.paused = false;
        info!("Stage {} started", self.stage.id);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Restore the match to its initial state. The running flag is kept
    /// and unit ids keep counting up.
    pub fn reset(&mut self) {
        let (player_base, enemy_base) = world_setup::build_bases(&self.stage, &self.lane);
        self.player_base = player_base;
        self.enemy_base = enemy_base;
        self.player_units.clear();
        self.enemy_units.clear();
        self.energy = EnergyPool::new(&self.lane);
        self.cooldowns = CooldownTable::ready(self.catalog.units.iter().map(|u| u.id.as_str()));
        self.waves = WaveProgress::default();
        self.result = MatchResult::Ongoing;
        self.paused = false;
        self.time = SimTime::default();
        self.feedback.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        info!("Stage {} reset", self.stage.id);
    }

    // --- Spawning ---

    /// Whether `spawn_player_unit(archetype_id)` would currently succeed.
    pub fn can_spawn_unit(&self, archetype_id: &str) -> bool {
        match self.catalog.unit(archetype_id) {
            Some(archetype) => {
                self.energy.can_afford(archetype.cost)
                    && self.cooldowns.remaining(archetype_id) <= 0.0
                    && self.result == MatchResult::Ongoing
            }
            None => false,
        }
    }

    /// Deploy a player unit. Returns false, changing nothing, when the
    /// archetype is unknown, unaffordable, cooling down, or the match is over.
    pub fn spawn_player_unit(&mut self, archetype_id: &str) -> bool {
        if !self.can_spawn_unit(archetype_id) {
            return false;
        }
        let catalog = Arc::clone(&self.catalog);
        let Some(archetype) = catalog.unit(archetype_id) else {
            return false;
        };

        self.energy.spend(archetype.cost);
        self.cooldowns.start(archetype_id, archetype.cooldown_secs * 1000.0);

        let id = self.allocate_unit_id();
        self.player_units.push(world_setup::deploy_unit(id, archetype, &self.lane));
        self.feedback.sound(SoundCue::Spawn);

        debug!(
            "Deployed {} (unit {}), energy left {}",
            archetype_id,
            id,
            self.energy.current()
        );
        true
    }

    /// One firing of the spawn timer: advance the wave when the current one
    /// is full, otherwise draw an enemy from the stage's pool. Returns true
    /// if a unit was placed.
    pub fn spawn_enemy_unit(&mut self) -> bool {
        match self.waves.next_step(&self.stage) {
            WaveStep::Finished => false,
            WaveStep::Advanced(wave) if wave >= self.stage.total_waves => {
                info!("Stage {}: all waves spawned", self.stage.id);
                false
            }
            WaveStep::Advanced(wave) => {
                info!(
                    "Stage {}: wave {} of {} at {:.1}s",
                    self.stage.id,
                    wave + 1,
                    self.stage.total_waves,
                    self.time.elapsed_secs()
                );
                false
            }
            WaveStep::Spawn => {
                let catalog = Arc::clone(&self.catalog);
                let Some(archetype) = catalog.select_enemy(&self.stage.enemy_ids, &mut self.rng)
                else {
                    return false;
                };
                let id = self.allocate_unit_id();
                self.enemy_units.push(world_setup::enemy_unit(id, archetype, &self.lane));
                self.waves.record_spawn();
                debug!("Spawned enemy {} (unit {})", archetype.id, id);
                true
            }
        }
    }

    /// Place a specific enemy outside the wave policy. Zero-weight
    /// archetypes such as bosses are allowed. Returns false for unknown ids
    /// or a finished match.
    pub fn spawn_enemy_archetype(&mut self, archetype_id: &str) -> bool {
        if self.result != MatchResult::Ongoing {
            return false;
        }
        let catalog = Arc::clone(&self.catalog);
        let Some(archetype) = catalog.enemy(archetype_id) else {
            warn!("Unknown enemy archetype '{}'", archetype_id);
            return false;
        };
        let id = self.allocate_unit_id();
        self.enemy_units.push(world_setup::enemy_unit(id, archetype, &self.lane));
        debug!("Spawned scripted enemy {} (unit {})", archetype_id, id);
        true
    }

    fn allocate_unit_id(&mut self) -> u64 {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        id
    }

    // --- Tick ---

    /// Advance the match by one fixed step of `dt_ms` milliseconds.
    /// No-op while paused or once the result is decided.
    pub fn update(&mut self, dt_ms: f64) {
        if self.paused || self.result != MatchResult::Ongoing {
            return;
        }

        self.time.advance(dt_ms);

        self.energy.regenerate(dt_ms);
        self.cooldowns.decay(dt_ms);

        if self.waves.tick_timer(dt_ms, self.stage.spawn_interval_secs) {
            self.spawn_enemy_unit();
        }

        systems::aura::run(&mut self.player_units, &mut self.enemy_units);

        systems::combat::run(
            &mut self.player_units,
            &mut self.enemy_units,
            &mut self.enemy_base,
            &self.lane,
            &mut self.feedback,
        );
        systems::combat::run(
            &mut self.enemy_units,
            &mut self.player_units,
            &mut self.player_base,
            &self.lane,
            &mut self.feedback,
        );

        systems::cleanup::evict_dead(&mut self.player_units);
        systems::cleanup::evict_dead(&mut self.enemy_units);

        systems::cleanup::decay_cosmetics(
            &mut self.player_units,
            &mut self.enemy_units,
            &mut self.player_base,
            &mut self.enemy_base,
            &mut self.feedback,
            dt_ms,
        );

        self.check_game_over();
    }

    /// Player base loss takes precedence when both bases fall together.
    fn check_game_over(&mut self) {
        let result = if !self.player_base.is_alive() {
            MatchResult::Lose
        } else if !self.enemy_base.is_alive() {
            MatchResult::Win
        } else {
            return;
        };

        self.result = result;
        self.running = false;
        info!(
            "Stage {} finished: {:?} at frame {} ({:.1}s)",
            self.stage.id,
            result,
            self.time.frame,
            self.time.elapsed_secs()
        );
    }

    // --- Commands ---

    /// Apply a command that acts on the match itself. Scheduler commands
    /// (`Start`, `Stop`, `Pause`, `Resume`) only toggle flags here; the
    /// `GameLoop` wraps them. Returns false for a rejected deploy.
    pub fn apply_command(&mut self, command: &PlayerCommand) -> bool {
        match command {
            PlayerCommand::SpawnUnit { archetype_id } => self.spawn_player_unit(archetype_id),
            PlayerCommand::Start => {
                self.start();
                true
            }
            PlayerCommand::Stop => {
                self.stop();
                true
            }
            PlayerCommand::Pause => {
                self.pause();
                true
            }
            PlayerCommand::Resume => {
                self.resume();
                true
            }
            PlayerCommand::Reset => {
                self.reset();
                true
            }
        }
    }

    // --- Queries ---

    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(self)
    }

    pub fn stage(&self) -> &StageDefinition {
        &self.stage
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn lane(&self) -> &LaneConfig {
        &self.lane
    }

    pub fn result(&self) -> MatchResult {
        self.result
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn energy(&self) -> f64 {
        self.energy.current()
    }

    pub fn max_energy(&self) -> f64 {
        self.energy.max()
    }

    /// Remaining deploy cooldown for an archetype, in ms.
    pub fn cooldown_ms(&self, archetype_id: &str) -> f64 {
        self.cooldowns.remaining(archetype_id)
    }

    pub fn current_wave(&self) -> u32 {
        self.waves.current_wave()
    }

    pub fn enemies_spawned_this_wave(&self) -> u32 {
        self.waves.spawned_this_wave()
    }

    pub fn player_base(&self) -> &Base {
        &self.player_base
    }

    pub fn enemy_base(&self) -> &Base {
        &self.enemy_base
    }

    pub fn player_units(&self) -> &[Unit] {
        &self.player_units
    }

    pub fn enemy_units(&self) -> &[Unit] {
        &self.enemy_units
    }

    pub fn screen_shake(&self) -> f64 {
        self.feedback.screen_shake()
    }

    /// Audio cues produced since the last drain.
    pub fn drain_audio_events(&mut self) -> Vec<AudioEvent> {
        self.feedback.take_audio_events()
    }

    /// Visual effect requests produced since the last drain.
    pub fn drain_fx_events(&mut self) -> Vec<FxEvent> {
        self.feedback.take_fx_events()
    }
}
