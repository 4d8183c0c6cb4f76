//! Game loop thread: the frame source for one match.
//!
//! The `GameState` is built before the thread starts and moved into it,
//! wrapped in the simulation's `GameLoop`. Each iteration drains pending
//! commands, applies scripted deploys that are due, then calls
//! `GameLoop::frame` and publishes the resulting snapshot.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use serde::Serialize;

use bytewars_core::constants::{STEP_MS, TICK_RATE};
use bytewars_core::enums::MatchResult;
use bytewars_core::state::GameStateSnapshot;
use bytewars_sim::{GameLoop, GameState, SimConfig};

use crate::state::{publish, GameLoopCommand, SnapshotSlot};

/// Nominal display refresh interval when pacing against the wall clock.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the thread produces frame timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep between frames; timestamps come from `Instant`.
    Realtime,
    /// No sleeping; every frame advances a virtual clock by one step.
    #[default]
    Virtual,
}

/// A deploy issued automatically once the match reaches `frame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedDeploy {
    pub frame: u64,
    pub archetype_id: String,
}

impl FromStr for ScriptedDeploy {
    type Err = anyhow::Error;

    /// Parses `TICK:UNIT_ID`, e.g. `120:byterunner`.
    fn from_str(s: &str) -> Result<Self> {
        let (frame, archetype_id) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected TICK:UNIT_ID, got '{s}'"))?;
        let frame = frame
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid tick in '{s}'"))?;
        let archetype_id = archetype_id.trim();
        if archetype_id.is_empty() {
            bail!("missing unit id in '{s}'");
        }
        Ok(Self {
            frame,
            archetype_id: archetype_id.to_string(),
        })
    }
}

/// Everything the thread needs to run one match.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub stage_id: u32,
    pub sim: SimConfig,
    pub pacing: Pacing,
    /// Frame callbacks to run before giving up on an undecided match.
    pub max_frames: u64,
    pub deploys: Vec<ScriptedDeploy>,
    /// Print a JSON snapshot to stdout every N simulation ticks.
    pub snapshot_every: Option<u64>,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            stage_id: 1,
            sim: SimConfig::default(),
            pacing: Pacing::default(),
            max_frames: 36_000,
            deploys: Vec::new(),
            snapshot_every: None,
        }
    }
}

/// Summary reported when the thread ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub stage_id: u32,
    pub stage_name: String,
    pub result: MatchResult,
    pub frames: u64,
    pub player_base_hp: f64,
    pub enemy_base_hp: f64,
    /// Stage unlocked by a win, if the catalog has one.
    pub next_stage: Option<u32>,
}

impl MatchOutcome {
    fn from_state(state: &GameState) -> Self {
        let stage = state.stage();
        let next_stage = match state.result() {
            MatchResult::Win => state.catalog().next_stage(stage.id).map(|s| s.id),
            _ => None,
        };

        Self {
            stage_id: stage.id,
            stage_name: stage.name.clone(),
            result: state.result(),
            frames: state.time().frame,
            player_base_hp: state.player_base().hp,
            enemy_base_hp: state.enemy_base().hp,
            next_stage,
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// `running` is raised before the thread starts and lowered when it ends.
/// Returns the command sender and a handle yielding the outcome.
pub fn spawn_game_loop(
    setup: MatchSetup,
    latest_snapshot: SnapshotSlot,
    running: Arc<AtomicBool>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<MatchOutcome>)> {
    let state = GameState::for_stage(setup.stage_id, setup.sim.clone())
        .ok_or_else(|| anyhow!("catalog has no stages"))?;
    publish(&latest_snapshot, state.snapshot());

    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    running.store(true, Ordering::Release);
    let thread_running = Arc::clone(&running);
    let spawned = std::thread::Builder::new()
        .name("bytewars-game-loop".into())
        .spawn(move || {
            let outcome = run_game_loop(state, setup, cmd_rx, &latest_snapshot);
            thread_running.store(false, Ordering::Release);
            outcome
        });

    match spawned {
        Ok(handle) => Ok((cmd_tx, handle)),
        Err(err) => {
            running.store(false, Ordering::Release);
            Err(err).context("failed to spawn game loop thread")
        }
    }
}

/// Timestamps handed to `GameLoop::frame`.
enum FrameClock {
    Virtual { now_ms: f64 },
    Realtime { start: Instant, next_frame: Instant },
}

impl FrameClock {
    fn new(pacing: Pacing) -> Self {
        match pacing {
            Pacing::Virtual => Self::Virtual { now_ms: 0.0 },
            Pacing::Realtime => {
                let now = Instant::now();
                Self::Realtime {
                    start: now,
                    next_frame: now,
                }
            }
        }
    }

    fn now_ms(&self) -> f64 {
        match self {
            Self::Virtual { now_ms } => *now_ms,
            Self::Realtime { start, .. } => start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Block until the next frame is due.
    fn wait_next(&mut self) {
        match self {
            Self::Virtual { now_ms } => *now_ms += STEP_MS,
            Self::Realtime { next_frame, .. } => {
                *next_frame += FRAME_DURATION;
                let now = Instant::now();
                if *next_frame > now {
                    std::thread::sleep(*next_frame - now);
                } else if now - *next_frame > FRAME_DURATION * 2 {
                    // Too far behind; the scheduler clamps the delta anyway.
                    *next_frame = now;
                }
            }
        }
    }
}

/// Runs until the match ends, the frame limit is hit, or a Shutdown
/// command (or channel disconnect) arrives.
fn run_game_loop(
    state: GameState,
    setup: MatchSetup,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> MatchOutcome {
    let MatchSetup {
        pacing,
        max_frames,
        mut deploys,
        snapshot_every,
        ..
    } = setup;

    deploys.sort_by_key(|d| d.frame);
    let mut pending = deploys.into_iter().peekable();
    let mut clock = FrameClock::new(pacing);

    let mut game = GameLoop::new(state);
    if let Some(every) = snapshot_every.filter(|&n| n > 0) {
        let mut last_printed = None;
        game.set_callbacks(
            None,
            Some(Box::new(move |state: &GameState, _dt: f64| {
                let frame = state.time().frame;
                if frame % every == 0 && last_printed != Some(frame) {
                    last_printed = Some(frame);
                    match serde_json::to_string(&state.snapshot()) {
                        Ok(json) => println!("{json}"),
                        Err(err) => warn!("Snapshot serialization failed: {err}"),
                    }
                }
            })),
        );
    }

    game.start(clock.now_ms());
    let mut frames_run = 0u64;

    'frames: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    if !game.apply_command(&cmd, clock.now_ms()) {
                        debug!("Rejected {:?}", cmd);
                    }
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    game.stop();
                    break 'frames;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Scripted deploys that are due
        let tick = game.state().time().frame;
        while let Some(deploy) = pending.next_if(|d| d.frame <= tick) {
            if !game.state_mut().spawn_player_unit(&deploy.archetype_id) {
                warn!(
                    "Scripted deploy of '{}' at tick {} was rejected",
                    deploy.archetype_id, deploy.frame
                );
            }
        }

        // 3. Run one frame and publish
        clock.wait_next();
        let scheduled = game.frame(clock.now_ms());
        publish(latest_snapshot, game.state().snapshot());
        frames_run += 1;

        if !scheduled {
            break;
        }
        if frames_run >= max_frames {
            info!("Frame limit {} reached, stopping", max_frames);
            game.stop();
            break;
        }
    }

    publish(latest_snapshot, game.state().snapshot());
    MatchOutcome::from_state(game.state())
}
