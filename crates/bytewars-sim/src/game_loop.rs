//! Fixed-timestep scheduler.
//!
//! The host calls `frame(now_ms)` once per display refresh (or whatever
//! frame source it has). Real elapsed time is clamped, banked in an
//! accumulator and paid out as whole `STEP_MS` simulation steps; rendering
//! happens once per frame regardless of how many steps ran.

use bytewars_core::commands::PlayerCommand;
use bytewars_core::constants::{MAX_FRAME_DELTA_MS, STEP_MS};
use bytewars_core::enums::MatchResult;

use crate::engine::GameState;

/// Called after every fixed step with the step duration in ms.
pub type UpdateCallback = Box<dyn FnMut(&GameState, f64)>;

/// Called once per frame with the (clamped) real elapsed time in ms.
pub type RenderCallback = Box<dyn FnMut(&GameState, f64)>;

pub struct GameLoop {
    state: GameState,
    accumulator_ms: f64,
    last_frame_ms: f64,
    /// Whether the frame source should keep calling `frame`.
    scheduled: bool,
    on_update: Option<UpdateCallback>,
    on_render: Option<RenderCallback>,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator_ms: 0.0,
            last_frame_ms: 0.0,
            scheduled: false,
            on_update: None,
            on_render: None,
        }
    }

    pub fn set_callbacks(
        &mut self,
        on_update: Option<UpdateCallback>,
        on_render: Option<RenderCallback>,
    ) {
        self.on_update = on_update;
        self.on_render = on_render;
    }

    /// Mark the match running and run the first frame. No-op if a frame is
    /// already scheduled.
    pub fn start(&mut self, now_ms: f64) {
        if self.scheduled {
            return;
        }
        self.last_frame_ms = now_ms;
        self.state.start();
        self.scheduled = true;
        self.frame(now_ms);
    }

    /// Detach from the frame source.
    pub fn stop(&mut self) {
        self.scheduled = false;
        self.state.stop();
    }

    pub fn pause(&mut self) {
        self.state.pause();
    }

    /// Unpause. The time spent paused is not counted as elapsed.
    pub fn resume(&mut self, now_ms: f64) {
        self.state.resume();
        self.last_frame_ms = now_ms;
    }

    /// One frame callback. Returns whether another frame is wanted.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.scheduled {
            return false;
        }

        let delta_ms = (now_ms - self.last_frame_ms).clamp(0.0, MAX_FRAME_DELTA_MS);
        self.last_frame_ms = now_ms;
        self.accumulator_ms += delta_ms;

        while self.accumulator_ms >= STEP_MS {
            if !self.state.is_paused() && self.state.result() == MatchResult::Ongoing {
                self.state.update(STEP_MS);
                if let Some(on_update) = self.on_update.as_mut() {
                    on_update(&self.state, STEP_MS);
                }
            }
            self.accumulator_ms -= STEP_MS;
        }

        if let Some(on_render) = self.on_render.as_mut() {
            on_render(&self.state, delta_ms);
        }

        self.scheduled = self.state.is_running() || self.state.result() == MatchResult::Ongoing;
        self.scheduled
    }

    /// Whether another frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.scheduled
    }

    /// Apply a command at a frame boundary. Scheduler commands go through
    /// the loop; the rest act on the match directly. Returns false for a
    /// rejected deploy.
    pub fn apply_command(&mut self, command: &PlayerCommand, now_ms: f64) -> bool {
        match command {
            PlayerCommand::Start => self.start(now_ms),
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(now_ms),
            PlayerCommand::SpawnUnit { .. } | PlayerCommand::Reset => {
                return self.state.apply_command(command);
            }
        }
        true
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
