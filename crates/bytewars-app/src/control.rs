//! Control surface for the host: start a match, send commands, poll.
//!
//! These bridge callers (the CLI, input threads, tests) to the game loop
//! thread via channels and the shared snapshot slot.

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context, Result};

use bytewars_core::commands::PlayerCommand;
use bytewars_core::state::GameStateSnapshot;

use crate::game_loop::{self, MatchOutcome, MatchSetup};
use crate::state::{AppState, GameLoopCommand};

/// Start a match on a new game loop thread.
pub fn start_match(state: &AppState, setup: MatchSetup) -> Result<JoinHandle<MatchOutcome>> {
    let mut tx_lock = state
        .command_tx
        .lock()
        .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;

    if state.is_running() {
        bail!("Match already running");
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(
        setup,
        Arc::clone(&state.latest_snapshot),
        Arc::clone(&state.running),
    )?;
    *tx_lock = Some(cmd_tx);

    Ok(handle)
}

/// A sender for threads that forward commands on their own.
pub fn command_sender(state: &AppState) -> Result<mpsc::Sender<GameLoopCommand>> {
    let tx_lock = state
        .command_tx
        .lock()
        .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
    tx_lock.clone().ok_or_else(|| anyhow!("Match not started"))
}

/// Send a player command to the running match.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<()> {
    command_sender(state)?
        .send(GameLoopCommand::PlayerCommand(command))
        .map_err(|e| anyhow!("Failed to send command: {e}"))
}

/// Ask the game loop thread to stop. Idempotent.
pub fn shutdown(state: &AppState) -> Result<()> {
    let mut tx_lock = state
        .command_tx
        .lock()
        .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
    if let Some(tx) = tx_lock.take() {
        // The thread may already have finished on its own.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    Ok(())
}

/// Latest snapshot, for polling.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|e| anyhow!("snapshot lock poisoned: {e}"))?;
    Ok(lock.clone())
}

/// Parse one JSON-encoded command, e.g. `{"type":"SpawnUnit","archetype_id":"hexbit"}`.
pub fn parse_command(line: &str) -> Result<PlayerCommand> {
    serde_json::from_str(line.trim()).with_context(|| format!("invalid command: {line}"))
}
