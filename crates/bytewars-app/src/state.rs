//! Host state shared between the control surface and the game loop thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use bytewars_core::commands::PlayerCommand;
use bytewars_core::state::GameStateSnapshot;

/// Commands sent from the control surface to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Applied at the next frame boundary.
    PlayerCommand(PlayerCommand),
    /// Stop the match and end the thread.
    Shutdown,
}

/// Latest published snapshot. Written by the game loop thread only.
pub type SnapshotSlot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Replace the slot's contents. A poisoned lock drops the snapshot.
pub fn publish(slot: &Mutex<Option<GameStateSnapshot>>, snapshot: GameStateSnapshot) {
    if let Ok(mut lock) = slot.lock() {
        *lock = Some(snapshot);
    }
}

/// Shared host state.
///
/// `command_tx` sits behind a `Mutex` so the struct is `Sync` and input
/// threads can share it by reference.
pub struct AppState {
    /// `None` until a match is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: SnapshotSlot,
    /// Set when a match thread starts, cleared by the thread when it ends.
    pub running: Arc<AtomicBool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
