use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn};

use bytewars_app::control;
use bytewars_app::game_loop::{MatchSetup, Pacing, ScriptedDeploy};
use bytewars_app::state::{AppState, GameLoopCommand};
use bytewars_core::catalog::Catalog;
use bytewars_core::config::LaneConfig;
use bytewars_sim::SimConfig;

#[derive(Parser)]
#[command(author, version, about = "Run a ByteWars stage headless", long_about = None)]
struct Cli {
    /// Stage id; unknown ids fall back to the first stage
    #[arg(long, default_value_t = 1)]
    stage: u32,
    /// RNG seed for enemy spawns
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Catalog JSON replacing the built-in units, enemies and stages
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Lane geometry and energy settings as JSON
    #[arg(long, value_name = "PATH")]
    lane_config: Option<PathBuf>,
    /// Deploy a unit once the match reaches a tick (repeatable)
    #[arg(long = "deploy", value_name = "TICK:UNIT_ID")]
    deploys: Vec<ScriptedDeploy>,
    /// Give up on an undecided match after this many frames
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,
    /// Pace frames against the wall clock
    #[arg(long)]
    realtime: bool,
    /// Print a JSON snapshot every N ticks
    #[arg(long, value_name = "N")]
    snapshot_every: Option<u64>,
    /// Read JSON player commands from stdin, one per line
    #[arg(long)]
    stdin_commands: bool,
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog: {}", path.display()))?;
    Catalog::from_json(&json).with_context(|| format!("load catalog: {}", path.display()))
}

fn load_lane_config(path: &Path) -> Result<LaneConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read lane config: {}", path.display()))?;
    LaneConfig::from_json(&json).with_context(|| format!("load lane config: {}", path.display()))
}

/// Forward stdin lines to the game loop until EOF or the match ends.
fn spawn_stdin_reader(state: &AppState) -> Result<()> {
    let tx = control::command_sender(state)?;
    std::thread::Builder::new()
        .name("bytewars-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("stdin: {err}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match control::parse_command(&line) {
                    Ok(cmd) => {
                        if tx.send(GameLoopCommand::PlayerCommand(cmd)).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!("{err:#}"),
                }
            }
        })
        .context("spawn stdin reader")?;
    Ok(())
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => Catalog::builtin(),
    };
    let lane = match &cli.lane_config {
        Some(path) => load_lane_config(path)?,
        None => LaneConfig::default(),
    };

    let setup = MatchSetup {
        stage_id: cli.stage,
        sim: SimConfig {
            seed: cli.seed,
            lane,
            catalog: Arc::new(catalog),
        },
        pacing: if cli.realtime {
            Pacing::Realtime
        } else {
            Pacing::Virtual
        },
        max_frames: cli.max_ticks,
        deploys: cli.deploys,
        snapshot_every: cli.snapshot_every,
    };

    let state = AppState::new();
    let handle = control::start_match(&state, setup)?;
    if cli.stdin_commands {
        spawn_stdin_reader(&state)?;
    }

    let outcome = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    control::shutdown(&state)?;

    info!(
        "Stage {} ({}) ended: {:?} after {} ticks",
        outcome.stage_id, outcome.stage_name, outcome.result, outcome.frames
    );
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
