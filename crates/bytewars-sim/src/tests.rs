//! Tests for the match engine, combat rules, wave policy and scheduler.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use bytewars_core::archetypes::{EnemyArchetype, StageDefinition};
use bytewars_core::catalog::Catalog;
use bytewars_core::commands::PlayerCommand;
use bytewars_core::config::LaneConfig;
use bytewars_core::constants::*;
use bytewars_core::enums::*;

use crate::engine::{GameState, SimConfig};
use crate::game_loop::GameLoop;
use crate::systems::aura;
use crate::world_setup;

/// A stage whose spawn timer never fires.
fn quiet_stage(player_base_hp: f64, enemy_base_hp: f64) -> StageDefinition {
    StageDefinition {
        id: 99,
        name: "Quiet".into(),
        description: String::new(),
        player_base_hp,
        enemy_base_hp,
        spawn_interval_secs: 1.0e9,
        enemy_ids: Vec::new(),
        max_enemies_per_wave: 1,
        total_waves: 1,
    }
}

fn full_energy() -> LaneConfig {
    LaneConfig {
        initial_energy: 10.0,
        ..Default::default()
    }
}

fn state_with(stage: StageDefinition, lane: LaneConfig) -> GameState {
    GameState::new(
        stage,
        SimConfig {
            lane,
            ..Default::default()
        },
    )
}

fn run_ticks(state: &mut GameState, ticks: usize, dt_ms: f64) {
    for _ in 0..ticks {
        state.update(dt_ms);
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut a = GameState::for_stage(3, config.clone()).unwrap();
    let mut b = GameState::for_stage(3, config).unwrap();
    a.start();
    b.start();

    for tick in 0..2000 {
        if tick % 300 == 0 {
            assert_eq!(a.spawn_player_unit("byterunner"), b.spawn_player_unit("byterunner"));
        }
        a.update(STEP_MS);
        b.update(STEP_MS);

        let json_a = serde_json::to_string(&a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&b.snapshot()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut a = GameState::for_stage(
        3,
        SimConfig {
            seed: 111,
            ..Default::default()
        },
    )
    .unwrap();
    let mut b = GameState::for_stage(
        3,
        SimConfig {
            seed: 222,
            ..Default::default()
        },
    )
    .unwrap();

    // The first spawn draws are the only source of divergence.
    let mut diverged = false;
    for _ in 0..4000 {
        a.update(STEP_MS);
        b.update(STEP_MS);
        let json_a = serde_json::to_string(&a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&b.snapshot()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Setup ----

#[test]
fn test_fresh_match_state() {
    let state = GameState::for_stage(2, SimConfig::default()).unwrap();
    let snap = state.snapshot();
    assert_eq!(snap.stage_id, 2);
    assert_eq!(snap.player_base_hp, 600.0);
    assert_eq!(snap.enemy_base_hp, 800.0);
    assert_eq!(snap.energy, 5);
    assert_eq!(snap.max_energy, 10);
    assert_eq!(snap.cooldowns.len(), 6);
    assert!(snap.cooldowns.values().all(|&ms| ms == 0.0));
    assert_eq!(snap.result, MatchResult::Ongoing);
    assert_eq!(snap.total_waves, 12);
    assert!(!snap.is_running);
    assert!(snap.units.is_empty());
}

#[test]
fn test_unknown_stage_falls_back_to_first() {
    let state = GameState::for_stage(999, SimConfig::default()).unwrap();
    assert_eq!(state.stage().id, 1);
}

// ---- Deploying ----

#[test]
fn test_deploy_spends_energy_and_starts_cooldown() {
    let mut state = GameState::for_stage(1, SimConfig::default()).unwrap();
    assert!(state.spawn_player_unit("byterunner"));

    assert_eq!(state.energy(), 3.0);
    assert_eq!(state.cooldown_ms("byterunner"), 2000.0);
    assert_eq!(state.player_units().len(), 1);
    assert_eq!(state.player_units()[0].position.x, 120.0);
    assert_eq!(state.player_units()[0].faction, Faction::Player);

    let audio = state.drain_audio_events();
    assert_eq!(audio.len(), 1);
    assert_eq!(audio[0].cue, SoundCue::Spawn);
}

#[test]
fn test_deploy_rejections_have_no_effect() {
    let mut state = GameState::for_stage(1, SimConfig::default()).unwrap();

    // Unknown archetype.
    assert!(!state.spawn_player_unit("nonexistent"));
    // Too expensive: NovaBurst costs 6.
    assert!(!state.can_spawn_unit("novaburst"));
    assert!(!state.spawn_player_unit("novaburst"));

    assert_eq!(state.energy(), 5.0);
    assert!(state.player_units().is_empty());
    assert_eq!(state.cooldown_ms("novaburst"), 0.0);
}

#[test]
fn test_shieldgolem_cooldown_blocks_redeploy() {
    let stage = Catalog::builtin().stage(1).unwrap().clone();
    let mut state = state_with(stage, full_energy());
    assert!(state.spawn_player_unit("shieldgolem"));

    // ~1 s of 16 ms ticks.
    run_ticks(&mut state, 62, 16.0);
    assert!(state.energy() >= 5.0);
    assert!(!state.spawn_player_unit("shieldgolem"));
    assert_eq!(state.player_units().len(), 1);

    // 500 * 16 ms = 8000 ms in total.
    run_ticks(&mut state, 438, 16.0);
    assert_eq!(state.cooldown_ms("shieldgolem"), 0.0);
    assert!(state.spawn_player_unit("shieldgolem"));
}

#[test]
fn test_energy_stays_in_bounds() {
    let mut state = GameState::for_stage(1, SimConfig::default()).unwrap();
    state.start();
    for _ in 0..3000 {
        state.spawn_player_unit("byterunner");
        state.update(STEP_MS);
        assert!(state.energy() >= 0.0);
        assert!(state.energy() <= state.max_energy());
    }
}

#[test]
fn test_energy_regenerates_one_per_second() {
    let mut state = GameState::for_stage(1, SimConfig::default()).unwrap();
    run_ticks(&mut state, 2, 500.0);
    assert_eq!(state.energy(), 6.0);
    run_ticks(&mut state, 20, 500.0);
    assert_eq!(state.energy(), 10.0);
}

// ---- Combat ----

#[test]
fn test_nearest_target_tie_uses_roster_order() {
    let mut state = state_with(quiet_stage(500.0, 500.0), LaneConfig::default());
    assert!(state.spawn_player_unit("byterunner"));
    assert!(state.spawn_enemy_archetype("glitch"));
    assert!(state.spawn_enemy_archetype("glitch"));
    state.player_units[0].position.x = 1070.0;

    state.update(STEP_MS);

    assert_eq!(state.enemy_units()[0].hp, 45.0);
    assert_eq!(state.enemy_units()[1].hp, 60.0);
}

#[test]
fn test_aoe_hits_every_defender_in_radius() {
    let mut state = state_with(quiet_stage(500.0, 500.0), full_energy());
    assert!(state.spawn_player_unit("novaburst"));
    for _ in 0..3 {
        assert!(state.spawn_enemy_archetype("glitch"));
    }
    state.player_units[0].position.x = 220.0;
    state.enemy_units[0].position.x = 300.0;
    state.enemy_units[1].position.x = 340.0;
    state.enemy_units[2].position.x = 400.0;

    state.update(STEP_MS);

    let hp: Vec<f64> = state.enemy_units().iter().map(|u| u.hp).collect();
    assert_eq!(hp, vec![20.0, 20.0, 60.0]);
}

#[test]
fn test_dead_units_are_evicted_same_tick() {
    let mut state = state_with(quiet_stage(500.0, 500.0), LaneConfig::default());
    assert!(state.spawn_player_unit("byterunner"));
    assert!(state.spawn_enemy_archetype("rush"));
    state.player_units[0].position.x = 600.0;
    state.enemy_units[0].position.x = 610.0;
    state.enemy_units[0].hp = 10.0;

    state.update(STEP_MS);

    assert!(state.enemy_units().is_empty());
    assert_eq!(state.player_units().len(), 1);
}

#[test]
fn test_rosters_hold_only_living_units() {
    let mut state = GameState::for_stage(3, SimConfig::default()).unwrap();
    state.start();
    for tick in 0..3000 {
        if tick % 120 == 0 {
            state.spawn_player_unit("arcslinger");
        }
        state.update(STEP_MS);
        assert!(state.player_units().iter().all(|u| u.hp > 0.0));
        assert!(state.enemy_units().iter().all(|u| u.hp > 0.0));
        assert!(state.player_base().hp >= 0.0);
        assert!(state.enemy_base().hp >= 0.0);
    }
}

#[test]
fn test_summon_burns_out() {
    let mut state = state_with(quiet_stage(500.0, 100_000.0), LaneConfig::default());
    assert!(state.spawn_player_unit("hexbit"));

    run_ticks(&mut state, 479, STEP_MS);
    assert_eq!(state.player_units().len(), 1);

    state.update(STEP_MS);
    assert!(state.player_units().is_empty());
}

#[test]
fn test_base_hit_sets_screen_shake() {
    let mut state = state_with(quiet_stage(500.0, 500.0), LaneConfig::default());
    assert!(state.spawn_player_unit("byterunner"));
    state.player_units[0].position.x = 1170.0;

    state.update(STEP_MS);

    assert_eq!(state.enemy_base().hp, 485.0);
    // Shake is set during combat then decays once in the same tick.
    let expected = BASE_HIT_SCREEN_SHAKE - STEP_MS / SCREEN_SHAKE_DECAY_MS;
    assert!((state.screen_shake() - expected).abs() < 1e-9);
    assert_eq!(state.enemy_base().hit_flash_timer, BASE_HIT_FLASH_TICKS - 1);
}

#[test]
fn test_distant_living_enemy_keeps_base_safe() {
    let mut state = state_with(quiet_stage(500.0, 500.0), LaneConfig::default());
    assert!(state.spawn_player_unit("byterunner"));
    assert!(state.spawn_enemy_archetype("glitch"));
    state.player_units[0].position.x = 1170.0;
    state.enemy_units[0].position.x = 200.0;

    state.update(STEP_MS);

    assert_eq!(state.enemy_base().hp, 500.0);
    assert!(!state.player_units()[0].is_attacking);
    assert!(state.player_units()[0].position.x > 1170.0);
}

// ---- Aura ----

#[test]
fn test_aura_does_not_stack_last_applied_wins() {
    let catalog = Catalog::builtin();
    let lane = LaneConfig::default();
    let drone = catalog.unit("syncdrone").unwrap();
    let runner = catalog.unit("byterunner").unwrap();

    let mut players = vec![
        world_setup::deploy_unit(0, drone, &lane),
        world_setup::deploy_unit(1, drone, &lane),
        world_setup::deploy_unit(2, runner, &lane),
        world_setup::deploy_unit(3, runner, &lane),
    ];
    players[0].position.x = 200.0;
    players[1].position.x = 220.0;
    players[1].special = Special::Aura { multiplier: 1.5 };
    players[2].position.x = 210.0;
    players[3].position.x = 350.0;

    let mut enemies = vec![world_setup::enemy_unit(
        4,
        catalog.enemy("glitch").unwrap(),
        &lane,
    )];
    enemies[0].position.x = 215.0;

    aura::run(&mut players, &mut enemies);

    // Drone 0 receives drone 1's aura, drone 1 receives drone 0's.
    assert!((players[0].attack_speed - 1.5).abs() < 1e-9);
    assert!((players[1].attack_speed - 1.3).abs() < 1e-9);
    // In range of both: the later drone's multiplier, not the product.
    assert!((players[2].attack_speed - 2.25).abs() < 1e-9);
    assert_eq!(players[3].attack_speed, 1.5);
    assert_eq!(enemies[0].attack_speed, 1.2);

    // Recomputed from scratch once the source is gone.
    players[1].hp = 0.0;
    aura::run(&mut players, &mut enemies);
    assert!((players[2].attack_speed - 1.95).abs() < 1e-9);
    assert_eq!(players[0].attack_speed, 1.0);
}

// ---- Waves ----

#[test]
fn test_wave_advances_by_spawn_count() {
    let stage = StageDefinition {
        enemy_ids: vec!["glitch".into()],
        max_enemies_per_wave: 2,
        total_waves: 2,
        ..quiet_stage(500.0, 500.0)
    };
    let mut state = state_with(stage, LaneConfig::default());

    assert!(state.spawn_enemy_unit());
    assert!(state.spawn_enemy_unit());
    // Full wave: advance instead of spawning.
    assert!(!state.spawn_enemy_unit());
    assert_eq!(state.current_wave(), 1);
    assert_eq!(state.enemies_spawned_this_wave(), 0);
    assert_eq!(state.enemy_units().len(), 2);

    assert!(state.spawn_enemy_unit());
    assert!(state.spawn_enemy_unit());
    assert!(!state.spawn_enemy_unit());
    assert_eq!(state.current_wave(), 2);

    // All waves done.
    assert!(!state.spawn_enemy_unit());
    assert_eq!(state.enemy_units().len(), 4);
    assert_eq!(state.enemy_units()[0].position.x, 1080.0);
}

#[test]
fn test_spawn_timer_drives_enemy_spawns() {
    let stage = StageDefinition {
        enemy_ids: vec!["glitch".into()],
        spawn_interval_secs: 1.0,
        max_enemies_per_wave: 5,
        ..quiet_stage(500.0, 500.0)
    };
    let mut state = state_with(stage, LaneConfig::default());

    state.update(500.0);
    assert!(state.enemy_units().is_empty());
    state.update(500.0);
    assert_eq!(state.enemy_units().len(), 1);
    assert_eq!(state.enemy_units()[0].archetype_id, "glitch");
}

#[test]
fn test_unknown_or_zero_weight_pool_spawns_nothing() {
    let stage = StageDefinition {
        enemy_ids: vec!["cyber_overlord".into(), "missing".into()],
        ..quiet_stage(500.0, 500.0)
    };
    let mut state = state_with(stage, LaneConfig::default());
    assert!(!state.spawn_enemy_unit());
    assert!(state.enemy_units().is_empty());
    assert_eq!(state.enemies_spawned_this_wave(), 0);

    // Scripted spawns bypass the weights.
    assert!(state.spawn_enemy_archetype("cyber_overlord"));
    assert!(state.enemy_units()[0].is_boss);
    assert!(!state.spawn_enemy_archetype("missing"));
}

// ---- Match result ----

#[test]
fn test_win_is_terminal() {
    let mut state = state_with(quiet_stage(500.0, 10.0), LaneConfig::default());
    state.start();
    assert!(state.spawn_player_unit("byterunner"));
    state.player_units[0].position.x = 1170.0;

    state.update(STEP_MS);
    assert_eq!(state.result(), MatchResult::Win);
    assert!(!state.is_running());

    let before = state.snapshot();
    run_ticks(&mut state, 100, STEP_MS);
    assert_eq!(state.snapshot(), before);
    assert!(!state.spawn_player_unit("byterunner"));
    assert!(!state.spawn_enemy_archetype("glitch"));
}

#[test]
fn test_both_bases_down_is_a_loss() {
    let mut state = state_with(quiet_stage(10.0, 10.0), LaneConfig::default());
    state.player_base.hp = 0.0;
    state.enemy_base.hp = 0.0;

    state.update(STEP_MS);

    assert_eq!(state.result(), MatchResult::Lose);
}

#[test]
fn test_end_to_end_lose() {
    let mut catalog = Catalog::builtin();
    catalog.enemies.push(EnemyArchetype {
        id: "dummy".into(),
        name: "Dummy".into(),
        hp: 60.0,
        attack: 10.0,
        attack_speed: 1.0,
        range: 15.0,
        speed: 1.5,
        special: Special::None,
        spawn_weight: 1.0,
        is_boss: false,
    });
    let stage = StageDefinition {
        enemy_ids: vec!["dummy".into()],
        spawn_interval_secs: 1.0,
        max_enemies_per_wave: 5,
        total_waves: 10,
        ..quiet_stage(500.0, 500.0)
    };
    let state = GameState::new(
        stage,
        SimConfig {
            catalog: Arc::new(catalog),
            ..Default::default()
        },
    );

    let mut game = GameLoop::new(state);
    let mut now = 0.0;
    game.start(now);
    while game.is_running() && now < 600_000.0 {
        now += 16.0;
        game.frame(now);
    }

    let snap = game.state().snapshot();
    assert_eq!(snap.result, MatchResult::Lose);
    assert_eq!(snap.player_base_hp, 0.0);
    assert_eq!(snap.enemy_base_hp, 500.0);
    assert!(!snap.is_running);
    assert!(!game.is_running());
}

// ---- Lifecycle ----

#[test]
fn test_pause_freezes_updates() {
    let mut state = GameState::for_stage(1, SimConfig::default()).unwrap();
    state.start();
    run_ticks(&mut state, 10, STEP_MS);
    state.pause();
    let before = state.snapshot();
    run_ticks(&mut state, 100, STEP_MS);
    assert_eq!(state.snapshot(), before);

    state.resume();
    state.update(STEP_MS);
    assert_eq!(state.time().frame, before.frame + 1);
}

#[test]
fn test_reset_restores_initial_state() {
    let config = SimConfig {
        seed: 7,
        ..Default::default()
    };
    let mut state = GameState::for_stage(3, config.clone()).unwrap();
    let mut fresh = GameState::for_stage(3, config).unwrap();
    state.start();
    fresh.start();

    assert!(state.spawn_player_unit("byterunner"));
    run_ticks(&mut state, 600, STEP_MS);
    state.pause();
    let last_id = state
        .player_units()
        .iter()
        .chain(state.enemy_units())
        .map(|u| u.id)
        .max()
        .unwrap_or(0);

    state.reset();
    assert_eq!(state.snapshot(), fresh.snapshot());
    assert!(state.is_running());

    // Ids stay monotonic across the reset.
    assert!(state.spawn_player_unit("byterunner"));
    assert!(state.player_units()[0].id > last_id);

    // The RNG is reseeded, so the enemy draws repeat.
    assert!(fresh.spawn_player_unit("byterunner"));
    run_ticks(&mut state, 900, STEP_MS);
    run_ticks(&mut fresh, 900, STEP_MS);
    let kinds = |s: &GameState| -> Vec<String> {
        s.enemy_units().iter().map(|u| u.archetype_id.clone()).collect()
    };
    assert_eq!(kinds(&state), kinds(&fresh));
}

#[test]
fn test_apply_command_routes_to_state() {
    let mut state = GameState::for_stage(1, SimConfig::default()).unwrap();
    assert!(state.apply_command(&PlayerCommand::Start));
    assert!(state.is_running());
    assert!(state.apply_command(&PlayerCommand::SpawnUnit {
        archetype_id: "byterunner".into()
    }));
    assert!(!state.apply_command(&PlayerCommand::SpawnUnit {
        archetype_id: "byterunner".into()
    }));
    assert!(state.apply_command(&PlayerCommand::Pause));
    assert!(state.is_paused());
    assert!(state.apply_command(&PlayerCommand::Reset));
    assert!(!state.is_paused());
    assert!(state.player_units().is_empty());
}

#[test]
fn test_effect_events_drain() {
    let mut state = state_with(quiet_stage(500.0, 500.0), LaneConfig::default());
    assert!(state.spawn_player_unit("byterunner"));
    assert!(state.spawn_enemy_archetype("glitch"));
    state.player_units[0].position.x = 1070.0;
    state.drain_audio_events();

    state.update(STEP_MS);

    let audio = state.drain_audio_events();
    // Both sides land a hit this tick.
    assert_eq!(audio.iter().filter(|e| e.cue == SoundCue::Hit).count(), 2);
    assert!(!state.drain_fx_events().is_empty());
    assert!(state.drain_audio_events().is_empty());
    assert!(state.drain_fx_events().is_empty());
}

// ---- Scheduler ----

fn counting_loop(state: GameState) -> (GameLoop, Rc<Cell<u32>>, Rc<Cell<u32>>, Rc<Cell<f64>>) {
    let updates = Rc::new(Cell::new(0));
    let renders = Rc::new(Cell::new(0));
    let last_render_dt = Rc::new(Cell::new(0.0));

    let mut game = GameLoop::new(state);
    let (u, r, d) = (updates.clone(), renders.clone(), last_render_dt.clone());
    game.set_callbacks(
        Some(Box::new(move |_: &GameState, dt: f64| {
            assert_eq!(dt, STEP_MS);
            u.set(u.get() + 1);
        })),
        Some(Box::new(move |_: &GameState, dt: f64| {
            r.set(r.get() + 1);
            d.set(dt);
        })),
    );
    (game, updates, renders, last_render_dt)
}

#[test]
fn test_scheduler_fixed_steps_and_single_render() {
    let state = GameState::for_stage(1, SimConfig::default()).unwrap();
    let (mut game, updates, renders, last_dt) = counting_loop(state);

    game.start(0.0);
    assert!(game.is_running());
    assert_eq!(renders.get(), 1);
    assert_eq!(updates.get(), 0);

    game.frame(40.0);
    assert_eq!(updates.get(), 2);
    assert_eq!(renders.get(), 2);
    assert_eq!(last_dt.get(), 40.0);

    // Leftover 6.67 ms carries over.
    game.frame(80.0);
    assert_eq!(updates.get(), 4);
    assert_eq!(renders.get(), 3);
    assert_eq!(game.state().time().frame, 4);

    // Already scheduled: no second start.
    game.start(80.0);
    assert_eq!(renders.get(), 3);
}

#[test]
fn test_scheduler_clamps_long_frames() {
    let state = GameState::for_stage(1, SimConfig::default()).unwrap();
    let (mut game, updates, _renders, last_dt) = counting_loop(state);

    game.start(0.0);
    game.frame(5000.0);
    assert_eq!(last_dt.get(), MAX_FRAME_DELTA_MS);
    assert!(updates.get() <= 6);
    assert!(updates.get() >= 5);

    // Time going backwards counts as zero.
    let before = updates.get();
    game.frame(1000.0);
    assert_eq!(last_dt.get(), 0.0);
    assert!(updates.get() - before <= 1);
}

#[test]
fn test_scheduler_pause_drains_without_stepping() {
    let state = GameState::for_stage(1, SimConfig::default()).unwrap();
    let (mut game, updates, renders, _) = counting_loop(state);

    game.start(0.0);
    game.pause();
    game.frame(10.0);
    game.frame(20.0);
    assert_eq!(updates.get(), 0);
    assert_eq!(renders.get(), 3);
    assert!(game.is_running());
    assert_eq!(game.state().time().frame, 0);

    // Resuming long after does not replay the paused time.
    game.resume(10_000.0);
    game.frame(10_040.0);
    assert_eq!(updates.get(), 2);
}

#[test]
fn test_scheduler_stop_detaches() {
    let state = GameState::for_stage(1, SimConfig::default()).unwrap();
    let (mut game, updates, renders, _) = counting_loop(state);

    game.start(0.0);
    game.stop();
    assert!(!game.is_running());
    assert!(!game.state().is_running());
    assert!(!game.frame(100.0));
    assert_eq!(updates.get(), 0);
    assert_eq!(renders.get(), 1);

    // Can be started again.
    assert!(game.apply_command(&PlayerCommand::Start, 200.0));
    assert!(game.is_running());
}

#[test]
fn test_scheduler_routes_commands() {
    let state = GameState::for_stage(1, SimConfig::default()).unwrap();
    let mut game = GameLoop::new(state);
    game.apply_command(&PlayerCommand::Start, 0.0);
    assert!(game.apply_command(
        &PlayerCommand::SpawnUnit {
            archetype_id: "byterunner".into()
        },
        0.0
    ));
    assert!(!game.apply_command(
        &PlayerCommand::SpawnUnit {
            archetype_id: "nonexistent".into()
        },
        0.0
    ));
    game.apply_command(&PlayerCommand::Pause, 0.0);
    assert!(game.state().is_paused());
    game.apply_command(&PlayerCommand::Resume, 0.0);
    assert!(!game.state().is_paused());
    assert_eq!(game.state().player_units().len(), 1);
}
