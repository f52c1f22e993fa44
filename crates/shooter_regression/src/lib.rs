//! Helpers for deterministic shooter regression tests: a headless app
//! builder and a manually-stepped tick driver.

use std::time::Duration;

use bevy::app::FixedUpdate;
use bevy::prelude::*;
use bevy::time::TimePlugin;
use core_shooter::{
    ArenaSettings, Bullet, Enemy, FireCommand, GamePhase, GameplayPlugin, Score, SimulationParams,
};
use serde_json::json;

pub const DEFAULT_SEED: u64 = 42;
pub const TEST_DELTA: f64 = 1.0 / 60.0;

/// Builds a headless app with the gameplay plugin and runs its startup
/// pass, so the player and the initial wave already exist.
pub fn headless_app(seed: u64, settings: ArenaSettings) -> App {
    let mut app = App::new();
    app.insert_resource(SimulationParams {
        seed,
        fixed_delta: TEST_DELTA,
    });
    app.insert_resource(settings);
    app.add_plugins(MinimalPlugins.set(TimePlugin::default()));
    app.add_plugins(GameplayPlugin);
    app.update();
    app
}

/// Advances time by `delta` and runs exactly one simulation tick.
pub fn step_by(app: &mut App, delta: Duration) {
    {
        let mut time = app.world_mut().resource_mut::<Time>();
        time.advance_by(delta);
    }
    app.world_mut().run_schedule(FixedUpdate);
}

/// Runs `ticks` simulation ticks at the default test delta.
pub fn step(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        step_by(app, Duration::from_secs_f64(TEST_DELTA));
    }
}

pub fn score(app: &App) -> u32 {
    app.world().resource::<Score>().0
}

pub fn phase(app: &App) -> GamePhase {
    *app.world().resource::<GamePhase>()
}

pub fn count_bullets(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(), With<Bullet>>();
    query.iter(&world).count()
}

pub fn count_enemies(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(), With<Enemy>>();
    query.iter(&world).count()
}

/// A seeded scripted run reduced to a JSON summary.
pub fn run_summary(seed: u64, ticks: u32, fire_every: u32) -> serde_json::Value {
    let mut app = headless_app(seed, ArenaSettings::default());
    for tick in 0..ticks {
        if fire_every > 0 && tick % fire_every == 0 {
            app.world_mut().send_event(FireCommand);
        }
        step(&mut app, 1);
        if phase(&app) == GamePhase::GameOver {
            break;
        }
    }
    json!({
        "bullets": count_bullets(&mut app),
        "enemies": count_enemies(&mut app),
        "game_over": phase(&app) == GamePhase::GameOver,
        "score": score(&app),
        "seed": seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_runs_are_deterministic() {
        let a = run_summary(DEFAULT_SEED, 30, 10);
        let b = run_summary(DEFAULT_SEED, 30, 10);
        assert_eq!(a, b);
    }
}
