use bevy::prelude::*;
use core_shooter::{ArenaSettings, Enemy};
use shooter_regression::{headless_app, run_summary, step, DEFAULT_SEED};

#[test]
fn enemy_spawns_are_deterministic() {
    let baseline = simulate_enemy_positions(DEFAULT_SEED);
    let repeat = simulate_enemy_positions(DEFAULT_SEED);
    assert_eq!(baseline, repeat, "same seed should match");

    let different = simulate_enemy_positions(7);
    assert_ne!(baseline, different, "different seeds should diverge");
}

#[test]
fn scripted_summaries_are_deterministic() {
    let baseline = run_summary(DEFAULT_SEED, 120, 15);
    let repeat = run_summary(DEFAULT_SEED, 120, 15);
    assert_eq!(baseline, repeat, "same seed should match");
}

fn simulate_enemy_positions(seed: u64) -> Vec<(i32, i32)> {
    let mut app = headless_app(seed, ArenaSettings::default());
    step(&mut app, 60);

    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<Enemy>>();
    let mut positions: Vec<(i32, i32)> = query
        .iter(&world)
        .map(|transform| {
            (
                (transform.translation.x * 100.0).round() as i32,
                (transform.translation.z * 100.0).round() as i32,
            )
        })
        .collect();
    positions.sort_unstable();
    positions
}
