use std::time::Duration;

use bevy::prelude::*;
use core_shooter::{
    ArenaSettings, Bullet, Enemy, FireCommand, GamePhase, MoveIntent, Player, SessionReset,
};
use shooter_regression::{
    count_bullets, count_enemies, headless_app, phase, score, step, step_by, DEFAULT_SEED,
};

/// No initial wave, no timer spawns, no respawns: scenarios place their
/// own entities.
fn quiet_arena() -> ArenaSettings {
    ArenaSettings {
        initial_enemies: 0,
        spawn_interval: 1_000.0,
        max_enemies: 0,
        ..Default::default()
    }
}

#[test]
fn point_blank_hit_consumes_both_and_scores() {
    let mut app = headless_app(DEFAULT_SEED, quiet_arena());
    app.world_mut()
        .spawn((Enemy, Transform::from_xyz(0.0, 0.0, -10.0)));
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(0.0, 0.0, -10.0)));
    step_by(&mut app, Duration::from_millis(1));

    assert_eq!(count_enemies(&mut app), 0);
    assert_eq!(count_bullets(&mut app), 0);
    assert_eq!(score(&app), 10);
}

#[test]
fn kills_respawn_up_to_the_cap() {
    let settings = ArenaSettings {
        initial_enemies: 0,
        spawn_interval: 1_000.0,
        ..Default::default()
    };
    let mut app = headless_app(DEFAULT_SEED, settings);
    app.world_mut()
        .spawn((Enemy, Transform::from_xyz(0.0, 0.0, -10.0)));
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(0.0, 0.0, -10.0)));
    step_by(&mut app, Duration::from_millis(1));

    // the killed enemy is replaced by a fresh spawn deeper in the corridor
    assert_eq!(count_enemies(&mut app), 1);
    assert_eq!(score(&app), 10);
}

#[test]
fn overlapping_bullets_resolve_a_single_kill() {
    let mut app = headless_app(DEFAULT_SEED, quiet_arena());
    app.world_mut()
        .spawn((Enemy, Transform::from_xyz(0.0, 0.0, -10.0)));
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(0.0, 0.0, -10.0)));
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(0.0, 0.0, -10.0)));
    step_by(&mut app, Duration::from_millis(1));

    assert_eq!(score(&app), 10);
    assert_eq!(count_enemies(&mut app), 0);
    assert_eq!(count_bullets(&mut app), 1);
}

#[test]
fn overrun_ends_the_session_before_scoring() {
    let mut app = headless_app(DEFAULT_SEED, quiet_arena());
    // crosses the player depth during the tick, far off to the side
    app.world_mut()
        .spawn((Enemy, Transform::from_xyz(3.0, 0.2, -0.05)));
    // a kill that would land in the same tick must not score
    app.world_mut()
        .spawn((Enemy, Transform::from_xyz(-2.0, 0.0, -10.0)));
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(-2.0, 0.0, -9.4)));
    step_by(&mut app, Duration::from_millis(20));

    assert_eq!(phase(&app), GamePhase::GameOver);
    assert_eq!(score(&app), 0);
    assert_eq!(count_bullets(&mut app), 1);
    assert_eq!(count_enemies(&mut app), 2);

    // the world stays frozen afterwards
    step(&mut app, 10);
    assert_eq!(score(&app), 0);
    assert_eq!(count_bullets(&mut app), 1);
    assert_eq!(count_enemies(&mut app), 2);
}

#[test]
fn player_clamps_exactly_at_the_left_bound() {
    let mut app = headless_app(DEFAULT_SEED, quiet_arena());
    app.world_mut().resource_mut::<MoveIntent>().left = true;
    step(&mut app, 600);

    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<Player>>();
    let transform = query.single(&world);
    assert_eq!(transform.translation.x, -4.0);
}

#[test]
fn one_fire_edge_spawns_exactly_one_bullet() {
    let mut app = headless_app(DEFAULT_SEED, quiet_arena());
    app.world_mut().send_event(FireCommand);
    step(&mut app, 5);

    assert_eq!(count_bullets(&mut app), 1);
}

#[test]
fn bullets_are_removed_at_the_depth_threshold() {
    let mut app = headless_app(DEFAULT_SEED, quiet_arena());
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(0.0, 0.0, -100.0)));
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(0.0, 0.0, -10.0)));
    step_by(&mut app, Duration::from_millis(1));

    assert_eq!(count_bullets(&mut app), 1);
}

#[test]
fn spawner_never_exceeds_the_enemy_cap() {
    let settings = ArenaSettings {
        initial_enemies: 6,
        spawn_interval: 0.05,
        max_enemies: 8,
        ..Default::default()
    };
    let mut app = headless_app(DEFAULT_SEED, settings);
    for _ in 0..150 {
        step(&mut app, 1);
        assert!(count_enemies(&mut app) <= 8);
    }
    assert_eq!(phase(&app), GamePhase::Playing);
    assert_eq!(count_enemies(&mut app), 8);
}

#[test]
fn initial_wave_is_clamped_by_a_lower_cap() {
    // only the cap is overridden; the default wave of 6 must shrink to it
    let settings = ArenaSettings {
        max_enemies: 4,
        ..Default::default()
    };
    let mut app = headless_app(DEFAULT_SEED, settings);
    assert_eq!(count_enemies(&mut app), 4);

    for _ in 0..60 {
        step(&mut app, 1);
        assert!(count_enemies(&mut app) <= 4);
    }
}

#[test]
fn removing_an_already_removed_entity_is_a_no_op() {
    let mut app = headless_app(DEFAULT_SEED, quiet_arena());
    let enemy = app
        .world_mut()
        .spawn((Enemy, Transform::from_xyz(0.0, 0.0, -10.0)))
        .id();
    app.world_mut()
        .spawn((Bullet, Transform::from_xyz(0.0, 0.0, -10.0)));
    step_by(&mut app, Duration::from_millis(1));
    assert_eq!(count_enemies(&mut app), 0);
    assert_eq!(score(&app), 10);

    // the id is already dead; removing it again must change nothing
    assert!(!app.world_mut().despawn(enemy));
    step_by(&mut app, Duration::from_millis(1));
    assert_eq!(count_enemies(&mut app), 0);
    assert_eq!(count_bullets(&mut app), 0);
    assert_eq!(score(&app), 10);
}

#[test]
fn session_reset_reinitializes_the_world() {
    let mut app = headless_app(DEFAULT_SEED, ArenaSettings::default());
    // an enemy already on top of the player makes the next tick terminal
    app.world_mut()
        .spawn((Enemy, Transform::from_xyz(0.0, 0.2, -0.1)));
    step_by(&mut app, Duration::from_millis(1));
    assert_eq!(phase(&app), GamePhase::GameOver);

    app.world_mut().send_event(SessionReset);
    app.update();

    assert_eq!(phase(&app), GamePhase::Playing);
    assert_eq!(score(&app), 0);
    assert_eq!(count_bullets(&mut app), 0);
    assert_eq!(
        count_enemies(&mut app),
        ArenaSettings::default().initial_enemies
    );
}
