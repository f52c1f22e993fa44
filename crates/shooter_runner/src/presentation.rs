//! Visual adapter over the simulation. The core spawns bare entities
//! (kind marker + transform); this plugin dresses them with meshes when
//! they appear and owns every render-facing resource, so the simulation
//! stays free of graphics handles.

use bevy::prelude::*;
use core_shooter::{Bullet, Enemy, EntityKind, Player};

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene)
            .add_systems(Update, dress_new_entities);
    }
}

/// Shared mesh/material handles, one per kind. Entities clone handles
/// instead of allocating assets per spawn.
#[derive(Resource)]
struct VisualKit {
    player_mesh: Handle<Mesh>,
    player_material: Handle<StandardMaterial>,
    bullet_mesh: Handle<Mesh>,
    bullet_material: Handle<StandardMaterial>,
    enemy_mesh: Handle<Mesh>,
    enemy_material: Handle<StandardMaterial>,
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(50.0, 50.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(8, 16, 24),
            ..default()
        })),
        Transform::from_xyz(0.0, -1.0, 0.0),
    ));

    let player_hull = 2.0 * EntityKind::Player.radius();
    let bullet_side = 2.0 * EntityKind::Bullet.radius();
    commands.insert_resource(VisualKit {
        player_mesh: meshes.add(Cuboid::new(player_hull, player_hull, 1.0)),
        player_material: materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0, 209, 178),
            ..default()
        }),
        bullet_mesh: meshes.add(Cuboid::new(bullet_side, bullet_side, 0.6)),
        bullet_material: materials.add(StandardMaterial {
            base_color: Color::srgb_u8(255, 241, 118),
            ..default()
        }),
        enemy_mesh: meshes.add(Sphere::new(EntityKind::Enemy.radius())),
        enemy_material: materials.add(StandardMaterial {
            base_color: Color::srgb_u8(255, 107, 107),
            ..default()
        }),
    });
}

fn dress_new_entities(
    mut commands: Commands,
    kit: Res<VisualKit>,
    players: Query<Entity, Added<Player>>,
    bullets: Query<Entity, Added<Bullet>>,
    enemies: Query<Entity, Added<Enemy>>,
) {
    for entity in players.iter() {
        commands.entity(entity).insert((
            Mesh3d(kit.player_mesh.clone()),
            MeshMaterial3d(kit.player_material.clone()),
        ));
    }
    for entity in bullets.iter() {
        commands.entity(entity).insert((
            Mesh3d(kit.bullet_mesh.clone()),
            MeshMaterial3d(kit.bullet_material.clone()),
        ));
    }
    for entity in enemies.iter() {
        commands.entity(entity).insert((
            Mesh3d(kit.enemy_mesh.clone()),
            MeshMaterial3d(kit.enemy_material.clone()),
        ));
    }
}
