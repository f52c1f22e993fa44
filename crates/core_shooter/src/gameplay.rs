use bevy::prelude::*;
use bevy::time::{Fixed, Time};
use bevy::utils::HashSet;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::{debug, info};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_FIXED_DELTA: f64 = 1.0 / 60.0;
const DEFAULT_LATERAL_BOUND: f32 = 4.0;
const DEFAULT_INITIAL_ENEMIES: usize = 6;
const DEFAULT_SPAWN_INTERVAL: f32 = 1.5;
const DEFAULT_MAX_ENEMIES: usize = 12;

const PLAYER_SPEED: f32 = 6.0;
const BULLET_SPEED: f32 = 30.0;
const ENEMY_SPEED: f32 = 6.0;

const SPAWN_MIN_DEPTH: f32 = 20.0;
const SPAWN_DEPTH_RANGE: f32 = 20.0;
const BULLET_MAX_DEPTH: f32 = 80.0;
const ENEMY_ALTITUDE: f32 = 0.2;
const BULLET_MUZZLE_OFFSET: f32 = 1.0;

// Tuned hit ranges, not radius sums. Bullets are generous so grazing
// shots still connect; the player hull is wider than its mesh.
const BULLET_HIT_RANGE: f32 = 0.6;
const PLAYER_HIT_RANGE: f32 = 0.8;
const KILL_SCORE: u32 = 10;

/// The canonical simulation loop. Deterministic given a seed and a fixed
/// timestep, so downstream crates can drive it headless and assert on the
/// resulting world.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SimulationParams>() {
            app.insert_resource(SimulationParams::from_env());
        }
        if !app.world().contains_resource::<ArenaSettings>() {
            app.insert_resource(ArenaSettings::from_env());
        }

        app.init_resource::<SimulationRng>()
            .init_resource::<Score>()
            .init_resource::<GamePhase>()
            .init_resource::<MoveIntent>()
            .add_event::<FireCommand>()
            .add_event::<SessionReset>()
            .add_systems(
                Startup,
                (configure_fixed_time, spawn_player, spawn_initial_enemies),
            )
            .add_systems(
                FixedUpdate,
                (
                    steer_player,
                    fire_bullets,
                    advance_bullets,
                    advance_enemies,
                    detect_player_breach,
                    resolve_bullet_hits,
                    cull_spent_bullets,
                    tick_spawn_timer,
                )
                    .chain()
                    .distributive_run_if(session_playing),
            )
            .add_systems(Update, handle_session_reset);
    }
}

#[derive(Resource, Clone, Debug)]
pub struct SimulationParams {
    pub seed: u64,
    pub fixed_delta: f64,
}

impl SimulationParams {
    pub fn from_env() -> Self {
        let seed = std::env::var("SIMULATION_SEED")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_SEED);
        let fixed_delta = std::env::var("SIMULATION_FIXED_DT")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_FIXED_DELTA);
        Self { seed, fixed_delta }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            fixed_delta: DEFAULT_FIXED_DELTA,
        }
    }
}

#[derive(Resource, Clone, Debug)]
pub struct ArenaSettings {
    /// Half-width of the corridor; the player x stays in ±this, and
    /// enemies spawn inside the same band.
    pub lateral_bound: f32,
    pub initial_enemies: usize,
    pub spawn_interval: f32,
    pub max_enemies: usize,
}

impl ArenaSettings {
    pub fn from_env() -> Self {
        let lateral_bound = std::env::var("ARENA_LATERAL_BOUND")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_LATERAL_BOUND);
        let max_enemies = std::env::var("ARENA_MAX_ENEMIES")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_MAX_ENEMIES);
        let initial_enemies = std::env::var("ARENA_INITIAL_ENEMIES")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_INITIAL_ENEMIES)
            .min(max_enemies);
        let spawn_interval = std::env::var("ARENA_SPAWN_INTERVAL")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_SPAWN_INTERVAL);
        Self {
            lateral_bound,
            initial_enemies,
            spawn_interval,
            max_enemies,
        }
    }

    /// Initial wave size. The cap binds however the settings were built,
    /// not only on the env path.
    pub fn initial_wave(&self) -> usize {
        self.initial_enemies.min(self.max_enemies)
    }
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            lateral_bound: DEFAULT_LATERAL_BOUND,
            initial_enemies: DEFAULT_INITIAL_ENEMIES,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            max_enemies: DEFAULT_MAX_ENEMIES,
        }
    }
}

#[derive(Resource, Debug)]
pub struct SimulationRng {
    seed: u64,
    rng: StdRng,
}

impl SimulationRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn gen_f32(&mut self, range: RangeInclusive<f32>) -> f32 {
        self.rng.gen_range(range)
    }
}

impl FromWorld for SimulationRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<SimulationParams>()
            .cloned()
            .unwrap_or_default()
            .seed;
        Self::new(seed)
    }
}

/// Session score. Only ever incremented while the session is live.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct Score(pub u32);

/// Whole-session state machine. `GameOver` is terminal: every simulation
/// system is gated on `Playing`, so once an enemy reaches the player the
/// world freezes until a [`SessionReset`] arrives.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}

/// Held-key movement intents, written by the input layer and read once
/// per tick. Firing is edge-triggered and travels as [`FireCommand`]
/// events instead.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn direction(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

/// One event per trigger pull; each spawns exactly one bullet.
#[derive(Event, Default)]
pub struct FireCommand;

/// Full re-initialization of the session, the in-process equivalent of
/// reloading the page in the reference behavior.
#[derive(Event, Default)]
pub struct SessionReset;

#[derive(Resource)]
struct SpawnTimer(Timer);

#[derive(Component, Default)]
pub struct Player;

#[derive(Component, Default)]
pub struct Bullet;

#[derive(Component, Default)]
pub struct Enemy;

/// Closed set of simulated kinds with their per-kind tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Bullet,
    Enemy,
}

impl EntityKind {
    /// Units per second along the kind's travel axis.
    pub fn speed(&self) -> f32 {
        match self {
            Self::Player => PLAYER_SPEED,
            Self::Bullet => BULLET_SPEED,
            Self::Enemy => ENEMY_SPEED,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Self::Player => 0.4,
            Self::Bullet => 0.06,
            Self::Enemy => 0.45,
        }
    }
}

fn session_playing(phase: Res<GamePhase>) -> bool {
    *phase == GamePhase::Playing
}

fn configure_fixed_time(mut fixed_time: ResMut<Time<Fixed>>, params: Res<SimulationParams>) {
    fixed_time.set_timestep_seconds(params.fixed_delta);
}

fn spawn_player(mut commands: Commands) {
    commands.spawn((Player, Transform::from_xyz(0.0, 0.0, 0.0)));
}

fn spawn_initial_enemies(
    mut commands: Commands,
    settings: Res<ArenaSettings>,
    mut rng: ResMut<SimulationRng>,
) {
    for _ in 0..settings.initial_wave() {
        spawn_enemy(&mut commands, &settings, &mut rng);
    }
    commands.insert_resource(SpawnTimer(Timer::from_seconds(
        settings.spawn_interval,
        TimerMode::Repeating,
    )));
}

fn spawn_enemy(commands: &mut Commands, settings: &ArenaSettings, rng: &mut SimulationRng) {
    let half = settings.lateral_bound;
    let x = rng.gen_f32(-half..=half);
    let z = -(SPAWN_MIN_DEPTH + rng.gen_f32(0.0..=SPAWN_DEPTH_RANGE));
    commands.spawn((Enemy, Transform::from_xyz(x, ENEMY_ALTITUDE, z)));
}

fn steer_player(
    time: Res<Time>,
    intent: Res<MoveIntent>,
    settings: Res<ArenaSettings>,
    mut players: Query<&mut Transform, With<Player>>,
) {
    let direction = intent.direction();
    if direction == 0.0 {
        return;
    }
    let dt = time.delta_secs();
    for mut transform in players.iter_mut() {
        let moved = transform.translation.x + direction * EntityKind::Player.speed() * dt;
        transform.translation.x = moved.clamp(-settings.lateral_bound, settings.lateral_bound);
    }
}

fn fire_bullets(
    mut commands: Commands,
    mut shots: EventReader<FireCommand>,
    players: Query<&Transform, With<Player>>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    for _ in shots.read() {
        let muzzle = player.translation + Vec3::new(0.0, 0.0, -BULLET_MUZZLE_OFFSET);
        commands.spawn((Bullet, Transform::from_translation(muzzle)));
        debug!(target: "core_shooter.fire", x = muzzle.x, "bullet fired");
    }
}

fn advance_bullets(time: Res<Time>, mut bullets: Query<&mut Transform, With<Bullet>>) {
    let step = EntityKind::Bullet.speed() * time.delta_secs();
    for mut transform in bullets.iter_mut() {
        transform.translation.z -= step;
    }
}

fn advance_enemies(time: Res<Time>, mut enemies: Query<&mut Transform, With<Enemy>>) {
    let step = EntityKind::Enemy.speed() * time.delta_secs();
    for mut transform in enemies.iter_mut() {
        transform.translation.z += step;
    }
}

/// Terminal check. Runs before bullet resolution so a same-tick kill
/// cannot score once the session is over.
fn detect_player_breach(
    mut phase: ResMut<GamePhase>,
    score: Res<Score>,
    players: Query<&Transform, With<Player>>,
    enemies: Query<&Transform, With<Enemy>>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    for enemy in enemies.iter() {
        let reached_depth = enemy.translation.z >= player.translation.z;
        let collided = enemy.translation.distance(player.translation) < PLAYER_HIT_RANGE;
        if reached_depth || collided {
            *phase = GamePhase::GameOver;
            info!(
                target: "core_shooter.session",
                score = score.0,
                "player overrun, session over"
            );
            return;
        }
    }
}

fn resolve_bullet_hits(
    mut commands: Commands,
    mut score: ResMut<Score>,
    settings: Res<ArenaSettings>,
    mut rng: ResMut<SimulationRng>,
    bullets: Query<(Entity, &Transform), With<Bullet>>,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
) {
    let mut dead_enemies: HashSet<Entity> = HashSet::default();
    let mut spent_bullets: HashSet<Entity> = HashSet::default();
    for (bullet, bullet_transform) in bullets.iter() {
        for (enemy, enemy_transform) in enemies.iter() {
            if dead_enemies.contains(&enemy) {
                continue;
            }
            let distance = bullet_transform
                .translation
                .distance(enemy_transform.translation);
            if distance < BULLET_HIT_RANGE {
                dead_enemies.insert(enemy);
                spent_bullets.insert(bullet);
                score.0 += KILL_SCORE;
                // No pierce: the bullet is consumed by its first hit.
                break;
            }
        }
    }

    if dead_enemies.is_empty() {
        return;
    }
    info!(
        target: "core_shooter.kills",
        kills = dead_enemies.len(),
        score = score.0,
        "enemies destroyed"
    );
    for entity in dead_enemies.iter().chain(spent_bullets.iter()) {
        if let Some(mut cmds) = commands.get_entity(*entity) {
            cmds.despawn();
        }
    }

    // One respawn per kill keeps the population roughly constant, but the
    // cap always wins.
    let live = enemies.iter().count() - dead_enemies.len();
    let budget = settings.max_enemies.saturating_sub(live);
    for _ in 0..dead_enemies.len().min(budget) {
        spawn_enemy(&mut commands, &settings, &mut rng);
    }
}

fn cull_spent_bullets(mut commands: Commands, bullets: Query<(Entity, &Transform), With<Bullet>>) {
    for (entity, transform) in bullets.iter() {
        if bullet_escaped(transform.translation.z) {
            commands.entity(entity).despawn();
        }
    }
}

/// Exactly at the depth threshold counts as out of the playable volume.
fn bullet_escaped(z: f32) -> bool {
    z <= -BULLET_MAX_DEPTH
}

fn tick_spawn_timer(
    time: Res<Time>,
    mut timer: ResMut<SpawnTimer>,
    settings: Res<ArenaSettings>,
    mut rng: ResMut<SimulationRng>,
    enemies: Query<(), With<Enemy>>,
    mut commands: Commands,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    if enemies.iter().count() >= settings.max_enemies {
        return;
    }
    spawn_enemy(&mut commands, &settings, &mut rng);
}

fn handle_session_reset(
    mut commands: Commands,
    mut resets: EventReader<SessionReset>,
    mut stale_shots: ResMut<Events<FireCommand>>,
    settings: Res<ArenaSettings>,
    mut rng: ResMut<SimulationRng>,
    mut score: ResMut<Score>,
    mut phase: ResMut<GamePhase>,
    mut intent: ResMut<MoveIntent>,
    mut timer: ResMut<SpawnTimer>,
    mut players: Query<&mut Transform, With<Player>>,
    leftovers: Query<Entity, Or<(With<Bullet>, With<Enemy>)>>,
) {
    if resets.read().next().is_none() {
        return;
    }
    for entity in leftovers.iter() {
        commands.entity(entity).despawn();
    }
    for mut transform in players.iter_mut() {
        transform.translation = Vec3::ZERO;
    }
    stale_shots.clear();
    score.0 = 0;
    *phase = GamePhase::Playing;
    *intent = MoveIntent::default();
    timer.0.reset();
    for _ in 0..settings.initial_wave() {
        spawn_enemy(&mut commands, &settings, &mut rng);
    }
    info!(target: "core_shooter.session", seed = rng.seed(), "session reset");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_wave_spawns_inside_the_corridor() {
        let mut app = App::new();
        app.insert_resource(ArenaSettings::default());
        app.insert_resource(SimulationRng::new(9));
        app.add_systems(Startup, (spawn_player, spawn_initial_enemies));
        app.update();

        let world = app.world_mut();
        let mut query = world.query_filtered::<&Transform, With<Enemy>>();
        let mut count = 0;
        for transform in query.iter(&world) {
            let pos = transform.translation;
            assert!(pos.x.abs() <= DEFAULT_LATERAL_BOUND);
            assert!(pos.z <= -SPAWN_MIN_DEPTH);
            assert!(pos.z >= -(SPAWN_MIN_DEPTH + SPAWN_DEPTH_RANGE));
            count += 1;
        }
        assert_eq!(count, ArenaSettings::default().initial_enemies);
    }

    #[test]
    fn move_intent_resolves_to_a_direction() {
        let mut intent = MoveIntent::default();
        assert_eq!(intent.direction(), 0.0);
        intent.left = true;
        assert_eq!(intent.direction(), -1.0);
        intent.right = true;
        assert_eq!(intent.direction(), 0.0);
        intent.left = false;
        assert_eq!(intent.direction(), 1.0);
    }

    #[test]
    fn bullet_cull_is_inclusive_at_the_threshold() {
        assert!(bullet_escaped(-BULLET_MAX_DEPTH));
        assert!(bullet_escaped(-BULLET_MAX_DEPTH - 1.0));
        assert!(!bullet_escaped(-BULLET_MAX_DEPTH + 0.001));
    }

    #[test]
    fn initial_wave_size_follows_settings() {
        let mut app = App::new();
        app.insert_resource(ArenaSettings {
            initial_enemies: 3,
            ..Default::default()
        });
        app.insert_resource(SimulationRng::new(7));
        app.add_systems(Startup, spawn_initial_enemies);
        app.update();

        let world = app.world_mut();
        let mut query = world.query_filtered::<(), With<Enemy>>();
        assert_eq!(query.iter(&world).count(), 3);
    }
}
