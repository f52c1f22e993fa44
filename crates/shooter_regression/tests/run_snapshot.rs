use core_shooter::{ArenaSettings, SimulationParams};
use serde_json::json;
use shooter_regression::DEFAULT_SEED;

#[test]
fn default_tuning_snapshot() {
    let params = SimulationParams::from_seed(DEFAULT_SEED);
    let settings = ArenaSettings::default();
    let summary = json!({
        "initial_enemies": settings.initial_enemies,
        "lateral_bound": settings.lateral_bound,
        "max_enemies": settings.max_enemies,
        "seed": params.seed,
        "spawn_interval": settings.spawn_interval,
    });
    insta::assert_json_snapshot!("default_tuning", summary);
}
