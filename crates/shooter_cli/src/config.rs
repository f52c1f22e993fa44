use std::fs;
use std::path::Path;

use core_shooter::ArenaSettings;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("scenario must run at least one tick")]
    EmptyRun,
}

/// A headless run described as data: seed, duration, autofire cadence
/// and optional arena overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub seed: u64,
    pub ticks: u32,
    /// Queue one shot every N ticks; 0 disables autofire.
    pub fire_every: u32,
    pub fixed_delta: f64,
    pub arena: ArenaOverrides,
}

impl ScenarioConfig {
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let data = fs::read_to_string(path)?;
        let scenario: ScenarioConfig = toml::from_str(&data)?;
        if scenario.ticks == 0 {
            return Err(ScenarioError::EmptyRun);
        }
        Ok(scenario)
    }

    pub fn arena_settings(&self) -> ArenaSettings {
        self.arena.apply(ArenaSettings::default())
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 600,
            fire_every: 20,
            fixed_delta: 1.0 / 60.0,
            arena: ArenaOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArenaOverrides {
    pub lateral_bound: Option<f32>,
    pub initial_enemies: Option<usize>,
    pub spawn_interval: Option<f32>,
    pub max_enemies: Option<usize>,
}

impl ArenaOverrides {
    pub fn apply(&self, mut settings: ArenaSettings) -> ArenaSettings {
        if let Some(lateral_bound) = self.lateral_bound {
            settings.lateral_bound = lateral_bound;
        }
        if let Some(initial_enemies) = self.initial_enemies {
            settings.initial_enemies = initial_enemies;
        }
        if let Some(spawn_interval) = self.spawn_interval {
            settings.spawn_interval = spawn_interval;
        }
        if let Some(max_enemies) = self.max_enemies {
            settings.max_enemies = max_enemies;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let scenario: ScenarioConfig = toml::from_str(
            r#"
            seed = 7
            ticks = 120

            [arena]
            max_enemies = 4
            "#,
        )
        .expect("scenario parses");
        assert_eq!(scenario.seed, 7);
        assert_eq!(scenario.ticks, 120);

        let settings = scenario.arena_settings();
        assert_eq!(settings.max_enemies, 4);
        assert_eq!(
            settings.initial_enemies,
            ArenaSettings::default().initial_enemies
        );
    }
}
