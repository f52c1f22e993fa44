use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::harness::RunOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub id: String,
    pub timestamp: String,
    pub seed: u64,
    pub ticks_run: u32,
    pub score: u32,
    pub outcome: RunStatus,
    pub game_over_tick: Option<u32>,
    pub bullets_live: usize,
    pub enemies_live: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The tick budget ran out while the session was still live.
    Survived,
    /// An enemy reached the player and ended the session.
    Overrun,
}

impl RunReport {
    pub fn new(id: impl Into<String>, scenario: &ScenarioConfig, outcome: RunOutcome) -> Self {
        let status = if outcome.game_over_tick.is_some() {
            RunStatus::Overrun
        } else {
            RunStatus::Survived
        };
        Self {
            id: id.into(),
            timestamp: Utc::now().to_rfc3339(),
            seed: scenario.seed,
            ticks_run: outcome.ticks_run,
            score: outcome.score,
            outcome: status,
            game_over_tick: outcome.game_over_tick,
            bullets_live: outcome.bullets_live,
            enemies_live: outcome.enemies_live,
        }
    }
}
