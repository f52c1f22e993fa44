//! Headless driver: a minimal Bevy app stepped tick by tick, with time
//! advanced manually so runs are reproducible wall-clock independent.

use std::time::Duration;

use bevy::app::FixedUpdate;
use bevy::prelude::*;
use bevy::time::TimePlugin;
use core_shooter::{
    Bullet, Enemy, FireCommand, GamePhase, GameplayPlugin, Score, SimulationParams,
};
use tracing::debug;

use crate::config::ScenarioConfig;

pub struct HeadlessRun {
    app: App,
    ticks: u32,
    fire_every: u32,
    step: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOutcome {
    pub score: u32,
    pub ticks_run: u32,
    pub game_over_tick: Option<u32>,
    pub bullets_live: usize,
    pub enemies_live: usize,
}

impl HeadlessRun {
    pub fn new(scenario: &ScenarioConfig) -> Self {
        let mut app = App::new();
        app.insert_resource(SimulationParams {
            seed: scenario.seed,
            fixed_delta: scenario.fixed_delta,
        });
        app.insert_resource(scenario.arena_settings());
        app.add_plugins(MinimalPlugins.set(TimePlugin::default()));
        app.add_plugins(GameplayPlugin);
        Self {
            app,
            ticks: scenario.ticks,
            fire_every: scenario.fire_every,
            step: Duration::from_secs_f64(scenario.fixed_delta),
        }
    }

    /// Runs until the session ends or the tick budget is spent.
    pub fn execute(mut self) -> RunOutcome {
        self.app.update();

        let mut ticks_run = 0;
        let mut game_over_tick = None;
        for tick in 0..self.ticks {
            if self.fire_every > 0 && tick % self.fire_every == 0 {
                self.app.world_mut().send_event(FireCommand);
            }
            {
                let mut time = self.app.world_mut().resource_mut::<Time>();
                time.advance_by(self.step);
            }
            self.app.world_mut().run_schedule(FixedUpdate);
            ticks_run = tick + 1;
            if *self.app.world().resource::<GamePhase>() == GamePhase::GameOver {
                game_over_tick = Some(tick);
                break;
            }
        }

        let world = self.app.world_mut();
        let score = world.resource::<Score>().0;
        let mut bullets = world.query_filtered::<(), With<Bullet>>();
        let bullets_live = bullets.iter(&world).count();
        let mut enemies = world.query_filtered::<(), With<Enemy>>();
        let enemies_live = enemies.iter(&world).count();
        debug!(
            target: "shooter_cli.harness",
            score,
            ticks_run,
            "headless run finished"
        );
        RunOutcome {
            score,
            ticks_run,
            game_over_tick,
            bullets_live,
            enemies_live,
        }
    }
}
