//! Canonical simulation core for the corridor shooter: one world, one
//! update loop, no rendering. Presentation and input live in the runner.

pub mod diagnostics;
pub mod gameplay;
pub mod ui;

pub use gameplay::{
    ArenaSettings, Bullet, Enemy, EntityKind, FireCommand, GamePhase, GameplayPlugin, MoveIntent,
    Player, Score, SessionReset, SimulationParams, SimulationRng,
};

use bevy::app::{App, Plugin};

/// Everything a windowed host needs: the simulation itself, the HUD and
/// frame diagnostics. Headless consumers add [`GameplayPlugin`] alone.
pub struct CoreShooterPlugin;

impl Plugin for CoreShooterPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            gameplay::GameplayPlugin,
            ui::HudPlugin,
            diagnostics::DiagnosticsPlugin,
        ));
    }
}
