//! Keyboard/mouse mapping into the core's intent surface. Movement is a
//! held-key level, firing and restarting are edges.

use bevy::prelude::*;
use core_shooter::{FireCommand, GamePhase, MoveIntent, SessionReset};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (read_move_keys, read_fire_input, read_restart_key));
    }
}

fn read_move_keys(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<MoveIntent>) {
    intent.left = keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]);
    intent.right = keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]);
}

fn read_fire_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut shots: EventWriter<FireCommand>,
) {
    if keys.just_pressed(KeyCode::Space) || buttons.just_pressed(MouseButton::Left) {
        shots.send(FireCommand);
    }
}

fn read_restart_key(
    keys: Res<ButtonInput<KeyCode>>,
    phase: Res<GamePhase>,
    mut resets: EventWriter<SessionReset>,
) {
    if *phase == GamePhase::GameOver && keys.just_pressed(KeyCode::KeyR) {
        resets.send(SessionReset);
    }
}
