use bevy::prelude::*;

use crate::gameplay::{GamePhase, Score};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(7, 16, 37)))
            .add_systems(Startup, spawn_hud)
            .add_systems(Update, (update_score_text, update_game_over_banner));
    }
}

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct GameOverBanner;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Score: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.86, 0.93, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.25, 0.25)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(45.0),
            left: Val::Percent(40.0),
            ..default()
        },
        GameOverBanner,
    ));
}

fn update_score_text(score: Res<Score>, mut text: Query<&mut Text, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    if let Ok(mut text) = text.get_single_mut() {
        let content = format!("Score: {}", score.0);
        content.clone_into(&mut **text);
    }
}

fn update_game_over_banner(
    phase: Res<GamePhase>,
    mut text: Query<&mut Text, With<GameOverBanner>>,
) {
    if !phase.is_changed() {
        return;
    }
    if let Ok(mut text) = text.get_single_mut() {
        let content = match *phase {
            GamePhase::GameOver => "Game Over (press R)".to_string(),
            GamePhase::Playing => String::new(),
        };
        content.clone_into(&mut **text);
    }
}
