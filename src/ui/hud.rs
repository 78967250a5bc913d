//! HUD - player portrait, name and the level timer.

use bevy::prelude::*;

use crate::core::{GameState, PortraitLoaded};
use crate::level::{ActiveArena, LevelSession};

/// Name shown until a player portrait is found.
const DEFAULT_PLAYER_NAME: &str = "Player";

const AVATAR_SIZE: f32 = 64.0;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Portrait image slot.
#[derive(Component)]
pub struct PlayerAvatar;

#[derive(Component)]
pub struct PlayerNameText;

/// "<arena name> m:ss" line.
#[derive(Component)]
pub struct TimerText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(Startup, spawn_hud)
        .add_systems(OnEnter(GameState::Paused), hide_hud)
        .add_systems(OnExit(GameState::Paused), show_hud)
        .add_systems(Update, (update_timer_text, apply_portrait));
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // HUD root container (top-left corner)
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                left: Val::Px(20.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(12.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                ImageNode::default(),
                Node {
                    width: Val::Px(AVATAR_SIZE),
                    height: Val::Px(AVATAR_SIZE),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.4)),
                Visibility::Hidden,
                PlayerAvatar,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    ..default()
                })
                .with_children(|column| {
                    column.spawn((
                        Text::new(DEFAULT_PLAYER_NAME),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.9)),
                        PlayerNameText,
                    ));
                    column.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.8, 0.7)),
                        TimerText,
                    ));
                });
        });
}

fn update_timer_text(
    session: Res<LevelSession>,
    active: Res<ActiveArena>,
    mut text_query: Query<&mut Text, With<TimerText>>,
) {
    if !session.is_changed() && !active.is_changed() {
        return;
    }
    let line = session.timer_text(&active.0.level_name);
    for mut text in text_query.iter_mut() {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}

/// Show the decoded portrait and its display name.
fn apply_portrait(
    mut events: EventReader<PortraitLoaded>,
    mut avatar_query: Query<(&mut ImageNode, &mut Visibility), With<PlayerAvatar>>,
    mut name_query: Query<&mut Text, With<PlayerNameText>>,
) {
    for portrait in events.read() {
        for (mut image, mut visibility) in avatar_query.iter_mut() {
            image.image = portrait.image.clone();
            *visibility = Visibility::Inherited;
        }
        for mut text in name_query.iter_mut() {
            text.0 = portrait.display_name.clone();
        }
        info!("Player portrait set for '{}'", portrait.display_name);
    }
}

fn hide_hud(mut query: Query<&mut Visibility, With<HudRoot>>) {
    for mut visibility in query.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

fn show_hud(mut query: Query<&mut Visibility, With<HudRoot>>) {
    for mut visibility in query.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}
