//! UI plugin - loading screen, pause, win and lose overlays, and the skin menu.

use bevy::prelude::*;

use super::hud;
use crate::core::{ApplySkin, BuildSkinMenu, GameState, LevelCommand};
use crate::level::{ActiveArena, LevelSession};
use crate::skin::SkinRegistry;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Loading screen
            .add_systems(
                OnEnter(GameState::Loading),
                (setup_loading_screen, cleanup::<SkinMenuUi>),
            )
            .add_systems(OnExit(GameState::Loading), cleanup::<LoadingScreenUi>)

            // Pause menu
            .add_systems(OnEnter(GameState::Paused), (setup_pause_menu, show_skin_menu))
            .add_systems(
                OnExit(GameState::Paused),
                (cleanup::<PauseMenuUi>, hide_skin_menu),
            )

            // Level complete
            .add_systems(OnEnter(GameState::Won), setup_level_complete)
            .add_systems(OnExit(GameState::Won), cleanup::<OutcomeUi>)

            // Tank destroyed
            .add_systems(OnEnter(GameState::Lost), setup_level_failed)
            .add_systems(OnExit(GameState::Lost), cleanup::<OutcomeUi>)

            .add_systems(Update, (build_skin_menu, menu_input));
    }
}

/// Marker for loading screen entities.
#[derive(Component)]
struct LoadingScreenUi;

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for win and lose overlays.
#[derive(Component)]
struct OutcomeUi;

/// Marker for the skin menu, built once per scene.
#[derive(Component)]
struct SkinMenuUi;

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy)]
enum MenuButton {
    Resume,
    Restart,
    NextLevel,
    Skin(usize),
}

/// Full-screen overlay shown while the streaming directory is scanned.
fn setup_loading_screen(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
            GlobalZIndex(10),
            LoadingScreenUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading arenas..."),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Centered overlay with a title, an optional subtitle and buttons.
fn spawn_overlay(
    commands: &mut Commands,
    marker: impl Component,
    background: Color,
    title: &str,
    title_color: Color,
    subtitle: Option<String>,
    buttons: &[(&str, MenuButton)],
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(background),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            if let Some(subtitle) = subtitle {
                parent.spawn((
                    Text::new(subtitle),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.7, 0.7, 0.75)),
                    Node {
                        margin: UiRect::bottom(Val::Px(30.0)),
                        ..default()
                    },
                ));
            }

            for (label, button) in buttons {
                spawn_menu_button(parent, label, *button);
            }
        });
}

fn setup_pause_menu(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        PauseMenuUi,
        Color::srgba(0.0, 0.0, 0.0, 0.7),
        "PAUSED",
        Color::srgb(0.8, 0.8, 0.85),
        None,
        &[("Resume", MenuButton::Resume), ("Restart", MenuButton::Restart)],
    );
}

fn setup_level_complete(mut commands: Commands, session: Res<LevelSession>, active: Res<ActiveArena>) {
    spawn_overlay(
        &mut commands,
        OutcomeUi,
        Color::srgba(0.0, 0.08, 0.02, 0.8),
        "LEVEL COMPLETE",
        Color::srgb(0.4, 0.9, 0.5),
        Some(session.timer_text(&active.0.level_name)),
        &[
            ("Next Level", MenuButton::NextLevel),
            ("Restart", MenuButton::Restart),
        ],
    );
}

fn setup_level_failed(mut commands: Commands, active: Res<ActiveArena>) {
    spawn_overlay(
        &mut commands,
        OutcomeUi,
        Color::srgba(0.1, 0.0, 0.0, 0.85),
        "TANK LOST",
        Color::srgb(0.8, 0.2, 0.2),
        Some(active.0.level_name.trim_end().to_string()),
        &[("Restart", MenuButton::Restart)],
    );
}

/// Build the skin list the first time the loading screen is dismissed.
fn build_skin_menu(
    mut commands: Commands,
    mut events: EventReader<BuildSkinMenu>,
    skins: Res<SkinRegistry>,
    existing: Query<Entity, With<SkinMenuUi>>,
) {
    if events.read().count() == 0 || !existing.is_empty() {
        return;
    }
    info!("Building skin menu with {} skins", skins.len());

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            GlobalZIndex(5),
            Visibility::Hidden,
            SkinMenuUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Skins"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));

            if skins.is_empty() {
                parent.spawn((
                    Text::new("No skins found"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.5, 0.5, 0.55)),
                ));
            }
            for (index, skin) in skins.iter().enumerate() {
                spawn_menu_button(parent, &skin.name, MenuButton::Skin(index));
            }
        });
}

fn show_skin_menu(mut query: Query<&mut Visibility, With<SkinMenuUi>>) {
    for mut visibility in query.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}

fn hide_skin_menu(mut query: Query<&mut Visibility, With<SkinMenuUi>>) {
    for mut visibility in query.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

/// Handle button interactions on every menu.
fn menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut level_commands: EventWriter<LevelCommand>,
    mut apply_skin: EventWriter<ApplySkin>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                match button {
                    MenuButton::Resume => {
                        level_commands.send(LevelCommand::TogglePause);
                    }
                    MenuButton::Restart => {
                        level_commands.send(LevelCommand::Restart);
                    }
                    MenuButton::NextLevel => {
                        level_commands.send(LevelCommand::Advance);
                    }
                    MenuButton::Skin(index) => {
                        apply_skin.send(ApplySkin { index: *index });
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVERED.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

/// Despawn every entity carrying marker `T`.
fn cleanup<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
