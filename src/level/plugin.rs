//! Level plugin - arena loading, progression, pause and the level clock.

use bevy::prelude::*;

use super::session::{judge_position, LevelOutcome, LevelSession, LevelTransition};
use crate::arena::{builtin_arena, ArenaDefinition, ArenaRegistry};
use crate::core::{GameConfig, GameState, LevelCommand};
use crate::player::{Player, Target};
use crate::world::ArenaStage;

/// The arena currently built in the world.
#[derive(Resource, Debug, Clone)]
pub struct ActiveArena(pub ArenaDefinition);

/// Level plugin - owns the session and applies level commands.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelSession>()
            .insert_resource(ActiveArena(builtin_arena()))
            .add_systems(OnEnter(GameState::Loading), begin_scene)
            .add_systems(OnExit(GameState::Loading), start_clock)
            .add_systems(
                Update,
                (
                    send_pause_toggle,
                    handle_level_commands,
                    tick_clock.run_if(in_state(GameState::Running)),
                    check_outcome.run_if(in_state(GameState::Running)),
                )
                    .chain(),
            );
    }
}

/// Reset progression and stage the built-in arena behind the loading screen.
fn begin_scene(mut session: ResMut<LevelSession>, mut level_commands: EventWriter<LevelCommand>) {
    session.begin_load();
    level_commands.send(LevelCommand::LoadBuiltinArena);
}

/// Loading screen dismissed: start the clock from zero.
fn start_clock(mut session: ResMut<LevelSession>, mut time: ResMut<Time<Virtual>>) {
    session.finish_load();
    time.unpause();
    info!("Level {} started", session.current_level);
}

/// Escape toggles pause on key-down only.
fn send_pause_toggle(keyboard: Res<ButtonInput<KeyCode>>, mut level_commands: EventWriter<LevelCommand>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        level_commands.send(LevelCommand::TogglePause);
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_level_commands(
    mut events: EventReader<LevelCommand>,
    mut session: ResMut<LevelSession>,
    arenas: Res<ArenaRegistry>,
    mut active: ResMut<ActiveArena>,
    mut stage: ArenaStage,
    mut time: ResMut<Time<Virtual>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for command in events.read() {
        let transition = match command {
            LevelCommand::LoadBuiltinArena => {
                active.0 = builtin_arena();
                stage.build(&active.0);
                continue;
            }
            LevelCommand::TogglePause => {
                if matches!(state.get(), GameState::Running | GameState::Paused) {
                    if session.toggle_pause() {
                        time.pause();
                        next_state.set(GameState::Paused);
                    } else {
                        time.unpause();
                        next_state.set(GameState::Running);
                    }
                }
                continue;
            }
            LevelCommand::LoadFirstArena => session.first_arena(),
            LevelCommand::Restart => {
                stage.reset_player_body();
                session.restart(arenas.len())
            }
            LevelCommand::Advance => session.advance(arenas.len()),
        };

        match transition {
            LevelTransition::LoadArena(position) => {
                let Some(arena) = arenas.get(position) else {
                    warn!("No arena at position {} ({} loaded)", position, arenas.len());
                    continue;
                };
                info!("Loading level {}: '{}'", session.current_level, arena.level_name);
                active.0 = arena.clone();
                stage.build(arena);
                session.reset_clock();

                // Arenas arriving in the background leave a pause in place
                let keep_paused =
                    *command == LevelCommand::LoadFirstArena && *state.get() == GameState::Paused;
                if *state.get() != GameState::Loading && !keep_paused {
                    session.is_paused = false;
                    time.unpause();
                    next_state.set(GameState::Running);
                }
            }
            LevelTransition::ReloadScene => {
                if *state.get() == GameState::Loading {
                    continue;
                }
                info!("Reloading scene");
                next_state.set(GameState::Loading);
            }
        }
    }
}

fn tick_clock(time: Res<Time>, mut session: ResMut<LevelSession>) {
    session.tick(time.delta_secs());
}

fn check_outcome(
    config: Res<GameConfig>,
    active: Res<ActiveArena>,
    player_query: Query<&Transform, With<Player>>,
    target_query: Query<&Transform, (With<Target>, Without<Player>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let (Ok(player), Ok(target)) = (player_query.get_single(), target_query.get_single()) else {
        return;
    };

    match judge_position(
        &active.0,
        player.translation,
        target.translation.xz(),
        config.win_radius,
        config.fall_limit,
    ) {
        Some(LevelOutcome::Won) => {
            info!("Reached the target of '{}'", active.0.level_name);
            next_state.set(GameState::Won);
        }
        Some(LevelOutcome::Lost) => {
            info!("Lost on '{}'", active.0.level_name);
            next_state.set(GameState::Lost);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{finish_body_reset, BodyReset, PlayerConfig};
    use crate::world::TileAssets;
    use bevy::state::app::StatesPlugin;
    use bevy_rapier3d::prelude::{RigidBody, Velocity};

    fn named_arena(name: &str, ordinal: usize) -> ArenaDefinition {
        let mut arena = builtin_arena();
        arena.level_name = name.to_string();
        arena.level_index = ordinal;
        arena
    }

    /// Headless app with the level plugin, a tank and a target, already Running.
    fn running_app(arenas: &[&str]) -> App {
        let mut registry = ArenaRegistry::default();
        for (ordinal, name) in arenas.iter().enumerate() {
            registry.insert(named_arena(name, ordinal));
        }

        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GameState>()
            .add_event::<LevelCommand>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<GameConfig>()
            .init_resource::<PlayerConfig>()
            .insert_resource(TileAssets::new(&mut meshes, &mut materials))
            .insert_resource(registry)
            .add_systems(PreUpdate, finish_body_reset)
            .add_plugins(LevelPlugin);

        app.world_mut().spawn((
            Player,
            Transform::default(),
            Velocity::zero(),
            RigidBody::Dynamic,
        ));
        app.world_mut().spawn((Target, Transform::default()));

        // Builtin arena staged, then the loading screen dismissed
        app.update();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Running);
        app.update();
        assert_eq!(state(&app), GameState::Running);
        app
    }

    fn state(app: &App) -> GameState {
        *app.world().resource::<State<GameState>>().get()
    }

    fn virtual_paused(app: &App) -> bool {
        app.world().resource::<Time<Virtual>>().is_paused()
    }

    fn tap_escape(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    }

    fn player_body(app: &mut App) -> (RigidBody, bool) {
        let mut query = app
            .world_mut()
            .query_filtered::<(&RigidBody, Has<BodyReset>), With<Player>>();
        let (body, resetting) = query.single(app.world());
        (*body, resetting)
    }

    #[test]
    fn escape_toggles_on_key_down_only() {
        let mut app = running_app(&["Canyon"]);
        assert!(!virtual_paused(&app));

        tap_escape(&mut app);
        assert!(virtual_paused(&app));
        assert!(app.world().resource::<LevelSession>().is_paused);

        // Holding the key does nothing more
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::Paused);
        assert!(virtual_paused(&app));

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::Escape);
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        tap_escape(&mut app);
        app.update();
        assert_eq!(state(&app), GameState::Running);
        assert!(!virtual_paused(&app));
        assert!(!app.world().resource::<LevelSession>().is_paused);
    }

    #[test]
    fn restart_freezes_the_body_for_one_frame() {
        let mut app = running_app(&["Canyon"]);

        app.world_mut().send_event(LevelCommand::Restart);
        app.update();
        let (body, resetting) = player_body(&mut app);
        assert_eq!(body, RigidBody::KinematicPositionBased);
        assert!(resetting);

        app.update();
        let (body, resetting) = player_body(&mut app);
        assert_eq!(body, RigidBody::Dynamic);
        assert!(!resetting);
    }

    #[test]
    fn advance_past_the_last_arena_reloads_the_scene() {
        let mut app = running_app(&["Canyon", "Mesa"]);

        app.world_mut().send_event(LevelCommand::LoadFirstArena);
        app.update();
        app.world_mut().send_event(LevelCommand::Advance);
        app.update();
        assert_eq!(app.world().resource::<LevelSession>().current_level, 2);
        assert_eq!(app.world().resource::<ActiveArena>().0.level_name, "Mesa");

        app.world_mut().send_event(LevelCommand::Advance);
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::Loading);

        let session = app.world().resource::<LevelSession>();
        assert_eq!(session.current_level, 1);
        assert!(session.is_loading);
        assert_eq!(app.world().resource::<ArenaRegistry>().len(), 2);
    }

    #[test]
    fn background_arena_load_keeps_the_pause() {
        let mut app = running_app(&["Canyon"]);
        tap_escape(&mut app);
        app.update();
        assert_eq!(state(&app), GameState::Paused);

        app.world_mut().send_event(LevelCommand::LoadFirstArena);
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::Paused);
        assert!(virtual_paused(&app));
        assert!(app.world().resource::<LevelSession>().is_paused);
        assert_eq!(app.world().resource::<ActiveArena>().0.level_name, "Canyon");
    }
}
