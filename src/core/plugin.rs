//! Core plugin that sets up game states, events, and configuration.

use bevy::prelude::*;

use super::config::GameConfig;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, Running, Paused, Won, Lost)
/// - Global events (LevelCommand, ApplySkin, ...)
/// - The game configuration resource
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Loaded here so that LogPlugin is already installed
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::load());
        }

        let (r, g, b) = app.world().resource::<GameConfig>().clear_color;

        app
            .insert_resource(ClearColor(Color::srgb(r, g, b)))

            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<LevelCommand>()
            .add_event::<ApplySkin>()
            .add_event::<ColorKeyLoaded>()
            .add_event::<PortraitLoaded>()
            .add_event::<BuildSkinMenu>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn config_is_loaded_when_absent() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, CorePlugin));
        assert!(app.world().contains_resource::<GameConfig>());
        assert!(app.world().contains_resource::<ClearColor>());
    }

    #[test]
    fn inserted_config_is_kept() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(GameConfig {
                clear_color: (1.0, 0.0, 0.0),
                grace_delay_secs: 9.0,
                ..default()
            })
            .add_plugins(CorePlugin);

        assert_eq!(app.world().resource::<GameConfig>().grace_delay_secs, 9.0);
        assert_eq!(app.world().resource::<ClearColor>().0, Color::srgb(1.0, 0.0, 0.0));
    }
}
