//! Tank Arenas - a top-down tank game whose levels are drawn as images.
//!
//! Arenas, skins, the player portrait and music are discovered at runtime in
//! a streaming directory. File names carry the metadata; arena images are
//! decoded pixel by pixel into tile grids.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, configuration
//! - **Assets**: Directory scan, asynchronous fetch and decode, result routing
//! - **Skin**: Colour-key remapping of the tank body texture
//! - **Level**: Arena progression, pause, the level clock, win and lose checks
//! - **World**: Tile geometry and lighting
//! - **Player**: Tank driving and the follow camera
//! - **UI**: Loading screen, HUD, menus
//!
//! [`arena`] holds the ECS-free parts: file name grammar, colour rules and
//! grid decoding.

pub mod arena;
pub mod assets;
pub mod core;
pub mod level;
pub mod player;
pub mod skin;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct TankArenaPlugin;

impl Plugin for TankArenaPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Streaming assets
            .add_plugins(assets::AssetPipelinePlugin)
            .add_plugins(skin::SkinPlugin)

            // Gameplay
            .add_plugins(level::LevelPlugin)
            .add_plugins(world::WorldPlugin)
            .add_plugins(player::PlayerPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
