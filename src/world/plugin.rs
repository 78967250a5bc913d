//! World plugin - tile assets and environment lighting.

use bevy::prelude::*;

use super::materials::TileAssets;

/// World plugin - prepares shared tile assets and lights the arena.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_tile_assets, setup_environment));
    }
}

fn setup_tile_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(TileAssets::new(&mut meshes, &mut materials));
}

/// Set up global ambient light and the sun.
fn setup_environment(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.97, 0.9),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3, // ~60 degrees down from horizontal
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
