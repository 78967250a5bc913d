//! Player plugin - tank, target, and camera.

use bevy::prelude::*;

use super::movement;

/// Player plugin - handles tank spawning, driving and the follow camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
