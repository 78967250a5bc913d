//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player tank (the rigid body root).
#[derive(Component)]
pub struct Player;

/// Tank hull mesh; its material is the one skins repaint.
#[derive(Component)]
pub struct TankBody;

/// Tank tread mesh; always carries the fixed tread texture.
#[derive(Component)]
pub struct TankTreads;

/// Marker for the level target the tank drives to.
#[derive(Component)]
pub struct Target;

/// Camera that trails the tank.
#[derive(Component)]
pub struct FollowCamera {
    pub offset: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 14.0, 10.0),
        }
    }
}

/// Present for the one frame the tank body is held kinematic after a restart.
#[derive(Component)]
pub struct BodyReset;

/// Configuration for tank driving.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Forward speed in units per second
    pub move_speed: f32,
    /// Turn rate in radians per second
    pub turn_speed: f32,
    /// Height the tank is dropped in at when placed on a start cell
    pub spawn_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            turn_speed: 2.5,
            spawn_height: 0.6,
        }
    }
}
