//! Tank spawning, driving and the follow camera.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::assets::PixelBuffer;
use crate::core::GameState;
use crate::skin::BaseTankTexture;

const TREAD_TEXTURE_SIZE: u32 = 32;
const TREAD_STRIPE: u32 = 4;

/// Set up tank systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>()
        .add_systems(Startup, (spawn_player, spawn_target, spawn_camera))
        .add_systems(PreUpdate, finish_body_reset)
        .add_systems(Update, drive_tank.run_if(in_state(GameState::Running)))
        .add_systems(PostUpdate, follow_player.before(TransformSystem::TransformPropagate));
}

/// Handle W/S to drive and A/D to turn.
pub fn drive_tank(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(&Transform, &mut Velocity), (With<Player>, Without<BodyReset>)>,
) {
    let Ok((transform, mut velocity)) = player_query.get_single_mut() else {
        return;
    };

    let mut throttle = 0.0;
    if keyboard.pressed(KeyCode::KeyW) {
        throttle += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        throttle -= 1.0;
    }

    let mut turn = 0.0;
    if keyboard.pressed(KeyCode::KeyA) {
        turn += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        turn -= 1.0;
    }

    // Keep gravity's contribution, replace the horizontal part
    let forward = *transform.forward() * throttle * config.move_speed;
    velocity.linvel = Vec3::new(forward.x, velocity.linvel.y, forward.z);
    velocity.angvel = Vec3::Y * turn * config.turn_speed;
}

/// Return the tank to a dynamic body one frame after a restart froze it.
pub(crate) fn finish_body_reset(mut commands: Commands, query: Query<Entity, (With<Player>, With<BodyReset>)>) {
    for entity in query.iter() {
        commands
            .entity(entity)
            .insert(RigidBody::Dynamic)
            .remove::<BodyReset>();
    }
}

/// Keep the camera at its offset from the tank.
fn follow_player(
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<(&mut Transform, &FollowCamera), Without<Player>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    for (mut transform, follow) in camera_query.iter_mut() {
        *transform = Transform::from_translation(player.translation + follow.offset)
            .looking_at(player.translation, Vec3::Y);
    }
}

/// Spawn the player tank with its hull and tread material slots.
fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    base: Res<BaseTankTexture>,
    config: Res<PlayerConfig>,
) {
    let body_material = materials.add(StandardMaterial {
        base_color_texture: Some(images.add(base.0.to_image())),
        perceptual_roughness: 0.6,
        ..default()
    });
    let tread_material = materials.add(StandardMaterial {
        base_color_texture: Some(images.add(tread_texture().to_image())),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands
        .spawn((
            Player,
            Transform::from_xyz(0.0, config.spawn_height, 0.0),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::cuboid(0.45, 0.3, 0.6),
            Velocity::zero(),
            LockedAxes::ROTATION_LOCKED_X | LockedAxes::ROTATION_LOCKED_Z,
            Damping {
                linear_damping: 0.5,
                angular_damping: 2.0,
            },
        ))
        .with_children(|tank| {
            // Material slot 0: hull
            tank.spawn((
                TankBody,
                Mesh3d(meshes.add(Cuboid::new(0.8, 0.4, 1.1))),
                MeshMaterial3d(body_material.clone()),
                Transform::from_xyz(0.0, 0.1, 0.0),
            ));
            tank.spawn((
                TankBody,
                Mesh3d(meshes.add(Cylinder::new(0.25, 0.2))),
                MeshMaterial3d(body_material),
                Transform::from_xyz(0.0, 0.4, 0.1),
            ));
            // Material slot 1: treads
            tank.spawn((
                TankTreads,
                Mesh3d(meshes.add(Cuboid::new(0.95, 0.25, 1.2))),
                MeshMaterial3d(tread_material),
                Transform::from_xyz(0.0, -0.2, 0.0),
            ));
        });
}

/// Spawn the target marker.
fn spawn_target(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Target,
        Mesh3d(meshes.add(Cylinder::new(0.45, 0.1))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.9, 0.3),
            emissive: LinearRgba::new(0.1, 0.6, 0.15, 1.0),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.05, 0.0),
    ));
}

/// Spawn the gameplay camera.
fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        FollowCamera::default(),
        Transform::from_xyz(0.0, 14.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Fixed tread texture: dark rubber with lighter cross stripes.
fn tread_texture() -> PixelBuffer {
    let rubber = Srgba::new(0.12, 0.12, 0.12, 1.0);
    let ridge = Srgba::new(0.3, 0.3, 0.28, 1.0);
    let mut texture = PixelBuffer::filled(TREAD_TEXTURE_SIZE, TREAD_TEXTURE_SIZE, rubber);
    for y in (0..TREAD_TEXTURE_SIZE).filter(|y| (y / TREAD_STRIPE) % 2 == 0) {
        for x in 0..TREAD_TEXTURE_SIZE {
            texture.set(x, y, ridge);
        }
    }
    texture
}

/// Freeze the tank body so residual forces are dropped; undone next frame.
pub fn begin_body_reset(commands: &mut Commands, player: Entity) {
    commands.entity(player).insert((
        RigidBody::KinematicPositionBased,
        Velocity::zero(),
        BodyReset,
    ));
}
