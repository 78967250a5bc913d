//! Arena construction from decoded tile grids.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::materials::{tile_extent, TileAssets, TILE_SIZE};
use crate::arena::{ArenaDefinition, TilePlacement};
use crate::player::{begin_body_reset, Player, PlayerConfig, Target};

/// Marker for all arena geometry that should be cleaned up.
#[derive(Component)]
pub struct ArenaTile;

/// World position of the centre of a grid cell at ground level.
pub fn cell_to_world(column: u32, row: u32) -> Vec3 {
    Vec3::new(column as f32 * TILE_SIZE, 0.0, row as f32 * TILE_SIZE)
}

/// Everything needed to tear down an arena and stage the next one.
#[derive(SystemParam)]
pub struct ArenaStage<'w, 's> {
    commands: Commands<'w, 's>,
    tile_assets: Res<'w, TileAssets>,
    player_config: Res<'w, PlayerConfig>,
    tiles: Query<'w, 's, Entity, With<ArenaTile>>,
    player: Query<'w, 's, (Entity, &'static mut Transform, &'static mut Velocity), With<Player>>,
    target: Query<'w, 's, &'static mut Transform, (With<Target>, Without<Player>)>,
}

impl ArenaStage<'_, '_> {
    /// Despawn every tile of the current arena.
    pub fn clear_tiles(&mut self) -> usize {
        let mut cleared = 0;
        for entity in self.tiles.iter() {
            self.commands.entity(entity).despawn_recursive();
            cleared += 1;
        }
        cleared
    }

    /// Spawn one tile with its collider.
    pub fn instantiate_tile(&mut self, placement: TilePlacement) {
        let Some(material) = self.tile_assets.material(placement.tile) else {
            return;
        };
        let (half, centre) = tile_extent(placement.family);
        let position = cell_to_world(placement.column, placement.row) + Vec3::Y * centre;

        self.commands.spawn((
            Mesh3d(self.tile_assets.mesh(placement.family)),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y, half.z),
            ArenaTile,
        ));
    }

    /// Replace the current arena with `arena` and move the tank and target onto it.
    pub fn build(&mut self, arena: &ArenaDefinition) {
        let cleared = self.clear_tiles();
        let mut spawned = 0;
        for placement in arena.grid.placements() {
            self.instantiate_tile(placement);
            spawned += 1;
        }
        info!(
            "Built arena '{}': {} tiles ({} cleared)",
            arena.level_name, spawned, cleared
        );

        self.place_player(arena.start_world());
        self.place_target(arena.target_world());
    }

    /// Put the tank on a ground position, facing forward and at rest.
    pub fn place_player(&mut self, at: Vec2) {
        let height = self.player_config.spawn_height;
        for (_, mut transform, mut velocity) in self.player.iter_mut() {
            *transform = Transform::from_xyz(at.x, height, at.y);
            *velocity = Velocity::zero();
        }
    }

    pub fn place_target(&mut self, at: Vec2) {
        for mut transform in self.target.iter_mut() {
            transform.translation = Vec3::new(at.x, transform.translation.y, at.y);
        }
    }

    /// Drop residual physics on the tank for one frame.
    pub fn reset_player_body(&mut self) {
        let players: Vec<Entity> = self.player.iter().map(|(entity, ..)| entity).collect();
        for player in players {
            begin_body_reset(&mut self.commands, player);
        }
    }
}
