//! Shared meshes and materials for arena tiles.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::arena::{HeightFamily, TileType};

/// Edge length of one grid cell in world units.
pub const TILE_SIZE: f32 = 1.0;

/// Thickness of ground-family tiles. Their top face sits at y = 0.
pub const GROUND_THICKNESS: f32 = 0.5;

/// Height of raised-family tiles above the ground plane.
pub const RAISED_HEIGHT: f32 = 1.0;

/// Mesh and material handles shared by every tile of an arena.
#[derive(Resource)]
pub struct TileAssets {
    ground_mesh: Handle<Mesh>,
    raised_mesh: Handle<Mesh>,
    materials: HashMap<TileType, Handle<StandardMaterial>>,
}

impl TileAssets {
    pub fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let mut registry = HashMap::new();

        // Floor - pale sand
        registry.insert(
            TileType::Floor,
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.72, 0.66, 0.52),
                perceptual_roughness: 0.9,
                ..default()
            }),
        );

        // Mined floor - reads as a floor, with a dull red cast
        registry.insert(
            TileType::MinedFloor,
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.62, 0.38, 0.32),
                perceptual_roughness: 0.9,
                ..default()
            }),
        );

        // Weak floor - cracked blue-grey
        registry.insert(
            TileType::WeakFloor,
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.45, 0.52, 0.62),
                perceptual_roughness: 0.8,
                ..default()
            }),
        );

        // Weak wall - mossy green
        registry.insert(
            TileType::WeakWall,
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.35, 0.5, 0.32),
                perceptual_roughness: 0.8,
                ..default()
            }),
        );

        // Wall - dark concrete
        registry.insert(
            TileType::Wall,
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.3, 0.3, 0.32),
                perceptual_roughness: 0.7,
                ..default()
            }),
        );

        Self {
            ground_mesh: meshes.add(Cuboid::new(TILE_SIZE, GROUND_THICKNESS, TILE_SIZE)),
            raised_mesh: meshes.add(Cuboid::new(TILE_SIZE, RAISED_HEIGHT, TILE_SIZE)),
            materials: registry,
        }
    }

    /// Material for a tile type. Void has none.
    pub fn material(&self, tile: TileType) -> Option<Handle<StandardMaterial>> {
        self.materials.get(&tile).cloned()
    }

    pub fn mesh(&self, family: HeightFamily) -> Handle<Mesh> {
        match family {
            HeightFamily::Ground => self.ground_mesh.clone(),
            HeightFamily::Raised => self.raised_mesh.clone(),
        }
    }
}

/// Half extents and centre height of a tile of the given family.
pub fn tile_extent(family: HeightFamily) -> (Vec3, f32) {
    match family {
        HeightFamily::Ground => (
            Vec3::new(TILE_SIZE, GROUND_THICKNESS, TILE_SIZE) / 2.0,
            -GROUND_THICKNESS / 2.0,
        ),
        HeightFamily::Raised => (
            Vec3::new(TILE_SIZE, RAISED_HEIGHT, TILE_SIZE) / 2.0,
            RAISED_HEIGHT / 2.0,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_tiles_top_out_at_zero() {
        let (half, centre) = tile_extent(HeightFamily::Ground);
        assert_eq!(centre + half.y, 0.0);
    }

    #[test]
    fn raised_tiles_stand_on_the_ground_plane() {
        let (half, centre) = tile_extent(HeightFamily::Raised);
        assert_eq!(centre - half.y, 0.0);
        assert_eq!(centre + half.y, RAISED_HEIGHT);
    }
}
