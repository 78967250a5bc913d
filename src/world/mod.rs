//! World module - arena tiles, shared tile assets and lighting.

mod builder;
mod materials;
mod plugin;

pub use builder::{cell_to_world, ArenaStage, ArenaTile};
pub use materials::{tile_extent, TileAssets, GROUND_THICKNESS, RAISED_HEIGHT, TILE_SIZE};
pub use plugin::WorldPlugin;
