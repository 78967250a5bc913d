//! Arena decoding: pixel buffers into tile grids.

use bevy::prelude::*;
use std::path::PathBuf;

use super::color::{classify_tile, HeightFamily, TileType};
use super::filename::ArenaMetadata;
use crate::assets::AssetError;

/// Width of every arena image, in pixels (and grid columns).
pub const GRID_WIDTH: usize = 100;

/// Integer grid coordinate as written in arena file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCell {
    pub x: u32,
    pub z: u32,
}

impl GridCell {
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

/// One tile to instantiate, at its 1-based grid column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub tile: TileType,
    pub column: u32,
    pub row: u32,
    pub family: HeightFamily,
}

/// Map a linear pixel index to its 1-based (column, row).
pub fn cell_of_index(index: usize, width: usize) -> (u32, u32) {
    let column = match (index + 1) % width {
        0 => width,
        c => c,
    };
    let row = index / width + 1;
    (column as u32, row as u32)
}

/// Row-major grid of tile types with a fixed width.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    tiles: Vec<TileType>,
}

impl TileGrid {
    /// Decode a row-major pixel array at the standard arena width.
    pub fn decode(pixels: &[Srgba]) -> Result<Self, AssetError> {
        Self::from_tiles(pixels.iter().copied().map(classify_tile).collect(), GRID_WIDTH)
    }

    /// Build a grid from already classified tiles.
    ///
    /// Fails if the tiles do not form whole rows; never truncates.
    pub fn from_tiles(tiles: Vec<TileType>, width: usize) -> Result<Self, AssetError> {
        if width == 0 || tiles.is_empty() || tiles.len() % width != 0 {
            return Err(AssetError::GridShape {
                pixels: tiles.len(),
                width,
            });
        }
        Ok(Self { width, tiles })
    }

    /// Build a grid cell by cell from 1-based (column, row).
    ///
    /// Zero dimensions are raised to one so the grid is never empty.
    pub fn generate(width: usize, height: usize, tile: impl Fn(u32, u32) -> TileType) -> Self {
        let width = width.max(1);
        let tiles = (0..width * height.max(1))
            .map(|index| {
                let (column, row) = cell_of_index(index, width);
                tile(column, row)
            })
            .collect();
        Self { width, tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.tiles.len() / self.width
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Tile at a 1-based column and row.
    pub fn tile_at(&self, column: u32, row: u32) -> Option<TileType> {
        let (column, row) = (column as usize, row as usize);
        if column == 0 || row == 0 || column > self.width || row > self.height() {
            return None;
        }
        self.tiles.get((row - 1) * self.width + (column - 1)).copied()
    }

    /// Every non-void tile, in pixel order.
    pub fn placements(&self) -> impl Iterator<Item = TilePlacement> + '_ {
        self.tiles.iter().enumerate().filter_map(|(index, &tile)| {
            let family = tile.height_family()?;
            let (column, row) = cell_of_index(index, self.width);
            Some(TilePlacement {
                tile,
                column,
                row,
                family,
            })
        })
    }

    /// Whether a file-name coordinate lies on the grid.
    pub fn contains(&self, cell: GridCell) -> bool {
        (cell.x as usize) <= self.width && (cell.z as usize) <= self.height()
    }
}

/// A playable level: file-name metadata plus its decoded grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaDefinition {
    pub source_path: PathBuf,
    pub level_name: String,
    /// Discovery ordinal among the arenas of one scan.
    pub level_index: usize,
    pub start: GridCell,
    pub target: GridCell,
    pub grid: TileGrid,
}

impl ArenaDefinition {
    /// Decode an arena image against the metadata parsed from its name.
    pub fn decode(
        metadata: ArenaMetadata,
        source_path: PathBuf,
        level_index: usize,
        pixels: &[Srgba],
    ) -> Result<Self, AssetError> {
        let grid = TileGrid::decode(pixels)?;
        Ok(Self::from_grid(metadata, source_path, level_index, grid))
    }

    pub fn from_grid(
        metadata: ArenaMetadata,
        source_path: PathBuf,
        level_index: usize,
        grid: TileGrid,
    ) -> Self {
        for (label, cell) in [("start", metadata.start), ("target", metadata.target)] {
            if !grid.contains(cell) {
                warn!(
                    "Arena '{}' {} cell ({}, {}) is outside its {}x{} grid",
                    metadata.level_name,
                    label,
                    cell.x,
                    cell.z,
                    grid.width(),
                    grid.height()
                );
            }
        }

        Self {
            source_path,
            level_name: metadata.level_name,
            level_index,
            start: metadata.start,
            target: metadata.target,
            grid,
        }
    }

    /// World (x, z) of the player start.
    pub fn start_world(&self) -> Vec2 {
        Vec2::new(self.start.x as f32, self.start.z as f32)
    }

    /// World (x, z) of the target. Z is flipped since image row 0 is the top.
    pub fn target_world(&self) -> Vec2 {
        Vec2::new(
            self.target.x as f32,
            self.grid.height() as f32 - self.target.z as f32,
        )
    }
}
