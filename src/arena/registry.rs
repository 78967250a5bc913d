//! Decoded arenas owned for the session, plus the built-in starter arena.

use bevy::prelude::*;
use std::path::PathBuf;

use super::color::TileType;
use super::decoder::{ArenaDefinition, GridCell, TileGrid, GRID_WIDTH};
use super::filename::ArenaMetadata;

/// Display name of the built-in arena.
pub const BUILTIN_ARENA_NAME: &str = "Starter Level";

const BUILTIN_HEIGHT: usize = 30;

/// Resource storing every arena decoded this session, ordered by discovery.
#[derive(Resource, Default, Debug)]
pub struct ArenaRegistry {
    arenas: Vec<ArenaDefinition>,
}

impl ArenaRegistry {
    /// Insert an arena at its discovery position, whatever order decodes finish in.
    pub fn insert(&mut self, arena: ArenaDefinition) {
        let position = self
            .arenas
            .partition_point(|existing| existing.level_index <= arena.level_index);
        self.arenas.insert(position, arena);
    }

    /// Arena at a 0-based list position.
    pub fn get(&self, position: usize) -> Option<&ArenaDefinition> {
        self.arenas.get(position)
    }

    pub fn len(&self) -> usize {
        self.arenas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arenas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArenaDefinition> {
        self.arenas.iter()
    }

    pub fn clear(&mut self) {
        self.arenas.clear();
    }
}

/// The arena shown until a streamed arena replaces it.
///
/// A walled field with a breakable divider between start and target.
pub fn builtin_arena() -> ArenaDefinition {
    let grid = TileGrid::generate(GRID_WIDTH, BUILTIN_HEIGHT, |column, row| {
        let border = column == 1
            || column as usize == GRID_WIDTH
            || row == 1
            || row as usize == BUILTIN_HEIGHT;
        if border {
            TileType::Wall
        } else if column == 50 && (10..=20).contains(&row) {
            TileType::WeakWall
        } else {
            TileType::Floor
        }
    });

    ArenaDefinition::from_grid(
        ArenaMetadata {
            start: GridCell::new(10, 15),
            target: GridCell::new(90, 15),
            level_name: BUILTIN_ARENA_NAME.to_string(),
        },
        PathBuf::new(),
        0,
        grid,
    )
}
