//! Arena module - file name grammar, colour rules and tile grid decoding.
//!
//! Nothing here touches the ECS world; the level and world plugins consume
//! the decoded [`ArenaDefinition`]s.

mod color;
mod decoder;
mod filename;
mod registry;

pub use color::{
    classify_tile, match_reference, matches_reference, HeightFamily, ReferenceMatch, TileType,
    REFERENCE_TOLERANCE,
};
pub use decoder::{cell_of_index, ArenaDefinition, GridCell, TileGrid, TilePlacement, GRID_WIDTH};
pub use filename::{
    is_sidecar, parse_arena_name, parse_file_stem, ArenaMetadata, AssetRole, ParsedName,
    SIDECAR_MARKER,
};
pub use registry::{builtin_arena, ArenaRegistry, BUILTIN_ARENA_NAME};
