//! Asset discovery, per-role resolution and interpretation.
//!
//! A scan turns the streaming directory into [`AssetRecord`]s. Each record
//! is resolved off the main thread by the resolver registered for its role,
//! and the [`ResolvedAsset`] is interpreted on the main thread into a
//! [`DecodedAsset`] ready to hand to its owner.

use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::AssetError;
use super::fetch::{decode_audio, decode_image, fetch_bytes, AudioClip, PixelBuffer};
use crate::arena::{is_sidecar, parse_file_stem, ArenaDefinition, AssetRole, ParsedName, GRID_WIDTH};
use crate::skin::SkinDefinition;

/// One discovered asset file.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub role: AssetRole,
    pub raw_name: String,
    pub path: PathBuf,
    pub parsed: ParsedName,
    /// Discovery ordinal among records of the same role.
    pub ordinal: usize,
}

/// Decoded payload produced by a resolver.
#[derive(Debug, Clone)]
pub enum AssetPayload {
    Image(PixelBuffer),
    Audio(AudioClip),
}

/// Outcome of resolving one record. Posted back to the main thread as an event.
#[derive(Event, Debug, Clone)]
pub struct ResolvedAsset {
    pub record: AssetRecord,
    pub outcome: Result<AssetPayload, AssetError>,
}

/// Asset ready to hand to its destination owner.
#[derive(Debug, Clone)]
pub enum DecodedAsset {
    Arena(ArenaDefinition),
    Skin(SkinDefinition),
    Portrait { display_name: String, image: PixelBuffer },
    ColorKey(PixelBuffer),
    Music(AudioClip),
}

/// List the files of the streaming directory, sorted by name.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let entries = fs::read_dir(dir).map_err(|e| AssetError::Transport {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Classify scanned files into records, skipping sidecars, unknown files and
/// names that fail to parse.
pub fn discover(paths: &[PathBuf]) -> Vec<AssetRecord> {
    let mut records = Vec::new();
    let mut per_role: HashMap<AssetRole, usize> = HashMap::new();

    for path in paths {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping non UTF-8 file name {:?}", path);
            continue;
        };
        if is_sidecar(file_name) {
            debug!("Skipping sidecar {}", file_name);
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        let arena_count = per_role.get(&AssetRole::Arena).copied().unwrap_or(0);
        match parse_file_stem(stem, arena_count) {
            Ok(Some(parsed)) => {
                let role = parsed.role();
                let ordinal = per_role.entry(role).or_insert(0);
                records.push(AssetRecord {
                    role,
                    raw_name: file_name.to_string(),
                    path: path.clone(),
                    parsed,
                    ordinal: *ordinal,
                });
                *ordinal += 1;
            }
            Ok(None) => debug!("Ignoring {}", file_name),
            Err(e) => warn!("Skipping {}: {}", file_name, e),
        }
    }

    records
}

/// Fetch-and-decode step for one role.
pub type Resolver = fn(&Path) -> Result<AssetPayload, AssetError>;

/// Resolver registered for a role, `None` for roles that are never fetched.
pub fn resolver_for(role: AssetRole) -> Option<Resolver> {
    match role {
        AssetRole::PlayerPortrait
        | AssetRole::PlayerColorKey
        | AssetRole::Skin
        | AssetRole::Arena => Some(resolve_image),
        AssetRole::Music => Some(resolve_audio),
        AssetRole::Unknown => None,
    }
}

fn resolve_image(path: &Path) -> Result<AssetPayload, AssetError> {
    let bytes = fetch_bytes(path)?;
    decode_image(&bytes, path).map(AssetPayload::Image)
}

fn resolve_audio(path: &Path) -> Result<AssetPayload, AssetError> {
    let bytes = fetch_bytes(path)?;
    decode_audio(bytes, path).map(AssetPayload::Audio)
}

/// Resolve one record with the resolver for its role.
pub fn resolve(record: AssetRecord) -> ResolvedAsset {
    let outcome = match resolver_for(record.role) {
        Some(resolver) => resolver(&record.path),
        None => Err(AssetError::Decode {
            path: record.path.display().to_string(),
            details: format!("no resolver for role {:?}", record.role),
        }),
    };
    ResolvedAsset { record, outcome }
}

/// Turn a resolved payload into the artifact its owner expects.
pub fn interpret(resolved: ResolvedAsset) -> Result<DecodedAsset, AssetError> {
    let ResolvedAsset { record, outcome } = resolved;
    let payload = outcome?;

    match (record.parsed, payload) {
        (ParsedName::Arena(metadata), AssetPayload::Image(image)) => {
            if image.width as usize != GRID_WIDTH {
                warn!(
                    "Arena image {} is {} pixels wide, decoding as {}-wide rows",
                    record.raw_name, image.width, GRID_WIDTH
                );
            }
            ArenaDefinition::decode(metadata, record.path, record.ordinal, &image.pixels)
                .map(DecodedAsset::Arena)
        }
        (ParsedName::Skin { name }, AssetPayload::Image(image)) => {
            Ok(DecodedAsset::Skin(SkinDefinition::new(name, image, record.ordinal)))
        }
        (ParsedName::PlayerPortrait { display_name }, AssetPayload::Image(image)) => {
            Ok(DecodedAsset::Portrait {
                display_name,
                image,
            })
        }
        (ParsedName::PlayerColorKey, AssetPayload::Image(image)) => Ok(DecodedAsset::ColorKey(image)),
        (ParsedName::Music, AssetPayload::Audio(clip)) => Ok(DecodedAsset::Music(clip)),
        (parsed, _) => Err(AssetError::Decode {
            path: record.path.display().to_string(),
            details: format!("payload does not match role {:?}", parsed.role()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaMetadata, GridCell, TileType};
    use crate::arena::ArenaRegistry;
    use crate::skin::SkinRegistry;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("streaming").join(n)).collect()
    }

    fn arena_record(ordinal: usize, name: &str) -> AssetRecord {
        AssetRecord {
            role: AssetRole::Arena,
            raw_name: format!("{name}.png"),
            path: PathBuf::from(name),
            parsed: ParsedName::Arena(ArenaMetadata {
                start: GridCell::new(1, 1),
                target: GridCell::new(2, 2),
                level_name: name.to_string(),
            }),
            ordinal,
        }
    }

    fn skin_record(ordinal: usize, name: &str) -> AssetRecord {
        AssetRecord {
            role: AssetRole::Skin,
            raw_name: format!("{name} skin.png"),
            path: PathBuf::from(name),
            parsed: ParsedName::Skin {
                name: name.to_string(),
            },
            ordinal,
        }
    }

    fn resolved_image(record: AssetRecord, height: u32) -> ResolvedAsset {
        ResolvedAsset {
            record,
            outcome: Ok(AssetPayload::Image(PixelBuffer::filled(
                GRID_WIDTH as u32,
                height,
                Srgba::BLACK,
            ))),
        }
    }

    fn apply_all(order: Vec<ResolvedAsset>) -> (ArenaRegistry, SkinRegistry) {
        let mut arenas = ArenaRegistry::default();
        let mut skins = SkinRegistry::default();
        for resolved in order {
            match interpret(resolved).unwrap() {
                DecodedAsset::Arena(arena) => arenas.insert(arena),
                DecodedAsset::Skin(skin) => skins.insert(skin),
                other => panic!("unexpected asset {:?}", other),
            }
        }
        (arenas, skins)
    }

    #[test]
    fn discover_skips_sidecars_and_unknown_files() {
        let records = discover(&paths(&[
            "Arena 1 2 3 4 First.png",
            "Arena 1 2 3 4 First.png.meta",
            "notes.txt",
            "player1 Ace.png",
        ]));
        let roles: Vec<_> = records.iter().map(|r| r.role).collect();
        assert_eq!(roles, [AssetRole::Arena, AssetRole::PlayerPortrait]);
    }

    #[test]
    fn discover_skips_bad_arena_and_keeps_going() {
        let records = discover(&paths(&["Arena 1 x 3 4.png", "Arena 5 6 7 8.png", "Arena 1 2.png"]));
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].parsed,
            ParsedName::Arena(ArenaMetadata {
                start: GridCell::new(5, 6),
                target: GridCell::new(7, 8),
                level_name: "1".to_string(),
            })
        );
    }

    #[test]
    fn unnamed_arenas_count_earlier_arenas() {
        let records = discover(&paths(&["Arena 1 1 1 1 Named.png", "Arena 2 2 2 2.png"]));
        assert_eq!(records[1].ordinal, 1);
        match &records[1].parsed {
            ParsedName::Arena(meta) => assert_eq!(meta.level_name, "2"),
            other => panic!("expected arena, got {:?}", other),
        }
    }

    #[test]
    fn every_known_role_has_a_resolver() {
        for role in [
            AssetRole::PlayerPortrait,
            AssetRole::PlayerColorKey,
            AssetRole::Skin,
            AssetRole::Arena,
            AssetRole::Music,
        ] {
            assert!(resolver_for(role).is_some(), "{:?}", role);
        }
        assert!(resolver_for(AssetRole::Unknown).is_none());
    }

    #[test]
    fn failed_fetch_does_not_interpret() {
        let resolved = ResolvedAsset {
            record: arena_record(0, "gone"),
            outcome: Err(AssetError::Transport {
                path: "gone".to_string(),
                details: "missing".to_string(),
            }),
        };
        assert!(matches!(interpret(resolved), Err(AssetError::Transport { .. })));
    }

    #[test]
    fn ragged_arena_image_is_a_grid_error() {
        let resolved = ResolvedAsset {
            record: arena_record(0, "ragged"),
            outcome: Ok(AssetPayload::Image(PixelBuffer::filled(33, 3, Srgba::BLACK))),
        };
        assert!(matches!(interpret(resolved), Err(AssetError::GridShape { .. })));
    }

    #[test]
    fn arena_decodes_with_discovery_index() {
        let decoded = interpret(resolved_image(arena_record(3, "Fourth"), 2)).unwrap();
        let DecodedAsset::Arena(arena) = decoded else {
            panic!("expected arena");
        };
        assert_eq!(arena.level_index, 3);
        assert_eq!(arena.grid.height(), 2);
        assert!(arena.grid.tiles().iter().all(|t| *t == TileType::Wall));
    }

    #[test]
    fn completion_order_does_not_change_results() {
        let assets = || {
            vec![
                resolved_image(arena_record(0, "A"), 1),
                resolved_image(skin_record(0, "Camo"), 1),
                resolved_image(arena_record(1, "B"), 2),
                resolved_image(skin_record(1, "Desert"), 1),
            ]
        };

        let forward = apply_all(assets());
        let mut reversed_order = assets();
        reversed_order.reverse();
        let reversed = apply_all(reversed_order);
        let mut interleaved_order = assets();
        interleaved_order.swap(0, 3);
        let interleaved = apply_all(interleaved_order);

        for (arenas, skins) in [&reversed, &interleaved] {
            assert!(forward.0.iter().eq(arenas.iter()));
            assert!(forward.1.iter().eq(skins.iter()));
        }
        let names: Vec<_> = forward.1.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Camo", "Desert"]);
    }
}
