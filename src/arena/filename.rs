//! File name grammar for streamed assets.
//!
//! Every file in the streaming directory carries its metadata in its name:
//!
//! - `player1 <name tokens>` - player portrait, tokens after the first form the display name
//! - `playercolor` - colour key used to recolour the tank
//! - `<name> skin` - alternate tank skin, first token is the skin name
//! - `Arena <startX> <startZ> <targetX> <targetZ> [<name tokens>]` - a level
//! - `soundtrack` - background music
//!
//! Anything containing the sidecar marker (`meta`) is never an asset.

use super::decoder::GridCell;
use crate::assets::AssetError;

/// Marker for engine metadata sidecar files, which are always skipped.
pub const SIDECAR_MARKER: &str = "meta";

/// Number of tokens in an arena name before the optional display name.
const ARENA_HEADER_TOKENS: usize = 5;

/// Which kind of session asset a file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRole {
    PlayerPortrait,
    PlayerColorKey,
    Skin,
    Arena,
    Music,
    Unknown,
}

/// Role markers in precedence order; the first contained marker wins.
const ROLE_MARKERS: [(&str, AssetRole); 5] = [
    ("player1", AssetRole::PlayerPortrait),
    ("playercolor", AssetRole::PlayerColorKey),
    ("skin", AssetRole::Skin),
    ("Arena", AssetRole::Arena),
    ("soundtrack", AssetRole::Music),
];

impl AssetRole {
    /// Detect the role of a file from its name. Matching is case-sensitive.
    pub fn detect(name: &str) -> Self {
        ROLE_MARKERS
            .iter()
            .find(|(marker, _)| name.contains(marker))
            .map(|(_, role)| *role)
            .unwrap_or(AssetRole::Unknown)
    }

    /// Whether resolving this role yields a decoded image.
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            AssetRole::PlayerPortrait | AssetRole::PlayerColorKey | AssetRole::Skin | AssetRole::Arena
        )
    }
}

/// Whether a file name belongs to a metadata sidecar.
pub fn is_sidecar(name: &str) -> bool {
    name.contains(SIDECAR_MARKER)
}

/// Arena metadata carried by the file name, before the image is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaMetadata {
    pub start: GridCell,
    pub target: GridCell,
    pub level_name: String,
}

/// Typed result of parsing a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    PlayerPortrait { display_name: String },
    PlayerColorKey,
    Skin { name: String },
    Arena(ArenaMetadata),
    Music,
}

impl ParsedName {
    pub fn role(&self) -> AssetRole {
        match self {
            ParsedName::PlayerPortrait { .. } => AssetRole::PlayerPortrait,
            ParsedName::PlayerColorKey => AssetRole::PlayerColorKey,
            ParsedName::Skin { .. } => AssetRole::Skin,
            ParsedName::Arena(_) => AssetRole::Arena,
            ParsedName::Music => AssetRole::Music,
        }
    }
}

/// Parse a file name without its extension.
///
/// `arena_count` is the number of arenas already parsed in this scan; it
/// names arenas whose file name carries no display name.
///
/// Returns `Ok(None)` for sidecars and files matching no role.
pub fn parse_file_stem(stem: &str, arena_count: usize) -> Result<Option<ParsedName>, AssetError> {
    if is_sidecar(stem) {
        return Ok(None);
    }

    let tokens: Vec<&str> = stem.split(' ').collect();

    let parsed = match AssetRole::detect(stem) {
        AssetRole::PlayerPortrait => ParsedName::PlayerPortrait {
            display_name: join_with_trailing_space(&tokens[1..]),
        },
        AssetRole::PlayerColorKey => ParsedName::PlayerColorKey,
        AssetRole::Skin => ParsedName::Skin {
            name: tokens[0].to_string(),
        },
        AssetRole::Arena => ParsedName::Arena(parse_arena_tokens(&tokens, arena_count)?),
        AssetRole::Music => ParsedName::Music,
        AssetRole::Unknown => return Ok(None),
    };

    Ok(Some(parsed))
}

/// Parse an arena file name (without extension) regardless of its keyword.
pub fn parse_arena_name(stem: &str, arena_count: usize) -> Result<ArenaMetadata, AssetError> {
    let tokens: Vec<&str> = stem.split(' ').collect();
    parse_arena_tokens(&tokens, arena_count)
}

/// Parse `keyword startX startZ targetX targetZ [name...]`.
fn parse_arena_tokens(tokens: &[&str], arena_count: usize) -> Result<ArenaMetadata, AssetError> {
    if tokens.len() < ARENA_HEADER_TOKENS {
        return Err(AssetError::FilenameParse {
            name: tokens.join(" "),
            details: format!(
                "expected a keyword and 4 coordinates, found {} token(s)",
                tokens.len()
            ),
        });
    }

    let coordinate = |index: usize| -> Result<u32, AssetError> {
        tokens[index].parse::<u32>().map_err(|e| AssetError::FilenameParse {
            name: tokens.join(" "),
            details: format!("coordinate '{}' at position {}: {}", tokens[index], index, e),
        })
    };

    let start = GridCell::new(coordinate(1)?, coordinate(2)?);
    let target = GridCell::new(coordinate(3)?, coordinate(4)?);

    let level_name = if tokens.len() == ARENA_HEADER_TOKENS {
        (arena_count + 1).to_string()
    } else {
        join_with_trailing_space(&tokens[ARENA_HEADER_TOKENS..])
    };

    Ok(ArenaMetadata {
        start,
        target,
        level_name,
    })
}

/// Join tokens, each followed by a single space.
fn join_with_trailing_space(tokens: &[&str]) -> String {
    tokens.iter().fold(String::new(), |mut name, token| {
        name.push_str(token);
        name.push(' ');
        name
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_name_keeps_trailing_separator() {
        let meta = parse_arena_name("arena 10 20 30 40 MyLevel", 0).unwrap();
        assert_eq!(meta.start, GridCell::new(10, 20));
        assert_eq!(meta.target, GridCell::new(30, 40));
        assert_eq!(meta.level_name, "MyLevel ");
    }

    #[test]
    fn multi_token_arena_name_joined() {
        let meta = parse_arena_name("Arena 1 2 3 4 The Long Road", 7).unwrap();
        assert_eq!(meta.level_name, "The Long Road ");
    }

    #[test]
    fn unnamed_arena_uses_count_at_parse_time() {
        let meta = parse_arena_name("arena 1 2 3 4", 2).unwrap();
        assert_eq!(meta.level_name, "3");
    }

    #[test]
    fn short_arena_name_is_an_error() {
        let err = parse_arena_name("Arena 1 2 3", 0).unwrap_err();
        assert!(matches!(err, AssetError::FilenameParse { .. }));
    }

    #[test]
    fn non_numeric_coordinate_is_an_error() {
        let err = parse_file_stem("Arena 1 two 3 4", 0).unwrap_err();
        assert!(matches!(err, AssetError::FilenameParse { .. }));
    }

    #[test]
    fn sidecar_skipped_before_role() {
        assert_eq!(parse_file_stem("player1 meta Bob", 0), Ok(None));
        assert_eq!(parse_file_stem("Arena 1 2 3 4 metal", 0), Ok(None));
    }

    #[test]
    fn portrait_drops_keyword_token() {
        let parsed = parse_file_stem("player1 Captain Blasty", 0).unwrap();
        assert_eq!(
            parsed,
            Some(ParsedName::PlayerPortrait {
                display_name: "Captain Blasty ".to_string()
            })
        );
    }

    #[test]
    fn skin_takes_first_token() {
        let parsed = parse_file_stem("Camo skin extra", 0).unwrap();
        assert_eq!(
            parsed,
            Some(ParsedName::Skin {
                name: "Camo".to_string()
            })
        );
    }

    #[test]
    fn role_precedence_follows_marker_order() {
        assert_eq!(AssetRole::detect("player1 skin"), AssetRole::PlayerPortrait);
        assert_eq!(AssetRole::detect("playercolor skin"), AssetRole::PlayerColorKey);
        assert_eq!(AssetRole::detect("skin Arena 1 2 3 4"), AssetRole::Skin);
        assert_eq!(AssetRole::detect("Arena soundtrack"), AssetRole::Arena);
        assert_eq!(AssetRole::detect("soundtrack"), AssetRole::Music);
    }

    #[test]
    fn role_markers_are_case_sensitive() {
        assert_eq!(AssetRole::detect("arena 1 2 3 4"), AssetRole::Unknown);
        assert_eq!(parse_file_stem("README", 0), Ok(None));
    }
}
