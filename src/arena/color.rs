//! Colour classification for arena pixels and tank recolouring.

use bevy::color::Srgba;

/// Channel value above which a channel counts as "on".
pub const CHANNEL_HIGH: f32 = 0.9;

/// Channel value below which a channel counts as "off".
pub const CHANNEL_LOW: f32 = 0.1;

/// Alpha below which a pixel is treated as transparent.
pub const ALPHA_CUTOFF: f32 = 0.1;

/// Relative tolerance used when matching a pixel against a reference colour.
pub const REFERENCE_TOLERANCE: f32 = 0.05;

/// Semantic category of one arena grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Floor,
    MinedFloor,
    WeakWall,
    WeakFloor,
    Wall,
    /// No tile is instantiated; a gap in the arena.
    Void,
}

/// Height offset family a tile is placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeightFamily {
    Ground,
    Raised,
}

impl TileType {
    /// Height family for placement, `None` for void cells.
    pub fn height_family(&self) -> Option<HeightFamily> {
        match self {
            TileType::Floor | TileType::MinedFloor | TileType::WeakFloor => Some(HeightFamily::Ground),
            TileType::Wall | TileType::WeakWall => Some(HeightFamily::Raised),
            TileType::Void => None,
        }
    }

    /// Whether this tile blocks movement.
    pub fn is_solid(&self) -> bool {
        self.height_family() == Some(HeightFamily::Raised)
    }
}

/// Classify an arena pixel. Rules are checked in order, first match wins.
pub fn classify_tile(color: Srgba) -> TileType {
    let high = |c: f32| c > CHANNEL_HIGH;
    let low = |c: f32| c < CHANNEL_LOW;
    let Srgba {
        red: r,
        green: g,
        blue: b,
        alpha,
    } = color;

    if alpha < ALPHA_CUTOFF {
        TileType::Floor
    } else if high(r) && high(g) && low(b) {
        TileType::Void
    } else if high(r) && low(g) && low(b) {
        TileType::MinedFloor
    } else if low(r) && high(g) && low(b) {
        TileType::WeakWall
    } else if low(r) && low(g) && high(b) {
        TileType::WeakFloor
    } else {
        TileType::Wall
    }
}

/// Which reference colour a pixel matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceMatch {
    Primary,
    Secondary,
}

/// Whether `pixel` is within the relative tolerance of `reference` on every colour channel.
///
/// The bound scales with the pixel's own channel value, so a zero channel
/// only matches an exact zero.
pub fn matches_reference(pixel: Srgba, reference: Srgba) -> bool {
    let within = |p: f32, r: f32| (p - r).powi(2) <= (REFERENCE_TOLERANCE * p).powi(2);
    within(pixel.red, reference.red)
        && within(pixel.green, reference.green)
        && within(pixel.blue, reference.blue)
}

/// Match a pixel against the primary reference, then the secondary.
pub fn match_reference(pixel: Srgba, primary: Srgba, secondary: Srgba) -> Option<ReferenceMatch> {
    if matches_reference(pixel, primary) {
        Some(ReferenceMatch::Primary)
    } else if matches_reference(pixel, secondary) {
        Some(ReferenceMatch::Secondary)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(r: f32, g: f32, b: f32, a: f32) -> Srgba {
        Srgba::new(r, g, b, a)
    }

    #[test]
    fn transparent_pixels_are_floor() {
        assert_eq!(classify_tile(rgba(1.0, 1.0, 0.0, 0.05)), TileType::Floor);
        assert_eq!(classify_tile(rgba(0.0, 0.0, 0.0, 0.0)), TileType::Floor);
    }

    #[test]
    fn primary_colours_map_to_tiles() {
        assert_eq!(classify_tile(rgba(1.0, 1.0, 0.0, 1.0)), TileType::Void);
        assert_eq!(classify_tile(rgba(1.0, 0.0, 0.0, 1.0)), TileType::MinedFloor);
        assert_eq!(classify_tile(rgba(0.0, 1.0, 0.0, 1.0)), TileType::WeakWall);
        assert_eq!(classify_tile(rgba(0.0, 0.0, 1.0, 1.0)), TileType::WeakFloor);
        assert_eq!(classify_tile(rgba(0.0, 0.0, 0.0, 1.0)), TileType::Wall);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify_tile(rgba(0.9, 0.0, 0.0, 1.0)), TileType::Wall);
        assert_eq!(classify_tile(rgba(0.91, 0.1, 0.0, 1.0)), TileType::Wall);
        assert_eq!(classify_tile(rgba(0.91, 0.09, 0.0, 1.0)), TileType::MinedFloor);
        assert_eq!(classify_tile(rgba(1.0, 0.0, 0.0, 0.1)), TileType::MinedFloor);
    }

    #[test]
    fn unlisted_colours_default_to_wall() {
        assert_eq!(classify_tile(rgba(1.0, 1.0, 1.0, 1.0)), TileType::Wall);
        assert_eq!(classify_tile(rgba(0.5, 0.5, 0.5, 1.0)), TileType::Wall);
        assert_eq!(classify_tile(rgba(1.0, 0.0, 1.0, 1.0)), TileType::Wall);
    }

    #[test]
    fn classification_covers_the_colour_cube() {
        let steps: Vec<f32> = (0..=20).map(|i| i as f32 / 20.0).collect();
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    for &a in &[0.0, 0.5, 1.0] {
                        let color = rgba(r, g, b, a);
                        let first = classify_tile(color);
                        assert_eq!(first, classify_tile(color));
                        if first == TileType::Void {
                            assert!(a >= ALPHA_CUTOFF && r > CHANNEL_HIGH && g > CHANNEL_HIGH && b < CHANNEL_LOW);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn exact_reference_always_matches() {
        let primary = rgba(0.8, 0.2, 0.2, 1.0);
        let secondary = rgba(0.4, 0.4, 0.4, 1.0);
        assert_eq!(match_reference(primary, primary, secondary), Some(ReferenceMatch::Primary));
        assert_eq!(match_reference(secondary, primary, secondary), Some(ReferenceMatch::Secondary));
        let black = rgba(0.0, 0.0, 0.0, 1.0);
        assert!(matches_reference(black, black));
    }

    #[test]
    fn primary_checked_before_secondary() {
        let both = rgba(0.5, 0.5, 0.5, 1.0);
        assert_eq!(match_reference(both, both, both), Some(ReferenceMatch::Primary));
    }

    #[test]
    fn channel_outside_tolerance_passes_through() {
        let primary = rgba(0.8, 0.2, 0.2, 1.0);
        let secondary = rgba(0.4, 0.4, 0.4, 1.0);
        // Blue channel 10% away from primary, far from secondary.
        let pixel = rgba(0.8, 0.2, 0.22, 1.0);
        assert_eq!(match_reference(pixel, primary, secondary), None);
        // Within 5% on every channel.
        let close = rgba(0.81, 0.2, 0.205, 1.0);
        assert_eq!(match_reference(close, primary, secondary), Some(ReferenceMatch::Primary));
    }
}
