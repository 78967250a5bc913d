//! Recolouring the tank body texture from a colour key.

use bevy::prelude::*;

use crate::arena::{match_reference, ReferenceMatch};
use crate::assets::{AssetError, PixelBuffer};

/// Primary colour painted into the base tank texture.
pub const REFERENCE_PRIMARY: Srgba = Srgba::new(0.8, 0.2, 0.2, 1.0);

/// Secondary colour painted into the base tank texture.
pub const REFERENCE_SECONDARY: Srgba = Srgba::new(0.4, 0.4, 0.4, 1.0);

/// Trim colour of the procedural base texture; never remapped.
const TRIM: Srgba = Srgba::new(0.08, 0.08, 0.08, 1.0);

const BASE_TEXTURE_SIZE: u32 = 64;
const TRIM_ROWS: u32 = 6;

/// Replacement colours sampled from a key or skin palette image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerColorKey {
    pub primary: Srgba,
    pub secondary: Srgba,
}

impl PlayerColorKey {
    /// Sample the two key colours at fixed pixel coordinates.
    pub fn sample(
        palette: &PixelBuffer,
        primary_at: (u32, u32),
        secondary_at: (u32, u32),
    ) -> Result<Self, AssetError> {
        Ok(Self {
            primary: palette.sample(primary_at.0, primary_at.1)?,
            secondary: palette.sample(secondary_at.0, secondary_at.1)?,
        })
    }
}

/// Replace every reference-coloured pixel with its key colour, keeping alpha.
pub fn remap_pixels(base: &[Srgba], key: PlayerColorKey) -> Vec<Srgba> {
    base.iter()
        .map(|&pixel| match match_reference(pixel, REFERENCE_PRIMARY, REFERENCE_SECONDARY) {
            Some(ReferenceMatch::Primary) => Srgba {
                alpha: pixel.alpha,
                ..key.primary
            },
            Some(ReferenceMatch::Secondary) => Srgba {
                alpha: pixel.alpha,
                ..key.secondary
            },
            None => pixel,
        })
        .collect()
}

/// Remap a whole texture, keeping its dimensions.
pub fn remap_texture(base: &PixelBuffer, key: PlayerColorKey) -> PixelBuffer {
    PixelBuffer {
        width: base.width,
        height: base.height,
        pixels: remap_pixels(&base.pixels, key),
    }
}

/// Procedural base texture: primary upper half, secondary lower half, dark trim bands.
pub fn procedural_base_texture() -> PixelBuffer {
    let mut texture = PixelBuffer::filled(BASE_TEXTURE_SIZE, BASE_TEXTURE_SIZE, REFERENCE_PRIMARY);
    for y in 0..BASE_TEXTURE_SIZE {
        let color = if y < TRIM_ROWS || y >= BASE_TEXTURE_SIZE - TRIM_ROWS {
            TRIM
        } else if y >= BASE_TEXTURE_SIZE / 2 {
            REFERENCE_SECONDARY
        } else {
            continue;
        };
        for x in 0..BASE_TEXTURE_SIZE {
            texture.set(x, y, color);
        }
    }
    texture
}
