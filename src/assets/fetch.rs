//! Byte fetching and payload decoding for streamed assets.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_kira_audio::AudioSource;
use kira::sound::static_sound::{StaticSoundData, StaticSoundSettings};
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use super::error::AssetError;

/// Magic bytes opening every Ogg container.
const OGG_MAGIC: &[u8] = b"OggS";

/// Decoded image with normalized RGBA pixels, row-major from the top row.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Srgba>,
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Srgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Pixel at (x, y), where y = 0 is the top row.
    pub fn get(&self, x: u32, y: u32) -> Option<Srgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn set(&mut self, x: u32, y: u32, color: Srgba) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    /// Sample a pixel, failing if (x, y) is outside the image.
    pub fn sample(&self, x: u32, y: u32) -> Result<Srgba, AssetError> {
        self.get(x, y).ok_or(AssetError::SampleOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Pack into 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.pixels
            .iter()
            .flat_map(|p| [to_byte(p.red), to_byte(p.green), to_byte(p.blue), to_byte(p.alpha)])
            .collect()
    }

    /// Convert into a texture the renderer can use.
    pub fn to_image(&self) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.to_rgba8(),
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }
}

/// Decoded soundtrack, ready to be added as an audio asset.
#[derive(Clone)]
pub struct AudioClip(pub StaticSoundData);

impl AudioClip {
    pub fn into_source(self) -> AudioSource {
        AudioSource { sound: self.0 }
    }
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip").finish_non_exhaustive()
    }
}

/// Read the raw bytes of one asset file.
pub fn fetch_bytes(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|e| AssetError::Transport {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Decode PNG bytes into a normalized pixel buffer.
pub fn decode_image(bytes: &[u8], path: &Path) -> Result<PixelBuffer, AssetError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AssetError::Decode {
            path: path.display().to_string(),
            details: e.to_string(),
        })?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    let pixels = decoded
        .pixels()
        .map(|p| Srgba::rgba_u8(p.0[0], p.0[1], p.0[2], p.0[3]))
        .collect();

    Ok(PixelBuffer {
        width,
        height,
        pixels,
    })
}

/// Check that audio bytes hold an Ogg stream.
pub fn validate_ogg(bytes: &[u8], path: &Path) -> Result<(), AssetError> {
    if bytes.starts_with(OGG_MAGIC) {
        Ok(())
    } else {
        Err(AssetError::Decode {
            path: path.display().to_string(),
            details: "not an Ogg stream".to_string(),
        })
    }
}

/// Decode Ogg Vorbis bytes into a playable clip.
pub fn decode_audio(bytes: Vec<u8>, path: &Path) -> Result<AudioClip, AssetError> {
    validate_ogg(&bytes, path)?;
    StaticSoundData::from_cursor(Cursor::new(bytes), StaticSoundSettings::default())
        .map(AudioClip)
        .map_err(|e| AssetError::Decode {
            path: path.display().to_string(),
            details: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_to_normalized_pixels() {
        let bytes = png_bytes(3, 2, [255, 0, 0, 255]);
        let buffer = decode_image(&bytes, Path::new("red.png")).unwrap();
        assert_eq!((buffer.width, buffer.height), (3, 2));
        assert_eq!(buffer.pixels.len(), 6);
        assert_eq!(buffer.pixels[0], Srgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_image(b"not a png", Path::new("bad.png")).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn missing_file_is_a_transport_error() {
        let err = fetch_bytes(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AssetError::Transport { .. }));
    }

    #[test]
    fn sample_outside_image_fails() {
        let buffer = PixelBuffer::filled(2, 2, Srgba::WHITE);
        assert_eq!(buffer.sample(1, 1), Ok(Srgba::WHITE));
        assert!(matches!(
            buffer.sample(2, 0),
            Err(AssetError::SampleOutOfBounds { x: 2, y: 0, .. })
        ));
    }

    #[test]
    fn rgba8_round_trips_channel_bytes() {
        let buffer = PixelBuffer::filled(1, 1, Srgba::rgba_u8(10, 20, 30, 40));
        assert_eq!(buffer.to_rgba8(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn ogg_magic_required() {
        assert!(validate_ogg(b"OggS\0\0", Path::new("a.ogg")).is_ok());
        assert!(validate_ogg(b"RIFF", Path::new("a.wav")).is_err());
    }

    #[test]
    fn truncated_ogg_is_a_decode_error() {
        let err = decode_audio(b"OggS\0\x02fake stream".to_vec(), Path::new("soundtrack.ogg"))
            .unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn non_ogg_audio_is_a_decode_error() {
        let err = decode_audio(b"RIFF....WAVE".to_vec(), Path::new("soundtrack.ogg")).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }
}
