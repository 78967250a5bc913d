//! Error types for streamed asset acquisition.

use thiserror::Error;

/// Errors that can occur while classifying, fetching or decoding one asset.
///
/// Every variant is recoverable: the offending asset is skipped and the
/// rest of the acquisition carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    /// File name did not follow the expected token layout.
    #[error("Malformed file name '{name}': {details}")]
    FilenameParse { name: String, details: String },

    /// Payload bytes could not be decoded as an image or audio clip.
    #[error("Failed to decode '{path}': {details}")]
    Decode { path: String, details: String },

    /// File could not be read.
    #[error("Failed to fetch '{path}': {details}")]
    Transport { path: String, details: String },

    /// Pixel count does not form whole rows of the arena grid.
    #[error("Pixel count {pixels} is not a whole number of {width}-wide rows")]
    GridShape { pixels: usize, width: usize },

    /// Colour-key sample point lies outside the decoded image.
    #[error("Sample point ({x}, {y}) is outside the {width}x{height} image")]
    SampleOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}
