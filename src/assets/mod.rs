//! Assets module - discovery and asynchronous acquisition of streamed assets.

mod error;
mod fetch;
mod pipeline;
mod plugin;

pub use error::AssetError;
pub use fetch::{decode_audio, decode_image, fetch_bytes, validate_ogg, AudioClip, PixelBuffer};
pub use pipeline::{
    discover, interpret, resolve, resolver_for, scan_directory, AssetPayload, AssetRecord,
    DecodedAsset, ResolvedAsset, Resolver,
};
pub use plugin::{Acquisition, AssetPipelinePlugin, LoadingGrace};
