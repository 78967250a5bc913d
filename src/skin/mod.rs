//! Skin module - tank recolouring from colour keys and streamed skins.

mod plugin;
mod remap;

pub use plugin::{BaseTankTexture, SkinPlugin};
pub use remap::{
    procedural_base_texture, remap_pixels, remap_texture, PlayerColorKey, REFERENCE_PRIMARY,
    REFERENCE_SECONDARY,
};

use bevy::prelude::*;

use crate::assets::PixelBuffer;

/// An alternate tank colouring, kept for on-demand remapping.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinDefinition {
    pub name: String,
    pub palette: PixelBuffer,
    /// Discovery ordinal among skins of one scan.
    pub ordinal: usize,
}

impl SkinDefinition {
    pub fn new(name: String, palette: PixelBuffer, ordinal: usize) -> Self {
        Self {
            name,
            palette,
            ordinal,
        }
    }
}

/// Resource storing every skin decoded this scene, ordered by discovery.
#[derive(Resource, Default, Debug)]
pub struct SkinRegistry {
    skins: Vec<SkinDefinition>,
}

impl SkinRegistry {
    pub fn insert(&mut self, skin: SkinDefinition) {
        let position = self
            .skins
            .partition_point(|existing| existing.ordinal <= skin.ordinal);
        self.skins.insert(position, skin);
    }

    pub fn get(&self, index: usize) -> Option<&SkinDefinition> {
        self.skins.get(index)
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkinDefinition> {
        self.skins.iter()
    }

    pub fn clear(&mut self) {
        self.skins.clear();
    }
}

/// Set once the skin menu has been assembled for the current scene.
#[derive(Resource, Default, Debug)]
pub struct SkinMenuLatch(pub bool);
