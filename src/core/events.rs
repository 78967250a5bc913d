//! Global events used for cross-plugin communication.
//!
//! Asset resolutions, UI buttons and gameplay checks never call into the
//! level controller directly; they send one of these and the owning plugin
//! applies it on its next run.

use bevy::prelude::*;

use crate::assets::PixelBuffer;

/// Level transitions requested of the level controller.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCommand {
    /// Stage the built-in arena at the start of a scene.
    LoadBuiltinArena,
    /// Tear down the built-in arena and load the first discovered one.
    LoadFirstArena,
    /// Reload the current arena.
    Restart,
    /// Move on to the next arena, or reload the base scene after the last.
    Advance,
    /// Flip between Running and Paused.
    TogglePause,
}

/// Sent when the player picks a skin from the skin menu.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplySkin {
    /// Position in the skin registry
    pub index: usize,
}

/// Sent when a colour key image has been decoded.
#[derive(Event, Debug, Clone)]
pub struct ColorKeyLoaded(pub PixelBuffer);

/// Sent when the player portrait has been decoded.
#[derive(Event, Debug, Clone)]
pub struct PortraitLoaded {
    pub display_name: String,
    pub image: Handle<Image>,
}

/// Sent once per scene, the first time the loading screen is dismissed.
#[derive(Event, Debug, Clone, Copy)]
pub struct BuildSkinMenu;
