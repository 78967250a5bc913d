//! Core game module - states, events, and configuration.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod events;
mod plugin;
mod states;

pub use config::{GameConfig, CONFIG_PATH};
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
