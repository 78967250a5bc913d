//! UI module - HUD, loading screen, and menus.

mod hud;
mod plugin;

pub use hud::{HudRoot, PlayerAvatar, PlayerNameText, TimerText};
pub use plugin::UiPlugin;
