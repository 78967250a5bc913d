//! Game configuration loaded from external RON file.
//!
//! Lets the streaming directory, loading delay and colour-key sample points
//! change without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Location of the configuration file.
pub const CONFIG_PATH: &str = "assets/data/game_config.ron";

/// Game configuration loaded from assets/data/game_config.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory scanned for player, skin, arena and music files.
    pub streaming_dir: String,
    /// Real-time seconds the loading screen stays up after dispatch.
    pub grace_delay_secs: f32,
    /// Pixel sampled for the primary colour of key and skin images.
    pub primary_sample: (u32, u32),
    /// Pixel sampled for the secondary colour of key and skin images.
    pub secondary_sample: (u32, u32),
    /// Optional PNG used as the tank body texture before remapping.
    pub base_texture: Option<String>,
    /// Horizontal distance to the target that wins the level.
    pub win_radius: f32,
    /// Height below which the player has fallen out of the arena.
    pub fall_limit: f32,
    pub clear_color: (f32, f32, f32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            streaming_dir: "assets/StreamingAssets".to_string(),
            grace_delay_secs: 1.0,
            primary_sample: (8, 8),
            secondary_sample: (24, 8),
            base_texture: None,
            win_radius: 0.75,
            fall_limit: -5.0,
            clear_color: (0.1, 0.12, 0.15),
        }
    }
}

impl GameConfig {
    /// Load config from the RON file, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => Self::from_ron(&contents).unwrap_or_else(|e| {
                error!("Failed to parse {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }),
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    /// Loading screen delay. Negative or non-finite values mean no delay.
    pub fn grace_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.grace_delay_secs).unwrap_or(Duration::ZERO)
    }

    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GameConfig::from_ron("(grace_delay_secs: 2.5, base_texture: Some(\"tank.png\"))").unwrap();
        assert_eq!(config.grace_delay_secs, 2.5);
        assert_eq!(config.base_texture.as_deref(), Some("tank.png"));
        assert_eq!(config.streaming_dir, GameConfig::default().streaming_dir);
    }

    #[test]
    fn grace_delay_rejects_unusable_values() {
        let delay = |secs| GameConfig { grace_delay_secs: secs, ..default() }.grace_delay();
        assert_eq!(delay(1.5), Duration::from_millis(1500));
        assert_eq!(delay(-2.0), Duration::ZERO);
        assert_eq!(delay(f32::NAN), Duration::ZERO);
        assert_eq!(delay(f32::INFINITY), Duration::ZERO);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(GameConfig::from_ron("(grace_delay_secs: \"soon\")").is_err());
    }
}
