//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! tank driving only runs in the Running state, while the grace timer only
//! runs in Loading.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The game transitions between these states based on player actions:
/// - Start in `Loading` while streamed assets are discovered and fetched
/// - Move to `Running` once the loading grace delay has elapsed
/// - `Paused` freezes the game clock but keeps the arena visible
/// - `Won` when the tank reaches the target, `Lost` when it is destroyed
/// - Reloading the base scene returns to `Loading`
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Scanning and fetching streamed assets behind the loading screen
    #[default]
    Loading,
    /// Active gameplay
    Running,
    /// Game clock frozen, pause screen shown
    Paused,
    /// Target reached
    Won,
    /// Tank destroyed or fell out of the arena
    Lost,
}
