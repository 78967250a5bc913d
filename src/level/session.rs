//! Level progression state: which arena, the clock and pause.

use bevy::prelude::*;

use crate::arena::{ArenaDefinition, TileType};

/// What the level controller should do after a restart or advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTransition {
    /// Build the arena at this registry position.
    LoadArena(usize),
    /// Reload the whole scene, rescanning the streaming directory.
    ReloadScene,
}

/// How a run through an arena ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Won,
    Lost,
}

/// Per-scene level progression.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelSession {
    /// 1-based index of the arena being played.
    pub current_level: usize,
    pub is_paused: bool,
    /// Gameplay seconds since the arena was loaded.
    pub elapsed_seconds: f32,
    pub is_loading: bool,
}

impl Default for LevelSession {
    fn default() -> Self {
        Self {
            current_level: 1,
            is_paused: false,
            elapsed_seconds: 0.0,
            is_loading: true,
        }
    }
}

impl LevelSession {
    /// Start the first discovered arena.
    pub fn first_arena(&mut self) -> LevelTransition {
        self.current_level = 1;
        LevelTransition::LoadArena(0)
    }

    /// Reload the current arena if it exists, otherwise the whole scene.
    pub fn restart(&self, arena_count: usize) -> LevelTransition {
        if arena_count > 0 && (1..=arena_count).contains(&self.current_level) {
            LevelTransition::LoadArena(self.current_level - 1)
        } else {
            LevelTransition::ReloadScene
        }
    }

    /// Move to the next arena; after the last one the scene reloads.
    pub fn advance(&mut self, arena_count: usize) -> LevelTransition {
        if self.current_level < arena_count {
            self.current_level += 1;
            LevelTransition::LoadArena(self.current_level - 1)
        } else {
            LevelTransition::ReloadScene
        }
    }

    /// Flip the pause flag, returning the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        self.is_paused
    }

    /// Advance the level clock by a frame's gameplay time.
    pub fn tick(&mut self, delta_seconds: f32) {
        if !self.is_paused && !self.is_loading {
            self.elapsed_seconds += delta_seconds;
        }
    }

    /// Clear the clock for a freshly loaded arena.
    pub fn reset_clock(&mut self) {
        self.elapsed_seconds = 0.0;
    }

    /// Back to the first arena with the loading screen up.
    pub fn begin_load(&mut self) {
        *self = Self::default();
    }

    pub fn finish_load(&mut self) {
        self.is_loading = false;
        self.elapsed_seconds = 0.0;
    }

    /// HUD timer line, e.g. `"Canyon 1:05"`.
    pub fn timer_text(&self, arena_name: &str) -> String {
        format!("{} {}", arena_name.trim_end(), format_clock(self.elapsed_seconds))
    }
}

/// Format seconds as `m:ss`, truncating fractions.
pub fn format_clock(seconds: f32) -> String {
    let whole = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Judge the tank's position on an arena. Winning takes precedence.
pub fn judge_position(
    arena: &ArenaDefinition,
    player: Vec3,
    target: Vec2,
    win_radius: f32,
    fall_limit: f32,
) -> Option<LevelOutcome> {
    if player.xz().distance(target) <= win_radius {
        return Some(LevelOutcome::Won);
    }
    if player.y < fall_limit {
        return Some(LevelOutcome::Lost);
    }

    let (column, row) = (player.x.round(), player.z.round());
    if column < 1.0 || row < 1.0 {
        return None;
    }
    match arena.grid.tile_at(column as u32, row as u32) {
        Some(TileType::MinedFloor) => Some(LevelOutcome::Lost),
        _ => None,
    }
}
