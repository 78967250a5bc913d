//! Level module - progression through the discovered arenas.

mod plugin;
mod session;

pub use plugin::{ActiveArena, LevelPlugin};
pub use session::{format_clock, judge_position, LevelOutcome, LevelSession, LevelTransition};
