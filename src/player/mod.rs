//! Player module - the tank, its target, and the follow camera.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::begin_body_reset;
#[cfg(test)]
pub(crate) use movement::finish_body_reset;
pub use plugin::PlayerPlugin;
