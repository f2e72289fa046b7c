//! Player module - spawn location, player entity and render sync.

pub mod components;
pub mod plugin;
pub mod spawn;
pub mod systems;

pub use plugin::PlayerPlugin;
