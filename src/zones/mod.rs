//! Trigger zones: extraction from map metadata and the proximity state machine.
pub mod components;
pub mod extractor;
pub mod plugin;
pub mod systems;
pub mod tracker;

pub use plugin::ZonesPlugin;
