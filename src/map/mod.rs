//! Map module: Tiled document model, tile grid adapter, layer roles and tile rendering.
pub mod components;
pub mod document;
pub mod grid;
pub mod layers;
pub mod plugin;
pub mod systems;

pub use plugin::MapPlugin;
