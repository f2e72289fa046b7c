//! Movement module: walkable-tile gate and the input/integration systems around it.
pub mod gate;
pub mod plugin;
pub mod systems;

pub use plugin::MovementPlugin;
