//! Core timing, tick ordering and scene configuration shared by every plugin.
pub mod plugin;
pub mod settings;

pub use plugin::{CorePlugin, TickSet};
pub use settings::SceneSettings;
