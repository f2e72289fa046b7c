//! Components and resources for the loaded map.
use bevy::prelude::*;

use super::document::MapDocument;

/// The map document loaded at start-up. Empty when loading failed.
#[derive(Resource, Debug, Clone, Default)]
pub struct LoadedMap(pub MapDocument);

/// Marker for a rendered tile sprite.
#[derive(Component, Debug, Default)]
pub struct TileSprite;

/// Marker for the 2D camera that follows the player.
#[derive(Component, Debug, Default)]
pub struct SceneCamera;
