//! Spawn location discovery from map objects and tile data.
use std::fmt;

use bevy::prelude::*;

use crate::{
    map::{document::MapDocument, grid::TileGrid},
    movement::gate::WalkableSet,
};

const SPAWN_OBJECT_LAYER: &str = "Objects";
const SPAWN_OBJECT_NAME: &str = "SpawnPoint";

/// No marker or walkable tile exists on the scanned layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    NotFound { layer: String },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { layer } => {
                write!(f, "no spawn marker or walkable tile on layer '{}'", layer)
            }
        }
    }
}

impl std::error::Error for SpawnError {}

/// Where the resolved spawn point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSource {
    Object,
    TileScan,
    GridCenter,
}

/// Finds the world-space center of the first marker tile, else of the first walkable tile.
///
/// Both scans are row-major, so ties resolve to the lowest row, then the lowest column.
pub fn locate(grid: &TileGrid, layer: &str, walkable: &WalkableSet) -> Result<Vec2, SpawnError> {
    let marker = walkable.spawn_marker();
    grid.cells(layer)
        .find(|(_, index)| *index == marker)
        .or_else(|| grid.cells(layer).find(|(_, index)| walkable.contains(*index)))
        .map(|(coord, _)| grid.tile_to_world_center(coord))
        .ok_or_else(|| SpawnError::NotFound {
            layer: layer.to_string(),
        })
}

/// Position of a `SpawnPoint` object on the `Objects` layer, if the designer placed one.
pub fn spawn_object_point(document: &MapDocument) -> Option<Vec2> {
    document
        .object_layer(SPAWN_OBJECT_LAYER)?
        .objects
        .iter()
        .find(|object| object.name == SPAWN_OBJECT_NAME)
        .map(|object| Vec2::new(object.x, object.y))
}

/// Spawn object, then tile scan, then the map's geometric center.
pub fn resolve_spawn(
    document: &MapDocument,
    grid: &TileGrid,
    layer: Option<&str>,
    walkable: Option<&WalkableSet>,
) -> (Vec2, SpawnSource) {
    if let Some(point) = spawn_object_point(document) {
        return (point, SpawnSource::Object);
    }

    if let (Some(layer), Some(walkable)) = (layer, walkable) {
        match locate(grid, layer, walkable) {
            Ok(point) => return (point, SpawnSource::TileScan),
            Err(err) => warn!("{}; spawning at map center", err),
        }
    }

    (grid.center(), SpawnSource::GridCenter)
}
