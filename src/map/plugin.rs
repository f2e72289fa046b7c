//! MapPlugin loads the map once and registers tile drawing and camera framing.
use bevy::prelude::*;

use crate::{
    core::{SceneSettings, TickSet},
    map::{
        components::LoadedMap,
        grid::TileGrid,
        layers::LayerTable,
        systems::{follow_player_camera, load_map_or_empty, spawn_scene_camera, spawn_tile_layers},
    },
};

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<SceneSettings>()
            .cloned()
            .unwrap_or_default();

        let document = load_map_or_empty(&settings.map_path);
        let grid = TileGrid::from_document(&document);
        let layers = LayerTable::from_document(&document, &settings.layer_overrides);

        info!(
            "Tile grid {}x{} with {:.0}x{:.0} px tiles",
            grid.width(),
            grid.height(),
            grid.tile_size().x,
            grid.tile_size().y
        );
        for (name, profile) in layers.iter() {
            info!(
                "Layer '{}': role {:?}, depth {}, collidable {}",
                name, profile.role, profile.depth, profile.collidable
            );
        }

        app.insert_resource(settings)
            .insert_resource(LoadedMap(document))
            .insert_resource(grid)
            .insert_resource(layers)
            .add_systems(Startup, (spawn_scene_camera, spawn_tile_layers))
            .add_systems(Update, follow_player_camera.in_set(TickSet::Presentation));
    }
}
