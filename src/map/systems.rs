//! Systems for loading, drawing and framing the map.
use std::path::Path;

use bevy::prelude::*;

use crate::{
    core::SceneSettings,
    map::{
        components::{LoadedMap, SceneCamera, TileSprite},
        document::MapDocument,
        grid::{map_to_render, TileGrid},
        layers::LayerTable,
    },
    player::components::{MapPosition, Player},
};

/// Z distance between consecutive layer depths; the player sits well above any of them.
const LAYER_Z_STEP: f32 = 1.0;

/// Loads the map document, degrading to an empty map so the scene stays explorable.
pub fn load_map_or_empty(path: &str) -> MapDocument {
    match MapDocument::load(Path::new(path)) {
        Ok(document) => {
            info!(
                "Loaded map {} ({}x{} tiles of {}x{} px, {} layers)",
                path,
                document.width,
                document.height,
                document.tile_width,
                document.tile_height,
                document.layers.len()
            );
            document
        }
        Err(err) => {
            error!("{}. Continuing with an empty map.", err);
            MapDocument::default()
        }
    }
}

/// Spawns one atlas sprite per non-empty cell of every visible tile layer.
pub fn spawn_tile_layers(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut atlas_layouts: ResMut<Assets<TextureAtlasLayout>>,
    map: Res<LoadedMap>,
    grid: Res<TileGrid>,
    layers: Res<LayerTable>,
    settings: Res<SceneSettings>,
) {
    let Some(tileset) = map.0.tilesets.first() else {
        warn!("Map has no tilesets; tile layers will not be drawn");
        return;
    };
    if tileset.columns == 0 || tileset.tile_count == 0 {
        warn!(
            "Tileset '{}' has no columns or tiles; tile layers will not be drawn",
            tileset.name
        );
        return;
    }

    let tile_size = UVec2::new(tileset.tile_width.max(1), tileset.tile_height.max(1));
    let rows = tileset.tile_count.div_ceil(tileset.columns);
    let layout = atlas_layouts.add(TextureAtlasLayout::from_grid(
        tile_size,
        tileset.columns,
        rows,
        None,
        None,
    ));
    let image: Handle<Image> = asset_server.load(tileset_image_path(
        &settings.tileset_image,
        &tileset.image,
    ));

    let mut spawned = 0usize;
    for layer in map.0.tile_layers().filter(|layer| layer.visible) {
        let profile = layers.profile(&layer.name);
        let z = profile.depth as f32 * LAYER_Z_STEP;

        for (coord, gid) in grid.cells(&layer.name) {
            let Some(index) = gid.checked_sub(tileset.first_gid) else {
                continue;
            };
            if index >= tileset.tile_count {
                continue;
            }

            commands.spawn((
                Sprite::from_atlas_image(
                    image.clone(),
                    TextureAtlas {
                        layout: layout.clone(),
                        index: index as usize,
                    },
                ),
                Transform::from_translation(map_to_render(grid.tile_to_world_center(coord), z)),
                TileSprite,
            ));
            spawned += 1;
        }

        debug!(
            "Layer '{}' drawn at depth {} as {:?}",
            layer.name, profile.depth, profile.role
        );
    }

    info!(
        "Spawned {} tile sprites from tileset '{}'",
        spawned, tileset.name
    );
}

/// Configured tileset image, or the file name the map document references.
fn tileset_image_path(configured: &str, from_document: &str) -> String {
    if !configured.is_empty() {
        return configured.to_string();
    }
    Path::new(from_document)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Spawns the zoomed 2D camera centred on the map.
pub fn spawn_scene_camera(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    grid: Res<TileGrid>,
) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / settings.camera_zoom,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_translation(map_to_render(grid.center(), 0.0)),
        SceneCamera,
        Name::new("Scene Camera"),
    ));
}

/// Keeps the camera centred on the player without showing space beyond the map edges.
pub fn follow_player_camera(
    settings: Res<SceneSettings>,
    grid: Res<TileGrid>,
    player_query: Query<&MapPosition, With<Player>>,
    mut camera_query: Query<(&Camera, &mut Transform), With<SceneCamera>>,
) {
    let Ok(position) = player_query.single() else {
        return;
    };
    let Ok((camera, mut camera_transform)) = camera_query.single_mut() else {
        return;
    };

    let half_view = camera
        .logical_viewport_size()
        .map_or(Vec2::ZERO, |size| size / (2.0 * settings.camera_zoom));
    let center = clamp_camera_center(position.0, half_view, grid.pixel_size());
    let z = camera_transform.translation.z;
    camera_transform.translation = map_to_render(center, z);
}

/// Clamps a camera center (map space) so the visible half-extent stays inside the map.
///
/// On an axis where the view is wider than the map, the map is centred instead.
pub fn clamp_camera_center(target: Vec2, half_view: Vec2, extent: Vec2) -> Vec2 {
    let axis = |target: f32, half: f32, extent: f32| {
        if extent <= 2.0 * half {
            extent / 2.0
        } else {
            target.clamp(half, extent - half)
        }
    };
    Vec2::new(
        axis(target.x, half_view.x, extent.x),
        axis(target.y, half_view.y, extent.y),
    )
}
