//! Systems for spawning the player and mirroring its map position into render space.
use bevy::prelude::*;

use crate::{
    core::SceneSettings,
    map::{
        components::LoadedMap,
        grid::{map_to_render, TileGrid},
    },
    movement::gate::MovementGate,
    player::{
        components::{MapPosition, Player, PlayerMotion},
        spawn::resolve_spawn,
    },
};

/// Render depth of the player, above every map layer.
const PLAYER_Z: f32 = 100.0;

/// Spawns the player at the resolved spawn point.
pub fn spawn_player(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<SceneSettings>,
    map: Res<LoadedMap>,
    grid: Res<TileGrid>,
    gate: Res<MovementGate>,
) {
    let layer = settings
        .movement
        .spawn_layer
        .as_deref()
        .or_else(|| gate.layer());
    let (spawn_point, source) = resolve_spawn(&map.0, &grid, layer, gate.walkable());

    info!(
        "Spawning player at ({:.1}, {:.1}) from {:?}",
        spawn_point.x, spawn_point.y, source
    );

    commands.spawn((
        Sprite::from_image(asset_server.load(settings.player_image.clone())),
        Transform::from_translation(map_to_render(spawn_point, PLAYER_Z)),
        MapPosition(spawn_point),
        PlayerMotion::default(),
        Player,
        Name::new("Player"),
    ));
}

/// Copies the player's map position into its render transform.
pub fn sync_player_transform(mut query: Query<(&MapPosition, &mut Transform), With<Player>>) {
    for (position, mut transform) in query.iter_mut() {
        transform.translation = map_to_render(position.0, transform.translation.z);
    }
}
