//! Player plugin wiring spawn and render sync.
use bevy::prelude::*;

use crate::{
    core::TickSet,
    movement::systems::apply_movement_gate,
    player::systems::{spawn_player, sync_player_transform},
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player).add_systems(
            Update,
            sync_player_transform
                .in_set(TickSet::Movement)
                .after(apply_movement_gate),
        );
    }
}
