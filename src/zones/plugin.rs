//! ZonesPlugin extracts trigger zones once and tracks the player against them each tick.
use bevy::prelude::*;

use crate::{
    core::{SceneSettings, TickSet},
    map::components::LoadedMap,
    zones::{
        components::{ZoneEvent, ZoneSet},
        extractor::extract,
        systems::track_player_proximity,
        tracker::ProximityTracker,
    },
};

/// Requires `MapPlugin` to be added first (provides the loaded map document).
pub struct ZonesPlugin;

impl Plugin for ZonesPlugin {
    fn build(&self, app: &mut App) {
        let zones = {
            let world = app.world();
            match (
                world.get_resource::<SceneSettings>(),
                world.get_resource::<LoadedMap>(),
            ) {
                (Some(settings), Some(map)) => extract(&map.0, &settings.triggers),
                _ => {
                    warn!("ZonesPlugin added before MapPlugin; trigger zones disabled");
                    ZoneSet::default()
                }
            }
        };

        app.insert_resource(zones)
            .init_resource::<ProximityTracker>()
            .add_message::<ZoneEvent>()
            .add_systems(Update, track_player_proximity.in_set(TickSet::Proximity));
    }
}
