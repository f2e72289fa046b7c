//! Systems evaluating player proximity to trigger zones.
use bevy::prelude::*;

use crate::{
    player::components::{MapPosition, Player},
    zones::{
        components::{ZoneEvent, ZoneSet},
        tracker::ProximityTracker,
    },
};

/// Runs the proximity state machine against the player's post-movement position.
pub fn track_player_proximity(
    player_query: Query<&MapPosition, With<Player>>,
    zones: Res<ZoneSet>,
    mut tracker: ResMut<ProximityTracker>,
    mut zone_events: MessageWriter<ZoneEvent>,
) {
    let Ok(position) = player_query.single() else {
        return;
    };

    let change = tracker.evaluate(position.0, &zones);
    for event in change.events() {
        match event {
            ZoneEvent::Entered { zone } => debug!(
                "Player entered zone {} ('{}')",
                zone,
                zones.get(zone).map_or("", |zone| zone.name.as_str())
            ),
            ZoneEvent::Exited { zone } => debug!("Player left zone {}", zone),
        }
        zone_events.write(event);
    }
}
