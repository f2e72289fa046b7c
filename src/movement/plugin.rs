//! MovementPlugin builds the movement gate and orders input before integration.
use bevy::prelude::*;

use crate::{
    core::{SceneSettings, TickSet},
    map::layers::LayerTable,
    movement::{
        gate::MovementGate,
        systems::{apply_movement_gate, read_movement_input},
    },
};

/// Requires `MapPlugin` to be added first (provides the layer table).
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        let gate = {
            let world = app.world();
            match (
                world.get_resource::<SceneSettings>(),
                world.get_resource::<LayerTable>(),
            ) {
                (Some(settings), Some(layers)) => {
                    MovementGate::from_settings(&settings.movement, layers)
                }
                _ => {
                    warn!("MovementPlugin added before MapPlugin; movement is unconstrained");
                    MovementGate::unconstrained()
                }
            }
        };

        app.insert_resource(gate).add_systems(
            Update,
            (
                read_movement_input.in_set(TickSet::Input),
                apply_movement_gate.in_set(TickSet::Movement),
            ),
        );
    }
}
