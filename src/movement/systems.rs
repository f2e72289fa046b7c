//! Systems turning keyboard input into gated player displacement.
use bevy::prelude::*;

use crate::{
    core::{plugin::SimulationClock, SceneSettings},
    map::{grid::TileGrid, layers::LayerTable},
    movement::gate::MovementGate,
    player::components::{MapPosition, Player, PlayerMotion},
};

/// Axis-aligned intended velocity; horizontal and vertical are independent, left/up win ties.
pub fn intended_velocity(left: bool, right: bool, up: bool, down: bool, speed: f32) -> Vec2 {
    let x = if left {
        -speed
    } else if right {
        speed
    } else {
        0.0
    };
    // Map space is y-down, so "up" is negative.
    let y = if up {
        -speed
    } else if down {
        speed
    } else {
        0.0
    };
    Vec2::new(x, y)
}

/// Resolves one tick of movement: gate, solid layers, then world bounds.
///
/// Returns the accepted velocity and the new position.
pub fn step_position(
    current: Vec2,
    requested: Vec2,
    dt: f32,
    gate: &MovementGate,
    grid: &TileGrid,
    layers: &LayerTable,
) -> (Vec2, Vec2) {
    let mut accepted = gate.attempt(current, requested, dt, grid);
    if accepted != Vec2::ZERO {
        let prospective = current + accepted * dt;
        if layers.solid_at(grid, grid.world_to_tile(prospective)) {
            accepted = Vec2::ZERO;
        }
    }
    (accepted, grid.clamp_point(current + accepted * dt))
}

/// Reads WASD/arrow keys into the player's intended velocity and facing.
pub fn read_movement_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<SceneSettings>,
    mut query: Query<(&mut PlayerMotion, &mut Sprite), With<Player>>,
) {
    let Ok((mut motion, mut sprite)) = query.single_mut() else {
        return;
    };

    let left = keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    let right = keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    let up = keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    let down = keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);

    motion.intended = intended_velocity(left, right, up, down, settings.movement.speed);

    if motion.intended.x < 0.0 {
        sprite.flip_x = true;
    } else if motion.intended.x > 0.0 {
        sprite.flip_x = false;
    }
}

/// Applies the movement gate and integrates the player's map position.
pub fn apply_movement_gate(
    clock: Res<SimulationClock>,
    gate: Res<MovementGate>,
    grid: Res<TileGrid>,
    layers: Res<LayerTable>,
    mut query: Query<(&mut MapPosition, &mut PlayerMotion), With<Player>>,
) {
    let Ok((mut position, mut motion)) = query.single_mut() else {
        return;
    };

    let dt = clock.delta_secs();
    let (accepted, next) = step_position(position.0, motion.intended, dt, &gate, &grid, &layers);

    if accepted == Vec2::ZERO && motion.intended != Vec2::ZERO && motion.accepted != Vec2::ZERO {
        debug!("Movement blocked at {:?}", position.0);
    }

    motion.accepted = accepted;
    position.0 = next;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        map::{
            document::MapDocument,
            layers::{LayerOverride, LayerRole},
        },
        movement::gate::WalkableSet,
    };

    const STRIP_MAP: &str = r#"{
        "width": 3, "height": 1, "tilewidth": 16, "tileheight": 16,
        "layers": [
            { "type": "tilelayer", "name": "road", "width": 3, "height": 1, "data": [5, 5, 5] },
            { "type": "tilelayer", "name": "shed", "width": 3, "height": 1, "data": [0, 0, 9] }
        ]
    }"#;

    fn strip() -> (TileGrid, LayerTable) {
        let document = MapDocument::from_json_str(STRIP_MAP).expect("fixture parses");
        let mut overrides = HashMap::new();
        overrides.insert(
            "shed".to_string(),
            LayerOverride {
                collidable: Some(true),
                depth: Some(1),
                role: Some(LayerRole::Structure),
            },
        );
        (
            TileGrid::from_document(&document),
            LayerTable::from_document(&document, &overrides),
        )
    }

    #[test]
    fn input_axes_are_independent_and_unnormalised() {
        assert_eq!(
            intended_velocity(true, false, true, false, 150.0),
            Vec2::new(-150.0, -150.0)
        );
        assert_eq!(
            intended_velocity(false, true, false, true, 150.0),
            Vec2::new(150.0, 150.0)
        );
        assert_eq!(
            intended_velocity(true, true, false, false, 150.0),
            Vec2::new(-150.0, 0.0)
        );
        assert_eq!(
            intended_velocity(false, false, false, false, 150.0),
            Vec2::ZERO
        );
    }

    #[test]
    fn step_integrates_accepted_velocity() {
        let (grid, layers) = strip();
        let gate = MovementGate::new("road", WalkableSet::new([5], 5));

        let (accepted, next) = step_position(
            Vec2::new(8.0, 8.0),
            Vec2::new(100.0, 0.0),
            0.1,
            &gate,
            &grid,
            &layers,
        );
        assert_eq!(accepted, Vec2::new(100.0, 0.0));
        assert_eq!(next, Vec2::new(18.0, 8.0));
    }

    #[test]
    fn collidable_layers_block_moves_the_gate_accepts() {
        let (grid, layers) = strip();
        let gate = MovementGate::new("road", WalkableSet::new([5], 5));

        let (accepted, next) = step_position(
            Vec2::new(30.0, 8.0),
            Vec2::new(100.0, 0.0),
            0.1,
            &gate,
            &grid,
            &layers,
        );
        assert_eq!(accepted, Vec2::ZERO);
        assert_eq!(next, Vec2::new(30.0, 8.0));
    }

    #[test]
    fn unconstrained_movement_is_clamped_to_world_bounds() {
        let (grid, _) = strip();
        let (accepted, next) = step_position(
            Vec2::new(2.0, 8.0),
            Vec2::new(-100.0, 0.0),
            0.1,
            &MovementGate::unconstrained(),
            &grid,
            &LayerTable::default(),
        );
        assert_eq!(accepted, Vec2::new(-100.0, 0.0));
        assert_eq!(next, Vec2::new(0.0, 8.0));
    }
}
