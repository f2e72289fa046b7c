//! Walkable-tile movement gate.
use std::collections::HashSet;

use bevy::prelude::*;

use crate::{
    core::settings::MovementSettings,
    map::{
        grid::{TileGrid, TileIndex},
        layers::LayerTable,
    },
};

/// Tile indices the player may stand on, with one preferred spawn marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkableSet {
    tiles: HashSet<TileIndex>,
    spawn_marker: TileIndex,
}

impl WalkableSet {
    /// Builds the set. The spawn marker is always a member.
    pub fn new(tiles: impl IntoIterator<Item = TileIndex>, spawn_marker: TileIndex) -> Self {
        let mut tiles: HashSet<TileIndex> = tiles.into_iter().collect();
        tiles.insert(spawn_marker);
        Self {
            tiles,
            spawn_marker,
        }
    }

    /// Reads the whitelist from settings. An empty whitelist means no constraint.
    pub fn from_settings(settings: &MovementSettings) -> Option<Self> {
        let marker = settings
            .spawn_marker
            .or_else(|| settings.walkable_tiles.first().copied())?;
        Some(Self::new(settings.walkable_tiles.iter().copied(), marker))
    }

    pub fn contains(&self, index: TileIndex) -> bool {
        self.tiles.contains(&index)
    }

    pub fn spawn_marker(&self) -> TileIndex {
        self.spawn_marker
    }
}

#[derive(Debug, Clone)]
struct WalkConstraint {
    layer: String,
    walkable: WalkableSet,
}

/// Accepts or rejects a requested velocity against the walkable whitelist.
///
/// The gate is binary: a request either moves on both axes or not at all.
#[derive(Resource, Debug, Clone, Default)]
pub struct MovementGate {
    constraint: Option<WalkConstraint>,
}

impl MovementGate {
    /// A gate that accepts every request.
    pub fn unconstrained() -> Self {
        Self { constraint: None }
    }

    pub fn new(layer: impl Into<String>, walkable: WalkableSet) -> Self {
        Self {
            constraint: Some(WalkConstraint {
                layer: layer.into(),
                walkable,
            }),
        }
    }

    /// Resolves the walkable layer and whitelist; degrades to unconstrained when either is missing.
    pub fn from_settings(settings: &MovementSettings, layers: &LayerTable) -> Self {
        let Some(layer) = layers.resolve_walkable_layer(settings.walkable_layer.as_deref()) else {
            info!("No walkable layer configured; movement is unconstrained");
            return Self::unconstrained();
        };
        let Some(walkable) = WalkableSet::from_settings(settings) else {
            warn!(
                "Walkable layer '{}' found but no walkable tiles configured; movement is unconstrained",
                layer
            );
            return Self::unconstrained();
        };

        info!(
            "Movement restricted to {} tile ids on layer '{}' (spawn marker {})",
            walkable.tiles.len(),
            layer,
            walkable.spawn_marker
        );
        Self::new(layer, walkable)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_constrained(&self) -> bool {
        self.constraint.is_some()
    }

    pub fn layer(&self) -> Option<&str> {
        self.constraint
            .as_ref()
            .map(|constraint| constraint.layer.as_str())
    }

    pub fn walkable(&self) -> Option<&WalkableSet> {
        self.constraint
            .as_ref()
            .map(|constraint| &constraint.walkable)
    }

    /// True when a point lies on a walkable tile (always true when unconstrained).
    pub fn permits(&self, point: Vec2, grid: &TileGrid) -> bool {
        let Some(constraint) = &self.constraint else {
            return true;
        };
        grid.tile_at_point(&constraint.layer, point)
            .is_some_and(|index| constraint.walkable.contains(index))
    }

    /// Returns `velocity` if the position it leads to after `dt` is walkable, otherwise zero.
    pub fn attempt(&self, current: Vec2, velocity: Vec2, dt: f32, grid: &TileGrid) -> Vec2 {
        let prospective = current + velocity * dt;
        if self.permits(prospective, grid) {
            velocity
        } else {
            Vec2::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tile_grid() -> TileGrid {
        TileGrid::new(2, 1, UVec2::splat(16)).with_layer("road", 2, 1, vec![5, 1])
    }

    fn road_gate() -> MovementGate {
        MovementGate::new("road", WalkableSet::new([5], 5))
    }

    #[test]
    fn rejects_move_onto_non_walkable_tile() {
        let accepted = road_gate().attempt(
            Vec2::new(12.0, 8.0),
            Vec2::new(150.0, 0.0),
            0.1,
            &two_tile_grid(),
        );
        assert_eq!(accepted, Vec2::ZERO);
    }

    #[test]
    fn accepts_full_velocity_within_walkable_tile() {
        let velocity = Vec2::new(20.0, -20.0);
        let accepted = road_gate().attempt(Vec2::new(4.0, 8.0), velocity, 0.1, &two_tile_grid());
        assert_eq!(accepted, velocity);
    }

    #[test]
    fn rejects_both_axes_when_diagonal_leaves_walkable_ground() {
        // x alone would stay on tile (0,0); y leaves the grid, so nothing moves.
        let accepted = road_gate().attempt(
            Vec2::new(4.0, 14.0),
            Vec2::new(10.0, 100.0),
            0.1,
            &two_tile_grid(),
        );
        assert_eq!(accepted, Vec2::ZERO);
    }

    #[test]
    fn rejects_moves_off_the_grid() {
        let accepted = road_gate().attempt(
            Vec2::new(2.0, 8.0),
            Vec2::new(-100.0, 0.0),
            0.1,
            &two_tile_grid(),
        );
        assert_eq!(accepted, Vec2::ZERO);
    }

    #[test]
    fn unconstrained_gate_accepts_everything() {
        let gate = MovementGate::unconstrained();
        let velocity = Vec2::new(150.0, 0.0);
        assert!(!gate.is_constrained());
        assert_eq!(
            gate.attempt(Vec2::new(12.0, 8.0), velocity, 0.1, &two_tile_grid()),
            velocity
        );
        assert_eq!(
            gate.attempt(Vec2::new(-500.0, 8.0), velocity, 1.0, &TileGrid::default()),
            velocity
        );
    }

    #[test]
    fn settings_without_tiles_or_layer_degrade_to_unconstrained() {
        let grid_doc = crate::map::document::MapDocument::from_json_str(
            r#"{ "width": 1, "height": 1, "tilewidth": 16, "tileheight": 16,
                 "layers": [{ "type": "tilelayer", "name": "road", "width": 1, "height": 1, "data": [5] }] }"#,
        )
        .expect("fixture parses");
        let layers = LayerTable::from_document(&grid_doc, &Default::default());

        let mut settings = MovementSettings {
            speed: 150.0,
            walkable_layer: Some("road".to_string()),
            spawn_layer: None,
            walkable_tiles: Vec::new(),
            spawn_marker: None,
        };
        assert!(!MovementGate::from_settings(&settings, &layers).is_constrained());

        settings.walkable_tiles = vec![5, 6];
        let gate = MovementGate::from_settings(&settings, &layers);
        assert_eq!(gate.layer(), Some("road"));
        assert_eq!(gate.walkable().map(WalkableSet::spawn_marker), Some(5));

        settings.walkable_layer = None;
        assert!(!MovementGate::from_settings(&settings, &layers).is_constrained());
    }

    #[test]
    fn spawn_marker_joins_the_walkable_set() {
        let set = WalkableSet::new([1, 2], 9);
        assert!(set.contains(9));
        assert!(set.contains(1));
        assert!(!set.contains(3));
    }
}
