//! Components for the player entity.
use bevy::prelude::*;

/// Marker component identifying the player entity.
#[derive(Component, Debug)]
pub struct Player;

/// Player position in map pixel space (y-down). The render transform is derived from it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPosition(pub Vec2);

/// Per-tick movement request and the part of it the gate accepted.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerMotion {
    /// Velocity requested by input (pixels per second).
    pub intended: Vec2,
    /// Velocity accepted by the movement gate this tick.
    pub accepted: Vec2,
}
