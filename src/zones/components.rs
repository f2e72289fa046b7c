//! Trigger zone data and the messages emitted when the player crosses zone edges.
use bevy::prelude::*;

/// Axis-aligned rectangle in map pixel space (y-down, so `top < bottom`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ZoneBounds {
    /// Inclusive point-in-rectangle test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// A designer-placed region that surfaces the trigger prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerZone {
    /// Ordinal position in extraction order.
    pub id: usize,
    pub name: String,
    pub center: Vec2,
    pub bounds: ZoneBounds,
    pub size: Vec2,
}

impl TriggerZone {
    /// Builds a zone from an object rectangle; `None` if it has no area.
    pub fn from_rect(id: usize, name: impl Into<String>, origin: Vec2, size: Vec2) -> Option<Self> {
        if !(size.x > 0.0 && size.y > 0.0) {
            return None;
        }
        let bounds = ZoneBounds {
            left: origin.x,
            right: origin.x + size.x,
            top: origin.y,
            bottom: origin.y + size.y,
        };
        Some(Self {
            id,
            name: name.into(),
            center: origin + size / 2.0,
            bounds,
            size,
        })
    }

    /// Half-width plus half-height, the zone's "typical size" for threshold tuning.
    pub fn half_extent_sum(&self) -> f32 {
        (self.size.x + self.size.y) / 2.0
    }

    /// Prompt anchor: horizontally centred, `offset` pixels above the top edge.
    pub fn anchor(&self, offset: f32) -> Vec2 {
        Vec2::new(self.center.x, self.bounds.top - offset)
    }
}

/// Zones extracted at start-up plus the proximity radius tuned to them.
#[derive(Resource, Debug, Clone, Default)]
pub struct ZoneSet {
    zones: Vec<TriggerZone>,
    threshold: f32,
    source_layer: Option<String>,
}

impl ZoneSet {
    pub fn new(zones: Vec<TriggerZone>, threshold: f32, source_layer: Option<String>) -> Self {
        Self {
            zones,
            threshold,
            source_layer,
        }
    }

    pub fn zones(&self) -> &[TriggerZone] {
        &self.zones
    }

    pub fn get(&self, id: usize) -> Option<&TriggerZone> {
        self.zones.get(id)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn source_layer(&self) -> Option<&str> {
        self.source_layer.as_deref()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.zones.len()
    }
}

/// Edge event produced by the proximity tracker.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    Entered { zone: usize },
    Exited { zone: usize },
}
