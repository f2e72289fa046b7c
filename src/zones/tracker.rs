//! Proximity state machine over the extracted trigger zones.
use bevy::prelude::*;

use crate::zones::components::{ZoneEvent, ZoneSet};

/// Which zone, if any, the player currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProximityState {
    #[default]
    Idle,
    InZone(usize),
}

impl ProximityState {
    pub fn zone(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::InZone(zone) => Some(zone),
        }
    }
}

/// Edge events produced by a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneChange {
    pub exited: Option<usize>,
    pub entered: Option<usize>,
}

impl ZoneChange {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.exited.is_none() && self.entered.is_none()
    }

    /// Events in firing order: the exit always precedes the enter.
    pub fn events(&self) -> impl Iterator<Item = ZoneEvent> {
        self.exited
            .map(|zone| ZoneEvent::Exited { zone })
            .into_iter()
            .chain(self.entered.map(|zone| ZoneEvent::Entered { zone }))
    }
}

/// Tracks the active zone across ticks and reports enter/exit edges.
///
/// The first zone in extraction order that contains the point, or whose center lies within
/// the threshold, wins. Later zones are not consulted even when they are closer.
#[derive(Resource, Debug, Default)]
pub struct ProximityTracker {
    state: ProximityState,
    distance_checks: u64,
}

impl ProximityTracker {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> ProximityState {
        self.state
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn active_zone(&self) -> Option<usize> {
        self.state.zone()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_inside(&self, zone: usize) -> bool {
        self.state == ProximityState::InZone(zone)
    }

    /// Total center-distance computations performed so far.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn distance_checks(&self) -> u64 {
        self.distance_checks
    }

    /// Evaluates the player point against the zones and returns the resulting edges.
    pub fn evaluate(&mut self, point: Vec2, zones: &ZoneSet) -> ZoneChange {
        let next = self.resolve(point, zones);
        let previous = std::mem::replace(&mut self.state, next);

        if previous == next {
            return ZoneChange::default();
        }
        ZoneChange {
            exited: previous.zone(),
            entered: next.zone(),
        }
    }

    fn resolve(&mut self, point: Vec2, zones: &ZoneSet) -> ProximityState {
        let threshold = zones.threshold();
        for (index, zone) in zones.zones().iter().enumerate() {
            if zone.bounds.contains(point) {
                return ProximityState::InZone(index);
            }
            self.distance_checks += 1;
            if point.distance(zone.center) <= threshold {
                return ProximityState::InZone(index);
            }
        }
        ProximityState::Idle
    }
}
