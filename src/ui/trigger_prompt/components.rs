// src/ui/trigger_prompt/components.rs
//
// Components and resources for the zone trigger prompt.

use std::fmt;

use bevy::prelude::*;

use crate::zones::components::{ZoneEvent, ZoneSet};

/// Marker component for the world-space prompt label.
#[derive(Component, Debug)]
pub struct TriggerPrompt;

/// Visibility and anchor of the prompt, driven by zone enter/exit events.
///
/// The anchor is in map pixel space and sits above the zone, not on the player.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PromptState {
    zone: Option<usize>,
    anchor: Vec2,
}

impl PromptState {
    /// Show the prompt for `zone` at `anchor`.
    pub fn show(&mut self, zone: usize, anchor: Vec2) {
        self.zone = Some(zone);
        self.anchor = anchor;
    }

    /// Hide the prompt.
    pub fn hide(&mut self) {
        self.zone = None;
    }

    /// Zone the prompt is currently shown for.
    pub fn visible_zone(&self) -> Option<usize> {
        self.zone
    }

    pub fn is_visible(&self) -> bool {
        self.zone.is_some()
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Apply one tracker event. Exits for a zone other than the shown one are ignored.
    pub fn apply(&mut self, event: ZoneEvent, zones: &ZoneSet, offset: f32) {
        match event {
            ZoneEvent::Entered { zone } => match zones.get(zone) {
                Some(trigger) => self.show(trigger.id, trigger.anchor(offset)),
                None => warn!("Enter event for unknown zone {}", zone),
            },
            ZoneEvent::Exited { zone } => {
                if self.zone == Some(zone) {
                    self.hide();
                }
            }
        }
    }
}

/// Action run when the player activates the visible prompt.
///
/// The scene only decides when the prompt is available; what the action does is up to the host.
#[derive(Resource)]
pub struct TriggerAction(Box<dyn Fn() + Send + Sync>);

impl TriggerAction {
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Box::new(action))
    }

    pub fn invoke(&self) {
        (self.0)();
    }
}

impl Default for TriggerAction {
    fn default() -> Self {
        Self::new(|| info!("Trigger prompt activated (no action registered)"))
    }
}

impl fmt::Debug for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TriggerAction(..)")
    }
}

/// Fired after the trigger action ran for a zone. Read by the host, not by the scene.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerActivated {
    #[cfg_attr(not(test), allow(dead_code))]
    pub zone: usize,
}
