// src/ui/trigger_prompt/plugin.rs
//
// Plugin registration for the zone trigger prompt.

use bevy::prelude::*;

use crate::core::TickSet;

use super::components::{PromptState, TriggerAction, TriggerActivated};
use super::systems::{
    activate_trigger_prompt, apply_zone_events, spawn_trigger_prompt, sync_trigger_prompt,
};

/// Plugin showing a contextual prompt above the trigger zone the player is in.
///
/// # System Ordering
///
/// 1. `apply_zone_events` - Reads `ZoneEvent`s written by the proximity tracker this tick
/// 2. `sync_trigger_prompt` - Moves and shows/hides the label entity
/// 3. `activate_trigger_prompt` - Runs the `TriggerAction` on E / Enter
///
/// # Dependencies
///
/// - `ZonesPlugin` must be registered (provides `ZoneSet` and `ZoneEvent`)
/// - A host may insert its own `TriggerAction` before this plugin; otherwise a logging default is used
pub struct TriggerPromptPlugin;

impl Plugin for TriggerPromptPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PromptState>()
            .init_resource::<TriggerAction>()
            .add_message::<TriggerActivated>()
            .add_systems(Startup, spawn_trigger_prompt)
            .add_systems(
                Update,
                (
                    apply_zone_events,
                    sync_trigger_prompt.after(apply_zone_events),
                    activate_trigger_prompt.after(apply_zone_events),
                )
                    .in_set(TickSet::Trigger),
            );

        info!("TriggerPromptPlugin registered");
    }
}
