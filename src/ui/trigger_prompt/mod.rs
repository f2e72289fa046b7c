// src/ui/trigger_prompt/mod.rs
//
// Trigger prompt module: a world-space label shown above the active trigger zone.
//
// - Shows on zone enter, hides on exit of the zone it is shown for
// - Anchored above the zone's top edge, centred on the zone
// - Runs the host-supplied TriggerAction on E / Enter while visible

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::TriggerPromptPlugin;
