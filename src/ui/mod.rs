// src/ui/mod.rs
//
// UI module providing the contextual elements of the scene.
//
// Current features:
// - Trigger prompt (label above the active trigger zone)

pub mod trigger_prompt;

pub use trigger_prompt::TriggerPromptPlugin as UiPlugin;
