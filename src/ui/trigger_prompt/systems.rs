// src/ui/trigger_prompt/systems.rs
//
// Systems for showing, positioning and activating the zone trigger prompt.

use bevy::prelude::*;

use crate::core::SceneSettings;
use crate::map::grid::map_to_render;
use crate::zones::components::{ZoneEvent, ZoneSet};

use super::components::{PromptState, TriggerAction, TriggerActivated, TriggerPrompt};

// Visual constants
const PROMPT_FONT_SIZE: f32 = 10.0;
const PROMPT_TEXT_COLOR: Color = Color::srgb(1.0, 0.95, 0.7);
const PROMPT_Z: f32 = 200.0;

/// Spawn the prompt label, hidden until the player reaches a zone.
pub fn spawn_trigger_prompt(mut commands: Commands, settings: Res<SceneSettings>) {
    commands.spawn((
        Text2d::new(settings.triggers.prompt_text.clone()),
        TextFont {
            font_size: PROMPT_FONT_SIZE,
            ..default()
        },
        TextColor(PROMPT_TEXT_COLOR),
        Transform::from_xyz(0.0, 0.0, PROMPT_Z),
        Visibility::Hidden,
        TriggerPrompt,
        Name::new("Trigger Prompt"),
    ));
}

/// Feed zone enter/exit events into the prompt state.
pub fn apply_zone_events(
    mut events: MessageReader<ZoneEvent>,
    zones: Res<ZoneSet>,
    settings: Res<SceneSettings>,
    mut state: ResMut<PromptState>,
) {
    for event in events.read() {
        state.apply(*event, &zones, settings.triggers.prompt_offset);
    }
}

/// Mirror the prompt state onto the label entity.
pub fn sync_trigger_prompt(
    state: Res<PromptState>,
    mut prompt_query: Query<(&mut Transform, &mut Visibility), With<TriggerPrompt>>,
) {
    if !state.is_changed() {
        return;
    }

    for (mut transform, mut visibility) in prompt_query.iter_mut() {
        if state.is_visible() {
            transform.translation = map_to_render(state.anchor(), PROMPT_Z);
            *visibility = Visibility::Visible;
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Run the trigger action when the prompt is visible and the player presses E or Enter.
pub fn activate_trigger_prompt(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<PromptState>,
    zones: Res<ZoneSet>,
    action: Res<TriggerAction>,
    mut activated: MessageWriter<TriggerActivated>,
) {
    if !keyboard.any_just_pressed([KeyCode::KeyE, KeyCode::Enter]) {
        return;
    }

    let Some(zone) = state.visible_zone() else {
        debug!("Activation pressed with no trigger prompt visible");
        return;
    };

    info!(
        "Trigger prompt activated for zone {} ('{}')",
        zone,
        zones.get(zone).map_or("", |trigger| trigger.name.as_str())
    );
    action.invoke();
    activated.write(TriggerActivated { zone });
}
