use std::path::Path;

use bevy::prelude::*;

mod core;
mod map;
mod movement;
mod player;
mod ui;
mod zones;

use crate::{
    core::{CorePlugin, SceneSettings},
    map::MapPlugin,
    movement::MovementPlugin,
    player::PlayerPlugin,
    ui::UiPlugin,
    zones::ZonesPlugin,
};

fn main() {
    load_scene_env();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()));

    // Must follow DefaultPlugins: LogPlugin installs the subscriber config warnings go to.
    let settings = SceneSettings::load_or_default();

    app.insert_resource(settings.clone())
        .add_plugins((
            CorePlugin::new(settings.time_scale, settings.max_step_seconds),
            MapPlugin,
            MovementPlugin, // After MapPlugin to read the layer table
            ZonesPlugin,    // After MapPlugin to read the map document
            PlayerPlugin,
            UiPlugin,
        ))
        .run();
}

fn load_scene_env() {
    const ENV_FILE: &str = "scene.env";

    let path = Path::new(ENV_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", ENV_FILE, err);
    }
}
