//! Scene configuration sourced from `config/scene.toml` and the environment.
use std::{collections::HashMap, env, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::map::layers::LayerOverride;

const CONFIG_PATH: &str = "config/scene.toml";
const MAP_PATH_VAR: &str = "SCENE_MAP_PATH";

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;
const MAX_TIME_SCALE: f32 = 64.0;
const DEFAULT_MAX_STEP_SECONDS: f32 = 0.1;
const MAX_STEP_CEILING_SECONDS: f32 = 1.0;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawSceneConfig {
    #[serde(default)]
    map: RawMapSection,
    #[serde(default)]
    clock: RawClockSection,
    #[serde(default)]
    movement: RawMovementSection,
    #[serde(default)]
    triggers: RawTriggerSection,
    #[serde(default)]
    camera: RawCameraSection,
    #[serde(default)]
    layers: HashMap<String, LayerOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMapSection {
    path: String,
    tileset_image: String,
    player_image: String,
}

impl Default for RawMapSection {
    fn default() -> Self {
        Self {
            path: "assets/maps/town.tmj".to_string(),
            tileset_image: "tilemap_packed.png".to_string(),
            player_image: "player.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawClockSection {
    time_scale: f32,
    max_step_seconds: f32,
}

impl Default for RawClockSection {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            max_step_seconds: DEFAULT_MAX_STEP_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMovementSection {
    speed: f32,
    walkable_layer: Option<String>,
    spawn_layer: Option<String>,
    walkable_tiles: Vec<u32>,
    spawn_marker: Option<u32>,
}

impl Default for RawMovementSection {
    fn default() -> Self {
        Self {
            speed: 150.0,
            walkable_layer: None,
            spawn_layer: None,
            walkable_tiles: Vec::new(),
            spawn_marker: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTriggerSection {
    property: String,
    default_threshold: f32,
    threshold_floor: f32,
    prompt_offset: f32,
    prompt_text: String,
}

impl Default for RawTriggerSection {
    fn default() -> Self {
        Self {
            property: "triggering".to_string(),
            default_threshold: 64.0,
            threshold_floor: 16.0,
            prompt_offset: 12.0,
            prompt_text: "Press E".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCameraSection {
    zoom: f32,
}

impl Default for RawCameraSection {
    fn default() -> Self {
        Self { zoom: 2.0 }
    }
}

/// Movement tuning and the walkable-tile whitelist.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementSettings {
    /// Player speed per pressed axis (pixels per second).
    pub speed: f32,
    /// Tile layer consulted by the movement gate; falls back to the layer role table.
    pub walkable_layer: Option<String>,
    /// Layer scanned for a spawn tile; defaults to the walkable layer.
    pub spawn_layer: Option<String>,
    pub walkable_tiles: Vec<u32>,
    /// Preferred spawn marker; defaults to the first walkable tile.
    pub spawn_marker: Option<u32>,
}

/// Trigger-zone extraction and prompt tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSettings {
    /// Boolean object-layer property that marks the trigger-bearing layer.
    pub property: String,
    pub default_threshold: f32,
    pub threshold_floor: f32,
    /// Vertical gap between the zone's top edge and the prompt anchor.
    pub prompt_offset: f32,
    pub prompt_text: String,
}

/// Validated scene configuration.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub map_path: String,
    pub tileset_image: String,
    pub player_image: String,
    pub time_scale: f32,
    pub max_step_seconds: f32,
    pub camera_zoom: f32,
    pub movement: MovementSettings,
    pub triggers: TriggerSettings,
    pub layer_overrides: HashMap<String, LayerOverride>,
}

impl SceneSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        let mut settings = match fs::read_to_string(path) {
            Ok(data) => match Self::from_toml_str(&data) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        };
        settings.apply_env_overrides();
        settings
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawSceneConfig>(data).map(Into::into)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(MAP_PATH_VAR) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                info!("{} overrides map path: {}", MAP_PATH_VAR, trimmed);
                self.map_path = trimmed.to_string();
            }
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        RawSceneConfig::default().into()
    }
}

impl From<RawSceneConfig> for SceneSettings {
    fn from(value: RawSceneConfig) -> Self {
        let movement = value.movement;
        let triggers = value.triggers;

        let default_threshold = finite_or(triggers.default_threshold, 64.0).max(0.0);
        let threshold_floor =
            finite_or(triggers.threshold_floor, 16.0).clamp(0.0, default_threshold);
        let time_scale = finite_or(value.clock.time_scale, DEFAULT_TIME_SCALE)
            .clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
        let max_step_seconds = match finite_or(value.clock.max_step_seconds, 0.0) {
            step if step > 0.0 => step.min(MAX_STEP_CEILING_SECONDS),
            _ => DEFAULT_MAX_STEP_SECONDS,
        };
        let camera_zoom = match finite_or(value.camera.zoom, 0.0) {
            zoom if zoom > 0.0 => zoom,
            _ => 1.0,
        };

        Self {
            map_path: value.map.path,
            tileset_image: value.map.tileset_image,
            player_image: value.map.player_image,
            time_scale,
            max_step_seconds,
            camera_zoom,
            movement: MovementSettings {
                speed: finite_or(movement.speed, 0.0).max(0.0),
                walkable_layer: non_empty(movement.walkable_layer),
                spawn_layer: non_empty(movement.spawn_layer),
                walkable_tiles: movement.walkable_tiles,
                spawn_marker: movement.spawn_marker,
            },
            triggers: TriggerSettings {
                property: triggers.property,
                default_threshold,
                threshold_floor,
                prompt_offset: finite_or(triggers.prompt_offset, 12.0),
                prompt_text: triggers.prompt_text,
            },
            layer_overrides: value.layers,
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}
