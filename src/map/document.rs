//! Serde model of the Tiled JSON (`.tmj`) subset the scene consumes.
use std::{fmt, fs, path::Path};

use serde::Deserialize;
use serde_json::Value;

/// Root of a Tiled JSON map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapDocument {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    pub layers: Vec<MapLayer>,
    pub tilesets: Vec<TilesetRef>,
}

/// A map layer, tagged by Tiled's `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum MapLayer {
    #[serde(rename = "tilelayer")]
    Tiles(TileLayerData),
    #[serde(rename = "objectgroup")]
    Objects(ObjectLayerData),
    /// Image and group layers carry nothing the scene uses.
    #[serde(other)]
    Unsupported,
}

/// Tile layer with CSV-encoded (JSON array) cell data.
#[derive(Debug, Clone, Deserialize)]
pub struct TileLayerData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// Object layer holding designer-placed rectangles and points.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectLayerData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A single object entry in layer-local pixel space.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Tiled custom property (`{ name, type, value }`).
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub name: String,
    #[allow(dead_code)]
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

/// Embedded tileset description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TilesetRef {
    #[serde(rename = "firstgid")]
    pub first_gid: u32,
    pub name: String,
    pub image: String,
    pub columns: u32,
    #[serde(rename = "tilecount")]
    pub tile_count: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
}

fn visible_by_default() -> bool {
    true
}

impl MapDocument {
    /// Reads and parses a map document from disk.
    pub fn load(path: &Path) -> Result<Self, MapLoadError> {
        let data = fs::read_to_string(path).map_err(|err| MapLoadError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&data).map_err(|err| MapLoadError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    pub fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Tile layers in document order.
    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayerData> {
        self.layers.iter().filter_map(|layer| match layer {
            MapLayer::Tiles(data) => Some(data),
            _ => None,
        })
    }

    /// Object layers in document order.
    pub fn object_layers(&self) -> impl Iterator<Item = &ObjectLayerData> {
        self.layers.iter().filter_map(|layer| match layer {
            MapLayer::Objects(data) => Some(data),
            _ => None,
        })
    }

    pub fn object_layer(&self, name: &str) -> Option<&ObjectLayerData> {
        self.object_layers().find(|layer| layer.name == name)
    }
}

/// Looks up a boolean custom property.
pub fn property_bool(properties: &[Property], name: &str) -> Option<bool> {
    find_property(properties, name).and_then(|property| property.value.as_bool())
}

/// Looks up an integer custom property.
pub fn property_int(properties: &[Property], name: &str) -> Option<i64> {
    find_property(properties, name).and_then(|property| property.value.as_i64())
}

/// Looks up a string custom property.
pub fn property_str<'a>(properties: &'a [Property], name: &str) -> Option<&'a str> {
    find_property(properties, name).and_then(|property| property.value.as_str())
}

fn find_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
    properties.iter().find(|property| property.name == name)
}

/// Failure to bring a map document into memory.
#[derive(Debug, Clone)]
pub enum MapLoadError {
    Io { path: String, message: String },
    Parse { path: String, message: String },
}

impl fmt::Display for MapLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read map {}: {}", path, message),
            Self::Parse { path, message } => {
                write!(f, "failed to parse map {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for MapLoadError {}
