//! Declarative layer role table: how each tile layer collides, stacks and is used.
use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

use super::{
    document::{property_bool, property_int, property_str, MapDocument, Property},
    grid::{TileCoord, TileGrid},
};

/// What a tile layer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerRole {
    #[default]
    Ground,
    Walkable,
    Structure,
    Decoration,
    Foreground,
}

impl LayerRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ground" => Some(Self::Ground),
            "walkable" => Some(Self::Walkable),
            "structure" => Some(Self::Structure),
            "decoration" => Some(Self::Decoration),
            "foreground" => Some(Self::Foreground),
            _ => None,
        }
    }
}

/// Resolved behaviour for one tile layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerProfile {
    pub collidable: bool,
    pub depth: i32,
    pub role: LayerRole,
}

/// Partial profile, from a `[layers.<name>]` config entry or a layer's custom properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayerOverride {
    pub collidable: Option<bool>,
    pub depth: Option<i32>,
    pub role: Option<LayerRole>,
}

impl LayerOverride {
    pub fn from_properties(properties: &[Property]) -> Self {
        let role = property_str(properties, "role").and_then(|value| {
            let role = LayerRole::parse(value);
            if role.is_none() {
                warn!("Ignoring unknown layer role '{}'", value);
            }
            role
        });
        Self {
            collidable: property_bool(properties, "collidable"),
            depth: property_int(properties, "depth").and_then(|depth| i32::try_from(depth).ok()),
            role,
        }
    }

    pub fn apply(&self, profile: &mut LayerProfile) {
        if let Some(collidable) = self.collidable {
            profile.collidable = collidable;
        }
        if let Some(depth) = self.depth {
            profile.depth = depth;
        }
        if let Some(role) = self.role {
            profile.role = role;
        }
    }
}

/// Profiles for every tile layer, in document order.
#[derive(Resource, Debug, Clone, Default)]
pub struct LayerTable {
    entries: Vec<(String, LayerProfile)>,
}

impl LayerTable {
    /// Builds the table once: defaults, then config overrides, then map properties.
    pub fn from_document(
        document: &MapDocument,
        overrides: &HashMap<String, LayerOverride>,
    ) -> Self {
        let entries = document
            .tile_layers()
            .map(|layer| {
                let mut profile = LayerProfile::default();
                if let Some(entry) = overrides.get(&layer.name) {
                    entry.apply(&mut profile);
                }
                LayerOverride::from_properties(&layer.properties).apply(&mut profile);
                (layer.name.clone(), profile)
            })
            .collect();
        Self { entries }
    }

    /// Profile for a layer; unknown layers get the default profile.
    pub fn profile(&self, name: &str) -> LayerProfile {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, profile)| *profile)
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| entry == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LayerProfile)> {
        self.entries
            .iter()
            .map(|(name, profile)| (name.as_str(), *profile))
    }

    pub fn first_with_role(&self, role: LayerRole) -> Option<&str> {
        self.iter()
            .find(|(_, profile)| profile.role == role)
            .map(|(name, _)| name)
    }

    /// The layer the movement gate consults: the configured name if the map has it,
    /// otherwise the first layer whose role is `Walkable`.
    pub fn resolve_walkable_layer(&self, configured: Option<&str>) -> Option<String> {
        if let Some(name) = configured {
            if self.contains(name) {
                return Some(name.to_string());
            }
            warn!(
                "Configured walkable layer '{}' is not in the map; falling back to layer roles",
                name
            );
        }
        self.first_with_role(LayerRole::Walkable)
            .map(str::to_string)
    }

    /// True when any collidable layer has a tile at `coord`.
    pub fn solid_at(&self, grid: &TileGrid, coord: TileCoord) -> bool {
        self.iter()
            .filter(|(_, profile)| profile.collidable)
            .any(|(name, _)| grid.tile_at(name, coord).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYERED_MAP: &str = r#"{
        "width": 2, "height": 1, "tilewidth": 16, "tileheight": 16,
        "layers": [
            { "type": "tilelayer", "name": "base", "width": 2, "height": 1, "data": [1, 1] },
            { "type": "tilelayer", "name": "road", "width": 2, "height": 1, "data": [5, 0],
              "properties": [
                  { "name": "role", "type": "string", "value": "walkable" },
                  { "name": "depth", "type": "int", "value": 2 }
              ] },
            { "type": "tilelayer", "name": "shed", "width": 2, "height": 1, "data": [0, 9] }
        ]
    }"#;

    fn layered_document() -> MapDocument {
        MapDocument::from_json_str(LAYERED_MAP).expect("fixture parses")
    }

    #[test]
    fn map_properties_override_config_entries() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "road".to_string(),
            LayerOverride {
                collidable: Some(false),
                depth: Some(7),
                role: Some(LayerRole::Decoration),
            },
        );
        overrides.insert(
            "shed".to_string(),
            LayerOverride {
                collidable: Some(true),
                depth: Some(1),
                role: Some(LayerRole::Structure),
            },
        );

        let table = LayerTable::from_document(&layered_document(), &overrides);

        assert_eq!(
            table.profile("road"),
            LayerProfile {
                collidable: false,
                depth: 2,
                role: LayerRole::Walkable,
            }
        );
        assert_eq!(table.profile("shed").role, LayerRole::Structure);
        assert!(table.profile("shed").collidable);
        assert_eq!(table.profile("base"), LayerProfile::default());
        assert_eq!(table.profile("unknown"), LayerProfile::default());
    }

    #[test]
    fn walkable_layer_resolution_prefers_configured_name() {
        let table = LayerTable::from_document(&layered_document(), &HashMap::new());

        assert_eq!(table.resolve_walkable_layer(Some("base")).as_deref(), Some("base"));
        assert_eq!(table.resolve_walkable_layer(Some("nope")).as_deref(), Some("road"));
        assert_eq!(table.resolve_walkable_layer(None).as_deref(), Some("road"));
        assert_eq!(LayerTable::default().resolve_walkable_layer(None), None);
    }

    #[test]
    fn solid_cells_come_from_collidable_layers_only() {
        let document = layered_document();
        let mut overrides = HashMap::new();
        overrides.insert(
            "shed".to_string(),
            LayerOverride {
                collidable: Some(true),
                ..Default::default()
            },
        );
        let table = LayerTable::from_document(&document, &overrides);
        let grid = TileGrid::from_document(&document);

        assert!(!table.solid_at(&grid, TileCoord::new(0, 0)));
        assert!(table.solid_at(&grid, TileCoord::new(1, 0)));
        assert!(!table.solid_at(&grid, TileCoord::new(5, 0)));
    }

    #[test]
    fn parses_role_names_case_insensitively() {
        assert_eq!(LayerRole::parse(" Foreground "), Some(LayerRole::Foreground));
        assert_eq!(LayerRole::parse("lava"), None);
    }
}
