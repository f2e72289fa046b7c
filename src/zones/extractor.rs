//! Extraction of trigger zones from the map's object layers.
use bevy::prelude::*;

use crate::{
    core::settings::TriggerSettings,
    map::document::{property_bool, MapDocument},
    zones::components::{TriggerZone, ZoneSet},
};

/// Multiplier applied to the average zone size when the default threshold is too coarse.
const ADAPTIVE_SCALE: f32 = 1.5;

/// Builds the zone list from the first object layer flagged by `settings.property`.
///
/// A map without such a layer yields an empty set; that is a valid scene, not an error.
pub fn extract(document: &MapDocument, settings: &TriggerSettings) -> ZoneSet {
    let Some(layer) = document
        .object_layers()
        .find(|layer| property_bool(&layer.properties, &settings.property) == Some(true))
    else {
        info!(
            "No object layer flagged '{}'; trigger zones disabled",
            settings.property
        );
        return ZoneSet::new(Vec::new(), settings.default_threshold, None);
    };

    let mut zones = Vec::with_capacity(layer.objects.len());
    for object in &layer.objects {
        let zone = TriggerZone::from_rect(
            zones.len(),
            object.name.clone(),
            Vec2::new(object.x, object.y),
            Vec2::new(object.width, object.height),
        );
        match zone {
            Some(zone) => zones.push(zone),
            None => warn!(
                "Skipping trigger object {} ('{}') on layer '{}': {}x{} has no area",
                object.id, object.name, layer.name, object.width, object.height
            ),
        }
    }

    let threshold =
        adaptive_threshold(&zones, settings.default_threshold, settings.threshold_floor);
    info!(
        "Extracted {} trigger zones from layer '{}' (proximity threshold {:.1})",
        zones.len(),
        layer.name,
        threshold
    );

    ZoneSet::new(zones, threshold, Some(layer.name.clone()))
}

/// Shrinks the proximity radius when the default would dwarf the zones themselves.
///
/// With `typical` the average of half-width plus half-height, the result is
/// `max(1.5 × typical, floor)` if `default > typical`, else `default`.
pub fn adaptive_threshold(zones: &[TriggerZone], default: f32, floor: f32) -> f32 {
    if zones.is_empty() {
        return default;
    }

    let typical =
        zones.iter().map(TriggerZone::half_extent_sum).sum::<f32>() / zones.len() as f32;
    if default > typical {
        (ADAPTIVE_SCALE * typical).max(floor)
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::SceneSettings, zones::components::ZoneBounds};

    fn trigger_settings() -> TriggerSettings {
        SceneSettings::default().triggers
    }

    fn zone(width: f32, height: f32) -> TriggerZone {
        TriggerZone::from_rect(0, "", Vec2::ZERO, Vec2::new(width, height)).expect("zone has area")
    }

    #[test]
    fn extracts_zones_from_the_flagged_layer_only() {
        let document = MapDocument::from_json_str(
            r#"{ "layers": [
                { "type": "objectgroup", "name": "Decor",
                  "objects": [{ "x": 0, "y": 0, "width": 50, "height": 50 }] },
                { "type": "objectgroup", "name": "Doors",
                  "properties": [{ "name": "triggering", "type": "bool", "value": true }],
                  "objects": [{ "id": 1, "name": "Shop", "x": 10, "y": 10, "width": 20, "height": 20 }] }
            ] }"#,
        )
        .expect("fixture parses");

        let set = extract(&document, &trigger_settings());

        assert_eq!(set.len(), 1);
        assert_eq!(set.source_layer(), Some("Doors"));
        let zone = &set.zones()[0];
        assert_eq!(zone.id, 0);
        assert_eq!(zone.name, "Shop");
        assert_eq!(
            zone.bounds,
            ZoneBounds {
                left: 10.0,
                right: 30.0,
                top: 10.0,
                bottom: 30.0,
            }
        );
        assert_eq!(zone.center, Vec2::new(20.0, 20.0));
        assert_eq!(zone.size, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn first_flagged_layer_wins_and_false_flags_are_ignored() {
        let document = MapDocument::from_json_str(
            r#"{ "layers": [
                { "type": "objectgroup", "name": "Off",
                  "properties": [{ "name": "triggering", "type": "bool", "value": false }],
                  "objects": [{ "x": 0, "y": 0, "width": 5, "height": 5 }] },
                { "type": "objectgroup", "name": "First",
                  "properties": [{ "name": "triggering", "type": "bool", "value": true }],
                  "objects": [
                      { "name": "a", "x": 0, "y": 0, "width": 8, "height": 8 },
                      { "name": "marker", "x": 4, "y": 4 },
                      { "name": "b", "x": 40, "y": 0, "width": 8, "height": 8 }
                  ] },
                { "type": "objectgroup", "name": "Second",
                  "properties": [{ "name": "triggering", "type": "bool", "value": true }],
                  "objects": [{ "x": 0, "y": 0, "width": 5, "height": 5 }] }
            ] }"#,
        )
        .expect("fixture parses");

        let set = extract(&document, &trigger_settings());

        assert_eq!(set.source_layer(), Some("First"));
        let names: Vec<_> = set.zones().iter().map(|zone| zone.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(set.zones()[1].id, 1);
    }

    #[test]
    fn documents_without_trigger_layers_yield_no_zones() {
        let settings = trigger_settings();

        let none = extract(&MapDocument::default(), &settings);
        assert!(none.is_empty());
        assert_eq!(none.source_layer(), None);
        assert_eq!(none.threshold(), settings.default_threshold);

        let empty_layer = MapDocument::from_json_str(
            r#"{ "layers": [{ "type": "objectgroup", "name": "Doors",
                 "properties": [{ "name": "triggering", "type": "bool", "value": true }],
                 "objects": [] }] }"#,
        )
        .expect("fixture parses");
        let set = extract(&empty_layer, &settings);
        assert!(set.is_empty());
        assert_eq!(set.source_layer(), Some("Doors"));
    }

    #[test]
    fn custom_trigger_property_name_is_honoured() {
        let mut settings = trigger_settings();
        settings.property = "doors".to_string();
        let document = MapDocument::from_json_str(
            r#"{ "layers": [{ "type": "objectgroup", "name": "Doors",
                 "properties": [{ "name": "doors", "type": "bool", "value": true }],
                 "objects": [{ "x": 0, "y": 0, "width": 4, "height": 4 }] }] }"#,
        )
        .expect("fixture parses");

        assert_eq!(extract(&document, &settings).len(), 1);
    }

    #[test]
    fn threshold_shrinks_towards_small_zones() {
        // typical = (8 + 8) / 2 = 8 per zone; 1.5 × 8 = 12
        let zones = [zone(8.0, 8.0), zone(8.0, 8.0)];
        assert_eq!(adaptive_threshold(&zones, 64.0, 4.0), 12.0);
    }

    #[test]
    fn threshold_respects_floor() {
        let zones = [zone(2.0, 2.0)];
        assert_eq!(adaptive_threshold(&zones, 64.0, 16.0), 16.0);
    }

    #[test]
    fn threshold_kept_when_zones_are_large() {
        // typical = (200 + 100) / 2 = 150 > 64
        let zones = [zone(200.0, 100.0)];
        assert_eq!(adaptive_threshold(&zones, 64.0, 16.0), 64.0);
        assert_eq!(adaptive_threshold(&[], 64.0, 16.0), 64.0);
    }
}
