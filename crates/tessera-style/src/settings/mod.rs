//! Tile configuration and its JSON loading.
//!
//! Hosts describe tile styling as a nested JSON object, one member per
//! group, with stateful properties written as base key plus state suffix:
//!
//! ```json
//! {
//!   "measureTile": { "colorA": "#f3f2f1", "strokeWidthH": 2, "hoverStyling": true },
//!   "dataLabelText": { "fontSizeD": 36 },
//!   "layout": { "tileLayout": "grid", "tilesPerRow": 4 },
//!   "effect": { "shadow": true, "shadowDistanceD": 4 }
//! }
//! ```
//!
//! Suffixes are parsed here and nowhere else; everything past this module
//! works with [`GroupId`], [`PropertyKey`] and [`State`].

mod defaults;
mod group;
mod layout;
mod normalize;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tessera_core::targets;

pub use defaults::{DEFAULT_FONT_FAMILY, DEFAULT_TEXT_COLOR};
pub use group::{GroupId, GroupKind, PropertyGroup, PropertyKey};
pub use layout::{
    ContentSettings, EffectSettings, IconSettings, LayoutSettings, SizingMethod, TileAlignment,
    TileLayout, TileShape,
};
pub use normalize::MergeEntry;

use crate::error::{Error, Result};
use crate::types::{PropertyValue, State};

/// The complete configuration of a tile collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSettings {
    groups: Vec<PropertyGroup>,
    /// The `layout` object.
    pub layout: LayoutSettings,
    /// Non-stateful keys of the `effect` object.
    pub effect: EffectSettings,
    /// Non-stateful keys of the `icon` object.
    pub icon: IconSettings,
    /// The `content` object.
    pub content: ContentSettings,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            groups: GroupId::ALL.into_iter().map(PropertyGroup::new).collect(),
            layout: LayoutSettings::default(),
            effect: EffectSettings::default(),
            icon: IconSettings::default(),
            content: ContentSettings::default(),
        }
    }
}

impl FormatSettings {
    /// Create settings where every property has its hard default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Read and parse a JSON settings file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(target: targets::SETTINGS, path = %path.display(), "loading configuration");
        Self::from_json_str(&json)
    }

    /// Build settings from an already parsed JSON value.
    ///
    /// Unknown objects and keys are skipped. A known key holding a value of
    /// the wrong shape is an error.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| Error::invalid_value("", "", "configuration must be a JSON object"))?;

        let mut settings = Self::default();
        for (object, body) in root {
            let body = body
                .as_object()
                .ok_or_else(|| Error::invalid_value(object, "", "expected a JSON object"))?;

            match object.as_str() {
                "layout" => settings.layout = parse_typed(object, body, &LayoutSettings::KEYS)?,
                "content" => settings.content = parse_typed(object, body, &ContentSettings::KEYS)?,
                name => match GroupId::from_name(name) {
                    Some(id) => settings.parse_group(id, body)?,
                    None => tracing::debug!(
                        target: targets::SETTINGS,
                        object = name,
                        "ignoring unknown configuration object"
                    ),
                },
            }
        }
        Ok(settings)
    }

    fn parse_group(&mut self, id: GroupId, body: &Map<String, Value>) -> Result<()> {
        let object = id.name();
        let mut flags = Map::new();

        for (key, value) in body {
            match key.as_str() {
                "hoverStyling" => {
                    self.group_mut(id).hover_styling = value.as_bool().ok_or_else(|| {
                        Error::invalid_value(object, key, "expected a boolean")
                    })?;
                }
                "state" => {
                    let state = value
                        .as_str()
                        .and_then(State::from_name)
                        .ok_or_else(|| Error::invalid_value(object, key, "expected a state name"))?;
                    self.group_mut(id).editing_state = state;
                }
                k if (id == GroupId::Effect && EffectSettings::KEYS.contains(&k))
                    || (id == GroupId::Icon && IconSettings::KEYS.contains(&k)) =>
                {
                    flags.insert(key.clone(), value.clone());
                }
                k => {
                    let Some((base, state)) = State::split_key(k) else {
                        tracing::debug!(target: targets::SETTINGS, object, key = k, "ignoring unknown key");
                        continue;
                    };
                    let Some(property) = PropertyKey::from_name(id, base) else {
                        tracing::debug!(target: targets::SETTINGS, object, key = k, "ignoring undeclared property");
                        continue;
                    };
                    if let Some(value) = property_value(object, k, value)? {
                        self.group_mut(id).set(property, state, value);
                    }
                }
            }
        }

        match id {
            GroupId::Effect => self.effect = parse_typed(object, &flags, &EffectSettings::KEYS)?,
            GroupId::Icon => self.icon = parse_typed(object, &flags, &IconSettings::KEYS)?,
            _ => {}
        }
        Ok(())
    }

    /// A stateful group.
    pub fn group(&self, id: GroupId) -> &PropertyGroup {
        &self.groups[id.index()]
    }

    /// Mutable access to a stateful group.
    pub fn group_mut(&mut self, id: GroupId) -> &mut PropertyGroup {
        &mut self.groups[id.index()]
    }

    /// All stateful groups, in [`GroupId::ALL`] order.
    pub fn groups(&self) -> impl Iterator<Item = &PropertyGroup> {
        self.groups.iter()
    }

    /// Replace a group wholesale.
    pub fn with_group(mut self, group: PropertyGroup) -> Self {
        let index = group.id().index();
        self.groups[index] = group;
        self
    }

    /// Builder for the layout object.
    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    /// Builder for the effect flags.
    pub fn with_effect(mut self, effect: EffectSettings) -> Self {
        self.effect = effect;
        self
    }

    /// Whether any group styles hovered tiles differently.
    pub fn any_hover_styling(&self) -> bool {
        self.groups.iter().any(|g| g.hover_styling)
    }
}

/// Deserialize a non-stateful object, skipping keys it does not know.
fn parse_typed<T: DeserializeOwned>(
    object: &str,
    body: &Map<String, Value>,
    known: &[&str],
) -> Result<T> {
    let mut filtered = Map::new();
    for (key, value) in body {
        if known.contains(&key.as_str()) {
            filtered.insert(key.clone(), value.clone());
        } else {
            tracing::debug!(target: targets::SETTINGS, object, key = %key, "ignoring unknown key");
        }
    }
    serde_json::from_value(Value::Object(filtered))
        .map_err(|e| Error::invalid_value(object, "*", e.to_string()))
}

/// Convert one JSON value of a stateful property. `null` means unset.
fn property_value(object: &str, key: &str, value: &Value) -> Result<Option<PropertyValue>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(PropertyValue::Bool(*b))),
        Value::Number(n) => n
            .as_f64()
            .map(|n| Some(PropertyValue::Number(n as f32)))
            .ok_or_else(|| Error::invalid_value(object, key, "number out of range")),
        Value::String(s) => Ok(Some(PropertyValue::Text(s.clone()))),
        // Fill objects as written by Power BI: { "solid": { "color": "#fff" } }
        Value::Object(fill) => fill
            .get("solid")
            .and_then(|solid| solid.get("color"))
            .and_then(Value::as_str)
            .map(|color| Some(PropertyValue::Text(color.to_string())))
            .ok_or_else(|| Error::invalid_value(object, key, "expected a fill object")),
        Value::Array(_) => Err(Error::invalid_value(object, key, "arrays are not supported")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_stateful_groups() {
        let settings = FormatSettings::from_json_value(&json!({
            "measureTile": {
                "colorS": "#ff0000",
                "strokeWidthH": 3,
                "hoverStyling": true,
                "state": "hover"
            },
            "dataLabelText": { "fontSizeD": 36, "fontFamilyA": "Arial" }
        }))
        .unwrap();

        let tile = settings.group(GroupId::MeasureTile);
        assert_eq!(
            tile.variant(PropertyKey::Color, State::Selected),
            Some(&PropertyValue::from("#ff0000"))
        );
        assert_eq!(
            tile.variant(PropertyKey::StrokeWidth, State::Hovered),
            Some(&PropertyValue::Number(3.0))
        );
        assert!(tile.hover_styling);
        assert_eq!(tile.editing_state, State::Hovered);

        let data = settings.group(GroupId::DataLabelText);
        assert_eq!(
            data.variant(PropertyKey::FontSize, State::Disabled),
            Some(&PropertyValue::Number(36.0))
        );
        assert!(settings.any_hover_styling());
    }

    #[test]
    fn parses_flags_and_typed_objects() {
        let settings = FormatSettings::from_json_str(
            r#"{
                "effect": { "shadow": true, "glow": false, "shadowDistanceD": 4 },
                "icon": { "icons": true, "widthA": 32 },
                "content": { "multiselect": true },
                "layout": { "tileLayout": "vertical", "padding": 6 }
            }"#,
        )
        .unwrap();

        assert!(settings.effect.shadow);
        assert!(!settings.effect.glow);
        assert!(settings.icon.icons);
        assert!(settings.content.multiselect);
        assert_eq!(settings.layout.tile_layout, TileLayout::Vertical);
        assert_eq!(settings.layout.padding, 6.0);
        assert_eq!(
            settings.group(GroupId::Effect).variant(PropertyKey::ShadowDistance, State::Disabled),
            Some(&PropertyValue::Number(4.0))
        );
    }

    #[test]
    fn fill_objects_and_nulls() {
        let settings = FormatSettings::from_json_value(&json!({
            "headerTile": {
                "colorU": { "solid": { "color": "#123456" } },
                "strokeD": null
            }
        }))
        .unwrap();
        let header = settings.group(GroupId::HeaderTile);
        assert_eq!(
            header.variant(PropertyKey::Color, State::Unselected),
            Some(&PropertyValue::from("#123456"))
        );
        assert_eq!(header.variant(PropertyKey::Stroke, State::Disabled), None);
    }

    #[test]
    fn unknown_objects_and_keys_are_ignored() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let settings = FormatSettings::from_json_value(&json!({
            "legend": { "show": true },
            "headerText": { "sparkle": 1, "colorQ": "#000", "fontSizeS": 18 }
        }))
        .unwrap();
        assert_eq!(settings.group(GroupId::HeaderText).variant_count(), 1);
    }

    #[test]
    fn wrong_shapes_are_errors() {
        let err = FormatSettings::from_json_value(&json!({
            "measureTile": { "hoverStyling": "yes" }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref key, .. } if key == "hoverStyling"));

        assert!(FormatSettings::from_json_value(&json!([1, 2])).is_err());
        assert!(FormatSettings::from_json_value(&json!({ "layout": 3 })).is_err());
        assert!(FormatSettings::from_json_value(&json!({ "layout": { "tileLayout": "spiral" } })).is_err());
        assert!(matches!(FormatSettings::from_json_str("{"), Err(Error::Json(_))));
    }

    #[test]
    fn load_json_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiles.json");
        std::fs::write(&path, r#"{ "layout": { "tilesPerRow": 5, "tileLayout": "grid" } }"#).unwrap();

        let settings = FormatSettings::load_json(&path).unwrap();
        assert_eq!(settings.layout.columns_per_row(), 5);

        let missing = FormatSettings::load_json(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }
}
