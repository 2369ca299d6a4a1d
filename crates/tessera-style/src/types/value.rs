//! Property values and the small enums configuration text maps onto.

use serde::{Deserialize, Serialize};
use tessera_render::Color;

/// A configured property value.
///
/// Host configuration objects are loosely typed; a value keeps the shape it
/// arrived in and typed accessors convert on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f32),
    Text(String),
    Bool(bool),
}

impl PropertyValue {
    /// The value an undeclared property resolves to.
    pub fn empty() -> Self {
        PropertyValue::Text(String::new())
    }

    /// Whether the value counts as unset. Only an empty string does.
    pub fn is_empty(&self) -> bool {
        matches!(self, PropertyValue::Text(s) if s.trim().is_empty())
    }

    /// Numeric view. Text is parsed, non-numeric text reads as 0.
    pub fn as_number(&self) -> f32 {
        match self {
            PropertyValue::Number(n) => *n,
            PropertyValue::Text(s) => s.trim().parse().unwrap_or(0.0),
            PropertyValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Text view.
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::Text(s) => s.clone(),
            PropertyValue::Bool(b) => b.to_string(),
        }
    }

    /// Color view, if the value is a parseable hex color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropertyValue::Text(s) => Color::from_hex(s),
            _ => None,
        }
    }

    /// Convert to JSON for merge entries.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropertyValue::Number(n) => serde_json::Number::from_f64(*n as f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PropertyValue::Text(s) => serde_json::Value::String(s.clone()),
            PropertyValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(n: f32) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// Horizontal text alignment within a tile's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Parse from the configuration string. Unknown values fall back to center.
    pub fn from_config(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => TextAlign::Left,
            "right" | "end" => TextAlign::Right,
            _ => TextAlign::Center,
        }
    }
}

/// Where an icon sits relative to the tile text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPlacement {
    #[default]
    Left,
    Above,
}

impl IconPlacement {
    /// Parse from the configuration string. Unknown values fall back to left.
    pub fn from_config(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "above" | "top" => IconPlacement::Above,
            _ => IconPlacement::Left,
        }
    }
}

/// Direction a drop shadow is cast in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShadowDirection {
    Top,
    TopRight,
    Right,
    #[default]
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    Center,
}

impl ShadowDirection {
    /// Parse from the configuration string. Unknown values fall back to
    /// bottom-right.
    pub fn from_config(s: &str) -> Self {
        match s.trim() {
            "top" => ShadowDirection::Top,
            "topRight" => ShadowDirection::TopRight,
            "right" => ShadowDirection::Right,
            "bottom" => ShadowDirection::Bottom,
            "bottomLeft" => ShadowDirection::BottomLeft,
            "left" => ShadowDirection::Left,
            "topLeft" => ShadowDirection::TopLeft,
            "center" => ShadowDirection::Center,
            _ => ShadowDirection::BottomRight,
        }
    }

    /// Offset of a shadow cast `distance` pixels in this direction.
    pub fn offset(self, distance: f32) -> (f32, f32) {
        let diagonal = distance / std::f32::consts::SQRT_2;
        match self {
            ShadowDirection::Top => (0.0, -distance),
            ShadowDirection::TopRight => (diagonal, -diagonal),
            ShadowDirection::Right => (distance, 0.0),
            ShadowDirection::BottomRight => (diagonal, diagonal),
            ShadowDirection::Bottom => (0.0, distance),
            ShadowDirection::BottomLeft => (-diagonal, diagonal),
            ShadowDirection::Left => (-distance, 0.0),
            ShadowDirection::TopLeft => (-diagonal, -diagonal),
            ShadowDirection::Center => (0.0, 0.0),
        }
    }
}
