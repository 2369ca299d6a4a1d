//! Stateful property groups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{PropertyValue, State};

/// Identifies one of the stateful property groups of a tile configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupId {
    /// Fill and stroke of measure (primary + secondary text) tiles.
    MeasureTile,
    /// Fill and stroke of header (plain text) tiles.
    HeaderTile,
    /// Text of header tiles.
    HeaderText,
    /// Primary text of measure tiles.
    CategoryLabelText,
    /// Secondary text of measure tiles.
    DataLabelText,
    /// Tile icons.
    Icon,
    /// Shadow and glow.
    Effect,
}

/// What kind of values a group holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Tile,
    Text,
    Icon,
    Effect,
}

impl GroupId {
    /// Number of groups.
    pub const COUNT: usize = 7;

    /// All groups, in configuration order.
    pub const ALL: [GroupId; GroupId::COUNT] = [
        GroupId::MeasureTile,
        GroupId::HeaderTile,
        GroupId::HeaderText,
        GroupId::CategoryLabelText,
        GroupId::DataLabelText,
        GroupId::Icon,
        GroupId::Effect,
    ];

    /// Object name in host configuration.
    pub fn name(self) -> &'static str {
        match self {
            GroupId::MeasureTile => "measureTile",
            GroupId::HeaderTile => "headerTile",
            GroupId::HeaderText => "headerText",
            GroupId::CategoryLabelText => "categoryLabelText",
            GroupId::DataLabelText => "dataLabelText",
            GroupId::Icon => "icon",
            GroupId::Effect => "effect",
        }
    }

    /// Look up a group by its configuration object name.
    pub fn from_name(name: &str) -> Option<Self> {
        GroupId::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Dense index, for array-backed per-group storage.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The kind of values this group holds.
    pub fn kind(self) -> GroupKind {
        match self {
            GroupId::MeasureTile | GroupId::HeaderTile => GroupKind::Tile,
            GroupId::HeaderText | GroupId::CategoryLabelText | GroupId::DataLabelText => {
                GroupKind::Text
            }
            GroupId::Icon => GroupKind::Icon,
            GroupId::Effect => GroupKind::Effect,
        }
    }

    /// Properties declared for this group.
    pub fn keys(self) -> &'static [PropertyKey] {
        use PropertyKey::*;
        match self.kind() {
            GroupKind::Tile => &[Color, Transparency, Stroke, StrokeWidth],
            GroupKind::Text => &[
                Color,
                Transparency,
                FontSize,
                FontFamily,
                Alignment,
                TopMargin,
                BottomMargin,
            ],
            GroupKind::Icon => &[Width, Placement, Padding, IconTopMargin, IconBottomMargin],
            GroupKind::Effect => &[
                ShadowColor,
                ShadowTransparency,
                ShadowDirection,
                ShadowDistance,
                ShadowStrength,
                GlowColor,
                GlowTransparency,
                GlowStrength,
            ],
        }
    }

    /// Whether `key` is declared for this group.
    pub fn declares(self, key: PropertyKey) -> bool {
        self.keys().contains(&key)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A stateful property, named by its base key (without state suffix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    Color,
    Transparency,
    Stroke,
    StrokeWidth,
    FontSize,
    FontFamily,
    Alignment,
    TopMargin,
    BottomMargin,
    Width,
    Placement,
    Padding,
    IconTopMargin,
    IconBottomMargin,
    ShadowColor,
    ShadowTransparency,
    ShadowDirection,
    ShadowDistance,
    ShadowStrength,
    GlowColor,
    GlowTransparency,
    GlowStrength,
}

impl PropertyKey {
    /// Base key as written in host configuration.
    pub fn name(self) -> &'static str {
        match self {
            PropertyKey::Color => "color",
            PropertyKey::Transparency => "transparency",
            PropertyKey::Stroke => "stroke",
            PropertyKey::StrokeWidth => "strokeWidth",
            PropertyKey::FontSize => "fontSize",
            PropertyKey::FontFamily => "fontFamily",
            PropertyKey::Alignment => "alignment",
            PropertyKey::TopMargin => "tmargin",
            PropertyKey::BottomMargin => "bmargin",
            PropertyKey::Width => "width",
            PropertyKey::Placement => "placement",
            PropertyKey::Padding => "padding",
            PropertyKey::IconTopMargin => "topMargin",
            PropertyKey::IconBottomMargin => "bottomMargin",
            PropertyKey::ShadowColor => "shadowColor",
            PropertyKey::ShadowTransparency => "shadowTransparency",
            PropertyKey::ShadowDirection => "shadowDirection",
            PropertyKey::ShadowDistance => "shadowDistance",
            PropertyKey::ShadowStrength => "shadowStrength",
            PropertyKey::GlowColor => "glowColor",
            PropertyKey::GlowTransparency => "glowTransparency",
            PropertyKey::GlowStrength => "glowStrength",
        }
    }

    /// Look up a property declared for `group` by its base key.
    pub fn from_name(group: GroupId, name: &str) -> Option<Self> {
        group.keys().iter().copied().find(|k| k.name() == name)
    }
}

/// One stateful group of a tile configuration.
///
/// Holds the explicitly configured variants, keyed by `(property, state)`,
/// and the hard defaults used when no variant applies.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup {
    id: GroupId,
    variants: HashMap<(PropertyKey, State), PropertyValue>,
    defaults: HashMap<PropertyKey, PropertyValue>,
    /// Whether hovered tiles use the hovered variants of this group.
    pub hover_styling: bool,
    /// The state the host's configuration pane is currently editing.
    pub editing_state: State,
}

impl PropertyGroup {
    /// Create a group with its hard defaults and no configured variants.
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            variants: HashMap::new(),
            defaults: super::defaults::hard_defaults(id),
            hover_styling: false,
            editing_state: State::All,
        }
    }

    /// The group identifier.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Set a variant. Undeclared keys are ignored and reported as `false`.
    pub fn set(&mut self, key: PropertyKey, state: State, value: impl Into<PropertyValue>) -> bool {
        if !self.id.declares(key) {
            return false;
        }
        self.variants.insert((key, state), value.into());
        true
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: PropertyKey, state: State, value: impl Into<PropertyValue>) -> Self {
        self.set(key, state, value);
        self
    }

    /// Remove a variant.
    pub fn unset(&mut self, key: PropertyKey, state: State) -> Option<PropertyValue> {
        self.variants.remove(&(key, state))
    }

    /// The configured variant, if any (empty strings included).
    pub fn variant(&self, key: PropertyKey, state: State) -> Option<&PropertyValue> {
        self.variants.get(&(key, state))
    }

    /// The hard default of a declared property.
    pub fn hard_default(&self, key: PropertyKey) -> Option<&PropertyValue> {
        self.defaults.get(&key)
    }

    /// Replace the hard default of a declared property.
    pub fn set_hard_default(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) {
        if self.id.declares(key) {
            self.defaults.insert(key, value.into());
        }
    }

    /// Builder form of [`set_hard_default`](Self::set_hard_default).
    pub fn with_hard_default(mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
        self.set_hard_default(key, value);
        self
    }

    /// Builder for the hover styling toggle.
    pub fn with_hover_styling(mut self, enabled: bool) -> Self {
        self.hover_styling = enabled;
        self
    }

    /// Number of configured variants.
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}
