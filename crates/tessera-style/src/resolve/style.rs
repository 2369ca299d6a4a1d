//! Resolved per-tile styles.

use serde::{Deserialize, Serialize};
use tessera_render::Color;

use crate::settings::{FormatSettings, GroupId, PropertyKey};
use crate::types::{IconPlacement, ShadowDirection, State, TextAlign};

/// What a tile shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A single line of text (header and category tiles).
    Text,
    /// A primary label with a secondary value below it (measure tiles).
    #[default]
    TextText2,
}

/// The property groups a kind of tile draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentVariant {
    pub kind: ContentKind,
    /// Fill and stroke.
    pub tile_group: GroupId,
    /// Primary text.
    pub text_group: GroupId,
    /// Secondary text, for two-line tiles.
    pub text2_group: Option<GroupId>,
}

impl ContentVariant {
    /// Header tiles: plain text.
    pub const TEXT: Self = Self {
        kind: ContentKind::Text,
        tile_group: GroupId::HeaderTile,
        text_group: GroupId::HeaderText,
        text2_group: None,
    };

    /// Measure tiles: label plus value.
    pub const TEXT_TEXT2: Self = Self {
        kind: ContentKind::TextText2,
        tile_group: GroupId::MeasureTile,
        text_group: GroupId::CategoryLabelText,
        text2_group: Some(GroupId::DataLabelText),
    };

    /// The variant for a content kind.
    pub fn for_kind(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Text => Self::TEXT,
            ContentKind::TextText2 => Self::TEXT_TEXT2,
        }
    }

    /// Every group a tile of this variant reads.
    pub fn groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        [self.tile_group, self.text_group]
            .into_iter()
            .chain(self.text2_group)
            .chain([GroupId::Icon, GroupId::Effect])
    }
}

/// The effective state of each property group for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupStates([State; GroupId::COUNT]);

impl GroupStates {
    /// Every group in the same state.
    pub fn uniform(state: State) -> Self {
        Self([state; GroupId::COUNT])
    }

    /// Compute the state of each group.
    pub fn from_fn(mut f: impl FnMut(GroupId) -> State) -> Self {
        let mut states = [State::Unselected; GroupId::COUNT];
        for id in GroupId::ALL {
            states[id.index()] = f(id);
        }
        Self(states)
    }

    /// State of one group.
    pub fn get(&self, id: GroupId) -> State {
        self.0[id.index()]
    }
}

impl Default for GroupStates {
    fn default() -> Self {
        Self::uniform(State::Unselected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: Color,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub opacity: f32,
    pub width: f32,
}

/// Resolved typography of one text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub color: Color,
    pub opacity: f32,
    pub font_family: String,
    pub font_size: f32,
    pub alignment: TextAlign,
    pub top_margin: f32,
    pub bottom_margin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconStyle {
    pub width: f32,
    pub placement: IconPlacement,
    pub padding: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub color: Color,
    pub opacity: f32,
    pub direction: ShadowDirection,
    pub distance: f32,
    pub strength: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlowStyle {
    pub color: Color,
    pub opacity: f32,
    pub strength: f32,
}

/// Everything a tile draws with, resolved for its current states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTileStyle {
    pub fill: FillStyle,
    pub stroke: StrokeStyle,
    pub text: TextStyle,
    pub text2: Option<TextStyle>,
    pub icon: IconStyle,
    pub shadow: Option<ShadowStyle>,
    pub glow: Option<GlowStyle>,
    /// Corner radius of rectangular outlines.
    pub corner_radius: f32,
}

impl ResolvedTileStyle {
    /// Resolve the style of a tile of `variant` whose groups are in `states`.
    pub fn resolve(settings: &FormatSettings, variant: &ContentVariant, states: &GroupStates) -> Self {
        let tile = settings.group(variant.tile_group);
        let tile_state = states.get(variant.tile_group);
        let opacity = tile.resolve_opacity(tile_state, PropertyKey::Transparency);

        let icon = settings.group(GroupId::Icon);
        let icon_state = states.get(GroupId::Icon);

        let effect = settings.group(GroupId::Effect);
        let effect_state = states.get(GroupId::Effect);

        Self {
            fill: FillStyle {
                color: tile.resolve_color(tile_state, PropertyKey::Color),
                opacity,
            },
            stroke: StrokeStyle {
                color: tile.resolve_color(tile_state, PropertyKey::Stroke),
                opacity,
                width: tile.resolve_number(tile_state, PropertyKey::StrokeWidth).max(0.0),
            },
            text: text_style(settings, variant.text_group, states),
            text2: variant.text2_group.map(|g| text_style(settings, g, states)),
            icon: IconStyle {
                width: icon.resolve_number(icon_state, PropertyKey::Width).max(0.0),
                placement: IconPlacement::from_config(
                    &icon.resolve_text(icon_state, PropertyKey::Placement),
                ),
                padding: icon.resolve_number(icon_state, PropertyKey::Padding).max(0.0),
                top_margin: icon.resolve_number(icon_state, PropertyKey::IconTopMargin),
                bottom_margin: icon.resolve_number(icon_state, PropertyKey::IconBottomMargin),
            },
            shadow: settings.effect.shadow.then(|| ShadowStyle {
                color: effect.resolve_color(effect_state, PropertyKey::ShadowColor),
                opacity: effect.resolve_opacity(effect_state, PropertyKey::ShadowTransparency),
                direction: ShadowDirection::from_config(
                    &effect.resolve_text(effect_state, PropertyKey::ShadowDirection),
                ),
                distance: effect.resolve_number(effect_state, PropertyKey::ShadowDistance).max(0.0),
                strength: effect.resolve_number(effect_state, PropertyKey::ShadowStrength).max(0.0),
            }),
            glow: settings.effect.glow.then(|| GlowStyle {
                color: effect.resolve_color(effect_state, PropertyKey::GlowColor),
                opacity: effect.resolve_opacity(effect_state, PropertyKey::GlowTransparency),
                strength: effect.resolve_number(effect_state, PropertyKey::GlowStrength).max(0.0),
            }),
            corner_radius: settings.effect.shape_rounded_corner_radius.max(0.0),
        }
    }
}

fn text_style(settings: &FormatSettings, id: GroupId, states: &GroupStates) -> TextStyle {
    let group = settings.group(id);
    let state = states.get(id);
    TextStyle {
        color: group.resolve_color(state, PropertyKey::Color),
        opacity: group.resolve_opacity(state, PropertyKey::Transparency),
        font_family: group.resolve_text(state, PropertyKey::FontFamily),
        font_size: group.resolve_number(state, PropertyKey::FontSize).max(0.0),
        alignment: TextAlign::from_config(&group.resolve_text(state, PropertyKey::Alignment)),
        top_margin: group.resolve_number(state, PropertyKey::TopMargin),
        bottom_margin: group.resolve_number(state, PropertyKey::BottomMargin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EffectSettings;

    #[test]
    fn variants_pick_their_groups() {
        let groups: Vec<_> = ContentVariant::TEXT_TEXT2.groups().collect();
        assert_eq!(
            groups,
            vec![
                GroupId::MeasureTile,
                GroupId::CategoryLabelText,
                GroupId::DataLabelText,
                GroupId::Icon,
                GroupId::Effect
            ]
        );
        assert_eq!(ContentVariant::for_kind(ContentKind::Text), ContentVariant::TEXT);
        assert!(ContentVariant::TEXT.text2_group.is_none());
    }

    #[test]
    fn resolves_card_defaults() {
        let settings = FormatSettings::default();
        let style = ResolvedTileStyle::resolve(
            &settings,
            &ContentVariant::TEXT_TEXT2,
            &GroupStates::default(),
        );

        assert_eq!(style.fill.color, Color::WHITE);
        assert_eq!(style.fill.opacity, 1.0);
        assert_eq!(style.text.font_size, 12.0);
        assert_eq!(style.text.color.to_hex(), "#666666");
        let text2 = style.text2.unwrap();
        assert_eq!(text2.font_size, 45.0);
        assert_eq!(text2.font_family, "Segoe UI");
        assert!(style.shadow.is_none());
        assert!(style.glow.is_none());
    }

    #[test]
    fn each_group_uses_its_own_state() {
        let mut settings = FormatSettings::default().with_effect(EffectSettings {
            shadow: true,
            ..Default::default()
        });
        settings
            .group_mut(GroupId::MeasureTile)
            .set(PropertyKey::Color, State::Hovered, "#ff0000");
        settings
            .group_mut(GroupId::CategoryLabelText)
            .set(PropertyKey::FontSize, State::Hovered, 30.0f32);

        let states = GroupStates::from_fn(|id| {
            if id == GroupId::MeasureTile {
                State::Hovered
            } else {
                State::Selected
            }
        });
        let style = ResolvedTileStyle::resolve(&settings, &ContentVariant::TEXT_TEXT2, &states);

        assert_eq!(style.fill.color.to_hex(), "#ff0000");
        assert_eq!(style.text.font_size, 12.0);
        assert!(style.shadow.is_some());
    }
}
