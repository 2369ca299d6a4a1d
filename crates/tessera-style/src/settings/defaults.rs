//! Hard-coded defaults for every declared property.

use std::collections::HashMap;

use super::group::{GroupId, GroupKind, PropertyKey};
use crate::types::PropertyValue;

/// Font stack used when no family is configured.
pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";

/// Text color used by header and data label text.
pub const DEFAULT_TEXT_COLOR: &str = "#252423";

/// Build the default table of a group.
pub(crate) fn hard_defaults(id: GroupId) -> HashMap<PropertyKey, PropertyValue> {
    use PropertyKey::*;

    let entries: Vec<(PropertyKey, PropertyValue)> = match id.kind() {
        GroupKind::Tile => vec![
            (Color, "#ffffff".into()),
            (Transparency, PropertyValue::Number(0.0)),
            (Stroke, "#b3b3b3".into()),
            (StrokeWidth, PropertyValue::Number(1.0)),
        ],
        GroupKind::Text => {
            let (color, size) = match id {
                GroupId::CategoryLabelText => ("#666666", 12.0),
                GroupId::DataLabelText => (DEFAULT_TEXT_COLOR, 45.0),
                _ => (DEFAULT_TEXT_COLOR, 20.0),
            };
            vec![
                (Color, color.into()),
                (Transparency, PropertyValue::Number(0.0)),
                (FontSize, PropertyValue::Number(size)),
                (FontFamily, DEFAULT_FONT_FAMILY.into()),
                (Alignment, "center".into()),
                (TopMargin, PropertyValue::Number(0.0)),
                (BottomMargin, PropertyValue::Number(4.0)),
            ]
        }
        GroupKind::Icon => vec![
            (Width, PropertyValue::Number(40.0)),
            (Placement, "left".into()),
            (Padding, PropertyValue::Number(10.0)),
            (IconTopMargin, PropertyValue::Number(5.0)),
            (IconBottomMargin, PropertyValue::Number(5.0)),
        ],
        GroupKind::Effect => vec![
            (ShadowColor, "#000000".into()),
            (ShadowTransparency, PropertyValue::Number(70.0)),
            (ShadowDirection, "bottomRight".into()),
            (ShadowDistance, PropertyValue::Number(2.0)),
            (ShadowStrength, PropertyValue::Number(10.0)),
            (GlowColor, "#118dff".into()),
            (GlowTransparency, PropertyValue::Number(70.0)),
            (GlowStrength, PropertyValue::Number(10.0)),
        ],
    };

    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_text_defaults() {
        let data = hard_defaults(GroupId::DataLabelText);
        assert_eq!(data[&PropertyKey::FontSize], PropertyValue::Number(45.0));
        assert_eq!(data[&PropertyKey::Color], PropertyValue::from("#252423"));

        let category = hard_defaults(GroupId::CategoryLabelText);
        assert_eq!(category[&PropertyKey::FontSize], PropertyValue::Number(12.0));
        assert_eq!(category[&PropertyKey::Color], PropertyValue::from("#666666"));

        let header = hard_defaults(GroupId::HeaderText);
        assert_eq!(header[&PropertyKey::FontSize], PropertyValue::Number(20.0));
    }

    #[test]
    fn defaults_are_never_empty() {
        for id in GroupId::ALL {
            for value in hard_defaults(id).values() {
                assert!(!value.is_empty());
            }
        }
    }
}
