//! Tests for driving a collection from a JSON configuration file.

use std::io::Write;

use tempfile::NamedTempFile;
use tessera::prelude::*;

const CONFIG: &str = r##"{
    "layout": {
        "tileLayout": "grid",
        "tilesPerRow": 2,
        "tileShape": "hexagon",
        "hexagonAngle": 60,
        "chevronAngle": 30,
        "padding": 8
    },
    "measureTile": {
        "state": "all",
        "colorA": "#eeeeee",
        "hoverStyling": true,
        "colorH": "#cccccc"
    },
    "dataLabelText": {
        "fontSizeD": 30,
        "fontSizeS": 36
    },
    "effect": {
        "glow": true,
        "glowStrengthD": 4
    },
    "someFutureObject": { "x": 1 }
}"##;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_loaded_configuration_drives_the_pass() {
    let file = write_config(CONFIG);
    let settings = FormatSettings::load_json(file.path()).unwrap();

    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let rows = RowSet::unbound(vec![
        Measure::new("Sales", ["$1"]),
        Measure::new("Units", ["2"]),
        Measure::new("Returns", ["3"]),
    ]);
    let output = collection.apply(Update::Data {
        entities: rows.to_entities(),
        settings,
        viewport: Viewport::new(400.0, 300.0),
    });

    // The chevron angle does not apply to hexagons, and `all` overwrote the
    // hover color along with every other concrete variant.
    let keys: Vec<_> = output
        .merge
        .iter()
        .map(|e| format!("{}.{}", e.object, e.key))
        .collect();
    assert!(keys.contains(&"layout.chevronAngle".to_string()));
    assert!(keys.contains(&"measureTile.colorU".to_string()));
    assert!(keys.contains(&"measureTile.colorH".to_string()));
    let chevron = output.merge.iter().find(|e| e.key == "chevronAngle").unwrap();
    assert!(chevron.value.is_null());

    assert_eq!(collection.layout().grid.columns, 2);
    assert_eq!(output.descriptors[0].shape, TileShape::Hexagon);
    assert_eq!(output.descriptors[0].shape_parameter, 60.0);
    assert_eq!(output.descriptors[0].fill.color.to_hex(), "#eeeeee");

    // Glow 4 reserves 20px, more than the stroke.
    assert_eq!(collection.metrics().margin().reserved, 20.0);
    assert!(output.descriptors[0].glow.is_some());

    // Selected font size widens the shared data label row.
    assert_eq!(collection.metrics().role(TextRole::DataLabel).font_size, 36.0);
    assert_eq!(collection.metrics().role(TextRole::DataLabel).inline_height, 48.0);
}

#[test]
fn test_normalized_configuration_is_stable() {
    let file = write_config(CONFIG);
    let mut settings = FormatSettings::load_json(file.path()).unwrap();
    assert!(!settings.normalize().is_empty());
    assert!(settings.normalize().is_empty());
}

#[test]
fn test_invalid_configuration_is_an_error() {
    let file = write_config(r#"{ "measureTile": { "hoverStyling": "yes" } }"#);
    let err = FormatSettings::load_json(file.path()).unwrap_err();
    assert!(matches!(err, tessera_style::Error::InvalidValue { .. }));

    let missing = FormatSettings::load_json("/definitely/not/here.json").unwrap_err();
    assert!(matches!(missing, tessera_style::Error::Io { .. }));

    let file = write_config("{ not json");
    assert!(matches!(
        FormatSettings::load_json(file.path()),
        Err(tessera_style::Error::Json(_))
    ));
}

#[test]
fn test_float_tiles_per_row_is_accepted() {
    let mut settings =
        FormatSettings::from_json_str(r#"{ "layout": { "tileLayout": "grid", "tilesPerRow": 3.0 } }"#)
            .unwrap();
    assert!(settings.normalize().is_empty());
    assert_eq!(settings.layout.columns_per_row(), 3);

    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let entities: Vec<_> = (0..7usize)
        .map(|i| Entity::text_text2(format!("Measure {i}"), "1", i))
        .collect();
    collection.apply(Update::Data {
        entities,
        settings,
        viewport: Viewport::new(600.0, 400.0),
    });
    assert_eq!(collection.layout().grid.columns, 3);
    assert_eq!(collection.layout().grid.rows, 3);
}

#[test]
fn test_fractional_tiles_per_row_is_floored() {
    let settings =
        FormatSettings::from_json_str(r#"{ "layout": { "tileLayout": "grid", "tilesPerRow": 2.5 } }"#)
            .unwrap();

    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let entities: Vec<_> = (0..4usize)
        .map(|i| Entity::text_text2(format!("Measure {i}"), "1", i))
        .collect();
    let output = collection.apply(Update::Data {
        entities,
        settings,
        viewport: Viewport::new(600.0, 400.0),
    });

    let entry = output.merge.iter().find(|e| e.key == "tilesPerRow").unwrap();
    assert_eq!(entry.object, "layout");
    assert_eq!(entry.value, serde_json::json!(2));
    assert_eq!(collection.settings().layout.tiles_per_row, 2.0);
    assert_eq!(collection.layout().grid.columns, 2);
}
