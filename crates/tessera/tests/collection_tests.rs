//! End-to-end tests for the tile collection controller.

use std::sync::Arc;

use parking_lot::Mutex;
use tessera::prelude::*;
use tessera::tile::roles_of;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn measures(n: usize) -> RowSet {
    RowSet::unbound(
        (0..n)
            .map(|i| Measure::new(format!("Measure {i}"), [format!("{}", i * 1000)]))
            .collect(),
    )
}

fn data(entities: Vec<Entity>, settings: FormatSettings, width: f32, height: f32) -> Update {
    Update::Data {
        entities,
        settings,
        viewport: Viewport::new(width, height),
    }
}

#[test]
fn test_five_measures_click_selects_one_tile() {
    init_tracing();
    let rows = measures(5);
    let mut collection =
        TileCollection::new(FixedAdvanceMeasurer::default()).with_selection(rows.selection_handler());

    let output = collection.apply(data(rows.to_entities(), FormatSettings::default(), 1000.0, 200.0));
    assert_eq!(output.kind, PassKind::Data);
    assert_eq!(output.descriptors.len(), 5);
    assert!(output.descriptors.iter().all(|d| d.kind == ContentKind::TextText2));
    assert!(output.descriptors.iter().all(|d| d.state == State::Unselected));
    assert!(output.merge.is_empty());

    assert_eq!(
        collection.click(2),
        PassRequest::Requested(PassKind::Interaction)
    );
    let output = collection.apply(Update::Interaction);

    assert_eq!(output.kind, PassKind::Interaction);
    assert_eq!(output.descriptors[2].state, State::Selected);
    assert_eq!(output.descriptors[0].state, State::Unselected);
    assert_eq!(
        output
            .descriptors
            .iter()
            .filter(|d| d.state == State::Selected)
            .count(),
        1
    );
}

#[test]
fn test_grid_of_seven_with_three_per_row() {
    let mut settings = FormatSettings::default();
    settings.layout.tile_layout = TileLayout::Grid;
    settings.layout.tiles_per_row = 3.0;

    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let output = collection.apply(data(measures(7).to_entities(), settings, 320.0, 320.0));

    let grid = collection.layout().grid;
    assert_eq!((grid.rows, grid.columns), (3, 3));

    let last_row_top = output.descriptors[6].bounds.top();
    let in_last_row = output
        .descriptors
        .iter()
        .filter(|d| d.bounds.top() == last_row_top)
        .count();
    assert_eq!(in_last_row, 1);
    assert_eq!(output.descriptors[6].bounds.left(), output.descriptors[0].bounds.left());
    assert_eq!(output.descriptors[4].bounds.top(), output.descriptors[3].bounds.top());
}

#[test]
fn test_shadow_reserves_effect_margin() {
    let mut settings = FormatSettings::default().with_effect(EffectSettings {
        shadow: true,
        ..Default::default()
    });
    let effect = settings.group_mut(GroupId::Effect);
    effect.set(PropertyKey::ShadowDistance, State::Disabled, 4.0f32);
    effect.set(PropertyKey::ShadowStrength, State::Disabled, 2.0f32);

    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let output = collection.apply(data(measures(2).to_entities(), settings, 400.0, 100.0));

    let margin = collection.metrics().margin();
    assert_eq!(margin.shadow_space, 18.0);
    assert_eq!(margin.glow_space, 0.0);
    assert_eq!(margin.reserved, 18.0f32.max(2.0 * collection.metrics().phase1().max_stroke_width));

    let container = collection.layout().container;
    assert_eq!(container, Rect::new(9.0, 9.0, 382.0, 82.0));
    assert_eq!(output.descriptors[0].bounds.left(), 9.0);

    let shadow = output.descriptors[0].shadow.as_ref().unwrap();
    assert_eq!(shadow.blur, 2.0);
    assert!(shadow.offset_x > 0.0 && shadow.offset_y > 0.0);
}

#[test]
fn test_identical_data_passes_are_idempotent() {
    let mut settings = FormatSettings::default();
    settings.layout.tiles_per_row = 0.0;
    settings.layout.tile_layout = TileLayout::Grid;
    let rows = measures(6);

    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let first = collection.apply(data(rows.to_entities(), settings.clone(), 500.0, 300.0));
    let second = collection.apply(data(rows.to_entities(), settings, 500.0, 300.0));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_resize_keeps_phase_one() {
    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    collection.apply(data(measures(4).to_entities(), FormatSettings::default(), 800.0, 200.0));
    let phase1 = collection.metrics().phase1().clone();
    let styles: Vec<_> = collection.tiles().iter().map(|t| t.style().clone()).collect();

    let output = collection.apply(Update::Resize(Viewport::new(300.0, 500.0)));

    assert_eq!(output.kind, PassKind::Resize);
    assert_eq!(collection.metrics().phase1(), &phase1);
    assert_eq!(collection.metrics().phase(), Phase::Phase2);
    let after: Vec<_> = collection.tiles().iter().map(|t| t.style().clone()).collect();
    assert_eq!(styles, after);
    assert!(output.descriptors.iter().all(|d| d.bounds.right() <= 300.0 + 1e-3));
}

#[test]
fn test_resize_rewraps_long_values() {
    let rows = RowSet::unbound(vec![Measure::new("Revenue", ["1 2 3 4 5 6 7 8"])]);
    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    collection.apply(data(rows.to_entities(), FormatSettings::default(), 1000.0, 400.0));
    let wide = collection.metrics().text_row_height(TextRole::DataLabel);

    collection.apply(Update::Resize(Viewport::new(120.0, 400.0)));
    let narrow = collection.metrics().text_row_height(TextRole::DataLabel);

    assert!(narrow > wide);
}

#[test]
fn test_hover_requests_pass_only_with_hover_styling() {
    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    collection.apply(data(measures(3).to_entities(), FormatSettings::default(), 600.0, 100.0));
    assert_eq!(collection.pointer_enter(0), PassRequest::NotNeeded);
    assert_eq!(collection.hovered(), Some(0));

    let mut settings = FormatSettings::default();
    settings.group_mut(GroupId::DataLabelText).hover_styling = true;
    settings
        .group_mut(GroupId::DataLabelText)
        .set(PropertyKey::Color, State::Hovered, "#ff0000");
    collection.apply(data(measures(3).to_entities(), settings, 600.0, 100.0));

    assert!(collection.pointer_enter(1).is_requested());
    let output = collection.apply(Update::Interaction);
    let value_line = |i: usize| {
        output.descriptors[i]
            .lines
            .iter()
            .find(|l| l.role == TextRole::DataLabel)
            .map(|l| l.style.color.to_hex())
    };
    assert_eq!(value_line(1).as_deref(), Some("#ff0000"));
    assert_eq!(value_line(0).as_deref(), Some("#252423"));
    // The tile group does not style hover, so the tile state is unchanged.
    assert_eq!(output.descriptors[1].state, State::Unselected);
}

#[test]
fn test_signals_are_emitted() {
    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let passes = Arc::new(Mutex::new(Vec::new()));
    let persisted = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&passes);
    collection.pass_requested.connect(move |kind| sink.lock().push(*kind));
    let sink = Arc::clone(&persisted);
    collection
        .persist_requested
        .connect(move |entries: &Vec<MergeEntry>| sink.lock().extend(entries.iter().cloned()));

    let mut settings = FormatSettings::default();
    settings.layout.tiles_per_row = -1.0;
    let output = collection.apply(data(measures(2).to_entities(), settings, 300.0, 100.0));

    assert_eq!(output.merge.len(), 1);
    assert_eq!(*persisted.lock(), output.merge);
    assert_eq!(collection.settings().layout.tiles_per_row, 1.0);

    collection.click(0);
    collection.pointer_enter(1);
    assert_eq!(*passes.lock(), vec![PassKind::Interaction]);

    // A clean configuration does not emit.
    collection.apply(data(measures(2).to_entities(), FormatSettings::default(), 300.0, 100.0));
    assert_eq!(persisted.lock().len(), 1);
}

#[test]
fn test_multiselect_accumulates() {
    let mut settings = FormatSettings::default();
    settings.content.multiselect = true;
    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    collection.apply(data(measures(4).to_entities(), settings, 800.0, 100.0));

    collection.click(0);
    collection.click(3);
    let output = collection.apply(Update::Interaction);
    let selected: Vec<_> = output
        .descriptors
        .iter()
        .filter(|d| d.state == State::Selected)
        .map(|d| d.index)
        .collect();
    assert_eq!(selected, vec![0, 3]);
}

#[test]
fn test_disabled_entities_stay_disabled() {
    let mut entities = measures(2).to_entities();
    entities[1].is_disabled = true;
    let mut settings = FormatSettings::default();
    settings.group_mut(GroupId::MeasureTile).hover_styling = true;

    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    collection.apply(data(entities, settings, 400.0, 100.0));
    collection.click(1);
    collection.pointer_enter(1);
    let output = collection.apply(Update::Interaction);

    assert_eq!(output.descriptors[1].state, State::Disabled);
}

#[test]
fn test_category_rows_end_to_end() {
    let rows = RowSet::with_category(
        ["North", "South", "East"],
        vec![
            Measure::new("Sales", ["$10", "$12", "$9"]),
            Measure::new("Units", ["4", "7", "2"]),
        ],
    );
    let mut settings = FormatSettings::default();
    rows.apply_layout_overrides(&mut settings);

    let mut collection =
        TileCollection::new(FixedAdvanceMeasurer::default()).with_selection(rows.selection_handler());
    let output = collection.apply(data(rows.to_entities(), settings, 600.0, 300.0));

    assert_eq!(output.descriptors.len(), 9);
    assert_eq!(collection.layout().grid.columns, 3);
    assert_eq!(output.descriptors[3].kind, ContentKind::Text);
    assert_eq!(output.descriptors[3].lines.len(), roles_of(&ContentVariant::TEXT).len());
    assert_eq!(output.descriptors[3].text, "South");

    collection.click(4);
    let output = collection.apply(Update::Interaction);
    let selected: Vec<_> = output
        .descriptors
        .iter()
        .filter(|d| d.state == State::Selected)
        .map(|d| d.index)
        .collect();
    assert_eq!(selected, vec![3, 4, 5]);
}

#[test]
fn test_descriptors_serialize() {
    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let output = collection.apply(data(measures(1).to_entities(), FormatSettings::default(), 200.0, 100.0));
    let json = serde_json::to_value(&output.descriptors[0]).unwrap();

    assert_eq!(json["index"], 0);
    assert_eq!(json["state"], "unselected");
    assert_eq!(json["fill"]["color"], "#ffffff");
    assert_eq!(json["lines"][1]["text"], "0");
    assert!(json["contentBounds"].is_object());
    assert!(json["lines"][1]["lineHeight"].is_number());
    assert_eq!(json["lines"][1]["style"]["fontFamily"], "Segoe UI");
    assert!(json["lines"][1].get("line_height").is_none());
}

#[test]
fn test_effect_descriptors_serialize_camel_case() {
    let mut settings = FormatSettings::default();
    settings.effect.shadow = true;
    let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
    let output = collection.apply(data(measures(1).to_entities(), settings, 200.0, 100.0));
    let json = serde_json::to_value(&output.descriptors[0]).unwrap();

    let shadow = &json["shadow"];
    assert!(shadow["offsetX"].is_number());
    assert!(shadow["offsetY"].is_number());
    assert!(shadow.get("offset_x").is_none());
}
