//! Host row sets and their conversion to entities.

use serde::{Deserialize, Serialize};
use tessera_style::settings::TileLayout;
use tessera_style::FormatSettings;

use crate::entity::{Entity, SelectionTarget};
use crate::selection::{IndexSelection, KeySelection, SelectionHandler};

/// One named measure column with its formatted values, one per row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measure {
    /// Display name.
    pub name: String,
    /// Formatted values, one per row.
    pub values: Vec<String>,
    /// Icon shown on the measure's tile when there is no category.
    pub icon: Option<String>,
}

impl Measure {
    /// Create a measure.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            icon: None,
        }
    }

    /// Attach an icon reference.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A flat row set as delivered by the host's data binding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowSet {
    /// Category value per row, when a category is bound.
    pub category: Option<Vec<String>>,
    /// Measures, in display order.
    pub measures: Vec<Measure>,
    /// Icon reference per row, shown on category header tiles.
    pub icons: Option<Vec<Option<String>>>,
}

impl RowSet {
    /// A row set without a category.
    pub fn unbound(measures: Vec<Measure>) -> Self {
        Self {
            category: None,
            measures,
            icons: None,
        }
    }

    /// A row set with one category column.
    pub fn with_category(category: impl IntoIterator<Item = impl Into<String>>, measures: Vec<Measure>) -> Self {
        Self {
            category: Some(category.into_iter().map(Into::into).collect()),
            measures,
            icons: None,
        }
    }

    /// Attach per-row icons.
    pub fn with_icons(mut self, icons: Vec<Option<String>>) -> Self {
        self.icons = Some(icons);
        self
    }

    /// Whether a category column is bound.
    pub fn has_category(&self) -> bool {
        self.category.is_some()
    }

    /// Build one entity per tile, in display order.
    ///
    /// Without a category each measure becomes a label/value tile showing its
    /// first value, selectable by index. With a category each row becomes a
    /// header tile followed by one label/value tile per measure, all sharing
    /// the row's category key.
    pub fn to_entities(&self) -> Vec<Entity> {
        match &self.category {
            None => self
                .measures
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let value = m.values.first().cloned().unwrap_or_default();
                    let entity = Entity::text_text2(m.name.clone(), value, SelectionTarget::Index(i));
                    match &m.icon {
                        Some(icon) => entity.with_icon(icon.clone()),
                        None => entity,
                    }
                })
                .collect(),
            Some(categories) => {
                let mut entities = Vec::with_capacity(categories.len() * (self.measures.len() + 1));
                for (j, key) in categories.iter().enumerate() {
                    let mut header = Entity::text(key.clone(), SelectionTarget::Key(key.clone()));
                    header.icon = self
                        .icons
                        .as_ref()
                        .and_then(|icons| icons.get(j).cloned().flatten());
                    entities.push(header);

                    for m in &self.measures {
                        let value = m.values.get(j).cloned().unwrap_or_default();
                        entities.push(Entity::text_text2(
                            m.name.clone(),
                            value,
                            SelectionTarget::Key(key.clone()),
                        ));
                    }
                }
                entities
            }
        }
    }

    /// Apply the layout a category binding requires: one grid row per
    /// category value, the header followed by every measure.
    pub fn apply_layout_overrides(&self, settings: &mut FormatSettings) {
        if self.has_category() {
            settings.layout.tile_layout = TileLayout::Grid;
            settings.layout.tiles_per_row = (self.measures.len() + 1) as f64;
        }
    }

    /// A selection handler matching how this row set identifies tiles.
    pub fn selection_handler(&self) -> Box<dyn SelectionHandler> {
        if self.has_category() {
            Box::new(KeySelection::new())
        } else {
            Box::new(IndexSelection::new())
        }
    }
}
