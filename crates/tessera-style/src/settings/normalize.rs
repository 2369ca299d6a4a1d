//! Configuration normalization.
//!
//! Some configured values are invalid (a fractional or non-positive
//! `tilesPerRow`) or no
//! longer apply (the angle of a shape that is not active). Normalizing fixes
//! them in place and reports each correction as a [`MergeEntry`] so the host
//! can persist the corrected value.

use serde::Serialize;
use serde_json::Value;
use tessera_core::targets;

use super::{FormatSettings, GroupId, TileShape};
use crate::types::State;

/// One corrected configuration value for the host to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeEntry {
    /// Configuration object name, e.g. `"layout"`.
    pub object: String,
    /// Key within the object, e.g. `"tilesPerRow"`.
    pub key: String,
    /// Corrected value; `null` clears the key.
    pub value: Value,
}

impl MergeEntry {
    /// Create a merge entry.
    pub fn new(object: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            object: object.into(),
            key: key.into(),
            value,
        }
    }
}

impl FormatSettings {
    /// Correct invalid or inapplicable values in place.
    ///
    /// - `tilesPerRow` is floored and clamped to at least 1.
    /// - Shape parameters of shapes other than the active one are cleared.
    /// - In groups whose editing state is `all`, every configured `all`
    ///   variant is copied to the four concrete variants.
    ///
    /// Returns the corrections, empty when nothing changed. Normalizing
    /// already normalized settings returns nothing.
    pub fn normalize(&mut self) -> Vec<MergeEntry> {
        let mut merge = Vec::new();

        let columns = self.layout.columns_per_row();
        if self.layout.tiles_per_row != columns as f64 {
            tracing::debug!(
                target: targets::SETTINGS,
                tiles_per_row = self.layout.tiles_per_row,
                columns,
                "clamping tilesPerRow"
            );
            self.layout.tiles_per_row = columns as f64;
            merge.push(MergeEntry::new("layout", "tilesPerRow", Value::from(columns)));
        }

        let active = self.layout.tile_shape;
        for shape in TileShape::ALL {
            if shape == active {
                continue;
            }
            let (Some(key), Some(slot)) = (shape.parameter_key(), self.layout.shape_parameter_mut(shape))
            else {
                continue;
            };
            if slot.take().is_some() {
                merge.push(MergeEntry::new("layout", key, Value::Null));
            }
        }

        for id in GroupId::ALL {
            let group = self.group_mut(id);
            if group.editing_state != State::All {
                continue;
            }
            for &key in id.keys() {
                let Some(all) = group.variant(key, State::All).cloned() else {
                    continue;
                };
                if all.is_empty() {
                    continue;
                }
                for state in State::CONCRETE {
                    if group.variant(key, state) != Some(&all) {
                        group.set(key, state, all.clone());
                        merge.push(MergeEntry::new(id.name(), state.key_for(key.name()), all.to_json()));
                    }
                }
            }
        }

        if !merge.is_empty() {
            tracing::debug!(target: targets::SETTINGS, corrections = merge.len(), "configuration normalized");
        }
        merge
    }
}
