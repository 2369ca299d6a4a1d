//! Selection persistence.
//!
//! The collection never stores selection itself; it asks a
//! [`SelectionHandler`] which targets are selected and forwards clicks to it.
//! Two reference handlers cover the two ways tiles are identified:
//!
//! - [`IndexSelection`]: unbound tiles, identified by row index
//! - [`KeySelection`]: tiles bound to a category key
//!
//! Both toggle the same way. Clicking a target that is not selected selects
//! it (replacing the selection unless multiselect is on). Clicking a selected
//! target deselects it when it is the whole selection or multiselect is on;
//! otherwise it becomes the only selected target.

use crate::entity::SelectionTarget;

/// Host-side selection persistence.
pub trait SelectionHandler {
    /// Whether `target` is currently selected.
    fn is_selected(&self, target: &SelectionTarget) -> bool;

    /// Toggle `target` in response to a click.
    fn select(&mut self, target: &SelectionTarget, multiselect: bool);

    /// Clear the selection.
    fn clear(&mut self);

    /// Whether anything is selected.
    fn has_selection(&self) -> bool;
}

/// Toggle `item` in `selected` according to the click rules above.
fn toggle<T: PartialEq>(selected: &mut Vec<T>, item: T, multiselect: bool) {
    match selected.iter().position(|s| *s == item) {
        Some(pos) if multiselect || selected.len() == 1 => {
            selected.remove(pos);
        }
        Some(_) => {
            selected.clear();
            selected.push(item);
        }
        None => {
            if !multiselect {
                selected.clear();
            }
            selected.push(item);
        }
    }
}

/// Selection of unbound tiles by row index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSelection {
    indexes: Vec<usize>,
}

impl IndexSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected indexes, in selection order.
    pub fn selection_indexes(&self) -> &[usize] {
        &self.indexes
    }
}

impl SelectionHandler for IndexSelection {
    fn is_selected(&self, target: &SelectionTarget) -> bool {
        match target {
            SelectionTarget::Index(i) => self.indexes.contains(i),
            SelectionTarget::Key(_) => false,
        }
    }

    fn select(&mut self, target: &SelectionTarget, multiselect: bool) {
        if let SelectionTarget::Index(i) = target {
            toggle(&mut self.indexes, *i, multiselect);
        }
    }

    fn clear(&mut self) {
        self.indexes.clear();
    }

    fn has_selection(&self) -> bool {
        !self.indexes.is_empty()
    }
}

/// Selection of category-bound tiles by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySelection {
    keys: Vec<String>,
}

impl KeySelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected keys, in selection order.
    pub fn selection_keys(&self) -> &[String] {
        &self.keys
    }
}

impl SelectionHandler for KeySelection {
    fn is_selected(&self, target: &SelectionTarget) -> bool {
        match target {
            SelectionTarget::Key(k) => self.keys.contains(k),
            SelectionTarget::Index(_) => false,
        }
    }

    fn select(&mut self, target: &SelectionTarget, multiselect: bool) {
        if let SelectionTarget::Key(k) = target {
            toggle(&mut self.keys, k.clone(), multiselect);
        }
    }

    fn clear(&mut self) {
        self.keys.clear();
    }

    fn has_selection(&self) -> bool {
        !self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_select_replaces_and_toggles() {
        let mut sel = IndexSelection::new();
        sel.select(&SelectionTarget::Index(2), false);
        assert_eq!(sel.selection_indexes(), &[2]);

        sel.select(&SelectionTarget::Index(4), false);
        assert_eq!(sel.selection_indexes(), &[4]);

        sel.select(&SelectionTarget::Index(4), false);
        assert!(!sel.has_selection());
    }

    #[test]
    fn test_multiselect_accumulates() {
        let mut sel = IndexSelection::new();
        sel.select(&SelectionTarget::Index(1), true);
        sel.select(&SelectionTarget::Index(3), true);
        assert_eq!(sel.selection_indexes(), &[1, 3]);

        sel.select(&SelectionTarget::Index(1), true);
        assert_eq!(sel.selection_indexes(), &[3]);
    }

    #[test]
    fn test_single_click_on_member_of_multi_selection() {
        let mut sel = KeySelection::new();
        sel.select(&"a".into(), true);
        sel.select(&"b".into(), true);
        sel.select(&"a".into(), false);
        assert_eq!(sel.selection_keys(), &["a".to_string()]);
    }

    #[test]
    fn test_handlers_ignore_foreign_targets() {
        let mut by_index = IndexSelection::new();
        by_index.select(&"north".into(), false);
        assert!(!by_index.has_selection());
        assert!(!by_index.is_selected(&"north".into()));

        let mut by_key = KeySelection::new();
        by_key.select(&SelectionTarget::Index(0), false);
        assert!(!by_key.has_selection());
        by_key.select(&"north".into(), false);
        assert!(by_key.is_selected(&"north".into()));
        by_key.clear();
        assert!(!by_key.has_selection());
    }
}
