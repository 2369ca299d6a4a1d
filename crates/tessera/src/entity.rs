//! Input entities: one per tile.

use serde::{Deserialize, Serialize};
use tessera_style::ContentKind;

/// Opaque identity a selection handler recognizes an entity by.
///
/// Unbound tiles are identified by their row index; tiles bound to a
/// category share the category key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionTarget {
    Index(usize),
    Key(String),
}

impl From<usize> for SelectionTarget {
    fn from(index: usize) -> Self {
        SelectionTarget::Index(index)
    }
}

impl From<&str> for SelectionTarget {
    fn from(key: &str) -> Self {
        SelectionTarget::Key(key.to_string())
    }
}

/// One input row, rendered as one tile.
///
/// Entities are rebuilt on every data update and never change during a pass.
/// The collection keeps `is_selected` and `is_hovered` in sync with its
/// selection handler and pointer state; `is_disabled` is host data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Primary text.
    pub text: String,
    /// Secondary text, shown by two-line tiles.
    pub text2: Option<String>,
    /// Icon reference, typically a URL.
    pub icon: Option<String>,
    pub kind: ContentKind,
    pub target: SelectionTarget,
    pub is_selected: bool,
    pub is_hovered: bool,
    pub is_disabled: bool,
}

impl Entity {
    /// A plain text entity.
    pub fn text(text: impl Into<String>, target: impl Into<SelectionTarget>) -> Self {
        Self {
            text: text.into(),
            text2: None,
            icon: None,
            kind: ContentKind::Text,
            target: target.into(),
            is_selected: false,
            is_hovered: false,
            is_disabled: false,
        }
    }

    /// A label plus value entity.
    pub fn text_text2(
        text: impl Into<String>,
        text2: impl Into<String>,
        target: impl Into<SelectionTarget>,
    ) -> Self {
        Self {
            text2: Some(text2.into()),
            kind: ContentKind::TextText2,
            ..Self::text(text, target)
        }
    }

    /// Attach an icon reference.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark the entity as disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    /// Secondary text, or the empty string.
    pub fn secondary(&self) -> &str {
        self.text2.as_deref().unwrap_or("")
    }
}
