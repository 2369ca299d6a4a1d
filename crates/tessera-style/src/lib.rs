//! State-dependent tile styling for Tessera.
//!
//! This crate turns a host's declarative tile configuration into resolved
//! styles:
//!
//! - **Configuration**: [`FormatSettings`], loaded from JSON, with stateful
//!   [`PropertyGroup`]s and typed layout, effect, icon and content objects
//! - **Resolution**: per-state lookup with fallback, and
//!   [`PropertyGroup::max_of_group`] for collection-wide sizes
//! - **Tile styles**: [`ResolvedTileStyle`] for a [`ContentVariant`], cached
//!   by [`StyleCache`]
//! - **Normalization**: corrections reported as [`MergeEntry`] lists
//!
//! # Example
//!
//! ```
//! use tessera_style::prelude::*;
//!
//! let settings = FormatSettings::from_json_str(
//!     r#"{ "dataLabelText": { "fontSizeD": 36, "fontSizeH": 40 } }"#,
//! )?;
//!
//! let group = settings.group(GroupId::DataLabelText);
//! assert_eq!(group.resolve_number(State::Selected, PropertyKey::FontSize), 36.0);
//! assert_eq!(group.max_of_group(PropertyKey::FontSize), 40.0);
//! # Ok::<(), tessera_style::Error>(())
//! ```

pub mod resolve;
pub mod settings;
pub mod types;

mod error;

pub use error::{Error, Result};
pub use resolve::{ContentKind, ContentVariant, GroupStates, ResolvedTileStyle, StyleCache};
pub use settings::{FormatSettings, GroupId, MergeEntry, PropertyGroup, PropertyKey};
pub use types::{PropertyValue, State};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::resolve::{
        ContentKind, ContentVariant, GroupStates, ResolvedTileStyle, StyleCache, TextStyle,
    };
    pub use crate::settings::{
        ContentSettings, EffectSettings, FormatSettings, GroupId, IconSettings, LayoutSettings,
        MergeEntry, PropertyGroup, PropertyKey, SizingMethod, TileAlignment, TileLayout, TileShape,
    };
    pub use crate::types::{IconPlacement, PropertyValue, ShadowDirection, State, TextAlign};
}
