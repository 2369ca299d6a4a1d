//! Tessera lays out collections of shaped, state-styled tiles.
//!
//! A host hands Tessera a list of [`Entity`] values (usually built from a
//! [`RowSet`]), a [`FormatSettings`](tessera_style::FormatSettings)
//! configuration and a [`Viewport`]. Tessera answers with one
//! [`TileDescriptor`] per entity: bounds, outline, fill, stroke, text lines,
//! icon, shadow and glow, ready for any renderer.
//!
//! Layout stays stable under interaction: every size that could depend on a
//! tile's state is taken as the maximum over all states, so hovering or
//! selecting a tile restyles it without moving anything.
//!
//! # Crates
//!
//! - `tessera-core`: logging targets and the [`Signal`](tessera_core::Signal)
//!   type
//! - `tessera-render`: geometry, colors, paths and text measurement
//! - `tessera-style`: configuration, per-state resolution and tile styles
//! - `tessera` (this crate): entities, layout, metrics, tiles and the
//!   [`TileCollection`] controller
//!
//! # Example
//!
//! ```
//! use tessera::prelude::*;
//!
//! let rows = RowSet::with_category(
//!     ["North", "South"],
//!     vec![Measure::new("Sales", ["$10", "$12"]), Measure::new("Units", ["4", "7"])],
//! );
//! let mut settings = FormatSettings::default();
//! rows.apply_layout_overrides(&mut settings);
//!
//! let mut collection =
//!     TileCollection::new(FixedAdvanceMeasurer::default()).with_selection(rows.selection_handler());
//! let output = collection.apply(Update::Data {
//!     entities: rows.to_entities(),
//!     settings,
//!     viewport: Viewport::new(600.0, 240.0),
//! });
//!
//! assert_eq!(output.descriptors.len(), 6);
//! assert_eq!(collection.layout().grid.columns, 3);
//! ```

pub mod collection;
pub mod descriptor;
pub mod entity;
pub mod layout;
pub mod metrics;
pub mod rows;
pub mod selection;
pub mod tile;

pub use collection::{TileCollection, Update};
pub use descriptor::{PassKind, PassOutput, PassRequest, TextLine, TileDescriptor};
pub use entity::{Entity, SelectionTarget};
pub use layout::{EffectMargin, LayoutEngine, LayoutResult, ShapeOutline, Viewport};
pub use metrics::{AggregateMetrics, MetricsConfig, Phase, TEXT_HEIGHT_SAMPLE_SIZE, TextRole};
pub use rows::{Measure, RowSet};
pub use selection::{IndexSelection, KeySelection, SelectionHandler};
pub use tile::Tile;

/// Prelude module with commonly used types from every Tessera crate.
pub mod prelude {
    pub use crate::{
        AggregateMetrics, Entity, IndexSelection, KeySelection, Measure, MetricsConfig, PassKind,
        PassOutput, PassRequest, Phase, RowSet, SelectionHandler, SelectionTarget, TextRole,
        TileCollection, TileDescriptor, Update, Viewport,
    };
    pub use tessera_core::Signal;
    pub use tessera_render::text::{FixedAdvanceMeasurer, FontMeasurer, TextMeasure};
    pub use tessera_render::{Color, Rect};
    pub use tessera_style::prelude::*;
}
