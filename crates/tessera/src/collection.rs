//! The tile collection controller.
//!
//! [`TileCollection`] owns everything a collection needs between passes: the
//! normalized configuration, the tiles, the aggregate metrics, the layout, the
//! style cache and the interaction state. The host drives it with three kinds
//! of [`Update`]:
//!
//! | update | metrics phase 1 | layout + phase 2 | styles |
//! |--------|-----------------|------------------|--------|
//! | `Data` | recomputed | recomputed | recomputed |
//! | `Resize` | reused | recomputed | reused |
//! | `Interaction` | reused | reused | recomputed |
//!
//! Pointer and click events go through [`TileCollection::click`],
//! [`TileCollection::pointer_enter`] and [`TileCollection::pointer_leave`].
//! When one of them needs a new pass the collection emits
//! [`pass_requested`](TileCollection::pass_requested) and the host answers
//! with `apply(Update::Interaction)`.
//!
//! # Example
//!
//! ```
//! use tessera::prelude::*;
//!
//! let mut collection = TileCollection::new(FixedAdvanceMeasurer::default());
//! let entities = RowSet::unbound(vec![
//!     Measure::new("Sales", ["$1.2M"]),
//!     Measure::new("Units", ["4,210"]),
//! ])
//! .to_entities();
//!
//! let output = collection.apply(Update::Data {
//!     entities,
//!     settings: FormatSettings::default(),
//!     viewport: Viewport::new(400.0, 120.0),
//! });
//! assert_eq!(output.descriptors.len(), 2);
//!
//! collection.click(1);
//! let output = collection.apply(Update::Interaction);
//! assert_eq!(output.descriptors[1].state, State::Selected);
//! ```

use tessera_core::{PerfSpan, Signal, span_names, targets};
use tessera_render::text::TextMeasure;
use tessera_style::{FormatSettings, MergeEntry, StyleCache};

use crate::descriptor::{PassKind, PassOutput, PassRequest, TileDescriptor};
use crate::entity::Entity;
use crate::layout::{LayoutEngine, LayoutParams, LayoutResult, Viewport};
use crate::metrics::{AggregateMetrics, MetricsConfig};
use crate::selection::{IndexSelection, SelectionHandler};
use crate::tile::{Tile, shape_tile};

/// Input to a pass.
#[derive(Debug, Clone)]
pub enum Update {
    /// New entities and configuration.
    Data {
        entities: Vec<Entity>,
        settings: FormatSettings,
        viewport: Viewport,
    },
    /// The viewport changed size.
    Resize(Viewport),
    /// Selection or hover changed.
    Interaction,
}

impl Update {
    pub fn kind(&self) -> PassKind {
        match self {
            Update::Data { .. } => PassKind::Data,
            Update::Resize(_) => PassKind::Resize,
            Update::Interaction => PassKind::Interaction,
        }
    }
}

/// Controller for one collection of tiles.
pub struct TileCollection {
    settings: FormatSettings,
    entities: Vec<Entity>,
    tiles: Vec<Tile>,
    metrics: AggregateMetrics,
    engine: LayoutEngine,
    layout: LayoutResult,
    viewport: Viewport,
    styles: StyleCache,
    measurer: Box<dyn TextMeasure>,
    selection: Box<dyn SelectionHandler>,
    hovered: Option<usize>,
    has_data: bool,

    /// Emitted when an input event needs a new pass.
    pub pass_requested: Signal<PassKind>,
    /// Emitted with configuration corrections the host should persist.
    pub persist_requested: Signal<Vec<MergeEntry>>,
}

impl TileCollection {
    /// Create an empty collection measuring text with `measurer`.
    ///
    /// Selection is tracked by row index until another handler is set.
    pub fn new(measurer: impl TextMeasure + 'static) -> Self {
        Self {
            settings: FormatSettings::default(),
            entities: Vec::new(),
            tiles: Vec::new(),
            metrics: AggregateMetrics::new(),
            engine: LayoutEngine::new(),
            layout: LayoutResult::default(),
            viewport: Viewport::default(),
            styles: StyleCache::new(),
            measurer: Box::new(measurer),
            selection: Box::new(IndexSelection::new()),
            hovered: None,
            has_data: false,
            pass_requested: Signal::new(),
            persist_requested: Signal::new(),
        }
    }

    /// Use `selection` as the selection handler.
    pub fn with_selection(mut self, selection: Box<dyn SelectionHandler>) -> Self {
        self.selection = selection;
        self
    }

    /// Use a custom metrics configuration.
    pub fn with_metrics_config(mut self, config: MetricsConfig) -> Self {
        self.metrics = AggregateMetrics::with_config(config);
        self
    }

    /// Replace the selection handler. Takes effect on the next pass.
    pub fn set_selection(&mut self, selection: Box<dyn SelectionHandler>) {
        self.selection = selection;
    }

    pub fn selection(&self) -> &dyn SelectionHandler {
        self.selection.as_ref()
    }

    pub fn selection_mut(&mut self) -> &mut dyn SelectionHandler {
        self.selection.as_mut()
    }

    /// The normalized configuration of the last data pass.
    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn metrics(&self) -> &AggregateMetrics {
        &self.metrics
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn style_cache(&self) -> &StyleCache {
        &self.styles
    }

    /// Descriptors of the current tiles.
    pub fn descriptors(&self) -> Vec<TileDescriptor> {
        self.tiles.iter().map(Tile::descriptor).collect()
    }

    /// Run one pass.
    #[tracing::instrument(skip_all, target = "tessera::collection", level = "debug", fields(kind = ?update.kind()))]
    pub fn apply(&mut self, update: Update) -> PassOutput {
        let _span = PerfSpan::new(span_names::PASS);
        match update {
            Update::Data {
                entities,
                settings,
                viewport,
            } => self.data_pass(entities, settings, viewport),
            Update::Resize(viewport) => self.resize_pass(viewport),
            Update::Interaction => self.interaction_pass(),
        }
    }

    fn data_pass(&mut self, entities: Vec<Entity>, mut settings: FormatSettings, viewport: Viewport) -> PassOutput {
        let merge = settings.normalize();
        self.settings = settings;
        self.styles.invalidate_all();
        self.viewport = viewport;
        self.entities = entities;
        if self.hovered.is_some_and(|i| i >= self.entities.len()) {
            self.hovered = None;
        }
        self.sync_entity_flags();

        self.metrics.evaluate_phase1(&self.settings, &self.entities);
        self.relayout();

        let _finalize = PerfSpan::new(span_names::FINALIZE);
        self.tiles = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, entity)| Tile::new(i, entity.clone(), &self.settings, &mut self.styles))
            .collect();
        self.place_tiles();
        self.has_data = true;

        tracing::debug!(
            target: targets::COLLECTION,
            tiles = self.tiles.len(),
            width = viewport.width,
            height = viewport.height,
            corrections = merge.len(),
            "data pass complete"
        );

        if !merge.is_empty() {
            self.persist_requested.emit(merge.clone());
        }

        PassOutput {
            kind: PassKind::Data,
            descriptors: self.descriptors(),
            merge,
        }
    }

    fn resize_pass(&mut self, viewport: Viewport) -> PassOutput {
        self.viewport = viewport;
        if !self.has_data {
            tessera_core::tessera_debug!(width = viewport.width, height = viewport.height, "resize before data, viewport stored");
            return PassOutput::empty(PassKind::Resize);
        }

        self.relayout();
        let _finalize = PerfSpan::new(span_names::FINALIZE);
        self.place_tiles();

        PassOutput {
            kind: PassKind::Resize,
            descriptors: self.descriptors(),
            merge: Vec::new(),
        }
    }

    fn interaction_pass(&mut self) -> PassOutput {
        if !self.has_data {
            return PassOutput::empty(PassKind::Interaction);
        }

        self.sync_entity_flags();
        let _finalize = PerfSpan::new(span_names::FINALIZE);
        let mut restyled = 0usize;
        for (tile, entity) in self.tiles.iter_mut().zip(&self.entities) {
            if tile.sync_interaction(entity.is_selected, entity.is_hovered, &self.settings, &mut self.styles) {
                restyled += 1;
            }
        }
        tracing::debug!(target: targets::COLLECTION, restyled, "interaction pass complete");

        PassOutput {
            kind: PassKind::Interaction,
            descriptors: self.descriptors(),
            merge: Vec::new(),
        }
    }

    /// Copy selection and hover into the entities.
    fn sync_entity_flags(&mut self) {
        for (i, entity) in self.entities.iter_mut().enumerate() {
            entity.is_selected = self.selection.is_selected(&entity.target);
            entity.is_hovered = self.hovered == Some(i);
        }
    }

    /// Recompute the layout and the width-dependent phase 2 metrics.
    fn relayout(&mut self) {
        let params = LayoutParams::from_settings(
            &self.settings.layout,
            self.entities.len(),
            self.viewport,
            self.metrics.margin(),
        );
        self.layout = self.engine.compute(&params);

        self.metrics.reset_phase2();
        let phase1 = self.metrics.phase1();
        let widths: Vec<f32> = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                let bounds = self.layout.slot(i).unwrap_or_default();
                let (_, area) = shape_tile(bounds, entity.icon.is_some(), &self.settings, phase1);
                area.content.width()
            })
            .collect();
        self.metrics
            .evaluate_phase2(&self.entities, self.measurer.as_ref(), |i| widths.get(i).copied().unwrap_or(0.0));
    }

    fn place_tiles(&mut self) {
        for tile in &mut self.tiles {
            let bounds = self.layout.slot(tile.index()).unwrap_or_default();
            tile.place(bounds, &self.settings, &self.metrics);
        }
    }

    fn tile_or_warn(&self, index: usize, event: &'static str) -> Option<&Tile> {
        let tile = self.tiles.get(index);
        if tile.is_none() {
            tracing::warn!(
                target: targets::COLLECTION,
                index,
                tiles = self.tiles.len(),
                event,
                "event for a tile that does not exist"
            );
        }
        tile
    }

    fn forward(&self, request: PassRequest) -> PassRequest {
        if let PassRequest::Requested(kind) = request {
            self.pass_requested.emit(kind);
        }
        request
    }

    /// Toggle the selection of tile `index`.
    pub fn click(&mut self, index: usize) -> PassRequest {
        if self.tile_or_warn(index, "click").is_none() {
            return PassRequest::NotNeeded;
        }
        let multiselect = self.settings.content.multiselect;
        let request = self.tiles[index].on_click(self.selection.as_mut(), multiselect);
        self.forward(request)
    }

    /// The pointer entered tile `index`.
    pub fn pointer_enter(&mut self, index: usize) -> PassRequest {
        if self.tile_or_warn(index, "pointer_enter").is_none() {
            return PassRequest::NotNeeded;
        }
        let request = self.tiles[index].on_pointer_enter(&mut self.hovered, &self.settings);
        self.forward(request)
    }

    /// The pointer left tile `index`.
    pub fn pointer_leave(&mut self, index: usize) -> PassRequest {
        if self.tile_or_warn(index, "pointer_leave").is_none() {
            return PassRequest::NotNeeded;
        }
        let request = self.tiles[index].on_pointer_leave(&mut self.hovered, &self.settings);
        self.forward(request)
    }
}

impl std::fmt::Debug for TileCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileCollection")
            .field("tiles", &self.tiles.len())
            .field("viewport", &self.viewport)
            .field("phase", &self.metrics.phase())
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}
