//! Tile layout.
//!
//! [`LayoutEngine`] divides a viewport into one bounding box per tile:
//!
//! - **Topology** decides the grid: `horizontal` is one row, `vertical` one
//!   column, `grid` has `tilesPerRow` columns.
//! - **Sizing** decides box sizes: `fit` shares the container among the
//!   grid cells, `fixed` uses the configured size and may overflow.
//! - The [`EffectMargin`] is taken off the viewport first and half of it
//!   pads every edge.
//!
//! Tile `i` always lands in row `i / columns`, column `i % columns`.
//!
//! # Example
//!
//! ```
//! use tessera::layout::{EffectMargin, LayoutEngine, LayoutParams, Viewport};
//! use tessera_style::settings::{LayoutSettings, TileLayout};
//!
//! let settings = LayoutSettings {
//!     tile_layout: TileLayout::Grid,
//!     tiles_per_row: 3.0,
//!     ..Default::default()
//! };
//! let params = LayoutParams::from_settings(&settings, 7, Viewport::new(300.0, 300.0), EffectMargin::default());
//! let result = LayoutEngine::new().compute(&params);
//!
//! assert_eq!((result.grid.rows, result.grid.columns), (3, 3));
//! ```

mod effect;
mod shape;

pub use effect::EffectMargin;
pub use shape::ShapeOutline;

use serde::{Deserialize, Serialize};
use tessera_core::{PerfSpan, span_names, targets};
use tessera_render::{Rect, Size};
use tessera_style::settings::{LayoutSettings, SizingMethod, TileAlignment, TileLayout};

/// Viewport size in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rows and columns of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
}

impl Grid {
    /// Grid for `count` tiles in `topology`.
    pub fn for_topology(topology: TileLayout, count: usize, tiles_per_row: usize) -> Self {
        if count == 0 {
            return Self::default();
        }
        let columns = match topology {
            TileLayout::Horizontal => count,
            TileLayout::Vertical => 1,
            TileLayout::Grid => tiles_per_row.max(1),
        };
        Self {
            columns,
            rows: count.div_ceil(columns),
        }
    }

    /// (row, column) of tile `index`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (index / columns, index % columns)
    }
}

/// Everything the engine needs to lay out one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub count: usize,
    pub topology: TileLayout,
    pub tiles_per_row: usize,
    pub sizing: SizingMethod,
    /// Tile size for fixed sizing.
    pub tile_size: Size,
    /// Row alignment for fixed sizing.
    pub alignment: TileAlignment,
    /// Gap between neighboring tiles.
    pub gap: f32,
    pub viewport: Viewport,
    pub margin: EffectMargin,
}

impl LayoutParams {
    /// Collect parameters from the layout configuration.
    pub fn from_settings(
        settings: &LayoutSettings,
        count: usize,
        viewport: Viewport,
        margin: EffectMargin,
    ) -> Self {
        Self {
            count,
            topology: settings.tile_layout,
            tiles_per_row: settings.columns_per_row(),
            sizing: settings.sizing_method,
            tile_size: Size::new(settings.tile_width.max(0.0), settings.tile_height.max(0.0)),
            alignment: settings.tile_alignment,
            gap: settings.gap(),
            viewport,
            margin,
        }
    }
}

/// Computed layout of one collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    pub grid: Grid,
    /// The viewport minus the effect margin, offset by half the margin.
    pub container: Rect,
    /// One bounding box per tile, in tile order.
    pub slots: Vec<Rect>,
    pub margin: EffectMargin,
}

impl LayoutResult {
    /// Bounding box of tile `index`.
    pub fn slot(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).copied()
    }
}

/// Divides a viewport among tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    /// Create a layout engine.
    pub fn new() -> Self {
        Self
    }

    /// Compute one bounding box per tile.
    pub fn compute(&self, params: &LayoutParams) -> LayoutResult {
        let _span = PerfSpan::new(span_names::LAYOUT);

        let half = params.margin.half();
        let container = Rect::new(
            half,
            half,
            (params.viewport.width - params.margin.reserved).max(0.0),
            (params.viewport.height - params.margin.reserved).max(0.0),
        );
        let grid = Grid::for_topology(params.topology, params.count, params.tiles_per_row);

        let slots = match params.sizing {
            SizingMethod::Fit => fit_slots(params.count, grid, container, params.gap),
            SizingMethod::Fixed => fixed_slots(params, grid, container),
        };

        tracing::debug!(
            target: targets::LAYOUT,
            count = params.count,
            columns = grid.columns,
            rows = grid.rows,
            sizing = ?params.sizing,
            margin = params.margin.reserved,
            "layout computed"
        );

        LayoutResult {
            grid,
            container,
            slots,
            margin: params.margin,
        }
    }
}

/// Share the container among the grid cells.
///
/// The gap shrinks when the container cannot hold it, so boxes plus gaps
/// always fit.
fn fit_slots(count: usize, grid: Grid, container: Rect, gap: f32) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let (width, gap_x) = share(container.width(), grid.columns, gap);
    let (height, gap_y) = share(container.height(), grid.rows, gap);

    (0..count)
        .map(|i| {
            let (row, column) = grid.cell(i);
            Rect::new(
                container.left() + column as f32 * (width + gap_x),
                container.top() + row as f32 * (height + gap_y),
                width,
                height,
            )
        })
        .collect()
}

/// Cell extent and effective gap for `cells` cells along `extent`.
fn share(extent: f32, cells: usize, gap: f32) -> (f32, f32) {
    let cells = cells.max(1);
    let gaps = (cells - 1) as f32;
    let gap = if gaps > 0.0 { gap.min(extent / gaps) } else { 0.0 };
    (((extent - gaps * gap) / cells as f32).max(0.0), gap)
}

/// Place fixed-size tiles row by row, aligning each row horizontally.
fn fixed_slots(params: &LayoutParams, grid: Grid, container: Rect) -> Vec<Rect> {
    let Size { width, height } = params.tile_size;
    let gap = params.gap;

    (0..params.count)
        .map(|i| {
            let (row, column) = grid.cell(i);
            let in_row = (params.count - row * grid.columns).min(grid.columns);
            let row_width = in_row as f32 * width + (in_row.saturating_sub(1)) as f32 * gap;
            let free = (container.width() - row_width).max(0.0);
            let offset = match params.alignment {
                TileAlignment::Left => 0.0,
                TileAlignment::Center => free / 2.0,
                TileAlignment::Right => free,
            };
            Rect::new(
                container.left() + offset + column as f32 * (width + gap),
                container.top() + row as f32 * (height + gap),
                width,
                height,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(topology: TileLayout, count: usize, sizing: SizingMethod) -> LayoutParams {
        LayoutParams {
            count,
            topology,
            tiles_per_row: 3,
            sizing,
            tile_size: Size::new(50.0, 20.0),
            alignment: TileAlignment::Left,
            gap: 10.0,
            viewport: Viewport::new(320.0, 200.0),
            margin: EffectMargin::default(),
        }
    }

    #[test]
    fn test_grid_topologies() {
        assert_eq!(Grid::for_topology(TileLayout::Horizontal, 5, 3), Grid { columns: 5, rows: 1 });
        assert_eq!(Grid::for_topology(TileLayout::Vertical, 5, 3), Grid { columns: 1, rows: 5 });
        assert_eq!(Grid::for_topology(TileLayout::Grid, 7, 3), Grid { columns: 3, rows: 3 });
        assert_eq!(Grid::for_topology(TileLayout::Grid, 7, 0), Grid { columns: 1, rows: 7 });
        assert_eq!(Grid::for_topology(TileLayout::Grid, 0, 3), Grid::default());
    }

    #[test]
    fn test_fit_horizontal() {
        let result = LayoutEngine::new().compute(&params(TileLayout::Horizontal, 3, SizingMethod::Fit));
        // (320 - 2 * 10) / 3 = 100
        assert_eq!(result.slots[0], Rect::new(0.0, 0.0, 100.0, 200.0));
        assert_eq!(result.slots[2], Rect::new(220.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn test_fit_respects_margin() {
        let mut p = params(TileLayout::Vertical, 2, SizingMethod::Fit);
        p.margin = EffectMargin::compute(true, 4.0, 2.0, false, 0.0, 1.0);
        let result = LayoutEngine::new().compute(&p);

        assert_eq!(result.container, Rect::new(9.0, 9.0, 302.0, 182.0));
        assert_eq!(result.slots[0], Rect::new(9.0, 9.0, 302.0, 86.0));
        assert_eq!(result.slots[1].top(), 105.0);
    }

    #[test]
    fn test_fit_shrinks_gap_before_overflowing() {
        let mut p = params(TileLayout::Horizontal, 5, SizingMethod::Fit);
        p.gap = 500.0;
        let result = LayoutEngine::new().compute(&p);
        for slot in &result.slots {
            assert!(result.container.contains_rect(slot, 1e-3));
        }
    }

    #[test]
    fn test_fixed_alignment() {
        let mut p = params(TileLayout::Grid, 4, SizingMethod::Fixed);
        p.alignment = TileAlignment::Center;
        let result = LayoutEngine::new().compute(&p);

        // First row: 3 tiles, 170px wide, 150px free.
        assert_eq!(result.slots[0].left(), 75.0);
        // Second row: 1 tile, 270px free.
        assert_eq!(result.slots[3].left(), 135.0);
        assert_eq!(result.slots[3].top(), 30.0);

        p.alignment = TileAlignment::Right;
        let result = LayoutEngine::new().compute(&p);
        assert_eq!(result.slots[2].right(), 320.0);
    }

    #[test]
    fn test_fixed_may_overflow() {
        let mut p = params(TileLayout::Horizontal, 10, SizingMethod::Fixed);
        p.alignment = TileAlignment::Center;
        let result = LayoutEngine::new().compute(&p);
        assert_eq!(result.slots[0].left(), 0.0);
        assert!(result.slots[9].right() > 320.0);
    }

    #[test]
    fn test_empty() {
        let result = LayoutEngine::new().compute(&params(TileLayout::Grid, 0, SizingMethod::Fit));
        assert!(result.slots.is_empty());
        assert_eq!(result.grid, Grid::default());
    }
}
