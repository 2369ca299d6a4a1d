//! Records handed to the rendering sink.
//!
//! A pass produces one [`TileDescriptor`] per tile, in tile order. Descriptors
//! carry everything needed to draw a tile and nothing that ties them to a
//! particular renderer.

use serde::Serialize;
use tessera_render::{Color, Path, Rect};
use tessera_style::resolve::{FillStyle, GlowStyle, StrokeStyle, TextStyle};
use tessera_style::settings::TileShape;
use tessera_style::{ContentKind, MergeEntry, State};

use crate::metrics::TextRole;

/// Why a pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// New entities, configuration or viewport from the host.
    Data,
    /// Viewport change only.
    Resize,
    /// Selection or hover change only.
    Interaction,
}

/// Whether an input event needs a new pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassRequest {
    NotNeeded,
    Requested(PassKind),
}

impl PassRequest {
    pub fn is_requested(&self) -> bool {
        matches!(self, PassRequest::Requested(_))
    }
}

/// One line of text on a tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    pub role: TextRole,
    pub text: String,
    pub style: TextStyle,
    /// Shared row height of the line's role.
    pub line_height: f32,
    pub bounds: Rect,
}

/// An icon and where to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    pub source: String,
    pub bounds: Rect,
}

/// A drop shadow, offset from the tile outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowDescriptor {
    pub color: Color,
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
}

/// Everything the rendering sink needs to draw one tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDescriptor {
    pub index: usize,
    pub kind: ContentKind,
    /// State of the tile group.
    pub state: State,
    pub text: String,
    pub text2: Option<String>,
    pub bounds: Rect,
    /// Area left for text once outline, stroke and icon are accounted for.
    pub content_bounds: Rect,
    pub outline: Path,
    pub shape: TileShape,
    pub shape_parameter: f32,
    pub fill: FillStyle,
    pub stroke: StrokeStyle,
    pub lines: Vec<TextLine>,
    pub icon: Option<IconDescriptor>,
    pub shadow: Option<ShadowDescriptor>,
    pub glow: Option<GlowStyle>,
}

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassOutput {
    pub kind: PassKind,
    /// One descriptor per tile, in tile order.
    pub descriptors: Vec<TileDescriptor>,
    /// Configuration corrections the host should persist. Usually empty.
    pub merge: Vec<MergeEntry>,
}

impl PassOutput {
    /// An output without tiles.
    pub fn empty(kind: PassKind) -> Self {
        Self {
            kind,
            descriptors: Vec::new(),
            merge: Vec::new(),
        }
    }
}
