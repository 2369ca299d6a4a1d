//! Layout configuration.

use serde::{Deserialize, Serialize};

/// Arrangement strategy for placing tiles in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileLayout {
    /// One row of N columns.
    #[default]
    Horizontal,
    /// N rows of one column.
    Vertical,
    /// `tilesPerRow` columns, as many rows as needed.
    Grid,
}

/// How tile sizes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizingMethod {
    /// Tiles share the available container space.
    #[default]
    Fit,
    /// Tiles use the configured width and height; overflow is allowed.
    Fixed,
}

/// Horizontal alignment of rows when tiles have a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Tile outline family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileShape {
    #[default]
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "parallelogram")]
    Parallelogram,
    #[serde(rename = "chevron")]
    Chevron,
    #[serde(rename = "pentagon")]
    Pentagon,
    #[serde(rename = "hexagon")]
    Hexagon,
    #[serde(rename = "tab_cutCorner")]
    TabCutCorner,
    #[serde(rename = "tab_cutCorners")]
    TabCutCorners,
}

impl TileShape {
    /// Every shape.
    pub const ALL: [TileShape; 7] = [
        TileShape::Rectangle,
        TileShape::Parallelogram,
        TileShape::Chevron,
        TileShape::Pentagon,
        TileShape::Hexagon,
        TileShape::TabCutCorner,
        TileShape::TabCutCorners,
    ];

    /// Name as written in configuration.
    pub fn name(self) -> &'static str {
        match self {
            TileShape::Rectangle => "rectangle",
            TileShape::Parallelogram => "parallelogram",
            TileShape::Chevron => "chevron",
            TileShape::Pentagon => "pentagon",
            TileShape::Hexagon => "hexagon",
            TileShape::TabCutCorner => "tab_cutCorner",
            TileShape::TabCutCorners => "tab_cutCorners",
        }
    }

    /// The layout key holding this shape's parameter, if it has one.
    pub fn parameter_key(self) -> Option<&'static str> {
        match self {
            TileShape::Rectangle => None,
            TileShape::Parallelogram => Some("parallelogramAngle"),
            TileShape::Chevron => Some("chevronAngle"),
            TileShape::Pentagon => Some("pentagonAngle"),
            TileShape::Hexagon => Some("hexagonAngle"),
            TileShape::TabCutCorner => Some("tab_cutCornerLength"),
            TileShape::TabCutCorners => Some("tab_cutCornersLength"),
        }
    }

    /// Parameter used when none is configured.
    pub fn default_parameter(self) -> f32 {
        match self {
            TileShape::Rectangle => 0.0,
            TileShape::Parallelogram | TileShape::Chevron => 45.0,
            TileShape::Pentagon | TileShape::Hexagon => 45.0,
            TileShape::TabCutCorner | TileShape::TabCutCorners => 20.0,
        }
    }
}

/// The `layout` configuration object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    pub tile_layout: TileLayout,
    /// Raw configured value. Hosts send numbers as doubles; normalization
    /// floors it and clamps it to at least 1.
    pub tiles_per_row: f64,
    pub sizing_method: SizingMethod,
    pub tile_width: f32,
    pub tile_height: f32,
    pub tile_alignment: TileAlignment,
    /// Gap between neighboring tiles.
    pub padding: f32,
    pub tile_shape: TileShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelogram_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chevron_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pentagon_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hexagon_angle: Option<f32>,
    #[serde(rename = "tab_cutCornerLength", skip_serializing_if = "Option::is_none")]
    pub tab_cut_corner_length: Option<f32>,
    #[serde(rename = "tab_cutCornersLength", skip_serializing_if = "Option::is_none")]
    pub tab_cut_corners_length: Option<f32>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            tile_layout: TileLayout::Horizontal,
            tiles_per_row: 3.0,
            sizing_method: SizingMethod::Fit,
            tile_width: 150.0,
            tile_height: 75.0,
            tile_alignment: TileAlignment::Left,
            padding: 10.0,
            tile_shape: TileShape::Rectangle,
            parallelogram_angle: None,
            chevron_angle: None,
            pentagon_angle: None,
            hexagon_angle: None,
            tab_cut_corner_length: None,
            tab_cut_corners_length: None,
        }
    }
}

impl LayoutSettings {
    /// Keys of the `layout` object, as written in configuration.
    pub const KEYS: [&'static str; 14] = [
        "tileLayout",
        "tilesPerRow",
        "sizingMethod",
        "tileWidth",
        "tileHeight",
        "tileAlignment",
        "padding",
        "tileShape",
        "parallelogramAngle",
        "chevronAngle",
        "pentagonAngle",
        "hexagonAngle",
        "tab_cutCornerLength",
        "tab_cutCornersLength",
    ];

    /// Columns per row, never less than one.
    pub fn columns_per_row(&self) -> usize {
        if self.tiles_per_row.is_finite() {
            self.tiles_per_row.floor().max(1.0) as usize
        } else {
            1
        }
    }

    /// Gap between tiles, never negative.
    pub fn gap(&self) -> f32 {
        self.padding.max(0.0)
    }

    /// Mutable access to a shape parameter slot by its layout key.
    pub fn shape_parameter_mut(&mut self, shape: TileShape) -> Option<&mut Option<f32>> {
        match shape {
            TileShape::Rectangle => None,
            TileShape::Parallelogram => Some(&mut self.parallelogram_angle),
            TileShape::Chevron => Some(&mut self.chevron_angle),
            TileShape::Pentagon => Some(&mut self.pentagon_angle),
            TileShape::Hexagon => Some(&mut self.hexagon_angle),
            TileShape::TabCutCorner => Some(&mut self.tab_cut_corner_length),
            TileShape::TabCutCorners => Some(&mut self.tab_cut_corners_length),
        }
    }

    /// Configured parameter of `shape`, if set.
    pub fn configured_parameter(&self, shape: TileShape) -> Option<f32> {
        match shape {
            TileShape::Rectangle => None,
            TileShape::Parallelogram => self.parallelogram_angle,
            TileShape::Chevron => self.chevron_angle,
            TileShape::Pentagon => self.pentagon_angle,
            TileShape::Hexagon => self.hexagon_angle,
            TileShape::TabCutCorner => self.tab_cut_corner_length,
            TileShape::TabCutCorners => self.tab_cut_corners_length,
        }
    }

    /// Angle (degrees) or cut length (pixels) of the active shape.
    pub fn shape_parameter(&self) -> f32 {
        self.configured_parameter(self.tile_shape)
            .unwrap_or_else(|| self.tile_shape.default_parameter())
    }
}

/// Non-stateful keys of the `effect` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectSettings {
    /// Draw drop shadows.
    pub shadow: bool,
    /// Draw outer glows.
    pub glow: bool,
    /// Corner radius of rectangular tiles.
    pub shape_rounded_corner_radius: f32,
}

impl EffectSettings {
    pub const KEYS: [&'static str; 3] = ["shadow", "glow", "shapeRoundedCornerRadius"];
}

/// Non-stateful keys of the `icon` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSettings {
    /// Show icons on tiles that reference one.
    pub icons: bool,
}

impl IconSettings {
    pub const KEYS: [&'static str; 1] = ["icons"];
}

/// The `content` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Clicking a tile adds to the selection instead of replacing it.
    pub multiselect: bool,
}

impl ContentSettings {
    pub const KEYS: [&'static str; 1] = ["multiselect"];
}
