//! Space reserved around the tile grid for shadows, glows and strokes.

use serde::{Deserialize, Serialize};

/// The effect margin of a collection.
///
/// The reserved margin is subtracted from the viewport before tiles are
/// sized, and half of it pads each edge, so effects drawn outside a tile's
/// bounds are never clipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectMargin {
    /// `3 * (max shadow distance + max shadow strength)`, or 0 without shadows.
    pub shadow_space: f32,
    /// `5 * max glow strength`, or 0 without glow.
    pub glow_space: f32,
    /// `2 * max stroke width`.
    pub stroke_space: f32,
    /// The largest of the three.
    pub reserved: f32,
}

impl EffectMargin {
    /// Compute the margin from collection-wide effect maxima.
    pub fn compute(
        shadow: bool,
        max_shadow_distance: f32,
        max_shadow_strength: f32,
        glow: bool,
        max_glow_strength: f32,
        max_stroke_width: f32,
    ) -> Self {
        let shadow_space = if shadow {
            3.0 * (max_shadow_distance.max(0.0) + max_shadow_strength.max(0.0))
        } else {
            0.0
        };
        let glow_space = if glow { 5.0 * max_glow_strength.max(0.0) } else { 0.0 };
        let stroke_space = 2.0 * max_stroke_width.max(0.0);

        Self {
            shadow_space,
            glow_space,
            stroke_space,
            reserved: shadow_space.max(glow_space).max(stroke_space),
        }
    }

    /// Padding applied to each edge of the container.
    pub fn half(&self) -> f32 {
        self.reserved / 2.0
    }
}
