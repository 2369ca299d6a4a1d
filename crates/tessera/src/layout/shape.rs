//! Tile outlines.
//!
//! A shape only changes how a tile's bounding box is drawn and how far its
//! content is inset. It never changes the bounding boxes themselves.

use serde::{Deserialize, Serialize};
use tessera_render::{Insets, Path, Point, Rect};
use tessera_style::settings::TileShape;

/// Angles are kept away from 0, where the slant would be unbounded.
const MIN_ANGLE_DEGREES: f32 = 5.0;
const MAX_ANGLE_DEGREES: f32 = 90.0;

/// The outline of one tile and the insets that keep content inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeOutline {
    pub shape: TileShape,
    /// Angle in degrees or cut length in pixels, depending on the shape.
    pub parameter: f32,
    pub path: Path,
    pub insets: Insets,
}

impl ShapeOutline {
    /// Build the outline of `shape` filling `rect`.
    ///
    /// `corner_radius` only applies to rectangles.
    pub fn compute(shape: TileShape, parameter: f32, rect: Rect, corner_radius: f32) -> Self {
        let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        let (w, h) = (rect.width().max(0.0), rect.height().max(0.0));
        let mid = t + h / 2.0;

        let (path, insets) = match shape {
            TileShape::Rectangle => (Path::rounded_rect(rect, corner_radius), Insets::ZERO),
            TileShape::Parallelogram => {
                let d = slant(h, parameter).min(w / 2.0);
                let path = Path::polygon(&[
                    Point::new(l + d, t),
                    Point::new(r, t),
                    Point::new(r - d, b),
                    Point::new(l, b),
                ]);
                (path, Insets::new(d, 0.0, d, 0.0))
            }
            TileShape::Chevron => {
                let d = slant(h / 2.0, parameter).min(w / 2.0);
                let path = Path::polygon(&[
                    Point::new(l, t),
                    Point::new(r - d, t),
                    Point::new(r, mid),
                    Point::new(r - d, b),
                    Point::new(l, b),
                    Point::new(l + d, mid),
                ]);
                (path, Insets::new(d, 0.0, d, 0.0))
            }
            TileShape::Pentagon => {
                let d = slant(h / 2.0, parameter).min(w / 2.0);
                let path = Path::polygon(&[
                    Point::new(l, t),
                    Point::new(r - d, t),
                    Point::new(r, mid),
                    Point::new(r - d, b),
                    Point::new(l, b),
                ]);
                (path, Insets::new(0.0, 0.0, d, 0.0))
            }
            TileShape::Hexagon => {
                let d = slant(h / 2.0, parameter).min(w / 2.0);
                let path = Path::polygon(&[
                    Point::new(l + d, t),
                    Point::new(r - d, t),
                    Point::new(r, mid),
                    Point::new(r - d, b),
                    Point::new(l + d, b),
                    Point::new(l, mid),
                ]);
                (path, Insets::new(d, 0.0, d, 0.0))
            }
            TileShape::TabCutCorner => {
                let c = cut(parameter, w, h);
                let path = Path::polygon(&[
                    Point::new(l + c, t),
                    Point::new(r, t),
                    Point::new(r, b),
                    Point::new(l, b),
                    Point::new(l, t + c),
                ]);
                (path, Insets::new(c / 2.0, c / 2.0, 0.0, 0.0))
            }
            TileShape::TabCutCorners => {
                let c = cut(parameter, w, h);
                let path = Path::polygon(&[
                    Point::new(l + c, t),
                    Point::new(r - c, t),
                    Point::new(r, t + c),
                    Point::new(r, b),
                    Point::new(l, b),
                    Point::new(l, t + c),
                ]);
                (path, Insets::new(c / 2.0, c / 2.0, c / 2.0, 0.0))
            }
        };

        Self {
            shape,
            parameter,
            path,
            insets,
        }
    }
}

/// Horizontal run of an edge rising `rise` pixels at `angle` degrees.
fn slant(rise: f32, angle: f32) -> f32 {
    let angle = angle.clamp(MIN_ANGLE_DEGREES, MAX_ANGLE_DEGREES).to_radians();
    (rise / angle.tan()).max(0.0)
}

fn cut(length: f32, w: f32, h: f32) -> f32 {
    length.max(0.0).min(w.min(h) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(rect: &Rect, outline: &ShapeOutline) -> bool {
        outline.path.points().all(|p| {
            p.x >= rect.left() - 1e-3
                && p.x <= rect.right() + 1e-3
                && p.y >= rect.top() - 1e-3
                && p.y <= rect.bottom() + 1e-3
        })
    }

    #[test]
    fn test_every_shape_stays_in_bounds() {
        let rect = Rect::new(10.0, 20.0, 120.0, 60.0);
        for shape in TileShape::ALL {
            for parameter in [0.0, 30.0, 45.0, 89.0, 500.0] {
                let outline = ShapeOutline::compute(shape, parameter, rect, 8.0);
                assert!(inside(&rect, &outline), "{shape:?} {parameter}");
                assert!(outline.insets.horizontal() <= rect.width());
            }
        }
    }

    #[test]
    fn test_parallelogram_slant() {
        let rect = Rect::new(0.0, 0.0, 200.0, 50.0);
        let outline = ShapeOutline::compute(TileShape::Parallelogram, 45.0, rect, 0.0);
        // 45 degrees: the slant equals the height.
        assert!((outline.insets.left - 50.0).abs() < 1e-3);
        assert_eq!(outline.path.points().count(), 4);
    }

    #[test]
    fn test_right_angle_has_no_slant() {
        let rect = Rect::new(0.0, 0.0, 200.0, 50.0);
        let outline = ShapeOutline::compute(TileShape::Hexagon, 90.0, rect, 0.0);
        assert!(outline.insets.left.abs() < 1e-3);
    }

    #[test]
    fn test_cut_corner_is_clamped() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let outline = ShapeOutline::compute(TileShape::TabCutCorners, 100.0, rect, 0.0);
        assert_eq!(outline.insets.left, 10.0);
        assert_eq!(outline.insets.top, 10.0);
    }
}
