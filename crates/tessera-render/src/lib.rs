//! Geometry, color and text measurement for Tessera.
//!
//! Tessera never draws anything itself. This crate holds the value types
//! that describe what a rendering sink should draw ([`Rect`], [`Color`],
//! [`Path`]) and the [`text`] module that measures wrapped text so the
//! layout engine can size rows before any pixel is produced.
//!
//! # Measuring text
//!
//! ```
//! use tessera_render::text::{FixedAdvanceMeasurer, TextMeasure};
//!
//! let measurer = FixedAdvanceMeasurer::default();
//! let extent = measurer.measure("Total Sales", "Segoe UI", 12.0, 200.0).unwrap();
//! assert!(extent.width > 0.0);
//! ```

pub mod text;
mod types;

pub use types::{Color, Insets, Path, PathCommand, Point, Rect, Size};
