//! Text measurement.
//!
//! The layout engine needs to know how tall a wrapped line of text will be
//! before it can size a row. Everything it needs is behind the
//! [`TextMeasure`] trait:
//!
//! - [`FontMeasurer`]: real glyph metrics through cosmic-text, memoized in a
//!   [`MeasureCache`]
//! - [`FixedAdvanceMeasurer`]: a deterministic per-character measurer for
//!   headless hosts and tests
//!
//! Measurement never aborts a pass. Callers that cannot act on a
//! [`MeasureError`] use [`TextMeasure::measure_or_zero`], which logs the
//! failure and returns an empty extent.

mod cache;
mod fixed;
mod font_system;

pub use cache::{MeasureCache, MeasureKey};
pub use fixed::FixedAdvanceMeasurer;
pub use font_system::{FontMeasurer, FontSystemConfig};

use serde::{Deserialize, Serialize};
use tessera_core::targets;
use thiserror::Error;

/// Default line height as a multiple of the font size.
pub const DEFAULT_LINE_HEIGHT_MULTIPLIER: f32 = 1.2;

/// Errors that can occur while measuring text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// The font size was zero, negative or not finite.
    #[error("invalid font size: {0}")]
    InvalidFontSize(f32),
    /// The wrap width was negative or NaN.
    #[error("invalid wrap width: {0}")]
    InvalidWidth(f32),
    /// The measurement backend could not shape the text.
    #[error("text shaping failed: {0}")]
    Shaping(String),
}

/// The measured size of a block of wrapped text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextExtent {
    /// Width of the widest line.
    pub width: f32,
    /// Total height of all lines.
    pub height: f32,
    /// Number of lines after wrapping.
    pub line_count: usize,
}

impl TextExtent {
    /// An empty extent.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
        line_count: 0,
    };
}

/// Measures rendered text for a given font and wrap width.
///
/// Implementations must be deterministic for a given input tuple so that
/// results can be memoized.
pub trait TextMeasure {
    /// Measure `text` set in `font_family` at `font_size`, word-wrapped
    /// against `max_width`. Pass `f32::INFINITY` to disable wrapping.
    fn measure(
        &self,
        text: &str,
        font_family: &str,
        font_size: f32,
        max_width: f32,
    ) -> Result<TextExtent, MeasureError>;

    /// Measure, treating any failure as a collapsed text box.
    fn measure_or_zero(
        &self,
        text: &str,
        font_family: &str,
        font_size: f32,
        max_width: f32,
    ) -> TextExtent {
        match self.measure(text, font_family, font_size, max_width) {
            Ok(extent) => extent,
            Err(err) => {
                tracing::warn!(
                    target: targets::TEXT,
                    %err,
                    font_family,
                    font_size,
                    max_width,
                    "text measurement failed, using zero extent"
                );
                TextExtent::ZERO
            }
        }
    }
}

/// Reject inputs no backend can measure.
pub(crate) fn validate(font_size: f32, max_width: f32) -> Result<(), MeasureError> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(MeasureError::InvalidFontSize(font_size));
    }
    if max_width.is_nan() || max_width < 0.0 {
        return Err(MeasureError::InvalidWidth(max_width));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl TextMeasure for Failing {
        fn measure(&self, _: &str, _: &str, size: f32, _: f32) -> Result<TextExtent, MeasureError> {
            Err(MeasureError::InvalidFontSize(size))
        }
    }

    #[test]
    fn test_validate() {
        assert!(validate(12.0, 100.0).is_ok());
        assert!(validate(12.0, f32::INFINITY).is_ok());
        assert_eq!(validate(0.0, 100.0), Err(MeasureError::InvalidFontSize(0.0)));
        assert!(matches!(validate(f32::NAN, 1.0), Err(MeasureError::InvalidFontSize(_))));
        assert_eq!(validate(12.0, -1.0), Err(MeasureError::InvalidWidth(-1.0)));
    }

    #[test]
    fn test_measure_or_zero_collapses_failures() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let extent = Failing.measure_or_zero("anything", "Segoe UI", -3.0, 10.0);
        assert_eq!(extent, TextExtent::ZERO);
    }
}
