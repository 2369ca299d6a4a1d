//! Deterministic measurement without fonts.

use unicode_segmentation::UnicodeSegmentation;

use super::{DEFAULT_LINE_HEIGHT_MULTIPLIER, MeasureError, TextExtent, TextMeasure, validate};

/// Measures text as if every grapheme had the same advance.
///
/// Each grapheme advances `font_size * advance_ratio`; lines break greedily
/// at whitespace. A single word wider than the wrap width keeps a line of
/// its own rather than being split. The font family is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance of one grapheme as a fraction of the font size.
    pub advance_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_height_multiplier: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            line_height_multiplier: DEFAULT_LINE_HEIGHT_MULTIPLIER,
        }
    }
}

impl FixedAdvanceMeasurer {
    /// Create a measurer with a custom advance ratio.
    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            ..Self::default()
        }
    }
}

impl TextMeasure for FixedAdvanceMeasurer {
    fn measure(
        &self,
        text: &str,
        _font_family: &str,
        font_size: f32,
        max_width: f32,
    ) -> Result<TextExtent, MeasureError> {
        validate(font_size, max_width)?;

        let advance = font_size * self.advance_ratio;
        let space = advance;
        let mut widest = 0.0f32;
        let mut line_count = 0usize;

        for paragraph in text.split('\n') {
            let mut line_width: Option<f32> = None;
            for word in paragraph.split_whitespace() {
                let word_width = word.graphemes(true).count() as f32 * advance;
                line_width = match line_width {
                    Some(current) if current + space + word_width <= max_width => {
                        Some(current + space + word_width)
                    }
                    Some(current) => {
                        widest = widest.max(current);
                        line_count += 1;
                        Some(word_width)
                    }
                    None => Some(word_width),
                };
            }
            if let Some(current) = line_width {
                widest = widest.max(current);
                line_count += 1;
            } else if !text.is_empty() {
                // Blank paragraph still takes a line.
                line_count += 1;
            }
        }

        if text.is_empty() {
            return Ok(TextExtent::ZERO);
        }

        Ok(TextExtent {
            width: widest,
            height: line_count as f32 * font_size * self.line_height_multiplier,
            line_count,
        })
    }
}
