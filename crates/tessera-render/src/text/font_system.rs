//! Glyph-metric text measurement backed by cosmic-text.

use cosmic_text::{Attrs, Buffer, Family, Metrics, Shaping, Wrap};
use parking_lot::Mutex;
use tessera_core::{PerfSpan, span_names, targets};

use super::{
    DEFAULT_LINE_HEIGHT_MULTIPLIER, MeasureCache, MeasureError, MeasureKey, TextExtent, TextMeasure,
    validate,
};

/// Configuration for initializing the font system.
#[derive(Debug, Clone)]
pub struct FontSystemConfig {
    /// Whether to load system fonts on initialization.
    pub load_system_fonts: bool,
    /// Locale string for text shaping (e.g., "en-US").
    pub locale: String,
    /// Default sans-serif font family name.
    pub sans_serif_family: Option<String>,
    /// Line height as a multiple of the font size.
    pub line_height_multiplier: f32,
    /// Maximum number of memoized measurements.
    pub cache_capacity: usize,
}

impl Default for FontSystemConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            locale: sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string()),
            sans_serif_family: None,
            line_height_multiplier: DEFAULT_LINE_HEIGHT_MULTIPLIER,
            cache_capacity: 2048,
        }
    }
}

impl FontSystemConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to load system fonts on initialization.
    pub fn load_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }

    /// Set the locale for text shaping.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the default sans-serif font family.
    pub fn sans_serif_family(mut self, family: impl Into<String>) -> Self {
        self.sans_serif_family = Some(family.into());
        self
    }

    /// Set the line height multiplier.
    pub fn line_height_multiplier(mut self, multiplier: f32) -> Self {
        self.line_height_multiplier = multiplier;
        self
    }
}

/// Measures text with real glyph metrics.
///
/// The cosmic-text font system is the one offscreen measurement surface; it
/// sits behind a mutex and is reused serially by every call. Results are
/// memoized on the full input tuple.
///
/// # Example
///
/// ```no_run
/// use tessera_render::text::{FontMeasurer, TextMeasure};
///
/// // Loads system fonts, which may take a moment.
/// let measurer = FontMeasurer::new();
/// let extent = measurer.measure("Revenue", "Segoe UI", 12.0, 180.0).unwrap();
/// println!("{} x {}", extent.width, extent.height);
/// ```
pub struct FontMeasurer {
    font_system: Mutex<cosmic_text::FontSystem>,
    cache: MeasureCache,
    line_height_multiplier: f32,
}

impl FontMeasurer {
    /// Create a measurer with default configuration.
    pub fn new() -> Self {
        Self::with_config(FontSystemConfig::default())
    }

    /// Create a measurer with custom configuration.
    pub fn with_config(config: FontSystemConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }
        if let Some(ref family) = config.sans_serif_family {
            db.set_sans_serif_family(family);
        }
        tracing::debug!(
            target: targets::TEXT,
            faces = db.len(),
            locale = %config.locale,
            "font system initialized"
        );

        Self {
            font_system: Mutex::new(cosmic_text::FontSystem::new_with_locale_and_db(
                config.locale,
                db,
            )),
            cache: MeasureCache::with_capacity(config.cache_capacity),
            line_height_multiplier: config.line_height_multiplier,
        }
    }

    /// Load font data from memory.
    ///
    /// The data should be the raw contents of a TTF, OTF, TTC, or OTC file.
    /// Previously memoized measurements are discarded.
    pub fn load_font_data(&self, data: Vec<u8>) {
        self.font_system.lock().db_mut().load_font_data(data);
        self.cache.clear();
    }

    /// Number of font faces available for measurement.
    pub fn face_count(&self) -> usize {
        self.font_system.lock().db().len()
    }

    /// The memoized measurements.
    pub fn cache(&self) -> &MeasureCache {
        &self.cache
    }

    fn shape(&self, text: &str, font_family: &str, font_size: f32, max_width: f32) -> TextExtent {
        let _span = PerfSpan::new(span_names::MEASURE);
        let mut guard = self.font_system.lock();
        let font_system = &mut *guard;

        let line_height = font_size * self.line_height_multiplier;
        let mut buffer = Buffer::new(font_system, Metrics::new(font_size, line_height));
        buffer.set_wrap(font_system, Wrap::Word);
        let width = max_width.is_finite().then_some(max_width);
        buffer.set_size(font_system, width, None);
        buffer.set_text(
            font_system,
            text,
            Attrs::new().family(family_for(font_family)),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(font_system, false);

        let mut widest = 0.0f32;
        let mut line_count = 0usize;
        for run in buffer.layout_runs() {
            widest = widest.max(run.line_w);
            line_count += 1;
        }

        TextExtent {
            width: widest,
            height: line_count as f32 * line_height,
            line_count,
        }
    }
}

impl Default for FontMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMeasurer")
            .field("cache", &self.cache)
            .field("line_height_multiplier", &self.line_height_multiplier)
            .finish_non_exhaustive()
    }
}

impl TextMeasure for FontMeasurer {
    fn measure(
        &self,
        text: &str,
        font_family: &str,
        font_size: f32,
        max_width: f32,
    ) -> Result<TextExtent, MeasureError> {
        validate(font_size, max_width)?;
        if text.is_empty() {
            return Ok(TextExtent::ZERO);
        }

        let key = MeasureKey::new(text, font_family, font_size, max_width);
        if let Some(extent) = self.cache.get(&key) {
            return Ok(extent);
        }

        let extent = self.shape(text, font_family, font_size, max_width);
        tracing::trace!(
            target: targets::TEXT,
            font_family,
            font_size,
            max_width,
            width = extent.width,
            height = extent.height,
            "measured text"
        );
        self.cache.insert(key, extent);
        Ok(extent)
    }
}

/// Map a configured family name to a cosmic-text family.
fn family_for(name: &str) -> Family<'_> {
    match name.trim().to_ascii_lowercase().as_str() {
        "" | "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name.trim()),
    }
}
