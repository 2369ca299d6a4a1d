//! Memoization of text measurements.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::TextExtent;

/// Cache key for a measurement.
///
/// Floats are keyed by their bit patterns; measurement inputs are never NaN
/// once validated, so bitwise equality is exact equality here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeasureKey {
    text: String,
    font_family: String,
    font_size_bits: u32,
    max_width_bits: u32,
}

impl MeasureKey {
    /// Create a new cache key.
    pub fn new(text: &str, font_family: &str, font_size: f32, max_width: f32) -> Self {
        Self {
            text: text.to_string(),
            font_family: font_family.to_string(),
            font_size_bits: font_size.to_bits(),
            max_width_bits: max_width.to_bits(),
        }
    }
}

/// Bounded cache of measured extents.
///
/// Interior mutability lets a measurer memoize through `&self`.
pub struct MeasureCache {
    entries: Mutex<HashMap<MeasureKey, TextExtent>>,
    max_size: usize,
}

impl MeasureCache {
    /// Create a new measurement cache.
    pub fn new() -> Self {
        Self::with_capacity(2048)
    }

    /// Create a cache with specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(max_size)),
            max_size: max_size.max(1),
        }
    }

    /// Get a cached extent.
    pub fn get(&self, key: &MeasureKey) -> Option<TextExtent> {
        self.entries.lock().get(key).copied()
    }

    /// Insert a measured extent into the cache.
    pub fn insert(&self, key: MeasureKey, extent: TextExtent) {
        let mut entries = self.entries.lock();
        // Simple eviction: drop half when full
        if entries.len() >= self.max_size {
            let target = entries.len() / 2;
            let keys: Vec<_> = entries.keys().take(target).cloned().collect();
            for key in keys {
                entries.remove(&key);
            }
        }
        entries.insert(key, extent);
    }

    /// Invalidate all cached extents.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MeasureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureCache")
            .field("len", &self.len())
            .field("max_size", &self.max_size)
            .finish()
    }
}
