//! Style caching for performance.

use std::collections::HashMap;

use super::style::{ContentKind, ContentVariant, GroupStates, ResolvedTileStyle};
use crate::settings::FormatSettings;

/// Cache key for resolved styles.
///
/// Tiles of the same kind whose groups are in the same states resolve to the
/// same style, so a collection of hundreds of tiles typically resolves only a
/// handful of distinct styles per pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleCacheKey {
    kind: ContentKind,
    states: GroupStates,
}

impl StyleCacheKey {
    /// Create a new cache key.
    pub fn new(kind: ContentKind, states: GroupStates) -> Self {
        Self { kind, states }
    }
}

/// Cache of resolved tile styles for one configuration.
///
/// Must be invalidated whenever the configuration changes.
#[derive(Debug)]
pub struct StyleCache {
    cache: HashMap<StyleCacheKey, ResolvedTileStyle>,
    max_size: usize,
    hits: u64,
    misses: u64,
}

impl StyleCache {
    /// Create a new style cache.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a cache with specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_size),
            max_size: max_size.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Get a cached style.
    pub fn get(&self, key: &StyleCacheKey) -> Option<&ResolvedTileStyle> {
        self.cache.get(key)
    }

    /// Insert a resolved style into the cache.
    pub fn insert(&mut self, key: StyleCacheKey, style: ResolvedTileStyle) {
        // Simple eviction: clear half when full
        if self.cache.len() >= self.max_size {
            self.evict_half();
        }
        self.cache.insert(key, style);
    }

    /// Return the cached style, resolving and caching it on a miss.
    pub fn get_or_resolve(
        &mut self,
        settings: &FormatSettings,
        variant: &ContentVariant,
        states: GroupStates,
    ) -> ResolvedTileStyle {
        let key = StyleCacheKey::new(variant.kind, states);
        if let Some(style) = self.cache.get(&key) {
            self.hits += 1;
            return style.clone();
        }
        self.misses += 1;
        let style = ResolvedTileStyle::resolve(settings, variant, &states);
        self.insert(key, style.clone());
        style
    }

    /// Invalidate all cached styles.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Lookups answered from the cache, and lookups that had to resolve.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Evict half the entries.
    fn evict_half(&mut self) {
        let target = self.cache.len() / 2;
        let keys: Vec<_> = self.cache.keys().take(target).cloned().collect();
        for key in keys {
            self.cache.remove(&key);
        }
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new()
    }
}
