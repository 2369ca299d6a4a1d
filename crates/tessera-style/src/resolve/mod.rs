//! State-dependent property resolution.
//!
//! Resolution is a total function over `(State, PropertyKey)` for every
//! declared property of a group:
//!
//! - `All`: the `all` variant, else the hard default.
//! - a concrete state: that state's variant, else the `disabled` ("default")
//!   variant, else the hard default. Empty strings count as unset.
//!
//! [`PropertyGroup::max_of_group`] takes the maximum over the four concrete
//! states. Collection-wide sizes (font sizes, stroke widths, effect extents)
//! use it so that one tile changing state never resizes the others.

mod cache;
mod style;

pub use cache::{StyleCache, StyleCacheKey};
pub use style::{
    ContentKind, ContentVariant, FillStyle, GlowStyle, GroupStates, IconStyle, ResolvedTileStyle,
    ShadowStyle, StrokeStyle, TextStyle,
};

use tessera_core::targets;
use tessera_render::Color;

use crate::settings::{FormatSettings, GroupId, PropertyGroup, PropertyKey};
use crate::types::{PropertyValue, State};

impl PropertyGroup {
    /// Resolve the effective value of `key` in `state`.
    ///
    /// Never fails: an undeclared key resolves to an empty value.
    pub fn resolve(&self, state: State, key: PropertyKey) -> PropertyValue {
        let set = |s: State| self.variant(key, s).filter(|v| !v.is_empty());

        let chosen = match state {
            State::All => set(State::All),
            concrete => set(concrete).or_else(|| set(State::Disabled)),
        };

        chosen
            .or_else(|| self.hard_default(key))
            .cloned()
            .unwrap_or_else(PropertyValue::empty)
    }

    /// Resolve as a number.
    pub fn resolve_number(&self, state: State, key: PropertyKey) -> f32 {
        self.resolve(state, key).as_number()
    }

    /// Resolve as text.
    pub fn resolve_text(&self, state: State, key: PropertyKey) -> String {
        self.resolve(state, key).as_text()
    }

    /// Resolve as a color.
    ///
    /// A configured value that is not a valid color falls back to the hard
    /// default, then to black.
    pub fn resolve_color(&self, state: State, key: PropertyKey) -> Color {
        let value = self.resolve(state, key);
        value
            .as_color()
            .or_else(|| {
                tracing::debug!(
                    target: targets::RESOLVE,
                    group = %self.id(),
                    key = key.name(),
                    value = ?value,
                    "unparseable color, using default"
                );
                self.hard_default(key).and_then(PropertyValue::as_color)
            })
            .unwrap_or(Color::BLACK)
    }

    /// Resolve a `transparency` percentage as an opacity in `0..=1`.
    pub fn resolve_opacity(&self, state: State, key: PropertyKey) -> f32 {
        (1.0 - self.resolve_number(state, key) / 100.0).clamp(0.0, 1.0)
    }

    /// Maximum numeric value of `key` over the four concrete states.
    pub fn max_of_group(&self, key: PropertyKey) -> f32 {
        State::CONCRETE
            .into_iter()
            .map(|s| self.resolve_number(s, key))
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

impl FormatSettings {
    /// Resolve a property of one group.
    pub fn resolve(&self, state: State, group: GroupId, key: PropertyKey) -> PropertyValue {
        self.group(group).resolve(state, key)
    }

    /// Maximum of a property of one group over the concrete states.
    pub fn max_of_group(&self, group: GroupId, key: PropertyKey) -> f32 {
        self.group(group).max_of_group(key)
    }
}
