//! Collection-wide metrics, evaluated in two phases.
//!
//! Every tile of a collection shares font sizes, text row heights, stroke
//! widths and effect extents, so that tiles line up and one tile changing
//! state never shifts its neighbors.
//!
//! - **Phase 1** runs before layout and needs only the configuration and the
//!   entity kinds: `max_of_group` font sizes, inline text heights, stroke and
//!   icon widths, effect maxima and the [`EffectMargin`].
//! - **Phase 2** runs after layout, once content widths are known: it
//!   measures a bounded sample of the longest texts per role and stores the
//!   tallest result as that role's shared row height.
//!
//! Reading phase 2 values before phase 2 ran is a programming error and is
//! caught by `debug_assert!`.

use std::cmp::Reverse;

use serde::Serialize;
use tessera_core::{PerfSpan, span_names, targets};
use tessera_render::text::TextMeasure;
use tessera_style::types::IconPlacement;
use tessera_style::{ContentKind, FormatSettings, GroupId, PropertyKey, State};
use unicode_segmentation::UnicodeSegmentation;

use crate::entity::Entity;
use crate::layout::EffectMargin;

/// Number of longest texts measured per role in phase 2.
pub const TEXT_HEIGHT_SAMPLE_SIZE: usize = 5;

/// Tuning of the metrics evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsConfig {
    /// How many of the longest texts per role are measured in phase 2.
    pub text_height_sample_size: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            text_height_sample_size: TEXT_HEIGHT_SAMPLE_SIZE,
        }
    }
}

/// How far metrics evaluation has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Empty,
    Phase1,
    Phase2,
}

/// The role a line of text plays on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    /// Header and category tiles.
    Header,
    /// Measure name on measure tiles.
    CategoryLabel,
    /// Measure value on measure tiles.
    DataLabel,
}

impl TextRole {
    pub const COUNT: usize = 3;
    pub const ALL: [TextRole; Self::COUNT] =
        [TextRole::Header, TextRole::CategoryLabel, TextRole::DataLabel];

    /// The text group styling this role.
    pub fn group(self) -> GroupId {
        match self {
            TextRole::Header => GroupId::HeaderText,
            TextRole::CategoryLabel => GroupId::CategoryLabelText,
            TextRole::DataLabel => GroupId::DataLabelText,
        }
    }

    /// The role styled by a text group.
    pub fn for_group(group: GroupId) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.group() == group)
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Whether tiles of `kind` show a line of this role.
    pub fn shown_by(self, kind: ContentKind) -> bool {
        matches!(
            (self, kind),
            (TextRole::Header, ContentKind::Text)
                | (TextRole::CategoryLabel | TextRole::DataLabel, ContentKind::TextText2)
        )
    }

    /// The text `entity` shows in this role, if any.
    pub fn text_of(self, entity: &Entity) -> Option<&str> {
        if !self.shown_by(entity.kind) {
            return None;
        }
        Some(match self {
            TextRole::Header | TextRole::CategoryLabel => entity.text.as_str(),
            TextRole::DataLabel => entity.secondary(),
        })
    }
}

/// Shared typography of one text role.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RoleMetrics {
    /// Whether any entity shows this role.
    pub present: bool,
    /// Largest font size over the concrete states.
    pub font_size: f32,
    /// Family used for measurement.
    pub font_family: String,
    /// `round(font_size * 4 / 3)`.
    pub inline_height: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
}

/// Phase 1 results. Independent of interaction state and viewport.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Phase1Metrics {
    pub roles: [RoleMetrics; TextRole::COUNT],
    /// Largest stroke width of each tile group shown by some entity.
    pub stroke_widths: Vec<(GroupId, f32)>,
    /// Largest of `stroke_widths`.
    pub max_stroke_width: f32,
    /// Whether icons are enabled and some entity has one.
    pub icons: bool,
    /// Placement of the default state, shared by every tile.
    pub icon_placement: IconPlacement,
    pub max_icon_width: f32,
    pub icon_padding: f32,
    pub icon_top_margin: f32,
    pub icon_bottom_margin: f32,
    pub max_shadow_distance: f32,
    pub max_shadow_strength: f32,
    pub max_glow_strength: f32,
    pub margin: EffectMargin,
}

impl Phase1Metrics {
    /// Evaluate phase 1 for `entities` under `settings`.
    pub fn evaluate(settings: &FormatSettings, entities: &[Entity]) -> Self {
        let shows = |kind: ContentKind| entities.iter().any(|e| e.kind == kind);

        let roles = TextRole::ALL.map(|role| {
            let group = settings.group(role.group());
            let font_size = group.max_of_group(PropertyKey::FontSize).max(0.0);
            RoleMetrics {
                present: [ContentKind::Text, ContentKind::TextText2]
                    .into_iter()
                    .any(|kind| role.shown_by(kind) && shows(kind)),
                font_size,
                font_family: group.resolve_text(State::Disabled, PropertyKey::FontFamily),
                inline_height: (font_size * 4.0 / 3.0).round(),
                top_margin: group.max_of_group(PropertyKey::TopMargin).max(0.0),
                bottom_margin: group.max_of_group(PropertyKey::BottomMargin).max(0.0),
            }
        });

        let stroke_widths: Vec<_> = [
            (ContentKind::Text, GroupId::HeaderTile),
            (ContentKind::TextText2, GroupId::MeasureTile),
        ]
        .into_iter()
        .filter(|&(kind, _)| shows(kind))
        .map(|(_, id)| (id, settings.max_of_group(id, PropertyKey::StrokeWidth).max(0.0)))
        .collect();
        let max_stroke_width = stroke_widths.iter().map(|&(_, w)| w).fold(0.0, f32::max);

        let icons = settings.icon.icons && entities.iter().any(|e| e.icon.is_some());
        let icon_max = |key: PropertyKey| {
            if icons {
                settings.max_of_group(GroupId::Icon, key).max(0.0)
            } else {
                0.0
            }
        };

        let max_shadow_distance = settings.max_of_group(GroupId::Effect, PropertyKey::ShadowDistance).max(0.0);
        let max_shadow_strength = settings.max_of_group(GroupId::Effect, PropertyKey::ShadowStrength).max(0.0);
        let max_glow_strength = settings.max_of_group(GroupId::Effect, PropertyKey::GlowStrength).max(0.0);
        let margin = EffectMargin::compute(
            settings.effect.shadow,
            max_shadow_distance,
            max_shadow_strength,
            settings.effect.glow,
            max_glow_strength,
            max_stroke_width,
        );

        Self {
            roles,
            stroke_widths,
            max_stroke_width,
            icons,
            icon_placement: IconPlacement::from_config(
                &settings
                    .group(GroupId::Icon)
                    .resolve_text(State::Disabled, PropertyKey::Placement),
            ),
            max_icon_width: icon_max(PropertyKey::Width),
            icon_padding: icon_max(PropertyKey::Padding),
            icon_top_margin: icon_max(PropertyKey::IconTopMargin),
            icon_bottom_margin: icon_max(PropertyKey::IconBottomMargin),
            max_shadow_distance,
            max_shadow_strength,
            max_glow_strength,
            margin,
        }
    }

    /// Metrics of one role.
    pub fn role(&self, role: TextRole) -> &RoleMetrics {
        &self.roles[role.index()]
    }
}

/// Indexes of the `k` longest texts by grapheme count.
///
/// Ties go to the lower index. The result is in sampling order.
pub fn sample_longest<'a>(texts: impl IntoIterator<Item = (usize, &'a str)>, k: usize) -> Vec<usize> {
    let mut ranked: Vec<(Reverse<usize>, usize)> = texts
        .into_iter()
        .map(|(index, text)| (Reverse(text.graphemes(true).count()), index))
        .collect();
    ranked.sort_unstable();
    ranked.into_iter().take(k).map(|(_, index)| index).collect()
}

/// The metrics shared by every tile of a collection.
#[derive(Debug, Clone, Default)]
pub struct AggregateMetrics {
    config: MetricsConfig,
    phase: Phase,
    phase1: Phase1Metrics,
    bounded: [f32; TextRole::COUNT],
}

impl AggregateMetrics {
    /// Create empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty metrics with a custom configuration.
    pub fn with_config(config: MetricsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> MetricsConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run phase 1. Discards any phase 2 results.
    pub fn evaluate_phase1(&mut self, settings: &FormatSettings, entities: &[Entity]) {
        let _span = PerfSpan::new(span_names::METRICS);
        self.phase1 = Phase1Metrics::evaluate(settings, entities);
        self.bounded = [0.0; TextRole::COUNT];
        self.phase = Phase::Phase1;

        tracing::debug!(
            target: targets::METRICS,
            entities = entities.len(),
            max_stroke = self.phase1.max_stroke_width,
            margin = self.phase1.margin.reserved,
            icons = self.phase1.icons,
            "phase 1 evaluated"
        );
    }

    /// Run phase 2.
    ///
    /// `content_width` gives the wrap width of entity `i`'s content box.
    pub fn evaluate_phase2(
        &mut self,
        entities: &[Entity],
        measurer: &dyn TextMeasure,
        content_width: impl Fn(usize) -> f32,
    ) {
        debug_assert!(self.phase >= Phase::Phase1, "phase 2 evaluated before phase 1");
        let _span = PerfSpan::new(span_names::METRICS);

        for role in TextRole::ALL {
            let metrics = self.phase1.role(role);
            if !metrics.present {
                self.bounded[role.index()] = 0.0;
                continue;
            }

            let texts = entities
                .iter()
                .enumerate()
                .filter_map(|(i, e)| role.text_of(e).map(|t| (i, t)));
            let sample = sample_longest(texts, self.config.text_height_sample_size);

            let bounded = sample
                .iter()
                .filter_map(|&i| role.text_of(&entities[i]).map(|t| (i, t)))
                .map(|(i, text)| {
                    measurer
                        .measure_or_zero(text, &metrics.font_family, metrics.font_size, content_width(i).max(0.0))
                        .height
                })
                .fold(0.0, f32::max);

            tracing::trace!(
                target: targets::METRICS,
                role = ?role,
                sampled = sample.len(),
                bounded,
                "bounded text height"
            );
            self.bounded[role.index()] = bounded;
        }

        self.phase = Phase::Phase2;
    }

    /// Drop phase 2 results ahead of a relayout.
    pub fn reset_phase2(&mut self) {
        if self.phase == Phase::Phase2 {
            self.phase = Phase::Phase1;
        }
        self.bounded = [0.0; TextRole::COUNT];
    }

    /// Phase 1 results.
    pub fn phase1(&self) -> &Phase1Metrics {
        debug_assert!(self.phase >= Phase::Phase1, "phase 1 metrics read before evaluation");
        &self.phase1
    }

    /// Phase 1 metrics of one role.
    pub fn role(&self, role: TextRole) -> &RoleMetrics {
        self.phase1().role(role)
    }

    /// Reserved effect margin.
    pub fn margin(&self) -> EffectMargin {
        self.phase1().margin
    }

    /// Tallest measured height among the sampled texts of `role`.
    pub fn bounded_height(&self, role: TextRole) -> f32 {
        debug_assert!(self.phase == Phase::Phase2, "phase 2 metrics read before evaluation");
        self.bounded[role.index()]
    }

    /// Shared row height of `role`: the larger of the inline and bounded
    /// heights.
    pub fn text_row_height(&self, role: TextRole) -> f32 {
        self.role(role).inline_height.max(self.bounded_height(role))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use tessera_render::text::{FixedAdvanceMeasurer, MeasureError, TextExtent};
    use tessera_style::settings::EffectSettings;

    fn measures(n: usize) -> Vec<Entity> {
        (0..n).map(|i| Entity::text_text2(format!("M{i}"), "1", i)).collect()
    }

    #[test]
    fn test_phase1_defaults() {
        let settings = FormatSettings::default();
        let m = Phase1Metrics::evaluate(&settings, &measures(3));

        let label = m.role(TextRole::CategoryLabel);
        assert!(label.present);
        assert_eq!(label.font_size, 12.0);
        assert_eq!(label.inline_height, 16.0);
        assert_eq!(label.font_family, "Segoe UI");

        assert_eq!(m.role(TextRole::DataLabel).inline_height, 60.0);
        assert!(!m.role(TextRole::Header).present);

        assert_eq!(m.stroke_widths, vec![(GroupId::MeasureTile, 1.0)]);
        assert_eq!(m.max_stroke_width, 1.0);
        assert_eq!(m.margin.reserved, 2.0);
        assert!(!m.icons);
        assert_eq!(m.max_icon_width, 0.0);
    }

    #[test]
    fn test_phase1_ignores_interaction_state() {
        let mut settings = FormatSettings::default();
        settings
            .group_mut(GroupId::DataLabelText)
            .set(PropertyKey::FontSize, State::Hovered, 60.0f32);

        let idle = measures(2);
        let mut busy = measures(2);
        busy[0].is_hovered = true;
        busy[1].is_selected = true;

        let a = Phase1Metrics::evaluate(&settings, &idle);
        let b = Phase1Metrics::evaluate(&settings, &busy);
        assert_eq!(a, b);
        assert_eq!(a.role(TextRole::DataLabel).font_size, 60.0);
        assert_eq!(a.role(TextRole::DataLabel).inline_height, 80.0);
    }

    #[test]
    fn test_phase1_effects_and_icons() {
        let mut settings = FormatSettings::default().with_effect(EffectSettings {
            shadow: true,
            ..Default::default()
        });
        settings.icon.icons = true;
        let effect = settings.group_mut(GroupId::Effect);
        effect.set(PropertyKey::ShadowDistance, State::Disabled, 4.0f32);
        effect.set(PropertyKey::ShadowStrength, State::Disabled, 2.0f32);

        let entities = vec![Entity::text("North", "north").with_icon("n.png")];
        let m = Phase1Metrics::evaluate(&settings, &entities);

        assert_eq!(m.margin.shadow_space, 18.0);
        assert_eq!(m.margin.glow_space, 0.0);
        assert_eq!(m.margin.reserved, 18.0);
        assert!(m.icons);
        assert_eq!(m.max_icon_width, 40.0);
        assert_eq!(m.stroke_widths, vec![(GroupId::HeaderTile, 1.0)]);
    }

    #[test]
    fn test_sample_longest_breaks_ties_by_index() {
        let texts = ["aaaa", "bbbbbb", "cccc", "dddddd", "ee", "ffff"];
        let sample = sample_longest(texts.iter().copied().enumerate(), 3);
        assert_eq!(sample, vec![1, 3, 0]);

        // Graphemes, not bytes.
        let sample = sample_longest([(0, "e\u{301}e\u{301}"), (1, "abc")], 1);
        assert_eq!(sample, vec![1]);
    }

    struct Recording {
        inner: FixedAdvanceMeasurer,
        calls: RefCell<Vec<String>>,
    }

    impl TextMeasure for Recording {
        fn measure(&self, text: &str, family: &str, size: f32, width: f32) -> Result<TextExtent, MeasureError> {
            self.calls.borrow_mut().push(text.to_string());
            self.inner.measure(text, family, size, width)
        }
    }

    #[test]
    fn test_phase2_samples_more_than_five_near_ties() {
        // Eight values of nearly the same length. Entry 6 ties the longest
        // but comes after five others, so its narrow box is never measured.
        let values = [
            "12345 678", "12345 678", "12345 67", "12345 678", "12345 678", "12345 678",
            "12345 678", "1234 5",
        ];
        let entities: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Entity::text_text2("Label", *v, i))
            .collect();

        let settings = FormatSettings::default();
        let mut metrics = AggregateMetrics::new();
        metrics.evaluate_phase1(&settings, &entities);

        let measurer = Recording {
            inner: FixedAdvanceMeasurer::default(),
            calls: RefCell::new(Vec::new()),
        };
        // At 45px a grapheme is 22.5px wide: "12345 678" fits on one line at
        // 500px and needs two lines at 150px.
        metrics.evaluate_phase2(&entities, &measurer, |i| if i == 6 { 150.0 } else { 500.0 });

        assert_eq!(metrics.phase(), Phase::Phase2);
        let data_calls = measurer.calls.borrow().iter().filter(|t| t.starts_with("1234")).count();
        assert_eq!(data_calls, TEXT_HEIGHT_SAMPLE_SIZE);

        let one_line = 45.0 * 1.2;
        assert!((metrics.bounded_height(TextRole::DataLabel) - one_line).abs() < 1e-3);
        assert_eq!(metrics.text_row_height(TextRole::DataLabel), 60.0);

        // A larger sample reaches the narrow box.
        let mut wide = AggregateMetrics::with_config(MetricsConfig {
            text_height_sample_size: 8,
        });
        wide.evaluate_phase1(&settings, &entities);
        wide.evaluate_phase2(&entities, &FixedAdvanceMeasurer::default(), |i| if i == 6 { 150.0 } else { 500.0 });
        assert!((wide.bounded_height(TextRole::DataLabel) - 2.0 * one_line).abs() < 1e-3);
        assert!((wide.text_row_height(TextRole::DataLabel) - 108.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_phase2_keeps_phase1() {
        let entities = measures(4);
        let mut metrics = AggregateMetrics::new();
        metrics.evaluate_phase1(&FormatSettings::default(), &entities);
        metrics.evaluate_phase2(&entities, &FixedAdvanceMeasurer::default(), |_| 100.0);
        let before = metrics.phase1().clone();

        metrics.reset_phase2();
        assert_eq!(metrics.phase(), Phase::Phase1);
        assert_eq!(metrics.phase1(), &before);
    }
}
