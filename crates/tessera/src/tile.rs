//! Tile controller.
//!
//! A [`Tile`] wraps one entity at one position in the collection. It owns the
//! entity's effective states and resolved style, and the geometry the
//! collection assigned to it. Tiles are rebuilt on every data pass.
//!
//! Geometry depends only on the layout slot, phase 1/2 metrics and the
//! configuration. A hovered or selected tile is restyled, never resized.

use tessera_core::targets;
use tessera_render::{Insets, Rect};
use tessera_style::types::IconPlacement;
use tessera_style::{ContentVariant, FormatSettings, GroupStates, ResolvedTileStyle, State, StyleCache};

use crate::descriptor::{IconDescriptor, PassKind, PassRequest, ShadowDescriptor, TextLine, TileDescriptor};
use crate::entity::Entity;
use crate::layout::ShapeOutline;
use crate::metrics::{AggregateMetrics, Phase1Metrics, TextRole};
use crate::selection::SelectionHandler;

/// Effective state of one property group for `entity`.
///
/// Disabled wins, then hover (only for groups that style hover), then
/// selection.
pub fn effective_state(entity: &Entity, hover_styling: bool) -> State {
    if entity.is_disabled {
        State::Disabled
    } else if entity.is_hovered && hover_styling {
        State::Hovered
    } else if entity.is_selected {
        State::Selected
    } else {
        State::Unselected
    }
}

/// Effective state of every property group for `entity`.
pub fn group_states(entity: &Entity, settings: &FormatSettings) -> GroupStates {
    GroupStates::from_fn(|id| effective_state(entity, settings.group(id).hover_styling))
}

/// Content area and icon box inside a tile's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentArea {
    pub content: Rect,
    pub icon: Option<Rect>,
}

impl ContentArea {
    /// Split `outline_rect` into icon and text areas.
    ///
    /// `outline_insets` come from the tile shape. The whole stroke width is
    /// kept clear inside the outline.
    pub fn compute(outline_rect: Rect, outline_insets: Insets, metrics: &Phase1Metrics, has_icon: bool) -> Self {
        let inner = outline_rect
            .inset(outline_insets)
            .inset(Insets::uniform(metrics.max_stroke_width / 2.0));

        if !(metrics.icons && has_icon) {
            return Self {
                content: inner,
                icon: None,
            };
        }

        let side = metrics.max_icon_width.min(inner.width()).min(inner.height()).max(0.0);
        match metrics.icon_placement {
            IconPlacement::Left => {
                let left = inner.left() + metrics.icon_padding;
                let top = inner.top() + ((inner.height() - side) / 2.0).max(0.0);
                Self {
                    content: inner.inset(Insets::new(metrics.icon_padding * 2.0 + side, 0.0, 0.0, 0.0)),
                    icon: Some(Rect::new(left, top, side, side)),
                }
            }
            IconPlacement::Above => {
                let left = inner.center().x - side / 2.0;
                let top = inner.top() + metrics.icon_top_margin;
                let taken = metrics.icon_top_margin + side + metrics.icon_bottom_margin;
                Self {
                    content: inner.inset(Insets::new(0.0, taken, 0.0, 0.0)),
                    icon: Some(Rect::new(left, top, side, side)),
                }
            }
        }
    }
}

/// The rectangle a tile's outline is drawn in: its bounds less half the
/// largest stroke, so the stroke stays inside the bounds.
pub fn outline_rect(bounds: Rect, metrics: &Phase1Metrics) -> Rect {
    bounds.inset(Insets::uniform(metrics.max_stroke_width / 2.0))
}

/// Outline and content area of a tile placed at `bounds`.
pub fn shape_tile(
    bounds: Rect,
    has_icon: bool,
    settings: &FormatSettings,
    metrics: &Phase1Metrics,
) -> (ShapeOutline, ContentArea) {
    let rect = outline_rect(bounds, metrics);
    let outline = ShapeOutline::compute(
        settings.layout.tile_shape,
        settings.layout.shape_parameter(),
        rect,
        settings.effect.shape_rounded_corner_radius.max(0.0),
    );
    let area = ContentArea::compute(rect, outline.insets, metrics, has_icon);
    (outline, area)
}

/// Geometry assigned to a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGeometry {
    pub bounds: Rect,
    pub outline: ShapeOutline,
    pub area: ContentArea,
    /// One rectangle per text line, in drawing order.
    pub lines: Vec<(TextRole, Rect)>,
}

impl TileGeometry {
    /// Compute the geometry of a tile of `variant` placed at `bounds`.
    pub fn compute(
        bounds: Rect,
        variant: &ContentVariant,
        has_icon: bool,
        settings: &FormatSettings,
        metrics: &AggregateMetrics,
    ) -> Self {
        let (outline, area) = shape_tile(bounds, has_icon, settings, metrics.phase1());

        let roles = roles_of(variant);
        let block = |role: TextRole| {
            let m = metrics.role(role);
            m.top_margin + metrics.text_row_height(role) + m.bottom_margin
        };
        let total: f32 = roles.iter().map(|&r| block(r)).sum();
        let available = area.content.height();
        // Rows that do not fit are squeezed so they never leave the content box.
        let scale = if total > available && total > 0.0 {
            available / total
        } else {
            1.0
        };
        let mut y = area.content.top() + ((available - total * scale) / 2.0).max(0.0);

        let lines = roles
            .iter()
            .map(|&role| {
                let m = metrics.role(role);
                let top = (y + m.top_margin * scale).min(area.content.bottom());
                let height = (metrics.text_row_height(role) * scale).min(area.content.bottom() - top);
                let rect = Rect::new(area.content.left(), top, area.content.width(), height.max(0.0));
                y += block(role) * scale;
                (role, rect)
            })
            .collect();

        Self {
            bounds,
            outline,
            area,
            lines,
        }
    }
}

/// Text roles shown by tiles of `variant`, top to bottom.
pub fn roles_of(variant: &ContentVariant) -> &'static [TextRole] {
    match variant.text2_group {
        Some(_) => &[TextRole::CategoryLabel, TextRole::DataLabel],
        None => &[TextRole::Header],
    }
}

/// One tile of a collection.
#[derive(Debug, Clone)]
pub struct Tile {
    index: usize,
    entity: Entity,
    variant: ContentVariant,
    states: GroupStates,
    style: ResolvedTileStyle,
    geometry: Option<TileGeometry>,
}

impl Tile {
    /// Create the tile for `entity` at `index`, resolving its style.
    pub fn new(index: usize, entity: Entity, settings: &FormatSettings, styles: &mut StyleCache) -> Self {
        let variant = ContentVariant::for_kind(entity.kind);
        let states = group_states(&entity, settings);
        let style = styles.get_or_resolve(settings, &variant, states);
        Self {
            index,
            entity,
            variant,
            states,
            style,
            geometry: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn variant(&self) -> &ContentVariant {
        &self.variant
    }

    pub fn states(&self) -> &GroupStates {
        &self.states
    }

    pub fn style(&self) -> &ResolvedTileStyle {
        &self.style
    }

    pub fn geometry(&self) -> Option<&TileGeometry> {
        self.geometry.as_ref()
    }

    /// The state of the tile group.
    pub fn effective_state(&self) -> State {
        self.states.get(self.variant.tile_group)
    }

    /// Whether the tile shows its icon.
    pub fn has_icon(&self) -> bool {
        self.entity.icon.is_some()
    }

    /// Update the interaction flags and restyle if any group state changed.
    ///
    /// Returns whether the style was recomputed.
    pub fn sync_interaction(
        &mut self,
        is_selected: bool,
        is_hovered: bool,
        settings: &FormatSettings,
        styles: &mut StyleCache,
    ) -> bool {
        self.entity.is_selected = is_selected;
        self.entity.is_hovered = is_hovered;
        let states = group_states(&self.entity, settings);
        if states == self.states {
            return false;
        }
        tracing::trace!(
            target: targets::TILE,
            index = self.index,
            from = %self.effective_state(),
            to = %states.get(self.variant.tile_group),
            "tile state changed"
        );
        self.states = states;
        self.style = styles.get_or_resolve(settings, &self.variant, states);
        true
    }

    /// Assign geometry from the layout slot.
    pub fn place(&mut self, bounds: Rect, settings: &FormatSettings, metrics: &AggregateMetrics) {
        self.geometry = Some(TileGeometry::compute(
            bounds,
            &self.variant,
            self.has_icon(),
            settings,
            metrics,
        ));
    }

    /// Toggle this tile's selection target.
    ///
    /// Always requests an interaction pass, since the selection handler may
    /// have changed other tiles too.
    pub fn on_click(&self, selection: &mut dyn SelectionHandler, multiselect: bool) -> PassRequest {
        selection.select(&self.entity.target, multiselect);
        tracing::debug!(
            target: targets::TILE,
            index = self.index,
            target_id = ?self.entity.target,
            multiselect,
            "tile clicked"
        );
        PassRequest::Requested(PassKind::Interaction)
    }

    /// Mark this tile as hovered.
    pub fn on_pointer_enter(&self, hovered: &mut Option<usize>, settings: &FormatSettings) -> PassRequest {
        *hovered = Some(self.index);
        hover_request(settings)
    }

    /// Clear the hover if it is on this tile.
    pub fn on_pointer_leave(&self, hovered: &mut Option<usize>, settings: &FormatSettings) -> PassRequest {
        if *hovered != Some(self.index) {
            return PassRequest::NotNeeded;
        }
        *hovered = None;
        hover_request(settings)
    }

    /// Build the descriptor of this tile.
    ///
    /// Tiles without geometry report empty boxes.
    pub fn descriptor(&self) -> TileDescriptor {
        let style = &self.style;
        let geometry = self.geometry.as_ref();
        let bounds = geometry.map(|g| g.bounds).unwrap_or_default();

        let lines = geometry
            .map(|g| {
                g.lines
                    .iter()
                    .map(|&(role, rect)| TextLine {
                        role,
                        text: role.text_of(&self.entity).unwrap_or_default().to_string(),
                        style: match role {
                            TextRole::DataLabel => style.text2.clone().unwrap_or_else(|| style.text.clone()),
                            TextRole::Header | TextRole::CategoryLabel => style.text.clone(),
                        },
                        line_height: rect.height(),
                        bounds: rect,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let icon = match (&self.entity.icon, geometry.and_then(|g| g.area.icon)) {
            (Some(source), Some(rect)) => Some(IconDescriptor {
                source: source.clone(),
                bounds: rect,
            }),
            _ => None,
        };

        TileDescriptor {
            index: self.index,
            kind: self.variant.kind,
            state: self.effective_state(),
            text: self.entity.text.clone(),
            text2: self.entity.text2.clone(),
            bounds,
            content_bounds: geometry.map(|g| g.area.content).unwrap_or_default(),
            outline: geometry.map(|g| g.outline.path.clone()).unwrap_or_default(),
            shape: geometry.map(|g| g.outline.shape).unwrap_or_default(),
            shape_parameter: geometry.map(|g| g.outline.parameter).unwrap_or_default(),
            fill: style.fill.clone(),
            stroke: style.stroke.clone(),
            lines,
            icon,
            shadow: style.shadow.as_ref().map(|s| {
                let (offset_x, offset_y) = s.direction.offset(s.distance);
                ShadowDescriptor {
                    color: s.color,
                    opacity: s.opacity,
                    offset_x,
                    offset_y,
                    blur: s.strength,
                }
            }),
            glow: style.glow.clone(),
        }
    }
}

fn hover_request(settings: &FormatSettings) -> PassRequest {
    if settings.any_hover_styling() {
        PassRequest::Requested(PassKind::Interaction)
    } else {
        PassRequest::NotNeeded
    }
}
