//! Per-row primitives: table cell, tree and label cell.

use glam::dvec2;

use super::layout::PlotLayout;
use super::scale::LinearScale;
use crate::config::PlotConfig;
use crate::effect::EffectTriple;
use crate::input::Row;
use crate::scene::{Font, Group, Line, Rect, Text};
use crate::types::Dimension;

/// Striped background plus the indented description.
pub fn table_cell(index: usize, row: &Row, geometry: &PlotLayout, config: &PlotConfig) -> Group {
    let layout = &geometry.layout;
    let background = Rect {
        x: 0.0,
        y: 0.0,
        width: Dimension::FULL,
        height: Dimension::Px(layout.row_height),
        fill: Some(layout.stripe(index)),
    };
    let description = Text::new(
        geometry.description_x(row.description_offset),
        geometry.text_y,
        row.description.as_str(),
    )
    .with_font(Font::new(config.font_size, config.font_family.as_str()));

    Group::new()
        .with_class("row")
        .translated(geometry.table_cell(index))
        .with_child(background)
        .with_child(description)
}

/// Interval line from `low` to `high` with a square marker on `mid`.
pub fn tree(
    index: usize,
    effect: &EffectTriple,
    marker_scale: f64,
    scale: &LinearScale,
    geometry: &PlotLayout,
) -> Group {
    let layout = &geometry.layout;
    let center = geometry.row_center();
    let interval = Line::new(
        dvec2(scale.map(effect.low), center),
        dvec2(scale.map(effect.high), center),
        layout.tree_stroke,
        layout.tree_stroke_width,
    );

    let side = geometry.marker_side(marker_scale);
    let marker = Rect {
        x: scale.map(effect.mid) - side / 2.0,
        y: center - side / 2.0,
        width: Dimension::Px(side),
        height: Dimension::Px(side),
        fill: Some(layout.marker_fill),
    };

    Group::new()
        .with_class("tree")
        .translated(dvec2(0.0, geometry.row_offset(index)))
        .with_child(interval)
        .with_child(marker)
}

/// Text for the label column: the override if any, else the numeric
/// summary if the effect normalized, else nothing.
pub fn label_text(row: &Row, effect: Option<&EffectTriple>) -> Option<String> {
    row.override_label
        .clone()
        .or_else(|| effect.map(EffectTriple::label))
}

pub fn label_cell(index: usize, text: String, geometry: &PlotLayout, config: &PlotConfig) -> Group {
    let label = Text::new(geometry.layout.padding.left, geometry.text_y, text)
        .with_font(Font::new(config.font_size, config.font_family.as_str()));
    Group::new()
        .with_class("label")
        .translated(geometry.label_cell(index))
        .with_child(label)
}
