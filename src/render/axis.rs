//! The effect axis under the plot column, with its bold title.

use glam::dvec2;

use super::layout::PlotLayout;
use super::scale::LinearScale;
use crate::config::PlotConfig;
use crate::scene::{Font, Group, Line, Node, Primitive, Text, TextAnchor};

/// Baseline with outer ticks, one tick per nice value, and the title.
pub fn axis(scale: &LinearScale, geometry: &PlotLayout, config: &PlotConfig) -> Group {
    let layout = &geometry.layout;
    let color = layout.axis_color;
    let (r0, r1) = scale.range;

    let mut group = Group::new()
        .with_class("axis")
        .translated(geometry.axis_offset())
        .with_font(Font::new(layout.axis_font_size, layout.axis_font_family))
        .with_anchor(TextAnchor::Middle);

    let mut baseline = Line::new(dvec2(r0, 0.0), dvec2(r1, 0.0), color, 1.0);
    baseline.class = Some("domain");
    group.push(baseline);
    for x in [r0, r1] {
        let mut outer = Line::new(dvec2(x, 0.0), dvec2(x, layout.tick_size), color, 1.0);
        outer.class = Some("domain");
        group.push(outer);
    }

    let values = scale.ticks(config.n_ticks);
    let format = scale.tick_format(config.n_ticks);
    crate::log::trace!(ticks = values.len(), precision = format.precision, "axis ticks");
    for value in values {
        let mut label = Text::new(0.0, layout.tick_size + layout.tick_padding, format.format(value))
            .with_fill(color);
        label.dy_em = Some(layout.tick_label_dy);
        let tick = Group::new()
            .with_class("tick")
            .translated(dvec2(scale.map(value), 0.0))
            .with_child(Line::new(
                dvec2(0.0, 0.0),
                dvec2(0.0, layout.tick_size),
                color,
                1.0,
            ))
            .with_child(label);
        group.push(tick);
    }

    let title = Text::new(geometry.plot_width / 2.0, 0.0, config.effect_label.as_str())
        .with_fill(color)
        .with_anchor(TextAnchor::Middle)
        .with_font(Font::sized(config.font_size).bold());
    group.push(
        Group::new()
            .with_class("title")
            .translated(geometry.title_offset())
            .with_child(title),
    );

    group
}

/// Tick label strings of an axis group, in order.
pub fn tick_labels(axis: &Group) -> Vec<String> {
    axis.children
        .iter()
        .filter_map(|node| match node {
            Node::Group(g) if g.class == Some("tick") => g
                .children
                .iter()
                .find_map(|child| child.content().map(str::to_string)),
            _ => None,
        })
        .collect()
}
