//! Layout and rendering of a forest plot
//!
//! This module is organized into submodules:
//! - `defaults`: Default settings and the fixed `Layout`
//! - `layout`: Per-render pixel geometry
//! - `scale`: Linear scale and tick generation
//! - `axis`: The effect axis and its title
//! - `rows`: Table cells, trees and labels
//! - `reference`: The dashed reference line
//! - `svg`: SVG generation

pub mod axis;
pub mod defaults;
pub mod layout;
pub mod reference;
pub mod rows;
pub mod scale;
pub mod svg;

use glam::dvec2;

pub use defaults::Layout;
pub use layout::PlotLayout;
pub use scale::LinearScale;

use crate::domain::Domain;
use crate::effect::{EffectTriple, normalize};
use crate::errors::RenderError;
use crate::input::PlotInput;
use crate::scene::{Group, Scene};

/// Render a plot request into a scene with the classic layout.
pub fn render(input: &PlotInput) -> Result<Scene, RenderError> {
    render_with_layout(input, Layout::CLASSIC)
}

/// Render a plot request with explicit layout constants.
///
/// The domain is computed first, so a plot with no usable effect data fails
/// before anything is built.
pub fn render_with_layout(input: &PlotInput, layout: Layout) -> Result<Scene, RenderError> {
    let config = &input.config;
    let domain = Domain::from_rows(&input.rows)?;
    let geometry = PlotLayout::compute(config, input.rows.len(), layout);
    let scale = LinearScale::new(domain, geometry.plot_width);

    let effects: Vec<Option<EffectTriple>> = input
        .rows
        .iter()
        .map(|row| normalize(row).ok())
        .collect();

    let mut table = Group::new().with_class("table");
    for (index, row) in input.rows.iter().enumerate() {
        table.push(rows::table_cell(index, row, &geometry, config));
    }

    let mut plot = Group::new()
        .with_class("plot")
        .translated(dvec2(geometry.plot_x, 0.0));
    plot.push(axis::axis(&scale, &geometry, config));
    for (index, (row, effect)) in input.rows.iter().zip(&effects).enumerate() {
        if let Some(effect) = effect {
            plot.push(rows::tree(index, effect, row.marker_scale(), &scale, &geometry));
        }
    }
    if let Some(value) = config.v_bar {
        plot.push(reference::reference_line(value, &scale, &geometry));
    }

    let mut labels = Group::new().with_class("labels");
    for (index, (row, effect)) in input.rows.iter().zip(&effects).enumerate() {
        if let Some(text) = rows::label_text(row, effect.as_ref()) {
            labels.push(rows::label_cell(index, text, &geometry, config));
        }
    }

    let root = Group::new()
        .translated(dvec2(config.margin.left, config.margin.top))
        .with_child(table)
        .with_child(plot)
        .with_child(labels);

    let scene = Scene {
        mount_node: config.mount_node.clone(),
        width: config.width,
        height: geometry.height,
        root,
    };
    crate::log::debug!(
        rows = input.rows.len(),
        trees = effects.iter().flatten().count(),
        primitives = scene.primitive_count(),
        "rendered forest plot"
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::effect::EffectSize;
    use crate::input::Row;

    fn input(rows: Vec<Row>, v_bar: Option<f64>) -> PlotInput {
        let config = PlotConfig {
            v_bar,
            ..PlotConfig::default()
        };
        PlotInput::new(config, rows)
    }

    fn interval(name: &str, low: f64, effect: f64, high: f64) -> Row {
        Row::new(name).with_effect(EffectSize::Interval { effect, low, high })
    }

    #[test]
    fn missing_effect_rows_get_no_tree_or_label() {
        let scene = render(&input(
            vec![interval("a", 1.0, 2.0, 3.0), Row::new("b")],
            None,
        ))
        .unwrap();
        assert_eq!(scene.groups("row").len(), 2);
        assert_eq!(scene.groups("tree").len(), 1);
        assert_eq!(scene.groups("label").len(), 1);
    }

    #[test]
    fn reference_line_only_when_configured() {
        let rows = vec![interval("a", 1.0, 2.0, 3.0)];
        let without = render(&input(rows.clone(), None)).unwrap();
        let with = render(&input(rows, Some(0.0))).unwrap();
        assert_eq!(with.primitive_count(), without.primitive_count() + 1);
    }

    #[test]
    fn no_usable_rows_fails_before_drawing() {
        let err = render(&input(vec![Row::new("a")], Some(1.0))).unwrap_err();
        assert_eq!(err, RenderError::DegenerateDomain { rows: 1 });
    }

    #[test]
    fn scene_is_sized_by_config_and_row_count() {
        let scene = render(&input(vec![interval("a", 1.0, 2.0, 3.0)], None)).unwrap();
        assert_eq!((scene.width, scene.height), (800.0, 104.0));
        assert_eq!(scene.mount_node, "#svg");
        assert_eq!(scene.root.translate, Some(dvec2(20.0, 20.0)));
    }

    #[test]
    fn custom_layout_changes_geometry() {
        let layout = Layout {
            row_height: 30.0,
            ..Layout::CLASSIC
        };
        let scene = render_with_layout(&input(vec![interval("a", 1.0, 2.0, 3.0)], None), layout)
            .unwrap();
        assert_eq!(scene.height, 120.0);
    }
}
