//! The dashed vertical reference line (`vBar`).

use glam::dvec2;

use super::layout::PlotLayout;
use super::scale::LinearScale;
use crate::scene::Line;

/// Line at `x(value)` from the top of the first row to the bottom of the last.
pub fn reference_line(value: f64, scale: &LinearScale, geometry: &PlotLayout) -> Line {
    let layout = &geometry.layout;
    let x = scale.map(value);
    let mut line = Line::new(
        dvec2(x, 0.0),
        dvec2(x, geometry.rows_extent()),
        layout.vbar_stroke,
        layout.vbar_stroke_width,
    );
    line.class = Some("vbar");
    line.dash = Some(layout.vbar_dash);
    line
}
