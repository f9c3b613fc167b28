//! Default settings and fixed layout constants (all in pixels)
//!
//! `PlotConfig` defaults are the values a caller can override per render.
//! `Layout` holds the geometry that callers cannot override; it is a value
//! rather than loose constants so an alternative layout can be passed to
//! `render_with_layout` without touching the algorithm.

use crate::types::Color;

pub const MOUNT_NODE: &str = "#svg";
pub const WIDTH: f64 = 800.0;
pub const MARGIN_LEFT: f64 = 20.0;
pub const MARGIN_TOP: f64 = 20.0;
pub const EFFECT_LABEL: &str = "Effect";
pub const FONT_SIZE: f64 = 12.0;
pub const FONT_FAMILY: &str = "Helvetica";
pub const N_TICKS: usize = 5;
/// Largest accepted `nTicks`; the tick generator never asks for more.
pub const MAX_N_TICKS: usize = 1000;

/// Left/top inner padding of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
}

/// Fixed geometry and colors of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Height of every row
    pub row_height: f64,
    /// Indentation per `descriptionOffset` level
    pub tab_width: f64,
    /// Side of the effect marker at `markerSize = 1`
    pub square_full_size: f64,
    /// Column fractions of the total width; the label column takes the rest
    pub table_width: f64,
    pub plot_width: f64,
    pub padding: Padding,
    /// Space between the plot column and the label text
    pub label_gutter: f64,
    /// Gap between the last row and the axis baseline
    pub axis_gap: f64,
    /// Added to the vertically centered text position to reach the baseline
    pub text_baseline: f64,
    pub stripe_even: Color,
    pub stripe_odd: Color,
    pub tree_stroke: Color,
    pub tree_stroke_width: f64,
    pub marker_fill: Color,
    pub vbar_stroke: Color,
    pub vbar_stroke_width: f64,
    /// Dash and gap length of the reference line
    pub vbar_dash: (f64, f64),
    pub axis_color: Color,
    pub axis_font_size: f64,
    pub axis_font_family: &'static str,
    /// Length of tick marks below the baseline
    pub tick_size: f64,
    /// Distance from the baseline to the top of tick labels
    pub tick_padding: f64,
    /// Extra downward shift of tick labels, in em
    pub tick_label_dy: f64,
}

impl Layout {
    /// The layout every chart has used so far.
    pub const CLASSIC: Layout = Layout {
        row_height: 26.0,
        tab_width: 12.0,
        square_full_size: 24.0,
        table_width: 0.3,
        plot_width: 0.4,
        padding: Padding {
            left: 5.0,
            top: 10.0,
        },
        label_gutter: 15.0,
        axis_gap: 5.0,
        text_baseline: 10.0,
        stripe_even: Color::rgb(0xf2, 0xf1, 0xf1),
        stripe_odd: Color::WHITE,
        tree_stroke: Color::BLACK,
        tree_stroke_width: 1.0,
        marker_fill: Color::BLACK,
        vbar_stroke: Color::rgb(0x44, 0x44, 0x44),
        vbar_stroke_width: 1.0,
        vbar_dash: (5.0, 5.0),
        axis_color: Color::BLACK,
        axis_font_size: 10.0,
        axis_font_family: "sans-serif",
        tick_size: 6.0,
        tick_padding: 3.0,
        tick_label_dy: 0.71,
    };

    /// Background fill of the row at `index`.
    pub fn stripe(&self, index: usize) -> Color {
        if index % 2 == 0 {
            self.stripe_even
        } else {
            self.stripe_odd
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::CLASSIC
    }
}
