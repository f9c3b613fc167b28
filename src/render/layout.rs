//! Pixel geometry derived from the configuration and the row count.

use glam::{DVec2, dvec2};

use super::defaults::Layout;
use crate::config::PlotConfig;

/// Positions shared by every part of one render.
///
/// All x offsets are relative to the margin-translated origin; row offsets
/// are relative to the top of the first row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub layout: Layout,
    pub rows: usize,
    /// Image width
    pub width: f64,
    /// Image height, `(rows + 3) × rowHeight`
    pub height: f64,
    /// Left edge of the plot column
    pub plot_x: f64,
    pub plot_width: f64,
    /// Left edge of the label column, gutter included
    pub label_x: f64,
    /// Baseline of cell text, from the top of its row
    pub text_y: f64,
}

impl PlotLayout {
    pub fn compute(config: &PlotConfig, rows: usize, layout: Layout) -> Self {
        let width = config.width;
        let plot_layout = PlotLayout {
            layout,
            rows,
            width,
            height: (rows as f64 + 3.0) * layout.row_height,
            plot_x: layout.table_width * width,
            plot_width: layout.plot_width * width,
            label_x: (layout.table_width + layout.plot_width) * width + layout.label_gutter,
            text_y: (layout.row_height - config.font_size) / 2.0 + layout.text_baseline,
        };
        crate::log::trace!(
            rows,
            height = plot_layout.height,
            plot_x = plot_layout.plot_x,
            label_x = plot_layout.label_x,
            "layout"
        );
        plot_layout
    }

    /// Top of row `index`.
    pub fn row_offset(&self, index: usize) -> f64 {
        index as f64 * self.layout.row_height
    }

    /// Translation of the table cell of row `index`.
    pub fn table_cell(&self, index: usize) -> DVec2 {
        dvec2(0.0, self.row_offset(index))
    }

    /// Translation of the label cell of row `index`.
    pub fn label_cell(&self, index: usize) -> DVec2 {
        dvec2(self.label_x, self.row_offset(index))
    }

    /// Left edge of a description indented `offset` levels.
    pub fn description_x(&self, offset: u32) -> f64 {
        self.layout.padding.left + f64::from(offset) * self.layout.tab_width
    }

    /// Vertical center of a row, from its top.
    pub fn row_center(&self) -> f64 {
        self.layout.row_height / 2.0
    }

    /// Total height covered by the rows.
    pub fn rows_extent(&self) -> f64 {
        self.rows as f64 * self.layout.row_height
    }

    /// Axis baseline, inside the plot column.
    pub fn axis_offset(&self) -> DVec2 {
        dvec2(0.0, self.rows_extent() + self.layout.axis_gap)
    }

    /// Axis title, relative to the axis baseline.
    pub fn title_offset(&self) -> DVec2 {
        dvec2(0.0, self.layout.row_height + self.layout.padding.top)
    }

    /// Side of the effect marker for a row with the given scale.
    pub fn marker_side(&self, scale: f64) -> f64 {
        scale * self.layout.square_full_size
    }
}
