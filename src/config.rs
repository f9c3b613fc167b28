//! Plot configuration: the caller's partial overrides and the resolved form.

use serde::Deserialize;

use crate::errors::MalformedInput;
use crate::render::defaults;
use crate::types::{NumericError, finite, positive};

/// `plotConfig` as it appears in the input; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfigInput {
    pub mount_node: Option<String>,
    pub width: Option<f64>,
    pub margin: Option<MarginInput>,
    pub effect_label: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub n_ticks: Option<usize>,
    pub v_bar: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MarginInput {
    pub left: Option<f64>,
    pub top: Option<f64>,
}

/// Offset of the whole chart inside the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
}

/// Fully resolved configuration for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Identifier of the mount point the chart is attached to
    pub mount_node: String,
    /// Total image width in pixels
    pub width: f64,
    pub margin: Margin,
    /// Title under the effect axis
    pub effect_label: String,
    pub font_size: f64,
    pub font_family: String,
    /// Approximate number of axis ticks
    pub n_ticks: usize,
    /// Reference line position; `None` draws no line (zero is a real value)
    pub v_bar: Option<f64>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            mount_node: defaults::MOUNT_NODE.to_string(),
            width: defaults::WIDTH,
            margin: Margin {
                left: defaults::MARGIN_LEFT,
                top: defaults::MARGIN_TOP,
            },
            effect_label: defaults::EFFECT_LABEL.to_string(),
            font_size: defaults::FONT_SIZE,
            font_family: defaults::FONT_FAMILY.to_string(),
            n_ticks: defaults::N_TICKS,
            v_bar: None,
        }
    }
}

impl PlotConfig {
    /// Merge caller overrides over the defaults.
    pub fn resolve(input: &PlotConfigInput) -> Result<Self, MalformedInput> {
        let base = PlotConfig::default();
        let margin = input.margin.unwrap_or_default();

        let config = PlotConfig {
            mount_node: input.mount_node.clone().unwrap_or(base.mount_node),
            width: check("width", input.width.unwrap_or(base.width), positive)?,
            margin: Margin {
                left: check("margin.left", margin.left.unwrap_or(base.margin.left), finite)?,
                top: check("margin.top", margin.top.unwrap_or(base.margin.top), finite)?,
            },
            effect_label: input.effect_label.clone().unwrap_or(base.effect_label),
            font_size: check("fontSize", input.font_size.unwrap_or(base.font_size), positive)?,
            font_family: input.font_family.clone().unwrap_or(base.font_family),
            n_ticks: check_tick_count(input.n_ticks.unwrap_or(base.n_ticks))?,
            v_bar: input.v_bar.map(|v| check("vBar", v, finite)).transpose()?,
        };

        crate::log::debug!(
            mount_node = %config.mount_node,
            width = config.width,
            n_ticks = config.n_ticks,
            v_bar = ?config.v_bar,
            "resolved plot config"
        );
        Ok(config)
    }
}

fn check(
    field: &'static str,
    value: f64,
    rule: fn(f64) -> Result<f64, NumericError>,
) -> Result<f64, MalformedInput> {
    rule(value).map_err(|reason| MalformedInput::ConfigOutOfRange {
        field,
        value,
        reason,
    })
}

fn check_tick_count(count: usize) -> Result<usize, MalformedInput> {
    if count > defaults::MAX_N_TICKS {
        return Err(MalformedInput::ConfigOutOfRange {
            field: "nTicks",
            value: count as f64,
            reason: NumericError::TooLarge,
        });
    }
    Ok(count)
}
