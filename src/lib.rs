//! Forest plot layout and rendering.
//!
//! A plot request is a JSON document with a `plotConfig` object and a `data`
//! array of rows. Each row becomes one line of the chart: a striped table
//! cell with its description, a confidence interval with a square marker
//! when the row carries effect data, and a numeric (or overridden) label.
//!
//! ```
//! let svg = forestplot::forest_plot(r#"{
//!     "plotConfig": {"effectLabel": "Odds ratio", "vBar": 1},
//!     "data": [
//!         {"description": "Overall", "effect": {"effect": 0.92, "low": 0.88, "high": 0.95}},
//!         {"description": "Subgroup", "descriptionOffset": 1, "effect": {"effect": 0.95, "sd": 0.05}}
//!     ]
//! }"#).unwrap();
//! assert!(svg.contains("0.92 (0.88, 0.95)"));
//! ```

pub mod config;
pub mod domain;
pub mod effect;
pub mod errors;
pub mod format;
pub mod input;
pub mod log;
pub mod render;
pub mod scene;
pub mod surface;
pub mod types;

pub use config::{Margin, PlotConfig, PlotConfigInput};
pub use effect::{EffectSize, EffectTriple};
pub use errors::{Error, MalformedInput, MissingEffectData, RenderError};
pub use input::{PlotInput, Row};
pub use render::{Layout, render, render_with_layout};
pub use scene::Scene;
pub use surface::Surface;

/// Render a JSON plot request to an SVG document.
///
/// Returns the SVG string on success, or a report with diagnostics.
pub fn forest_plot(source: &str) -> Result<String, miette::Report> {
    let input = PlotInput::from_json(source)?;
    let scene = render(&input)?;
    Ok(scene.to_svg())
}
