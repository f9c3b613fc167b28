//! Error types with rich diagnostics using miette
//!
//! Input errors carry source spans when the JSON itself is broken, so a
//! terminal report can point at the offending byte.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Convert a 1-based line/column pair (as reported by serde_json) into a
    /// one-byte span. Column 0 means "before the first character".
    pub fn span_at(&self, line: usize, column: usize) -> SourceSpan {
        let mut offset = 0;
        for (index, text) in self.source.split_inclusive('\n').enumerate() {
            if index + 1 == line {
                offset += column.saturating_sub(1).min(text.len());
                break;
            }
            offset += text.len();
        }
        let offset = offset.min(self.source.len());
        let len = usize::from(offset < self.source.len());
        SourceSpan::new(offset.into(), len)
    }
}

// ============================================================================
// Input Errors
// ============================================================================

/// The input document could not be turned into a plot request.
///
/// Raised before anything is drawn; a mounted chart stays as it was.
#[derive(Error, Diagnostic, Debug)]
pub enum MalformedInput {
    #[error("invalid JSON: {message}")]
    #[diagnostic(code(forestplot::input::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("input must be a JSON object")]
    #[diagnostic(
        code(forestplot::input::not_an_object),
        help("expected {{ \"plotConfig\": {{ ... }}, \"data\": [ ... ] }}")
    )]
    NotAnObject,

    #[error("missing top-level field `{field}`")]
    #[diagnostic(
        code(forestplot::input::missing_field),
        help("the input needs both `plotConfig` and `data`")
    )]
    MissingField { field: &'static str },

    #[error("`data` must be an array of row objects")]
    #[diagnostic(code(forestplot::input::data_not_a_sequence))]
    DataNotASequence,

    #[error("row {index} is malformed: {message}")]
    #[diagnostic(code(forestplot::input::invalid_row))]
    InvalidRow { index: usize, message: String },

    #[error("invalid `plotConfig`: {message}")]
    #[diagnostic(code(forestplot::input::invalid_config))]
    InvalidConfig { message: String },

    #[error("`plotConfig.{field}` = {value} is out of range: {reason}")]
    #[diagnostic(code(forestplot::input::config_out_of_range))]
    ConfigOutOfRange {
        field: &'static str,
        value: f64,
        reason: NumericError,
    },
}

// ============================================================================
// Effect Errors
// ============================================================================

/// A row's effect matches neither `{effect, low, high}` nor `{effect, sd}`.
///
/// Always recovered from: the row is drawn with its description only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("row has no usable effect size: expected `effect` with `low` and `high`, or `effect` with `sd`")]
pub struct MissingEffectData;

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("none of the {rows} rows has usable effect data, so the effect axis has no domain")]
    #[diagnostic(
        code(forestplot::render::degenerate_domain),
        help("give at least one row an `effect` with `low`/`high` or with `sd`")
    )]
    DegenerateDomain { rows: usize },
}

// ============================================================================
// Top-level
// ============================================================================

/// Anything that can stop a plot from being drawn.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] MalformedInput),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_points_at_line_and_column() {
        let ctx = SourceContext::new("<input>", "{\n  \"data\": [,]\n}");
        let span = ctx.span_at(2, 12);
        // line 1 is "{\n" (2 bytes), then 11 bytes into line 2
        assert_eq!(span.offset(), 13);
        assert_eq!(span.len(), 1);
        assert_eq!(&ctx.source[13..14], ",");
    }

    #[test]
    fn span_clamps_past_end_of_input() {
        let ctx = SourceContext::new("<input>", "{\"data\": [");
        let span = ctx.span_at(1, 99);
        assert_eq!(span.offset(), ctx.source.len());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn degenerate_domain_has_a_code() {
        let err = RenderError::DegenerateDomain { rows: 3 };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("forestplot::render::degenerate_domain"));
    }
}
