//! The input document: `{ "plotConfig": { ... }, "data": [ ... ] }`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::{PlotConfig, PlotConfigInput};
use crate::effect::EffectSize;
use crate::errors::{MalformedInput, SourceContext};
use crate::types::positive;

/// One line of the chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Text shown in the table column
    #[serde(default)]
    pub description: String,
    /// Indentation level of the description (0 = flush left)
    #[serde(default)]
    pub description_offset: u32,
    #[serde(default)]
    pub effect: EffectSize,
    /// Scale factor for the effect marker (1 when absent)
    #[serde(default)]
    pub marker_size: Option<f64>,
    /// Replaces the numeric label; an empty string counts as absent
    #[serde(default, deserialize_with = "non_empty")]
    pub override_label: Option<String>,
}

fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.filter(|s| !s.is_empty()))
}

impl Row {
    pub fn new(description: impl Into<String>) -> Self {
        Row {
            description: description.into(),
            description_offset: 0,
            effect: EffectSize::Missing,
            marker_size: None,
            override_label: None,
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.description_offset = offset;
        self
    }

    pub fn with_effect(mut self, effect: EffectSize) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = Some(size);
        self
    }

    pub fn with_override_label(mut self, label: impl Into<String>) -> Self {
        self.override_label = Some(label.into()).filter(|s| !s.is_empty());
        self
    }

    /// Marker scale, defaulting to 1.
    pub fn marker_scale(&self) -> f64 {
        self.marker_size.unwrap_or(1.0)
    }

    fn validate(&self, index: usize) -> Result<(), MalformedInput> {
        if let Some(size) = self.marker_size {
            positive(size).map_err(|reason| MalformedInput::InvalidRow {
                index,
                message: format!("`markerSize` = {size}: {reason}"),
            })?;
        }
        Ok(())
    }
}

/// A validated plot request: resolved configuration plus rows in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotInput {
    pub config: PlotConfig,
    pub rows: Vec<Row>,
}

impl PlotInput {
    pub fn new(config: PlotConfig, rows: Vec<Row>) -> Self {
        PlotInput { config, rows }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(source: &str) -> Result<Self, MalformedInput> {
        Self::from_named_json("<input>", source)
    }

    /// Like [`PlotInput::from_json`], naming the source in diagnostics.
    pub fn from_named_json(name: &str, source: &str) -> Result<Self, MalformedInput> {
        let value: Value = serde_json::from_str(source).map_err(|e| {
            let ctx = SourceContext::new(name, source);
            MalformedInput::Syntax {
                message: e.to_string(),
                span: ctx.span_at(e.line(), e.column()),
                src: ctx.named_source(),
            }
        })?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, MalformedInput> {
        let Value::Object(mut doc) = value else {
            return Err(MalformedInput::NotAnObject);
        };
        let config = doc
            .remove("plotConfig")
            .ok_or(MalformedInput::MissingField { field: "plotConfig" })?;
        let data = doc
            .remove("data")
            .ok_or(MalformedInput::MissingField { field: "data" })?;

        let config: PlotConfigInput =
            serde_json::from_value(config).map_err(|e| MalformedInput::InvalidConfig {
                message: e.to_string(),
            })?;
        let config = PlotConfig::resolve(&config)?;

        let Value::Array(items) = data else {
            return Err(MalformedInput::DataNotASequence);
        };
        let rows = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_row(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        crate::log::debug!(rows = rows.len(), "parsed plot input");
        Ok(PlotInput { config, rows })
    }
}

fn parse_row(index: usize, item: Value) -> Result<Row, MalformedInput> {
    if !item.is_object() {
        return Err(MalformedInput::InvalidRow {
            index,
            message: "expected an object".to_string(),
        });
    }
    let row: Row = serde_json::from_value(item).map_err(|e| MalformedInput::InvalidRow {
        index,
        message: e.to_string(),
    })?;
    row.validate(index)?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let input = PlotInput::from_json(
            r#"{
                "plotConfig": {},
                "data": [
                    {"description": "A", "effect": {"effect": 1, "low": 0.5, "high": 2}},
                    {"description": "B", "descriptionOffset": 2, "markerSize": 0.5},
                    {"description": "C", "overrideLabel": "Ref"}
                ]
            }"#,
        )
        .unwrap();
        let names: Vec<_> = input.rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(input.rows[1].description_offset, 2);
        assert_eq!(input.rows[1].marker_scale(), 0.5);
        assert_eq!(input.rows[0].marker_scale(), 1.0);
        assert!(input.rows[1].effect.is_missing());
        assert_eq!(input.rows[2].override_label.as_deref(), Some("Ref"));
    }

    #[test]
    fn empty_override_label_is_absent() {
        let input =
            PlotInput::from_json(r#"{"plotConfig": {}, "data": [{"overrideLabel": ""}]}"#).unwrap();
        assert_eq!(input.rows[0].override_label, None);
        assert_eq!(input.rows[0].description, "");
    }

    #[test]
    fn missing_top_level_fields() {
        let err = PlotInput::from_json(r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, MalformedInput::MissingField { field: "plotConfig" }));

        let err = PlotInput::from_json(r#"{"plotConfig": {}}"#).unwrap_err();
        assert!(matches!(err, MalformedInput::MissingField { field: "data" }));

        let err = PlotInput::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, MalformedInput::NotAnObject));
    }

    #[test]
    fn data_must_be_a_sequence_of_objects() {
        let err = PlotInput::from_json(r#"{"plotConfig": {}, "data": {"a": 1}}"#).unwrap_err();
        assert!(matches!(err, MalformedInput::DataNotASequence));

        let err = PlotInput::from_json(r#"{"plotConfig": {}, "data": [{}, 3]}"#).unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidRow { index: 1, .. }));

        let err =
            PlotInput::from_json(r#"{"plotConfig": {}, "data": [{"descriptionOffset": -1}]}"#)
                .unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidRow { index: 0, .. }));
    }

    #[test]
    fn marker_size_must_be_positive() {
        let err = PlotInput::from_json(r#"{"plotConfig": {}, "data": [{"markerSize": 0}]}"#)
            .unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidRow { index: 0, .. }));
    }

    #[test]
    fn syntax_errors_carry_a_span() {
        let source = "{\"plotConfig\": {}, \"data\": [,]}";
        let err = PlotInput::from_json(source).unwrap_err();
        match err {
            MalformedInput::Syntax { span, .. } => {
                assert_eq!(&source[span.offset()..span.offset() + span.len()], ",");
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn config_must_be_an_object() {
        let err = PlotInput::from_json(r#"{"plotConfig": 3, "data": []}"#).unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidConfig { .. }));
    }
}
