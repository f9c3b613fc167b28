//! Effect sizes and their normalization to a `(low, mid, high)` triple.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::MissingEffectData;
use crate::format::to_fixed;
use crate::input::Row;

/// How a row states its effect size.
///
/// Deserialized from the loose JSON object `{effect, low, high, sd}`: which
/// variant is chosen depends on which fields are present, with the explicit
/// interval winning over the standard deviation form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EffectSize {
    /// Center plus explicit bounds, kept as given (they may be asymmetric).
    Interval { effect: f64, low: f64, high: f64 },
    /// Center plus a standard deviation on either side.
    StdDev { effect: f64, sd: f64 },
    /// No effect field, or one that matches neither shape.
    #[default]
    Missing,
}

impl<'de> Deserialize<'de> for EffectSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(EffectSize::from_value(&value))
    }
}

impl EffectSize {
    /// Classify a loose effect value. Anything that is not an object with
    /// numeric members in one of the two shapes is [`EffectSize::Missing`].
    pub fn from_value(value: &Value) -> Self {
        let number = |key: &str| value.get(key).and_then(Value::as_f64);
        match (number("effect"), number("low"), number("high"), number("sd")) {
            (Some(effect), Some(low), Some(high), _) => EffectSize::Interval { effect, low, high },
            (Some(effect), _, _, Some(sd)) => EffectSize::StdDev { effect, sd },
            _ => EffectSize::Missing,
        }
    }

    /// Reduce to the canonical triple drawn by the tree and the label.
    pub fn normalize(&self) -> Result<EffectTriple, MissingEffectData> {
        match *self {
            EffectSize::Interval { effect, low, high } => Ok(EffectTriple {
                low,
                mid: effect,
                high,
            }),
            EffectSize::StdDev { effect, sd } => Ok(EffectTriple {
                low: effect - sd,
                mid: effect,
                high: effect + sd,
            }),
            EffectSize::Missing => Err(MissingEffectData),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, EffectSize::Missing)
    }
}

/// Normalized effect: interval bounds around a point estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectTriple {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl EffectTriple {
    /// The label column text, e.g. `0.92 (0.88, 0.95)`.
    pub fn label(&self) -> String {
        format!(
            "{} ({}, {})",
            to_fixed(self.mid, 2),
            to_fixed(self.low, 2),
            to_fixed(self.high, 2)
        )
    }
}

/// Normalize a row's effect.
pub fn normalize(row: &Row) -> Result<EffectTriple, MissingEffectData> {
    row.effect.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> EffectSize {
        serde_json::from_str(json).expect("effect json")
    }

    #[test]
    fn interval_is_returned_unchanged() {
        let effect = parse(r#"{"effect": 0.92, "low": 0.80, "high": 0.95}"#);
        let triple = effect.normalize().unwrap();
        assert_eq!(
            triple,
            EffectTriple {
                low: 0.80,
                mid: 0.92,
                high: 0.95
            }
        );
    }

    #[test]
    fn interval_wins_over_sd() {
        let effect = parse(r#"{"effect": 1.0, "low": 0.5, "high": 1.1, "sd": 0.2}"#);
        assert_eq!(
            effect,
            EffectSize::Interval {
                effect: 1.0,
                low: 0.5,
                high: 1.1
            }
        );
        let triple = effect.normalize().unwrap();
        assert_eq!((triple.low, triple.mid, triple.high), (0.5, 1.0, 1.1));
    }

    #[test]
    fn non_numeric_bound_falls_back_to_sd() {
        let effect = parse(r#"{"effect": 1.0, "low": null, "high": 1.2, "sd": 0.1}"#);
        assert_eq!(effect, EffectSize::StdDev { effect: 1.0, sd: 0.1 });
    }

    #[test]
    fn sd_expands_symmetrically() {
        let effect = parse(r#"{"effect": 2.0, "sd": 0.5}"#);
        let triple = effect.normalize().unwrap();
        assert_eq!((triple.low, triple.mid, triple.high), (1.5, 2.0, 2.5));
    }

    #[test]
    fn partial_interval_falls_back_to_sd() {
        let effect = parse(r#"{"effect": 2.0, "low": 1.0, "sd": 0.25}"#);
        assert_eq!(effect, EffectSize::StdDev { effect: 2.0, sd: 0.25 });
    }

    #[test]
    fn unrecognized_shapes_are_missing() {
        for json in [
            r#"{"effect": 0.9}"#,
            r#"{"low": 0.8, "high": 1.2}"#,
            r#"{"sd": 0.1}"#,
            r#"{}"#,
            "null",
            r#""NA""#,
            "5",
            "[0.9, 0.8, 1.0]",
            r#"{"effect": "0.9", "sd": 0.1}"#,
            r#"{"effect": 0.9, "low": "0.8", "high": 1.0}"#,
        ] {
            let effect = parse(json);
            assert!(effect.is_missing(), "{json} should be missing");
            assert_eq!(effect.normalize(), Err(MissingEffectData));
        }
    }

    #[test]
    fn label_uses_two_decimals() {
        let triple = EffectTriple {
            low: 0.88,
            mid: 0.92,
            high: 0.95,
        };
        assert_eq!(triple.label(), "0.92 (0.88, 0.95)");

        let triple = EffectTriple {
            low: -1.5,
            mid: 0.0,
            high: 1.5,
        };
        assert_eq!(triple.label(), "0.00 (-1.50, 1.50)");
    }
}
