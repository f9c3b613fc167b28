//! The numeric extent of the effect axis.

use crate::effect::normalize;
use crate::errors::RenderError;
use crate::input::Row;

/// Fraction of each bound's magnitude added outside it.
pub const PADDING: f64 = 0.1;

/// Closed interval of effect values covered by the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub low: f64,
    pub high: f64,
}

impl Domain {
    /// Span the lowest `low` and the highest `high` over all rows whose
    /// effect normalizes, then pad each side by 10% of its own magnitude.
    ///
    /// Rows without usable effect data are skipped. If none is left the
    /// axis would be built from infinite bounds, which is reported as
    /// [`RenderError::DegenerateDomain`] instead.
    pub fn from_rows(rows: &[Row]) -> Result<Domain, RenderError> {
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;

        for row in rows {
            let Ok(triple) = normalize(row) else {
                continue;
            };
            low = low.min(triple.low);
            high = high.max(triple.high);
        }

        if !low.is_finite() || !high.is_finite() {
            crate::log::warn!(rows = rows.len(), "no row has usable effect data");
            return Err(RenderError::DegenerateDomain { rows: rows.len() });
        }

        let domain = Domain::padded(low, high);
        crate::log::debug!(low, high, padded_low = domain.low, padded_high = domain.high, "effect domain");
        Ok(domain)
    }

    /// `[low − 0.1·|low|, high + 0.1·|high|]`
    pub fn padded(low: f64, high: f64) -> Domain {
        Domain {
            low: low - (PADDING * low).abs(),
            high: high + (PADDING * high).abs(),
        }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectSize;

    fn interval(low: f64, effect: f64, high: f64) -> Row {
        Row::new("row").with_effect(EffectSize::Interval { effect, low, high })
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn padding_scales_with_magnitude() {
        let domain = Domain::from_rows(&[interval(0.88, 0.92, 0.95), interval(0.91, 0.97, 1.03)])
            .unwrap();
        assert!(close(domain.low, 0.792), "low = {}", domain.low);
        assert!(close(domain.high, 1.133), "high = {}", domain.high);
    }

    #[test]
    fn padding_is_sign_correct_for_negative_bounds() {
        let domain = Domain::from_rows(&[interval(-2.0, -1.0, -0.5)]).unwrap();
        assert!(close(domain.low, -2.2));
        assert!(close(domain.high, -0.45));
    }

    #[test]
    fn rows_without_effect_are_skipped() {
        let rows = vec![
            Row::new("header"),
            interval(1.0, 2.0, 3.0),
            Row::new("sd").with_effect(EffectSize::StdDev { effect: 5.0, sd: 1.0 }),
        ];
        let domain = Domain::from_rows(&rows).unwrap();
        assert!(close(domain.low, 0.9));
        assert!(close(domain.high, 6.6));
    }

    #[test]
    fn no_usable_rows_is_degenerate() {
        let rows = vec![Row::new("a"), Row::new("b")];
        assert_eq!(
            Domain::from_rows(&rows),
            Err(RenderError::DegenerateDomain { rows: 2 })
        );
        assert_eq!(
            Domain::from_rows(&[]),
            Err(RenderError::DegenerateDomain { rows: 0 })
        );
    }

    #[test]
    fn zero_bounds_stay_put() {
        let domain = Domain::padded(0.0, 0.0);
        assert_eq!(domain, Domain { low: 0.0, high: 0.0 });
        assert_eq!(domain.width(), 0.0);
    }
}
