//! Linear mapping from effect values to plot-column pixels, and axis ticks.
//!
//! Tick placement picks "nice" steps of 1, 2 or 5 × 10^k, so an axis over
//! `[0.792, 1.133]` with five requested ticks lands on `0.80, 0.85, … 1.10`.

use crate::domain::Domain;
use crate::format::{group_thousands, to_fixed};
use crate::render::defaults::MAX_N_TICKS;

const E10: f64 = 7.0710678118654755; // √50
const E5: f64 = 3.1622776601683795; // √10
const E2: f64 = std::f64::consts::SQRT_2;

/// Maps `domain` linearly onto `[range_start, range_end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: Domain,
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Domain, range_end: f64) -> Self {
        LinearScale {
            domain,
            range: (0.0, range_end),
        }
    }

    /// Pixel position of `value`. Values outside the domain extrapolate.
    ///
    /// A zero-width domain sends everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let width = self.domain.width();
        let t = if width == 0.0 {
            0.5
        } else {
            (value - self.domain.low) / width
        };
        r0 + t * (r1 - r0)
    }

    /// Tick values for roughly `count` ticks, in domain order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.low, self.domain.high, count as f64)
    }

    /// Formatter for the values returned by [`LinearScale::ticks`].
    pub fn tick_format(&self, count: usize) -> TickFormat {
        let step = tick_step(self.domain.low, self.domain.high, count as f64);
        TickFormat {
            precision: precision_fixed(step),
        }
    }
}

/// Fixed-precision tick label formatter with thousands grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickFormat {
    pub precision: usize,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        group_thousands(&to_fixed(value, self.precision))
    }
}

/// Evenly spaced nice values within `[start, stop]`.
///
/// `count` is a hint and is capped at [`MAX_N_TICKS`].
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count.is_nan() || count <= 0.0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some(spec) = tick_spec(lo, hi, count) else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }

    let n = spec.last - spec.first + 1;
    (0..n)
        .map(|i| {
            let k = if reverse { spec.last - i } else { spec.first + i };
            spec.value(k as f64)
        })
        .collect()
}

/// Signed distance between ticks (negative for a reversed interval).
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let increment = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reverse { -step } else { step }
}

/// The step as `10^k · factor` for `k ≥ 0`, or `-10^-k / factor` below one.
///
/// Small steps are kept as their inverse so that multiples of the step are
/// computed by division, which stays exact for values like `0.05`.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).map_or(f64::NAN, |spec| spec.increment)
}

#[derive(Debug, Clone, Copy)]
struct TickSpec {
    first: i64,
    last: i64,
    increment: f64,
}

impl TickSpec {
    fn value(&self, k: f64) -> f64 {
        if self.increment < 0.0 {
            k / -self.increment
        } else {
            k * self.increment
        }
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let step = (stop - start) / count.clamp(0.0, MAX_N_TICKS as f64);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round();
        last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !first.is_finite() || !last.is_finite() {
        // Only reachable for a zero-width or non-finite interval.
        return Some(TickSpec {
            first: 0,
            last: -1,
            increment,
        });
    }
    Some(TickSpec {
        first: first as i64,
        last: last as i64,
        increment,
    })
}

/// Decimals needed to tell apart multiples of `step`.
fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    (-decimal_exponent(step)).max(0) as usize
}

/// Base-10 exponent of the shortest decimal form of `value`.
fn decimal_exponent(value: f64) -> i32 {
    let formatted = format!("{value:e}");
    formatted
        .rsplit_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}
