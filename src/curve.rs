//! Piecewise-linear calibration tables.

use crate::error::CurveError;
use noisy_float::types::R64;
use std::fmt;

/// Which way a query is compared against the breakpoints.
///
/// `Ascending` picks the first breakpoint with `x <= breakpoint`, which suits
/// tables whose breakpoints increase (speed). `Descending` picks the first
/// with `x >= breakpoint`, for tables running down toward zero (friction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationDirection {
    Ascending,
    Descending,
}

impl fmt::Display for EvaluationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// An immutable breakpoint table with per-segment slope and intercept
/// computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    breakpoints: Vec<f64>,
    values: Vec<f64>,
    slopes: Vec<f64>,
    intercepts: Vec<f64>,
    ordering: Option<EvaluationDirection>,
}

impl Curve {
    /// Validates the table and caches the segment coefficients.
    ///
    /// Breakpoints may run in either direction but must be strictly
    /// monotonic. A single point is accepted and evaluates to its value
    /// everywhere.
    pub fn new(breakpoints: &[f64], values: &[f64]) -> Result<Self, CurveError> {
        if breakpoints.len() != values.len() {
            return Err(CurveError::LengthMismatch {
                breakpoints: breakpoints.len(),
                values: values.len(),
            });
        }
        if breakpoints.is_empty() {
            return Err(CurveError::Empty);
        }

        let index = breakpoints
            .iter()
            .zip(values)
            .position(|(&x, &y)| R64::try_new(x).is_none() || R64::try_new(y).is_none());
        if let Some(index) = index {
            return Err(CurveError::NonFinite { index });
        }

        let ordering = table_ordering(breakpoints)?;

        let segments = breakpoints.len() - 1;
        let mut slopes = Vec::with_capacity(segments);
        let mut intercepts = Vec::with_capacity(segments);

        for (index, (x, y)) in breakpoints.windows(2).zip(values.windows(2)).enumerate() {
            let (x0, x1, y0, y1) = (x[0], x[1], y[0], y[1]);
            let slope = (y1 - y0) / (x1 - x0);
            let intercept = y0 - slope * x0;

            // The segment must also stay finite where it is evaluated.
            let overflows = [slope, intercept, slope * x1 + intercept]
                .iter()
                .any(|&coefficient| R64::try_new(coefficient).is_none());
            if overflows {
                return Err(CurveError::SegmentOverflow { index });
            }

            slopes.push(slope);
            intercepts.push(intercept);
        }

        Ok(Self {
            breakpoints: breakpoints.to_vec(),
            values: values.to_vec(),
            slopes,
            intercepts,
            ordering,
        })
    }

    /// Evaluates the curve at `x`. See [`evaluate`].
    pub fn evaluate(&self, x: f64, direction: EvaluationDirection) -> f64 {
        evaluate(self, x, direction)
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    pub fn intercepts(&self) -> &[f64] {
        &self.intercepts
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Direction the breakpoints run in, or `None` for a single point.
    pub fn ordering(&self) -> Option<EvaluationDirection> {
        self.ordering
    }

    /// Smallest and largest tabulated value.
    pub fn value_range(&self) -> (f64, f64) {
        let finite = || self.values.iter().map(|&v| R64::new(v));
        // Construction guarantees at least one finite value.
        let min = finite().min().map(|v| v.raw()).unwrap_or(f64::NAN);
        let max = finite().max().map(|v| v.raw()).unwrap_or(f64::NAN);
        (min, max)
    }
}

/// Looks up `x` in `curve`.
///
/// Walks the breakpoints in stored order and stops at the first one passing
/// the directional test. The first breakpoint returns its own value, any
/// later one interpolates on the segment that ends there. When nothing
/// passes, the last value is returned, so inputs beyond either end of the
/// table extrapolate flat.
pub fn evaluate(curve: &Curve, x: f64, direction: EvaluationDirection) -> f64 {
    let Curve {
        ref breakpoints,
        ref values,
        ref slopes,
        ref intercepts,
        ..
    } = *curve;

    let hit = breakpoints.iter().position(|&bound| match direction {
        EvaluationDirection::Ascending => x <= bound,
        EvaluationDirection::Descending => x >= bound,
    });

    match hit {
        Some(0) => values[0],
        Some(i) => slopes[i - 1] * x + intercepts[i - 1],
        None => values[values.len() - 1],
    }
}

fn table_ordering(breakpoints: &[f64]) -> Result<Option<EvaluationDirection>, CurveError> {
    let mut ordering = None;

    for (index, pair) in breakpoints.windows(2).enumerate() {
        let (lhs, rhs) = (R64::new(pair[0]), R64::new(pair[1]));
        let step = if rhs > lhs {
            EvaluationDirection::Ascending
        } else if rhs < lhs {
            EvaluationDirection::Descending
        } else {
            return Err(CurveError::DuplicateBreakpoint {
                index,
                value: pair[0],
            });
        };

        match ordering {
            None => ordering = Some(step),
            Some(prev) if prev != step => {
                return Err(CurveError::NonMonotonic {
                    index: index + 1,
                    value: pair[1],
                });
            }
            Some(_) => {}
        }
    }

    Ok(ordering)
}
