//! Setup-time error types.
//!
//! Every failure in this crate happens while the calibration tables are
//! being built. Once a [`SteeringPolicy`](crate::steer_control::SteeringPolicy)
//! exists, evaluation is total.

use crate::{curve::EvaluationDirection, layout::WheelPosition};
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Why a single calibration table was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("{breakpoints} breakpoints but {values} values")]
    LengthMismatch { breakpoints: usize, values: usize },

    #[error("table has no entries")]
    Empty,

    #[error("entry {index} is not a finite number")]
    NonFinite { index: usize },

    #[error("breakpoints {index} and {next} are both {value}", next = .index + 1)]
    DuplicateBreakpoint { index: usize, value: f64 },

    #[error("breakpoint {index} ({value}) reverses the ordering of the table")]
    NonMonotonic { index: usize, value: f64 },

    #[error("segment {index} is too steep to evaluate")]
    SegmentOverflow { index: usize },
}

/// Names the calibration table an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveName {
    Front,
    Rear,
    FrontAdjustment,
    RearAdjustment,
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Front => "front speed/angle",
            Self::Rear => "rear speed/angle",
            Self::FrontAdjustment => "front friction adjustment",
            Self::RearAdjustment => "rear friction adjustment",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("the {curve} table is invalid: {source}")]
    Curve {
        curve: CurveName,
        #[source]
        source: CurveError,
    },

    #[error(
        "the friction adjustment tables do not all match in length \
         ({frictions} frictions, {front} front, {rear} rear)"
    )]
    AdjustmentLengthMismatch {
        frictions: usize,
        front: usize,
        rear: usize,
    },

    #[error("the {curve} breakpoints must be {expected}")]
    DirectionMismatch {
        curve: CurveName,
        expected: EvaluationDirection,
    },

    #[error("the angle clamp [{min}, {max}] is not a valid range")]
    InvalidClamp { min: f64, max: f64 },

    #[error("no vehicle controller named \"{name}\" was found")]
    MissingController { name: String },

    #[error("only vehicles with 4 suspensions are supported, found {found}")]
    WheelCount { found: usize },

    #[error("suspension {index} sits on a centre line of the vehicle")]
    AmbiguousWheel { index: usize },

    #[error("more than one suspension was classified as {position}")]
    DuplicateWheel { position: WheelPosition },
}

/// Every configuration problem found during setup.
///
/// Errors are accumulated rather than short-circuited so the operator sees
/// the whole list at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupErrors {
    errors: Vec<ConfigurationError>,
}

impl SetupErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ConfigurationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: SetupErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationError> {
        self.errors.iter()
    }

    /// `Ok(value)` when nothing was collected.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ConfigurationError> for SetupErrors {
    fn from(error: ConfigurationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for SetupErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "There are currently {} setup errors:\n\n", self.len())?;
        for error in &self.errors {
            write!(f, "{error}.\n\n")?;
        }
        Ok(())
    }
}

impl std::error::Error for SetupErrors {}

/// Failure to read a configuration file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed steering configuration: {0}")]
    Json(#[from] serde_json::Error),
}
