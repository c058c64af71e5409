use crate::{
    constants::{
        DEFAULT_ADJUSTMENT_FRICTIONS, DEFAULT_ANGLE_CLAMP_MAX_DEGREES,
        DEFAULT_ANGLE_CLAMP_MIN_DEGREES, DEFAULT_FRONT_ADJUSTMENTS, DEFAULT_FRONT_ANGLES,
        DEFAULT_FRONT_SPEEDS, DEFAULT_REAR_ADJUSTMENTS, DEFAULT_REAR_ANGLES, DEFAULT_REAR_SPEEDS,
    },
    curve::{Curve, EvaluationDirection},
    error::{ConfigurationError, CurveName, SetupErrors},
    layout::WheelPosition,
};
use noisy_float::types::R64;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Calibration tables and clamp bounds for [`SteeringPolicy`].
///
/// Angles are in degrees. Paired tables are parallel arrays, so the
/// `n`-th speed goes with the `n`-th angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringPolicyInit {
    pub front_speeds: Vec<f64>,
    pub front_angles: Vec<f64>,
    pub rear_speeds: Vec<f64>,
    pub rear_angles: Vec<f64>,
    pub adjustment_frictions: Vec<f64>,
    pub front_adjustments: Vec<f64>,
    pub rear_adjustments: Vec<f64>,
    pub angle_clamp_min: f64,
    pub angle_clamp_max: f64,
}

impl Default for SteeringPolicyInit {
    fn default() -> Self {
        Self {
            front_speeds: DEFAULT_FRONT_SPEEDS.to_vec(),
            front_angles: DEFAULT_FRONT_ANGLES.to_vec(),
            rear_speeds: DEFAULT_REAR_SPEEDS.to_vec(),
            rear_angles: DEFAULT_REAR_ANGLES.to_vec(),
            adjustment_frictions: DEFAULT_ADJUSTMENT_FRICTIONS.to_vec(),
            front_adjustments: DEFAULT_FRONT_ADJUSTMENTS.to_vec(),
            rear_adjustments: DEFAULT_REAR_ADJUSTMENTS.to_vec(),
            angle_clamp_min: DEFAULT_ANGLE_CLAMP_MIN_DEGREES,
            angle_clamp_max: DEFAULT_ANGLE_CLAMP_MAX_DEGREES,
        }
    }
}

impl SteeringPolicyInit {
    /// True when any adjustment entry is non-zero.
    ///
    /// A NaN entry also enables it, so curve validation gets to reject it.
    pub fn friction_adjustment_enabled(&self) -> bool {
        let total: f64 = self
            .front_adjustments
            .iter()
            .chain(&self.rear_adjustments)
            .map(|value| value.abs())
            .sum();
        total > 0.0 || total.is_nan()
    }

    /// Validates every table and collects all problems before failing.
    pub fn build(&self) -> Result<SteeringPolicy, SetupErrors> {
        let Self {
            ref front_speeds,
            ref front_angles,
            ref rear_speeds,
            ref rear_angles,
            ref adjustment_frictions,
            ref front_adjustments,
            ref rear_adjustments,
            angle_clamp_min,
            angle_clamp_max,
        } = *self;

        let mut errors = SetupErrors::new();

        let front = build_curve(
            CurveName::Front,
            front_speeds,
            front_angles,
            EvaluationDirection::Ascending,
            &mut errors,
        );
        let rear = build_curve(
            CurveName::Rear,
            rear_speeds,
            rear_angles,
            EvaluationDirection::Ascending,
            &mut errors,
        );

        let lengths_match = adjustment_frictions.len() == front_adjustments.len()
            && adjustment_frictions.len() == rear_adjustments.len();
        let adjustment = if !lengths_match {
            errors.push(ConfigurationError::AdjustmentLengthMismatch {
                frictions: adjustment_frictions.len(),
                front: front_adjustments.len(),
                rear: rear_adjustments.len(),
            });
            None
        } else if self.friction_adjustment_enabled() {
            let front = build_curve(
                CurveName::FrontAdjustment,
                adjustment_frictions,
                front_adjustments,
                EvaluationDirection::Descending,
                &mut errors,
            );
            let rear = build_curve(
                CurveName::RearAdjustment,
                adjustment_frictions,
                rear_adjustments,
                EvaluationDirection::Descending,
                &mut errors,
            );
            front
                .zip(rear)
                .map(|(front, rear)| FrictionAdjustment { front, rear })
        } else {
            None
        };

        let clamp_is_valid = matches!(
            (R64::try_new(angle_clamp_min), R64::try_new(angle_clamp_max)),
            (Some(min), Some(max)) if min <= max
        );
        if !clamp_is_valid {
            errors.push(ConfigurationError::InvalidClamp {
                min: angle_clamp_min,
                max: angle_clamp_max,
            });
        }

        let (Some(front), Some(rear)) = (front, rear) else {
            return Err(errors);
        };
        let policy = SteeringPolicy {
            front,
            rear,
            adjustment,
            angle_clamp_min,
            angle_clamp_max,
        };
        let policy = errors.into_result(policy)?;

        debug!(
            front_range = ?policy.front.value_range(),
            rear_range = ?policy.rear.value_range(),
            friction_adjustment = policy.friction_adjustment_enabled(),
            "steering policy ready"
        );
        Ok(policy)
    }
}

fn build_curve(
    name: CurveName,
    breakpoints: &[f64],
    values: &[f64],
    direction: EvaluationDirection,
    errors: &mut SetupErrors,
) -> Option<Curve> {
    let curve = match Curve::new(breakpoints, values) {
        Ok(curve) => curve,
        Err(source) => {
            errors.push(ConfigurationError::Curve {
                curve: name,
                source,
            });
            return None;
        }
    };

    match curve.ordering() {
        Some(ordering) if ordering != direction => {
            errors.push(ConfigurationError::DirectionMismatch {
                curve: name,
                expected: direction,
            });
            None
        }
        _ => Some(curve),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FrictionAdjustment {
    front: Curve,
    rear: Curve,
}

/// Base speed curves plus an optional friction correction, clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringPolicy {
    front: Curve,
    rear: Curve,
    adjustment: Option<FrictionAdjustment>,
    angle_clamp_min: f64,
    angle_clamp_max: f64,
}

impl SteeringPolicy {
    pub fn friction_adjustment_enabled(&self) -> bool {
        self.adjustment.is_some()
    }

    /// Steer limits in degrees for the given speed.
    ///
    /// `average_friction` is ignored unless friction adjustment is enabled.
    pub fn compute_angles(&self, speed: f64, average_friction: Option<f64>) -> SteerAngles {
        let Self {
            ref front,
            ref rear,
            ref adjustment,
            angle_clamp_min,
            angle_clamp_max,
        } = *self;

        let mut front_angle = front.evaluate(speed, EvaluationDirection::Ascending);
        let mut rear_angle = rear.evaluate(speed, EvaluationDirection::Ascending);

        if let (Some(adjustment), Some(friction)) = (adjustment, average_friction) {
            front_angle += adjustment
                .front
                .evaluate(friction, EvaluationDirection::Descending);
            rear_angle += adjustment
                .rear
                .evaluate(friction, EvaluationDirection::Descending);
        }

        SteerAngles {
            front: front_angle.clamp(angle_clamp_min, angle_clamp_max),
            rear: rear_angle.clamp(angle_clamp_min, angle_clamp_max),
        }
    }

    pub fn front_curve(&self) -> &Curve {
        &self.front
    }

    pub fn rear_curve(&self) -> &Curve {
        &self.rear
    }

    pub fn angle_clamp(&self) -> (f64, f64) {
        (self.angle_clamp_min, self.angle_clamp_max)
    }
}

/// Front and rear steer limits in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteerAngles {
    pub front: f64,
    pub rear: f64,
}

impl SteerAngles {
    pub fn degrees(&self, wheel: WheelPosition) -> f64 {
        if wheel.is_front() {
            self.front
        } else {
            self.rear
        }
    }

    /// Per-wheel commands in radians, front pair first.
    pub fn wheel_radians(&self) -> [(WheelPosition, f64); 4] {
        WheelPosition::ALL.map(|wheel| (wheel, self.degrees(wheel).to_radians()))
    }
}
