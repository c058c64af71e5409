/// Reference front calibration: speed breakpoints (m/s).
pub const DEFAULT_FRONT_SPEEDS: [f64; 5] = [25.0, 70.0, 80.0, 95.0, 100.0];
/// Reference front calibration: steer limit in degrees at each speed.
pub const DEFAULT_FRONT_ANGLES: [f64; 5] = [44.0, 42.0, 40.0, 35.0, 33.0];

pub const DEFAULT_REAR_SPEEDS: [f64; 3] = [25.0, 70.0, 100.0];
pub const DEFAULT_REAR_ANGLES: [f64; 3] = [18.0, 3.0, 0.0];

// All-zero adjustment disables friction-based correction.
pub const DEFAULT_ADJUSTMENT_FRICTIONS: [f64; 1] = [0.0];
pub const DEFAULT_FRONT_ADJUSTMENTS: [f64; 1] = [0.0];
pub const DEFAULT_REAR_ADJUSTMENTS: [f64; 1] = [0.0];

pub const DEFAULT_ANGLE_CLAMP_MIN_DEGREES: f64 = 0.0;
pub const DEFAULT_ANGLE_CLAMP_MAX_DEGREES: f64 = 46.0;

pub const DEFAULT_CONTROLLER_NAME: &str = "Control Seat";

pub const WHEEL_COUNT: usize = 4;
