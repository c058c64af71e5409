use crate::{
    constants::DEFAULT_CONTROLLER_NAME,
    error::{LoadError, SetupErrors},
    host::{average_friction, VehicleHost},
    steer_control::{SteerAngles, SteeringPolicy, SteeringPolicyInit},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, trace, warn};

/// Complete controller configuration.
///
/// Every field may be omitted from a configuration file; missing ones fall
/// back to the reference calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveSteeringInit {
    /// Master switch. A disabled controller still validates its tables but
    /// never writes steer angles.
    pub enabled: bool,
    /// Name of the seat or remote the host binding should drive from.
    pub controller_name: String,
    #[serde(flatten)]
    pub policy: SteeringPolicyInit,
}

impl Default for ActiveSteeringInit {
    fn default() -> Self {
        Self {
            enabled: true,
            controller_name: DEFAULT_CONTROLLER_NAME.to_string(),
            policy: SteeringPolicyInit::default(),
        }
    }
}

impl ActiveSteeringInit {
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn build(&self) -> ActiveSteering {
        self.build_with(SetupErrors::new())
    }

    /// Builds the controller, folding in errors the host binding already hit
    /// during discovery so they are all reported together.
    pub fn build_with(&self, discovery_errors: SetupErrors) -> ActiveSteering {
        let Self {
            enabled,
            ref controller_name,
            ref policy,
        } = *self;

        let mut errors = discovery_errors;
        let policy = match policy.build() {
            Ok(policy) => Some(policy),
            Err(policy_errors) => {
                errors.extend(policy_errors);
                None
            }
        };

        let state = match policy {
            Some(policy) if errors.is_empty() => {
                debug!(enabled, controller = %controller_name, "active steering running");
                State::Running(policy)
            }
            _ => {
                warn!(count = errors.len(), "active steering setup failed");
                State::SetupFailed(errors)
            }
        };

        ActiveSteering {
            state,
            enabled,
            controller_name: controller_name.clone(),
            ticks: 0,
        }
    }
}

#[derive(Debug)]
enum State {
    Running(SteeringPolicy),
    SetupFailed(SetupErrors),
}

/// Per-tick steering controller.
///
/// Once setup has failed the controller stays inert for its whole lifetime;
/// fixing the configuration means building a new one.
#[derive(Debug)]
pub struct ActiveSteering {
    state: State,
    enabled: bool,
    controller_name: String,
    ticks: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Steered {
        speed: f64,
        average_friction: Option<f64>,
        angles: SteerAngles,
    },
    Disabled,
    SetupFailed {
        error_count: usize,
    },
}

impl ActiveSteering {
    pub fn step<H>(&mut self, host: &mut H) -> Report
    where
        H: VehicleHost + ?Sized,
    {
        self.ticks += 1;

        let policy = match &self.state {
            State::SetupFailed(errors) => {
                host.show_diagnostic(&errors.to_string());
                return Report::SetupFailed {
                    error_count: errors.len(),
                };
            }
            State::Running(_) if !self.enabled => return Report::Disabled,
            State::Running(policy) => policy,
        };

        let speed = host.vehicle_speed();
        let friction = policy
            .friction_adjustment_enabled()
            .then(|| average_friction(&*host));
        let angles = policy.compute_angles(speed, friction);

        for (wheel, radians) in angles.wheel_radians() {
            host.set_steer_angle(wheel, radians);
        }
        host.finish_tick();

        trace!(
            tick = self.ticks,
            speed,
            friction,
            front = angles.front,
            rear = angles.rear,
            "steered"
        );

        Report::Steered {
            speed,
            average_friction: friction,
            angles,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn policy(&self) -> Option<&SteeringPolicy> {
        match &self.state {
            State::Running(policy) => Some(policy),
            State::SetupFailed(_) => None,
        }
    }

    pub fn setup_errors(&self) -> Option<&SetupErrors> {
        match &self.state {
            State::Running(_) => None,
            State::SetupFailed(errors) => Some(errors),
        }
    }

    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    /// Number of times `step` has been called.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_overrides_only_given_fields() {
        let init = ActiveSteeringInit::from_json_str(
            r#"{ "controller_name": "Driver Seat", "rear_speeds": [10, 40], "rear_angles": [12, 0] }"#,
        )
        .unwrap();

        assert!(init.enabled);
        assert_eq!(init.controller_name, "Driver Seat");
        assert_eq!(init.policy.rear_speeds, vec![10.0, 40.0]);
        assert_eq!(init.policy.front_speeds, SteeringPolicyInit::default().front_speeds);
        assert_eq!(init.policy.angle_clamp_max, 46.0);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = ActiveSteeringInit::from_json_str(r#"{ "front_speeds": "fast" }"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ActiveSteeringInit::from_path("/nonexistent/steering.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/steering.json"));
    }

    #[test]
    fn discovery_errors_block_a_valid_policy() {
        let discovery = SetupErrors::from(crate::error::ConfigurationError::WheelCount { found: 2 });
        let controller = ActiveSteeringInit::default().build_with(discovery);
        assert!(!controller.is_running());
        assert!(controller.policy().is_none());
        assert_eq!(controller.setup_errors().map(SetupErrors::len), Some(1));
    }
}
