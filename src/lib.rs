#[cfg(feature = "carla")]
pub mod carla_host;
pub mod constants;
pub mod curve;
pub mod error;
pub mod host;
pub mod layout;
pub mod steer_control;
pub mod vehicle_control;

#[cfg(feature = "carla")]
pub use carla_host::CarlaHost;
pub use curve::{evaluate, Curve, EvaluationDirection};
pub use error::{ConfigurationError, CurveError, CurveName, LoadError, SetupErrors};
pub use host::{average_friction, VehicleHost};
pub use layout::{WheelLayout, WheelPosition};
pub use steer_control::{SteerAngles, SteeringPolicy, SteeringPolicyInit};
pub use vehicle_control::{ActiveSteering, ActiveSteeringInit, Report};
