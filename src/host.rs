use crate::layout::WheelPosition;
use tracing::warn;

/// What the controller needs from the simulator it runs in.
pub trait VehicleHost {
    /// Current vehicle speed in m/s.
    fn vehicle_speed(&self) -> f64;

    fn wheel_friction(&self, wheel: WheelPosition) -> f64;

    /// Commands the steer limit of one wheel, in radians.
    fn set_steer_angle(&mut self, wheel: WheelPosition, radians: f64);

    /// Called once after all four wheels were written in a tick.
    fn finish_tick(&mut self) {}

    /// Shows the setup diagnostic to the operator.
    fn show_diagnostic(&mut self, text: &str) {
        warn!("{text}");
    }
}

/// Unweighted mean friction over the four wheels.
pub fn average_friction<H>(host: &H) -> f64
where
    H: VehicleHost + ?Sized,
{
    let total: f64 = WheelPosition::ALL
        .iter()
        .map(|&wheel| host.wheel_friction(wheel))
        .sum();
    total / WheelPosition::ALL.len() as f64
}
