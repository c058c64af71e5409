use crate::{
    constants::WHEEL_COUNT,
    error::{ConfigurationError, SetupErrors},
    host::VehicleHost,
    layout::{WheelLayout, WheelPosition},
};
use carla::{
    client::{ActorBase, Vehicle},
    rpc::VehiclePhysicsControl,
};

/// [`VehicleHost`] backed by a CARLA vehicle.
///
/// CARLA lists the wheels of four-wheel vehicles front-left, front-right,
/// rear-left, rear-right. Steer writes go to the cached physics control and
/// are applied once per tick in [`finish_tick`](VehicleHost::finish_tick).
pub struct CarlaHost {
    vehicle: Vehicle,
    physics_control: VehiclePhysicsControl,
    layout: WheelLayout,
    dirty: bool,
}

impl CarlaHost {
    pub fn new(vehicle: Vehicle) -> Result<Self, SetupErrors> {
        let physics_control = vehicle.physics_control();
        let found = physics_control.wheels.len();
        if found != WHEEL_COUNT {
            return Err(ConfigurationError::WheelCount { found }.into());
        }

        Ok(Self {
            vehicle,
            physics_control,
            layout: WheelLayout::ordered(),
            dirty: false,
        })
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }
}

impl VehicleHost for CarlaHost {
    fn vehicle_speed(&self) -> f64 {
        self.vehicle.velocity().norm() as f64
    }

    fn wheel_friction(&self, wheel: WheelPosition) -> f64 {
        self.physics_control
            .wheels
            .get(self.layout.unit(wheel))
            .map(|wheel| wheel.tire_friction as f64)
            .unwrap_or(0.0)
    }

    fn set_steer_angle(&mut self, wheel: WheelPosition, radians: f64) {
        let unit = self.layout.unit(wheel);
        if let Some(wheel) = self.physics_control.wheels.get_mut(unit) {
            // CARLA keeps steer limits in degrees.
            let degrees = radians.to_degrees() as f32;
            if wheel.max_steer_angle != degrees {
                wheel.max_steer_angle = degrees;
                self.dirty = true;
            }
        }
    }

    fn finish_tick(&mut self) {
        if self.dirty {
            self.vehicle.apply_physics_control(&self.physics_control);
            self.dirty = false;
        }
    }
}
