use active_steering::{ActiveSteeringInit, CarlaHost, Report, SetupErrors};
use anyhow::Result;
use carla::{
    client::{Client, Vehicle},
    rpc::VehicleControl,
};
use clap::Parser;
use rand::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
struct Opts {
    #[clap(default_value = "127.0.0.1")]
    pub address: String,
    #[clap(default_value = "2000")]
    pub port: u16,
    /// JSON steering calibration. The reference tables are used if omitted.
    #[clap(long)]
    pub config: Option<PathBuf>,
    #[clap(long, default_value = "0.6")]
    pub throttle: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Opts {
        address,
        port,
        config,
        throttle,
    } = Opts::parse();

    let init = match config {
        Some(path) => ActiveSteeringInit::from_path(path)?,
        None => ActiveSteeringInit::default(),
    };

    // Connect to Carla server
    let client = Client::connect(&address, port, None);
    let mut world = client.world();

    // Spawn a car
    let vehicle: Vehicle = {
        let mut rng = rand::thread_rng();

        let spawn_point = {
            let spawn_points = world.map().recommended_spawn_points();
            let index = rng.gen_range(0..spawn_points.len());
            spawn_points
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("map has no spawn points"))?
        };

        world
            .actor_builder("vehicle.tesla.model3")?
            .spawn_vehicle(&spawn_point)?
    };

    // Bind the steering controller to the car
    let (mut host, discovery_errors) = match CarlaHost::new(vehicle) {
        Ok(host) => (Some(host), SetupErrors::new()),
        Err(errors) => (None, errors),
    };
    let mut controller = init.build_with(discovery_errors);
    let Some(host) = host.as_mut() else {
        anyhow::bail!("{}", controller.setup_errors().map(|e| e.to_string()).unwrap_or_default());
    };

    loop {
        world.wait_for_tick();

        // Keep the car rolling so the steer limits sweep through the table
        host.vehicle_mut().apply_control(&VehicleControl {
            throttle,
            steer: 0.0,
            brake: 0.0,
            hand_brake: false,
            reverse: false,
            manual_gear_shift: false,
            gear: 0,
        });

        match controller.step(&mut *host) {
            Report::Steered { speed, angles, .. } => {
                println!(
                    "speed {:6.2} m/s  front {:5.2}°  rear {:5.2}°",
                    speed, angles.front, angles.rear
                );
            }
            Report::Disabled => {}
            Report::SetupFailed { .. } => break,
        }
    }

    Ok(())
}
