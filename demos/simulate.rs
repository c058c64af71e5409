use active_steering::{
    ActiveSteeringInit, Report, SetupErrors, VehicleHost, WheelLayout, WheelPosition,
};
use anyhow::Result;
use clap::Parser;
use rand::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
struct Opts {
    /// JSON steering calibration. The reference tables are used if omitted.
    #[clap(long)]
    pub config: Option<PathBuf>,
    #[clap(long, default_value = "600")]
    pub ticks: usize,
    /// Top speed reached at the end of the run, in m/s.
    #[clap(long, default_value = "120")]
    pub top_speed: f64,
    /// Print one line every this many ticks.
    #[clap(long, default_value = "60")]
    pub every: usize,
}

/// A car accelerating in a straight line over patchy ground.
struct SimulatedCar {
    layout: WheelLayout,
    speed: f64,
    frictions: [f64; 4],
    steer_limits: [f64; 4],
}

impl VehicleHost for SimulatedCar {
    fn vehicle_speed(&self) -> f64 {
        self.speed
    }

    fn wheel_friction(&self, wheel: WheelPosition) -> f64 {
        self.frictions[self.layout.unit(wheel)]
    }

    fn set_steer_angle(&mut self, wheel: WheelPosition, radians: f64) {
        self.steer_limits[self.layout.unit(wheel)] = radians;
    }

    fn show_diagnostic(&mut self, text: &str) {
        eprintln!("{text}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Opts {
        config,
        ticks,
        top_speed,
        every,
    } = Opts::parse();

    let init = match config {
        Some(path) => ActiveSteeringInit::from_path(path)?,
        None => ActiveSteeringInit::default(),
    };

    let mut rng = rand::thread_rng();

    // Suspensions are discovered in no particular order.
    let mut body_positions = vec![
        [-0.8, -0.3, -1.3],
        [0.8, -0.3, -1.3],
        [-0.8, -0.3, 1.4],
        [0.8, -0.3, 1.4],
    ];
    body_positions.shuffle(&mut rng);

    let mut discovery_errors = SetupErrors::new();
    let layout = WheelLayout::classify(&body_positions).unwrap_or_else(|errors| {
        discovery_errors.extend(errors);
        WheelLayout::ordered()
    });

    let mut controller = init.build_with(discovery_errors);
    println!("driving from \"{}\"", controller.controller_name());

    let mut car = SimulatedCar {
        layout,
        speed: 0.0,
        frictions: [1.0; 4],
        steer_limits: [0.0; 4],
    };

    for tick in 0..ticks {
        car.speed = top_speed * tick as f64 / ticks.max(1) as f64;
        for friction in &mut car.frictions {
            *friction = rng.gen_range(0.2..=1.0);
        }

        let report = controller.step(&mut car);
        if tick % every.max(1) != 0 {
            continue;
        }

        match report {
            Report::Steered {
                speed,
                average_friction,
                angles,
            } => {
                let friction = average_friction
                    .map(|friction| format!("{friction:.2}"))
                    .unwrap_or_else(|| "-".to_string());
                let front_left = car.steer_limits[car.layout.unit(WheelPosition::FrontLeft)];
                println!(
                    "tick {tick:4}  speed {speed:6.2} m/s  friction {friction:>4}  front {:5.2}° ({front_left:.3} rad)  rear {:5.2}°",
                    angles.front, angles.rear
                );
            }
            Report::Disabled => println!("tick {tick:4}  active steering disabled"),
            Report::SetupFailed { error_count } => {
                anyhow::bail!("setup failed with {error_count} errors")
            }
        }
    }

    Ok(())
}
