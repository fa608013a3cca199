use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};

use solar_orrery::config::{CliArgs, Config};
use solar_orrery::error::ConfigError;
use solar_orrery::gui::Simulation;
use solar_orrery::logging::init_logging;
use solar_orrery::model::system::build_system;
use solar_orrery::model::{run, CancellationToken, RunLimit};

/// Nine planets, Jupiter's four big moons, and an asteroid belt between Mars and Jupiter,
/// spinning until the window is closed (or `--steps` frames have gone by).
fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("solar-system: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if args.print_config {
        return match config.to_ron() {
            Ok(ron) => {
                println!("{}", ron);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("solar-system: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    if !init_logging(&config.debug.log_level) {
        debug!("a tracing subscriber was already installed, keeping it");
    }

    match animate(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "could not start");
            ExitCode::FAILURE
        }
    }
}

fn animate(config: &Config) -> Result<(), ConfigError> {
    let specs = config.scene.planet_specs()?;
    let belt = config.scene.belt_spec();
    let mut registry = build_system(config.scene.seed, &specs, belt.as_ref());

    let cancel = CancellationToken::new();
    let mut simulation = Simulation::new(config, &registry, cancel.clone())?;

    let limit = match config.run.steps {
        Some(steps) => RunLimit::Steps(steps),
        None => RunLimit::UntilCancelled,
    };
    let summary = run(&mut registry, &mut simulation, limit, &cancel);
    info!(steps = summary.steps, reason = ?summary.reason, "simulation stopped");

    Ok(())
}
