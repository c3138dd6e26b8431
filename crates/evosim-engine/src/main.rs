//! Headless host for the Evosim simulation.
//!
//! Stands where a windowed front end would: it owns the tick cadence and
//! reads the world between ticks, but draws nothing.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the path given as the first argument, or
//!    `evosim-config.yaml`, or defaults
//! 3. Build the tile field and spawn generation 0
//! 4. Run the tick loop until the tick bound or extinction
//! 5. Log the result and print a JSON run report

mod error;
mod report;

use std::path::PathBuf;

use evosim_core::{Simulation, SimulationConfig, runner};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::report::{ReportCallback, RunReport};

/// Config file read when no path is given.
const DEFAULT_CONFIG_PATH: &str = "evosim-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, world building, or a tick fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("evosim-engine starting");

    let config = load_config()?;
    info!(
        seed = config.world.seed,
        width = config.world.width,
        tiles_per_row = config.world.tiles_per_row,
        initial_size = config.population.initial_size,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    let mut sim = Simulation::build(config)?;
    let mut callback = ReportCallback::new();

    let result = runner::run_simulation(&mut sim, &mut callback).await?;
    runner::log_simulation_end(&result);

    let report = RunReport {
        result: &result,
        totals: callback.totals(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "evosim-engine shutdown complete"
    );
    Ok(())
}

/// Load configuration from the first CLI argument or the default path.
///
/// A missing default file falls back to built-in defaults; a missing file
/// named on the command line is an error.
fn load_config() -> Result<SimulationConfig, EngineError> {
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        return Ok(SimulationConfig::from_file(&path)?);
    }
    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        Ok(SimulationConfig::from_file(&path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
