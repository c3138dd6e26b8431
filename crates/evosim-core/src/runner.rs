//! Bounded simulation loop.
//!
//! [`run_simulation`] drives [`Simulation::tick`] on a fixed interval and
//! stops on the first of:
//!
//! - **Tick bound**: `simulation.max_ticks` ticks have run (0 = unlimited)
//! - **Extinction**: the population is empty after a tick
//!
//! Every `simulation.log_every_ticks` ticks a population summary is logged.

use serde::Serialize;
use tracing::{info, warn};

use crate::simulation::Simulation;
use crate::tick::{TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Every creature is dead.
    Extinction,
}

/// Result of the simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// A renderer or recorder hooks in here. It sees the summary, reads the
/// world, and may drain the changed-tile queue between ticks.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, sim: &mut Simulation);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _sim: &mut Simulation) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails.
pub async fn run_simulation(
    sim: &mut Simulation,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let max_ticks = sim.config().simulation.max_ticks;
    let log_every = sim.config().simulation.log_every_ticks;
    let interval_ms = sim.config().world.tick_interval_ms;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks,
        tick_interval_ms = interval_ms,
        population = sim.population().len(),
        "Simulation starting"
    );

    loop {
        // --- Execute tick ---
        let summary = sim.tick()?;
        total_ticks = total_ticks.saturating_add(1);

        // --- Notify callback ---
        callback.on_tick(&summary, sim);

        // --- Periodic summary ---
        if log_every > 0 && summary.tick.checked_rem(log_every) == Some(0) {
            info!(
                tick = summary.tick,
                alive = summary.stats.alive,
                mean_food = summary.stats.mean_food,
                mean_water = summary.stats.mean_water,
                max_generation = summary.stats.max_generation,
                "Population summary"
            );
        }

        // --- Check extinction ---
        if summary.alive == 0 {
            info!(tick = summary.tick, "All creatures dead -- extinction");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Extinction,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        // --- Check tick limit ---
        if max_ticks > 0 && total_ticks >= max_ticks {
            info!(tick = summary.tick, max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        // --- Sleep for tick interval ---
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Log the simulation end.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_alive = result.final_summary.as_ref().map(|s| s.alive),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            alive = summary.stats.alive,
            max_generation = summary.stats.max_generation,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use evosim_brain::NeuralNetwork;
    use evosim_types::Position;

    use super::*;
    use crate::config::SimulationConfig;

    fn config(max_ticks: u64) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.width = 100.0;
        config.world.height = 100.0;
        config.world.tiles_per_row = 10;
        config.world.tick_interval_ms = 0;
        config.population.initial_size = 0;
        config.simulation.max_ticks = max_ticks;
        config
    }

    fn with_creature(config: SimulationConfig, food: u32) -> Simulation {
        let mut sim = Simulation::empty(config).unwrap();
        let brain = NeuralNetwork::build(sim.topology());
        sim.add_creature(Position::new(50.0, 50.0), brain, food, food)
            .unwrap();
        sim
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let mut sim = with_creature(config(5), 1000);
        let mut cb = NoOpCallback;

        let result = run_simulation(&mut sim, &mut cb).await.unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(sim.current_tick(), 5);
    }

    #[tokio::test]
    async fn extinction_stops_simulation() {
        let mut sim = with_creature(config(0), 3);
        let mut cb = NoOpCallback;

        let result = run_simulation(&mut sim, &mut cb).await.unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.total_ticks, 3);
        assert_eq!(result.final_summary.unwrap().deaths.len(), 1);
    }

    #[tokio::test]
    async fn empty_world_is_extinct_after_one_tick() {
        let mut sim = Simulation::empty(config(0)).unwrap();
        let result = run_simulation(&mut sim, &mut NoOpCallback).await.unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.total_ticks, 1);
    }

    #[tokio::test]
    async fn tick_callback_is_called() {
        struct CountCallback {
            count: u64,
            last_alive: usize,
        }
        impl TickCallback for CountCallback {
            fn on_tick(&mut self, _summary: &TickSummary, sim: &mut Simulation) {
                self.count = self.count.saturating_add(1);
                self.last_alive = sim.population().len();
            }
        }

        let mut sim = with_creature(config(3), 1000);
        let mut cb = CountCallback {
            count: 0,
            last_alive: 0,
        };

        let _ = run_simulation(&mut sim, &mut cb).await.unwrap();

        assert_eq!(cb.count, 3);
        assert_eq!(cb.last_alive, 1);
    }

    #[tokio::test]
    async fn interval_sleeps_between_ticks() {
        let mut cfg = config(3);
        cfg.world.tick_interval_ms = 5;
        let mut sim = with_creature(cfg, 1000);
        let started = std::time::Instant::now();
        let result = run_simulation(&mut sim, &mut NoOpCallback).await.unwrap();
        assert_eq!(result.total_ticks, 3);
        assert!(started.elapsed() >= std::time::Duration::from_millis(10));
    }
}
