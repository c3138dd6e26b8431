//! Tick callback that stands in for a renderer.
//!
//! After each tick it drains the changed-tile queue, the way a drawing
//! layer would before repainting, and folds the summary into running
//! totals that are printed when the run ends.

use evosim_core::{Simulation, SimulationResult, TickCallback, TickSummary};
use evosim_types::DeathCause;
use serde::Serialize;
use tracing::debug;

/// Totals accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    /// Children added.
    pub births: u64,
    /// Creatures that died with no food.
    pub starvations: u64,
    /// Creatures that died with no water.
    pub dehydrations: u64,
    /// Decisions skipped on a controller dimension mismatch.
    pub skipped_decisions: u64,
    /// Tile repaints requested by the field.
    pub tile_repaints: u64,
    /// Largest end-of-tick population.
    pub peak_alive: u32,
    /// Highest generation seen alive.
    pub peak_generation: u32,
}

/// Headless tick callback.
#[derive(Debug, Default)]
pub struct ReportCallback {
    totals: RunTotals,
}

impl ReportCallback {
    /// A callback with zeroed totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals so far.
    pub const fn totals(&self) -> &RunTotals {
        &self.totals
    }
}

impl TickCallback for ReportCallback {
    fn on_tick(&mut self, summary: &TickSummary, sim: &mut Simulation) {
        let repainted = sim.drain_changed_tiles().len();
        let totals = &mut self.totals;

        totals.tile_repaints = totals
            .tile_repaints
            .saturating_add(u64::try_from(repainted).unwrap_or(u64::MAX));
        totals.births = totals
            .births
            .saturating_add(u64::try_from(summary.births.len()).unwrap_or(u64::MAX));
        for death in &summary.deaths {
            match death.cause {
                DeathCause::Starvation => {
                    totals.starvations = totals.starvations.saturating_add(1);
                }
                DeathCause::Dehydration => {
                    totals.dehydrations = totals.dehydrations.saturating_add(1);
                }
            }
        }
        totals.skipped_decisions = totals
            .skipped_decisions
            .saturating_add(u64::from(summary.skipped_decisions));
        totals.peak_alive = totals.peak_alive.max(summary.alive);
        totals.peak_generation = totals.peak_generation.max(summary.stats.max_generation);

        debug!(tick = summary.tick, repainted, "Tiles handed to renderer");
    }
}

/// Everything printed when a run ends.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// How and when the run ended.
    pub result: &'a SimulationResult,
    /// Totals over the whole run.
    pub totals: &'a RunTotals,
}
