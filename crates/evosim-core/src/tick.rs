//! Tick cycle: the population scheduler.
//!
//! Each tick runs through these phases:
//!
//! 1. **Regrowth** -- on configured intervals, tiles regrow toward the
//!    values they were painted with.
//! 2. **Update** -- every creature alive at the start of the tick updates
//!    once, in birth order, over a snapshot of ids. Updates emit birth and
//!    death requests instead of touching the population.
//! 3. **Birth preparation** -- each birth request becomes a child with a
//!    fresh id and an inherited controller. Nothing is applied yet.
//! 4. **Apply** -- queued deaths are removed, then children are added. A
//!    creature that reproduced and died in the same tick still leaves its
//!    child.
//!
//! Children born in tick N first update in tick N+1. Creatures that died in
//! tick N are absent from tick N+1.

use evosim_agents::{AgentError, BirthRequest, Creature};
use evosim_types::{CreatureId, DeathCause, PopulationStats};
use serde::Serialize;
use tracing::{debug, info};

use crate::simulation::Simulation;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A birth request could not be turned into a creature.
    #[error("birth from {parent} failed: {source}")]
    Birth {
        /// The parent that requested the birth.
        parent: CreatureId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// No ids remain for new creatures.
    #[error("creature ids exhausted")]
    IdsExhausted,
}

/// A creature removed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeathRecord {
    /// Who died.
    pub id: CreatureId,
    /// Why.
    pub cause: DeathCause,
}

/// A creature added this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthRecord {
    /// The child's id.
    pub id: CreatureId,
    /// The parent's id.
    pub parent: CreatureId,
    /// The child's generation.
    pub generation: u32,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed (first tick is 1).
    pub tick: u64,
    /// Creatures removed, in update order.
    pub deaths: Vec<DeathRecord>,
    /// Creatures added, in request order.
    pub births: Vec<BirthRecord>,
    /// Creatures whose controller produced no decision.
    pub skipped_decisions: u32,
    /// Tiles changed by regrowth.
    pub tiles_regrown: u32,
    /// Living creatures at end of tick.
    pub alive: u32,
    /// Population statistics at end of tick.
    pub stats: PopulationStats,
}

/// Requests collected during the update pass.
#[derive(Default)]
struct Harvest {
    births: Vec<BirthRequest>,
    deaths: Vec<DeathRecord>,
    skipped: u32,
}

/// Execute one complete tick.
///
/// # Errors
///
/// Returns [`TickError`] if a child cannot be created. In that case no
/// death or birth from this tick has been applied to the population.
pub fn run_tick(sim: &mut Simulation) -> Result<TickSummary, TickError> {
    let tick = sim.tick.saturating_add(1);
    debug!(tick, alive = sim.population.len(), "Tick started");

    // --- Phase 1: Regrowth ---
    let tiles_regrown = phase_regrowth(sim, tick);

    // --- Phase 2: Update ---
    let harvest = phase_update(sim, tick);

    // --- Phase 3: Birth preparation ---
    let children = prepare_births(sim, &harvest.births)?;

    // --- Phase 4: Apply deaths, then births ---
    for death in &harvest.deaths {
        if sim.population.remove(death.id).is_some() {
            info!(tick, creature_id = %death.id, cause = %death.cause, "Creature died");
        }
    }
    let mut births = Vec::with_capacity(children.len());
    for (child, request) in children.into_iter().zip(&harvest.births) {
        let record = BirthRecord {
            id: child.id(),
            parent: request.parent,
            generation: child.generation(),
        };
        if sim.population.insert(child) {
            info!(
                tick,
                creature_id = %record.id,
                parent_id = %record.parent,
                generation = record.generation,
                "Creature born"
            );
            births.push(record);
        }
    }

    sim.tick = tick;
    let stats = sim.population.stats();
    debug!(
        tick,
        alive = stats.alive,
        births = births.len(),
        deaths = harvest.deaths.len(),
        skipped = harvest.skipped,
        "Tick completed"
    );

    Ok(TickSummary {
        tick,
        deaths: harvest.deaths,
        births,
        skipped_decisions: harvest.skipped,
        tiles_regrown,
        alive: stats.alive,
        stats,
    })
}

/// Phase 1: Regrowth. Returns the number of tiles that changed.
fn phase_regrowth(sim: &mut Simulation, tick: u64) -> u32 {
    let world = &sim.config.world;
    if world.regrowth_amount == 0 || world.regrowth_interval_ticks == 0 {
        return 0;
    }
    if tick.checked_rem(world.regrowth_interval_ticks) != Some(0) {
        return 0;
    }
    let grown = sim.field.regrow(world.regrowth_amount);
    debug!(tick, tiles = grown, "Tiles regrown");
    grown
}

/// Phase 2: Update every creature alive at the start of the tick.
fn phase_update(sim: &mut Simulation, tick: u64) -> Harvest {
    let mut harvest = Harvest::default();
    let snapshot = sim.population.ids();

    for id in snapshot {
        let Some(creature) = sim.population.get_mut(id) else {
            continue;
        };
        let outcome = creature.update(&mut sim.field, &sim.creature_config);

        if outcome.skipped {
            harvest.skipped = harvest.skipped.saturating_add(1);
        }
        if let Some(request) = outcome.birth {
            debug!(tick, creature_id = %id, "Birth requested");
            harvest.births.push(request);
        }
        if let Some(cause) = outcome.death {
            harvest.deaths.push(DeathRecord { id, cause });
        }
    }
    harvest
}

/// Phase 3: Turn birth requests into creatures without inserting them.
fn prepare_births(
    sim: &mut Simulation,
    requests: &[BirthRequest],
) -> Result<Vec<Creature>, TickError> {
    let mutation_rate = sim.config.brain.mutation_rate;
    let mut children = Vec::with_capacity(requests.len());
    for request in requests {
        let id = sim.allocate_id().ok_or(TickError::IdsExhausted)?;
        let child = Creature::from_birth(id, request, sim.topology, mutation_rate, &mut sim.rng)
            .map_err(|source| TickError::Birth {
                parent: request.parent,
                source,
            })?;
        children.push(child);
    }
    Ok(children)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use evosim_brain::NeuralNetwork;
    use evosim_types::{Position, TileCoord};

    use super::*;
    use crate::config::SimulationConfig;

    fn config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.width = 100.0;
        config.world.height = 100.0;
        config.world.tiles_per_row = 10;
        config.population.initial_size = 0;
        config
    }

    fn with_zeroed(config: SimulationConfig, reserves: &[(u32, u32)]) -> Simulation {
        let mut sim = Simulation::empty(config).unwrap();
        for &(food, water) in reserves {
            let brain = NeuralNetwork::build(sim.topology());
            sim.add_creature(Position::new(50.0, 50.0), brain, food, water)
                .unwrap();
        }
        sim
    }

    #[test]
    fn tick_counts_up() {
        let mut sim = with_zeroed(config(), &[(100, 100)]);
        assert_eq!(sim.tick().unwrap().tick, 1);
        assert_eq!(sim.tick().unwrap().tick, 2);
        assert_eq!(sim.current_tick(), 2);
    }

    #[test]
    fn dying_creature_is_removed_at_tick_end() {
        let mut sim = with_zeroed(config(), &[(1, 100), (100, 100)]);
        let summary = sim.tick().unwrap();
        assert_eq!(
            summary.deaths,
            vec![DeathRecord {
                id: CreatureId(1),
                cause: DeathCause::Starvation
            }]
        );
        assert_eq!(summary.alive, 1);
        assert!(sim.population().get(CreatureId(1)).is_none());
        assert!(sim.population().get(CreatureId(2)).is_some());
    }

    #[test]
    fn skipped_decisions_are_counted() {
        let mut cfg = config();
        cfg.brain.inputs = 12;
        let mut sim = with_zeroed(cfg, &[(50, 50), (50, 50)]);
        let summary = sim.tick().unwrap();
        assert_eq!(summary.skipped_decisions, 2);
        for creature in sim.population().iter() {
            assert_eq!(creature.position(), Position::new(50.0, 50.0));
            assert_eq!(creature.food(), 49);
        }
    }

    #[test]
    fn summary_stats_match_population() {
        let mut sim = with_zeroed(config(), &[(10, 20), (30, 40)]);
        let summary = sim.tick().unwrap();
        assert_eq!(summary.stats, sim.stats());
        assert_eq!(summary.stats.alive, 2);
        assert!((summary.stats.mean_food - 19.0).abs() < 1e-9);
    }

    #[test]
    fn regrowth_runs_on_interval() {
        let mut cfg = config();
        cfg.world.regrowth_amount = 5;
        cfg.world.regrowth_interval_ticks = 2;
        let mut sim = with_zeroed(cfg, &[(100, 100)]);
        let coord = TileCoord::new(0, 0);
        let painted = *sim.field().tile(coord);
        sim.field_mut().set_food(coord, 0);
        sim.drain_changed_tiles();

        let first = sim.tick().unwrap();
        assert_eq!(first.tiles_regrown, 0);
        assert_eq!(sim.field().tile(coord).food, 0);

        let second = sim.tick().unwrap();
        assert!(second.tiles_regrown >= 1);
        assert_eq!(sim.field().tile(coord).food, painted.food.min(5));
        assert!(sim.drain_changed_tiles().contains(&coord));
    }

    #[test]
    fn regrowth_disabled_by_default() {
        let mut sim = with_zeroed(config(), &[(100, 100)]);
        sim.field_mut().set_food(TileCoord::new(0, 0), 0);
        for _ in 0..5 {
            assert_eq!(sim.tick().unwrap().tiles_regrown, 0);
        }
        assert_eq!(sim.field().tile(TileCoord::new(0, 0)).food, 0);
    }

    #[test]
    fn random_population_runs_many_ticks() {
        let mut cfg = config();
        cfg.population.initial_size = 10;
        cfg.world.regrowth_amount = 1;
        cfg.world.regrowth_interval_ticks = 5;
        let mut sim = Simulation::build(cfg).unwrap();
        let mut previous: Option<CreatureId> = None;
        for _ in 0..200 {
            let summary = sim.tick().unwrap();
            assert_eq!(usize::try_from(summary.alive).unwrap(), sim.population().len());
            for birth in &summary.births {
                if let Some(prev) = previous {
                    assert!(birth.id > prev);
                }
                previous = Some(birth.id);
            }
            if sim.population().is_empty() {
                break;
            }
        }
    }
}
