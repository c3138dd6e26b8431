//! The simulation context.
//!
//! [`Simulation`] bundles everything a tick touches: the tile field, the
//! population, the seeded RNG, and the derived configuration. The host owns
//! it and drives it through [`Simulation::tick`]; there is no global state.

use evosim_agents::{Creature, CreatureConfig, SENSOR_INPUTS};
use evosim_brain::{NeuralNetwork, Topology};
use evosim_types::{CreatureId, CreatureView, PopulationStats, Position, TileCoord, TileView};
use evosim_world::{TerrainSeeds, TileField};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::config::{ConfigError, SimulationConfig};
use crate::population::Population;
use crate::tick::{self, TickError, TickSummary};

/// First id handed out.
const FIRST_ID: CreatureId = CreatureId(1);

/// Errors that can occur while building a world.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The tile field could not be created.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: evosim_world::WorldError,
    },

    /// Ran out of creature ids while spawning the initial population.
    #[error("creature ids exhausted")]
    IdsExhausted,
}

/// Mutable state advanced one tick at a time.
#[derive(Debug)]
pub struct Simulation {
    pub(crate) config: SimulationConfig,
    pub(crate) creature_config: CreatureConfig,
    pub(crate) topology: Topology,
    pub(crate) field: TileField,
    pub(crate) population: Population,
    pub(crate) rng: StdRng,
    pub(crate) next_id: Option<CreatureId>,
    pub(crate) tick: u64,
}

impl Simulation {
    /// Build a world from configuration and spawn generation 0.
    ///
    /// Terrain seeds, placement, and controller weights all come from an
    /// RNG seeded with `world.seed`, so the same configuration always
    /// builds the same world.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid or the tile
    /// field cannot be created.
    pub fn build(config: SimulationConfig) -> Result<Self, BuildError> {
        let mut sim = Self::empty(config)?;
        let topology = sim.topology;
        let food = sim.config.population.starting_food;
        let water = sim.config.population.starting_water;

        for _ in 0..sim.config.population.initial_size {
            let id = sim.allocate_id().ok_or(BuildError::IdsExhausted)?;
            let creature =
                Creature::spawn(id, topology, food, water, &sim.creature_config, &mut sim.rng);
            sim.population.insert(creature);
        }

        info!(
            seed = sim.config.world.seed,
            tiles_per_row = sim.field.tiles_per_row(),
            population = sim.population.len(),
            "World built"
        );
        Ok(sim)
    }

    /// Build a world with painted terrain and no creatures.
    ///
    /// # Errors
    ///
    /// Same as [`Simulation::build`].
    pub fn empty(config: SimulationConfig) -> Result<Self, BuildError> {
        config.validate()?;
        if config.brain.inputs != SENSOR_INPUTS {
            warn!(
                configured = config.brain.inputs,
                expected = SENSOR_INPUTS,
                "Controller input count does not match the sensor contract; \
                 every decision will be skipped"
            );
        }

        let mut rng = StdRng::seed_from_u64(config.world.seed);
        let seeds = TerrainSeeds::random(&mut rng);
        let field = TileField::generate(
            config.world.width,
            config.world.tiles_per_row,
            seeds,
            config.world.noise_frequency,
        )?;

        Ok(Self {
            creature_config: config.creature_config(),
            topology: config.topology(),
            config,
            field,
            population: Population::new(),
            rng,
            next_id: Some(FIRST_ID),
            tick: 0,
        })
    }

    /// Hand out the next sequential id, or `None` once ids run out.
    pub(crate) fn allocate_id(&mut self) -> Option<CreatureId> {
        let id = self.next_id?;
        self.next_id = id.next();
        Some(id)
    }

    /// Place a generation-0 creature with the given controller.
    ///
    /// Returns the new id, or `None` once ids run out.
    pub fn add_creature(
        &mut self,
        position: Position,
        brain: NeuralNetwork,
        food: u32,
        water: u32,
    ) -> Option<CreatureId> {
        let id = self.allocate_id()?;
        self.population
            .insert(Creature::new(id, position, brain, food, water));
        Some(id)
    }

    /// Advance the world by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickError`] if a birth cannot be applied.
    pub fn tick(&mut self) -> Result<TickSummary, TickError> {
        tick::run_tick(self)
    }

    /// The configuration this world was built from.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Creature mechanics in world units.
    pub const fn creature_config(&self) -> &CreatureConfig {
        &self.creature_config
    }

    /// Controller shape shared by every creature.
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of ticks completed.
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// The tile field.
    pub const fn field(&self) -> &TileField {
        &self.field
    }

    /// The tile field, for hosts that edit terrain between ticks.
    pub const fn field_mut(&mut self) -> &mut TileField {
        &mut self.field
    }

    /// The live population.
    pub const fn population(&self) -> &Population {
        &self.population
    }

    /// Aggregate population statistics.
    pub fn stats(&self) -> PopulationStats {
        self.population.stats()
    }

    /// Renderer snapshots of every creature.
    pub fn creature_views(&self) -> Vec<CreatureView> {
        self.population.views(&self.creature_config)
    }

    /// Renderer snapshots of every tile.
    pub fn tile_views(&self) -> Vec<TileView> {
        self.field.tiles().collect()
    }

    /// Take the tiles changed since the last drain.
    pub fn drain_changed_tiles(&mut self) -> Vec<TileCoord> {
        self.field.drain_changed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.width = 100.0;
        config.world.height = 100.0;
        config.world.tiles_per_row = 10;
        config.population.initial_size = 5;
        config
    }

    #[test]
    fn build_spawns_initial_population() {
        let sim = Simulation::build(small_config()).unwrap();
        assert_eq!(sim.population().len(), 5);
        assert_eq!(
            sim.population().ids(),
            (1..=5).map(CreatureId).collect::<Vec<_>>()
        );
        assert_eq!(sim.current_tick(), 0);
        assert_eq!(sim.field().len(), 100);
        for creature in sim.population().iter() {
            assert_eq!(creature.food(), 150);
            assert_eq!(creature.generation(), 0);
        }
    }

    #[test]
    fn build_is_deterministic() {
        let a = Simulation::build(small_config()).unwrap();
        let b = Simulation::build(small_config()).unwrap();
        assert_eq!(a.tile_views(), b.tile_views());
        assert_eq!(a.creature_views(), b.creature_views());
    }

    #[test]
    fn different_seeds_differ() {
        let a = Simulation::build(small_config()).unwrap();
        let mut config = small_config();
        config.world.seed = 43;
        let b = Simulation::build(config).unwrap();
        assert_ne!(a.creature_views(), b.creature_views());
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut config = small_config();
        config.world.height = 50.0;
        assert!(matches!(
            Simulation::build(config),
            Err(BuildError::Config { .. })
        ));
    }

    #[test]
    fn add_creature_assigns_sequential_ids() {
        let mut sim = Simulation::build(small_config()).unwrap();
        let brain = NeuralNetwork::build(sim.topology());
        let id = sim.add_creature(Position::new(5.0, 5.0), brain, 10, 10);
        assert_eq!(id, Some(CreatureId(6)));
        assert_eq!(sim.population().len(), 6);
    }

    #[test]
    fn empty_world_has_no_creatures() {
        let sim = Simulation::empty(small_config()).unwrap();
        assert!(sim.population().is_empty());
        assert!(sim.tile_views().iter().any(|v| v.tile.food > 0));
    }
}
