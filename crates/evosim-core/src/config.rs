//! Configuration loading and typed config structures for the Evosim simulation.
//!
//! The canonical configuration lives in `evosim-config.yaml` next to the
//! engine binary. Every field has a default, so an empty file (or no file)
//! gives a runnable world. Distances in the `creature` section are in tiles
//! and are converted to world units by [`SimulationConfig::creature_config`].

use std::path::Path;

use evosim_agents::CreatureConfig;
use evosim_brain::Topology;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible world.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `evosim-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Board, terrain, and timing.
    #[serde(default)]
    pub world: WorldConfig,

    /// Population size, reserves, and metabolism.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Body and sensor geometry.
    #[serde(default)]
    pub creature: BodyConfig,

    /// Controller topology and heredity.
    #[serde(default)]
    pub brain: BrainConfig,

    /// Run bounds and reporting.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a consistent world.
    ///
    /// A controller input count other than the sensor contract's is
    /// accepted here; the builder logs it and every decision is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if !(world.width > 0.0 && world.width.is_finite()) {
            return invalid(format!("world.width must be positive, got {}", world.width));
        }
        if (world.width - world.height).abs() > f64::EPSILON {
            return invalid(format!(
                "world must be square, got {} x {}",
                world.width, world.height
            ));
        }
        if world.tiles_per_row == 0 {
            return invalid("world.tiles_per_row must be at least 1".to_owned());
        }
        if !world.noise_frequency.is_finite() {
            return invalid("world.noise_frequency must be finite".to_owned());
        }

        let brain = &self.brain;
        if brain.outputs != evosim_agents::CONTROL_OUTPUTS {
            return invalid(format!(
                "brain.outputs must be {}, got {}",
                evosim_agents::CONTROL_OUTPUTS,
                brain.outputs
            ));
        }
        if brain.hidden_layers > 0 && brain.neurons_per_hidden_layer == 0 {
            return invalid("brain.neurons_per_hidden_layer must be at least 1".to_owned());
        }
        if !(0.0..=1.0).contains(&brain.mutation_rate) {
            return invalid(format!(
                "brain.mutation_rate must be within [0, 1], got {}",
                brain.mutation_rate
            ));
        }

        let body = &self.creature;
        for (name, value) in [
            ("creature.radius_tiles", body.radius_tiles),
            ("creature.vision_range_tiles", body.vision_range_tiles),
            ("creature.speed_coefficient", body.speed_coefficient),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return invalid(format!("{name} must be non-negative, got {value}"));
            }
        }
        Ok(())
    }

    /// Side length of one tile in world units.
    #[allow(clippy::cast_precision_loss)]
    pub fn tile_width(&self) -> f64 {
        self.world.width / self.world.tiles_per_row.max(1) as f64
    }

    /// Creature mechanics in world units.
    pub fn creature_config(&self) -> CreatureConfig {
        let tile = self.tile_width();
        CreatureConfig {
            world_size: self.world.width,
            radius: self.creature.radius_tiles * tile,
            vision_range: self.creature.vision_range_tiles * tile,
            speed_coefficient: self.creature.speed_coefficient,
            upkeep: self.population.upkeep,
            eat_cap: self.population.eat_cap,
            drink_cap: self.population.drink_cap,
            birth_food: self.population.birth_food,
            birth_water: self.population.birth_water,
        }
    }

    /// Controller shape shared by every creature.
    pub const fn topology(&self) -> Topology {
        Topology::new(
            self.brain.inputs,
            self.brain.outputs,
            self.brain.hidden_layers,
            self.brain.neurons_per_hidden_layer,
        )
    }
}

fn invalid(reason: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid { reason })
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Board width in world units.
    #[serde(default = "default_board_size")]
    pub width: f64,

    /// Board height in world units. Must equal `width`.
    #[serde(default = "default_board_size")]
    pub height: f64,

    /// Tiles along each axis.
    #[serde(default = "default_tiles_per_row")]
    pub tiles_per_row: usize,

    /// Noise sampling step per tile.
    #[serde(default = "default_noise_frequency")]
    pub noise_frequency: f64,

    /// Food and water restored per tile per regrowth (0 disables).
    #[serde(default)]
    pub regrowth_amount: u8,

    /// Ticks between regrowths (0 disables).
    #[serde(default)]
    pub regrowth_interval_ticks: u64,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            width: default_board_size(),
            height: default_board_size(),
            tiles_per_row: default_tiles_per_row(),
            noise_frequency: default_noise_frequency(),
            regrowth_amount: 0,
            regrowth_interval_ticks: 0,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Creatures spawned at simulation start.
    #[serde(default = "default_initial_size")]
    pub initial_size: u32,

    /// Food each generation-0 creature starts with.
    #[serde(default = "default_starting_reserve")]
    pub starting_food: u32,

    /// Water each generation-0 creature starts with.
    #[serde(default = "default_starting_reserve")]
    pub starting_water: u32,

    /// Food cost of reproduction and a child's starting food.
    #[serde(default = "default_birth_reserve")]
    pub birth_food: u32,

    /// Water cost of reproduction and a child's starting water.
    #[serde(default = "default_birth_reserve")]
    pub birth_water: u32,

    /// Food and water spent per tick.
    #[serde(default = "default_upkeep")]
    pub upkeep: u32,

    /// Most food one `eat` takes from a tile.
    #[serde(default = "default_intake_cap")]
    pub eat_cap: u8,

    /// Most water one `drink` takes from a tile.
    #[serde(default = "default_intake_cap")]
    pub drink_cap: u8,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_size: default_initial_size(),
            starting_food: default_starting_reserve(),
            starting_water: default_starting_reserve(),
            birth_food: default_birth_reserve(),
            birth_water: default_birth_reserve(),
            upkeep: default_upkeep(),
            eat_cap: default_intake_cap(),
            drink_cap: default_intake_cap(),
        }
    }
}

/// Creature body and sensor geometry, in tiles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyConfig {
    /// Body radius in tiles.
    #[serde(default = "default_radius_tiles")]
    pub radius_tiles: f64,

    /// Eye ray length past the body, in tiles.
    #[serde(default = "default_vision_range_tiles")]
    pub vision_range_tiles: f64,

    /// World units moved per tick at full speed.
    #[serde(default = "default_speed_coefficient")]
    pub speed_coefficient: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            radius_tiles: default_radius_tiles(),
            vision_range_tiles: default_vision_range_tiles(),
            speed_coefficient: default_speed_coefficient(),
        }
    }
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrainConfig {
    /// Controller input count.
    #[serde(default = "default_inputs")]
    pub inputs: usize,

    /// Controller output count.
    #[serde(default = "default_outputs")]
    pub outputs: usize,

    /// Hidden layer count.
    #[serde(default = "default_hidden_layers")]
    pub hidden_layers: usize,

    /// Neurons per hidden layer.
    #[serde(default = "default_neurons_per_hidden_layer")]
    pub neurons_per_hidden_layer: usize,

    /// Probability that an inherited weight is redrawn.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            outputs: default_outputs(),
            hidden_layers: default_hidden_layers(),
            neurons_per_hidden_layer: default_neurons_per_hidden_layer(),
            mutation_rate: default_mutation_rate(),
        }
    }
}

/// Simulation boundary parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop after this many ticks (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Log a population summary every N ticks (0 = never).
    #[serde(default = "default_log_every_ticks")]
    pub log_every_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: 0,
            log_every_ticks: default_log_every_ticks(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_board_size() -> f64 {
    900.0
}

const fn default_tiles_per_row() -> usize {
    100
}

const fn default_noise_frequency() -> f64 {
    0.05
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_initial_size() -> u32 {
    20
}

const fn default_starting_reserve() -> u32 {
    150
}

const fn default_birth_reserve() -> u32 {
    60
}

const fn default_upkeep() -> u32 {
    1
}

const fn default_intake_cap() -> u8 {
    20
}

const fn default_radius_tiles() -> f64 {
    1.0
}

const fn default_vision_range_tiles() -> f64 {
    2.0
}

const fn default_speed_coefficient() -> f64 {
    3.0
}

const fn default_inputs() -> usize {
    evosim_agents::SENSOR_INPUTS
}

const fn default_outputs() -> usize {
    evosim_agents::CONTROL_OUTPUTS
}

const fn default_hidden_layers() -> usize {
    2
}

const fn default_neurons_per_hidden_layer() -> usize {
    10
}

const fn default_mutation_rate() -> f64 {
    0.05
}

const fn default_log_every_ticks() -> u64 {
    100
}
