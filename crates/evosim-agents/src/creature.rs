//! The creature and its per-tick cycle.
//!
//! One [`Creature::update`] call runs the whole cycle:
//!
//! 1. Sense: cast both eye rays and read the tiles under them.
//! 2. Infer: feed the normalized sensor frame to the controller.
//! 3. Interpret: decode color, heading, speed, action, and eye angles.
//! 4. Act: run the chosen action's handler.
//! 5. Move: integrate position on the torus, then pay upkeep.
//! 6. Death check.
//!
//! When inference fails (input dimension mismatch) steps 3 to 5 are
//! skipped for the tick. Upkeep and the death check still apply.

use std::f64::consts::{FRAC_PI_2, TAU};

use evosim_brain::{NeuralNetwork, Topology};
use evosim_types::{Action, Color, CreatureId, CreatureView, DeathCause, Position};
use evosim_world::TileField;
use rand::Rng;
use tracing::debug;

use crate::actions;
use crate::config::CreatureConfig;
use crate::death::{Vitality, check_death};
use crate::decision::Decision;
use crate::error::AgentError;
use crate::movement;
use crate::reproduction::BirthRequest;
use crate::senses::{Eyes, SensorFrame};

/// What one update produced for the scheduler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    /// A child to create after the pass.
    pub birth: Option<BirthRequest>,
    /// Set when the creature died this update.
    pub death: Option<DeathCause>,
    /// The controller produced no decision this tick.
    pub skipped: bool,
}

/// A single agent.
#[derive(Debug, Clone)]
pub struct Creature {
    pub(crate) id: CreatureId,
    pub(crate) generation: u32,
    pub(crate) position: Position,
    pub(crate) heading: f64,
    pub(crate) speed: f64,
    pub(crate) color: Color,
    pub(crate) food: u32,
    pub(crate) water: u32,
    pub(crate) action: Action,
    pub(crate) left_eye_angle: f64,
    pub(crate) right_eye_angle: f64,
    pub(crate) brain: NeuralNetwork,
    pub(crate) vitality: Vitality,
}

impl Creature {
    /// A generation-0 creature facing along +x with closed eyes, black,
    /// idle, and at rest. The controller is used as given.
    pub const fn new(
        id: CreatureId,
        position: Position,
        brain: NeuralNetwork,
        food: u32,
        water: u32,
    ) -> Self {
        Self {
            id,
            generation: 0,
            position,
            heading: 0.0,
            speed: 0.0,
            color: Color::new(0, 0, 0),
            food,
            water,
            action: Action::Idle,
            left_eye_angle: 0.0,
            right_eye_angle: 0.0,
            brain,
            vitality: Vitality::Alive,
        }
    }

    /// A generation-0 creature with random placement, color, heading, eye
    /// angles, and controller weights.
    pub fn spawn(
        id: CreatureId,
        topology: Topology,
        food: u32,
        water: u32,
        config: &CreatureConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mut brain = NeuralNetwork::build(topology);
        brain.randomize_weights(rng);

        let x = movement::wrap(rng.random::<f64>() * config.world_size, config.world_size);
        let y = movement::wrap(rng.random::<f64>() * config.world_size, config.world_size);

        let mut creature = Self::new(id, Position::new(x, y), brain, food, water);
        creature.color = Color::new(rng.random(), rng.random(), rng.random());
        creature.heading = rng.random::<f64>() * TAU;
        creature.left_eye_angle = rng.random::<f64>() * FRAC_PI_2;
        creature.right_eye_angle = rng.random::<f64>() * FRAC_PI_2;
        creature
    }

    /// Turn a birth request into a creature.
    ///
    /// The child's controller is built fresh, randomized (so its biases are
    /// its own), then given the parent's weights with per-weight mutation.
    pub fn from_birth(
        id: CreatureId,
        request: &BirthRequest,
        topology: Topology,
        mutation_rate: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, AgentError> {
        let mut brain = NeuralNetwork::build(topology);
        brain.randomize_weights(rng);
        brain.inherit_weights(&request.weights, mutation_rate, rng)?;

        let mut child = Self::new(id, request.position, brain, request.food, request.water);
        child.generation = request.generation;
        child.heading = request.heading;
        child.color = request.color;
        child.left_eye_angle = request.left_eye_angle;
        child.right_eye_angle = request.right_eye_angle;
        Ok(child)
    }

    /// Run one full cycle against the tile field.
    ///
    /// A dead creature returns an empty outcome and changes nothing.
    pub fn update(&mut self, field: &mut TileField, config: &CreatureConfig) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();
        if !self.vitality.is_alive() {
            return outcome;
        }

        // 1-2. Sense and infer
        match self.decide(field, config) {
            Some(decision) => {
                // 3. Interpret
                self.apply(decision);
                // 4. Act
                outcome.birth = actions::perform(self, field, config);
                // 5. Move
                self.position = movement::step(
                    self.position,
                    self.heading,
                    self.speed,
                    config.speed_coefficient,
                    config.world_size,
                );
            }
            None => outcome.skipped = true,
        }

        self.food = self.food.saturating_sub(config.upkeep);
        self.water = self.water.saturating_sub(config.upkeep);

        // 6. Death check
        if let Some(cause) = check_death(self.food, self.water) {
            self.vitality = Vitality::Dead(cause);
            outcome.death = Some(cause);
        }
        outcome
    }

    fn decide(&self, field: &TileField, config: &CreatureConfig) -> Option<Decision> {
        let inputs = self
            .sense(field, config)
            .to_inputs(config.birth_food, config.birth_water);
        let outputs = match self.brain.infer(&inputs) {
            Ok(outputs) => outputs,
            Err(err) => {
                debug!(creature_id = %self.id, error = %err, "Decision skipped");
                return None;
            }
        };
        let decision = Decision::from_outputs(&outputs);
        if decision.is_none() {
            debug!(
                creature_id = %self.id,
                outputs = outputs.len(),
                "Decision skipped: unexpected output count"
            );
        }
        decision
    }

    const fn apply(&mut self, decision: Decision) {
        self.color = decision.color;
        self.heading = decision.heading;
        self.speed = decision.speed;
        self.action = decision.action;
        self.left_eye_angle = decision.left_eye_angle;
        self.right_eye_angle = decision.right_eye_angle;
    }

    /// Both eye ray endpoints for the current pose.
    pub fn eyes(&self, config: &CreatureConfig) -> Eyes {
        Eyes::cast(
            self.position,
            self.heading,
            self.left_eye_angle,
            self.right_eye_angle,
            config.reach(),
        )
    }

    /// What the creature perceives right now.
    pub fn sense(&self, field: &TileField, config: &CreatureConfig) -> SensorFrame {
        let (left_tile, right_tile) = self.eyes(config).look(field);
        SensorFrame {
            color: self.color,
            food: self.food,
            water: self.water,
            left_tile,
            right_tile,
            left_eye_angle: self.left_eye_angle,
            right_eye_angle: self.right_eye_angle,
        }
    }

    /// Snapshot for a renderer.
    pub fn view(&self, config: &CreatureConfig) -> CreatureView {
        let eyes = self.eyes(config);
        CreatureView {
            id: self.id,
            position: self.position,
            heading: self.heading,
            color: self.color,
            radius: config.radius,
            left_eye: eyes.left,
            right_eye: eyes.right,
        }
    }

    /// Unique id.
    pub const fn id(&self) -> CreatureId {
        self.id
    }

    /// 0 for the initial population, parent + 1 for offspring.
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Body center in world units.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Facing direction, radians.
    pub const fn heading(&self) -> f64 {
        self.heading
    }

    /// Fraction of full speed.
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Body color.
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Food reserve.
    pub const fn food(&self) -> u32 {
        self.food
    }

    /// Water reserve.
    pub const fn water(&self) -> u32 {
        self.water
    }

    /// Action chosen on the last decided tick.
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Left eye angle, radians.
    pub const fn left_eye_angle(&self) -> f64 {
        self.left_eye_angle
    }

    /// Right eye angle, radians.
    pub const fn right_eye_angle(&self) -> f64 {
        self.right_eye_angle
    }

    /// The controller.
    pub const fn brain(&self) -> &NeuralNetwork {
        &self.brain
    }

    /// Lifecycle state.
    pub const fn vitality(&self) -> Vitality {
        self.vitality
    }

    /// Shorthand for `vitality().is_alive()`.
    pub const fn is_alive(&self) -> bool {
        self.vitality.is_alive()
    }
}
