//! Creature state, sensing, actions, and lifecycle for the Evosim simulation.
//!
//! This crate holds everything that operates on a single creature during a
//! tick. It sits between `evosim-types`/`evosim-world`/`evosim-brain` and the
//! scheduler in `evosim-core`, which owns the population and applies the
//! birth and death requests a creature emits.
//!
//! # Modules
//!
//! - [`actions`] -- One handler per [`Action`](evosim_types::Action) variant.
//! - [`config`] -- Per-creature tunables in world units ([`CreatureConfig`]).
//! - [`creature`] -- The [`Creature`] and its `update` cycle.
//! - [`death`] -- Death conditions and [`Vitality`].
//! - [`decision`] -- Controller output contract ([`Decision`]).
//! - [`error`] -- Error types ([`AgentError`]).
//! - [`movement`] -- Toroidal integration of position.
//! - [`reproduction`] -- Birth requests ([`BirthRequest`]).
//! - [`senses`] -- Eye geometry and controller input contract ([`SensorFrame`]).

pub mod actions;
pub mod config;
pub mod creature;
pub mod death;
pub mod decision;
pub mod error;
pub mod movement;
pub mod reproduction;
pub mod senses;

pub use config::CreatureConfig;
pub use creature::{Creature, UpdateOutcome};
pub use death::Vitality;
pub use decision::{CONTROL_OUTPUTS, Decision};
pub use error::AgentError;
pub use reproduction::BirthRequest;
pub use senses::{Eyes, SENSOR_INPUTS, SensorFrame};
