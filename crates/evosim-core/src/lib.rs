//! Simulation context, tick scheduler, and orchestration for Evosim.
//!
//! This crate owns the world a host advances: it builds the tile field and
//! the initial population from configuration, runs the per-tick scheduler
//! that applies births and deaths between update passes, and provides a
//! bounded async loop for headless runs.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `evosim-config.yaml` into
//!   strongly-typed structs.
//! - [`population`] -- The live creature set ([`Population`]).
//! - [`runner`] -- Bounded async loop with a [`TickCallback`] hook.
//! - [`simulation`] -- The [`Simulation`] context and world builder.
//! - [`tick`] -- The tick cycle ([`run_tick`], [`TickSummary`]).
//!
//! [`Population`]: population::Population
//! [`TickCallback`]: runner::TickCallback
//! [`Simulation`]: simulation::Simulation
//! [`run_tick`]: tick::run_tick
//! [`TickSummary`]: tick::TickSummary

pub mod config;
pub mod population;
pub mod runner;
pub mod simulation;
pub mod tick;

pub use config::{ConfigError, SimulationConfig};
pub use population::Population;
pub use runner::{NoOpCallback, RunnerError, SimulationEndReason, SimulationResult, TickCallback};
pub use simulation::{BuildError, Simulation};
pub use tick::{BirthRecord, DeathRecord, TickError, TickSummary};
