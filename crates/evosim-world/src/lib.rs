//! Tile field, terrain generation, and resources for the Evosim simulation.
//!
//! This crate models the physical world: a square grid of resource-bearing
//! tiles painted once at startup from gradient noise, with clamped
//! coordinate lookup and a drainable queue of changed tiles for renderers.
//!
//! # Modules
//!
//! - [`error`] -- Error types for tile-field construction.
//! - [`noise`] -- Deterministic gradient noise over a fixed permutation
//!   table, sampled once per tile per terrain attribute.
//! - [`tile_field`] -- The [`TileField`] grid: lookup, resource mutation,
//!   dirty tracking, and optional regrowth.
//!
//! [`TileField`]: tile_field::TileField

pub mod error;
pub mod noise;
pub mod tile_field;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use noise::sample;
pub use tile_field::{TerrainSeeds, TileField};
