//! Shared type definitions for the Evosim simulation.
//!
//! This crate is the single source of truth for the value types that flow
//! between the world, the controller, the creatures, the scheduler, and any
//! external renderer. Everything here is plain data: no simulation logic.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential creature identifiers and tile grid coordinates
//! - [`enums`] -- The closed action set and death causes
//! - [`structs`] -- Tiles, colors, positions, and population statistics
//! - [`view`] -- Read-only snapshots handed to a renderer

pub mod enums;
pub mod ids;
pub mod structs;
pub mod view;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, DeathCause};
pub use ids::{CreatureId, TileCoord};
pub use structs::{Color, PopulationStats, Position, Tile};
pub use view::{CreatureView, TileView};
