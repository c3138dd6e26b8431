//! Read-only snapshots for an external renderer.
//!
//! The simulation never draws. A host reads these views after each tick and
//! paints them however it likes.

use serde::{Deserialize, Serialize};

use crate::ids::{CreatureId, TileCoord};
use crate::structs::{Color, Position, Tile};

/// Everything a renderer needs to draw one creature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatureView {
    /// The creature's id.
    pub id: CreatureId,
    /// Body center.
    pub position: Position,
    /// Facing direction in radians, `[0, 2π)`.
    pub heading: f64,
    /// Body color.
    pub color: Color,
    /// Body radius in world units.
    pub radius: f64,
    /// Where the left eye ray ends.
    pub left_eye: Position,
    /// Where the right eye ray ends.
    pub right_eye: Position,
}

/// A tile together with its grid address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    /// Grid address.
    pub coord: TileCoord,
    /// Current tile contents.
    pub tile: Tile,
}
