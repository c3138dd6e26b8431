//! Identifier types for simulation entities.
//!
//! Creatures are numbered sequentially in birth order, so ordering by
//! [`CreatureId`] is the same as ordering by insertion into the population.
//! Tiles are addressed by their column/row position in the grid.

use serde::{Deserialize, Serialize};

/// Unique, sequentially assigned identifier for a creature.
///
/// The scheduler hands out ids in strictly increasing order and never
/// reuses one, even after the creature dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u64);

impl CreatureId {
    /// The id following this one, or `None` if the sequence is exhausted.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }
}

impl core::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Column/row address of a tile in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column index (x axis), `0..tiles_per_row`.
    pub col: usize,
    /// Row index (y axis), `0..tiles_per_row`.
    pub row: usize,
}

impl TileCoord {
    /// Create a coordinate from a column and row.
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl core::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
