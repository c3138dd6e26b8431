//! Error types for the `evosim-world` crate.
//!
//! Lookups and resource writes on a built [`TileField`] cannot fail; only
//! construction validates its inputs.
//!
//! [`TileField`]: crate::tile_field::TileField

/// Errors that can occur while building a tile field.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The grid must have at least one tile per row.
    #[error("tiles_per_row must be at least 1")]
    EmptyGrid,

    /// The board size must be a finite, positive number.
    #[error("board size must be finite and positive, got {0}")]
    InvalidBoardSize(f64),

    /// The tile count does not fit in memory.
    #[error("grid of {tiles_per_row}x{tiles_per_row} tiles is too large: {reason}")]
    GridTooLarge {
        /// Requested tiles per row.
        tiles_per_row: usize,
        /// Why storage could not be reserved.
        reason: String,
    },
}
