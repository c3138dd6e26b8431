//! The tile field: a square grid of resource-bearing cells.
//!
//! Tiles are stored row-major. Continuous world positions map to tiles by
//! dividing by the cell width, flooring, and clamping both axes into the
//! grid, so every lookup lands on a real tile -- negative, huge, and NaN
//! coordinates all resolve to an edge tile. Out-of-range indexing is not a
//! runtime error here; it cannot happen.
//!
//! Every resource write clamps to `[0, 255]` and records the tile in a
//! deduplicated change queue that an external renderer drains.

use evosim_types::{Tile, TileCoord, TileView};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WorldError;
use crate::noise;

/// Returned when a lookup somehow misses. Unreachable for a valid field.
const EMPTY_TILE: Tile = Tile {
    temperature: 0,
    food: 0,
    water: 0,
};

/// Per-attribute noise seeds, drawn once per world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSeeds {
    /// Third noise coordinate for the food field.
    pub food: f64,
    /// Third noise coordinate for the water field.
    pub water: f64,
}

impl TerrainSeeds {
    /// Draw both seeds uniformly from `[0, 256)`.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            food: rng.random_range(0.0..256.0),
            water: rng.random_range(0.0..256.0),
        }
    }
}

/// The world grid.
#[derive(Debug, Clone)]
pub struct TileField {
    /// Tiles along each axis.
    tiles_per_row: usize,
    /// Side length of one tile in world units.
    tile_width: f64,
    /// Row-major tile storage, `tiles_per_row^2` entries.
    tiles: Vec<Tile>,
    /// Food and water each tile held when generated; regrowth ceiling.
    capacity: Vec<(u8, u8)>,
    /// Whether a tile is already queued in `changed`.
    dirty: Vec<bool>,
    /// Tiles changed since the last drain, in first-change order.
    changed: Vec<TileCoord>,
}

impl TileField {
    /// Create a field of empty tiles.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if `tiles_per_row` is 0, the board size is not
    /// a finite positive number, or the grid is too large to allocate.
    pub fn new(board_size: f64, tiles_per_row: usize) -> Result<Self, WorldError> {
        if tiles_per_row == 0 {
            return Err(WorldError::EmptyGrid);
        }
        if !board_size.is_finite() || board_size <= 0.0 {
            return Err(WorldError::InvalidBoardSize(board_size));
        }
        let count =
            tiles_per_row
                .checked_mul(tiles_per_row)
                .ok_or_else(|| WorldError::GridTooLarge {
                    tiles_per_row,
                    reason: "tile count overflows usize".to_owned(),
                })?;

        #[allow(clippy::cast_precision_loss)]
        let tile_width = board_size / tiles_per_row as f64;

        Ok(Self {
            tiles_per_row,
            tile_width,
            tiles: filled(count, EMPTY_TILE, tiles_per_row)?,
            capacity: filled(count, (0, 0), tiles_per_row)?,
            dirty: filled(count, false, tiles_per_row)?,
            changed: Vec::new(),
        })
    }

    /// Create a field and paint it from noise.
    ///
    /// # Errors
    ///
    /// Same as [`TileField::new`].
    pub fn generate(
        board_size: f64,
        tiles_per_row: usize,
        seeds: TerrainSeeds,
        frequency: f64,
    ) -> Result<Self, WorldError> {
        let mut field = Self::new(board_size, tiles_per_row)?;
        field.init(seeds, frequency);
        Ok(field)
    }

    /// Paint every tile from noise.
    ///
    /// Food and water are sampled at `(col * frequency, row * frequency)`
    /// with their own seed and scaled onto `[0, 255]`. Temperature is 0.
    /// The painted values also become each tile's regrowth ceiling. The
    /// change queue is reset, since a renderer must redraw everything anyway.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn init(&mut self, seeds: TerrainSeeds, frequency: f64) {
        let n = self.tiles_per_row;
        for (index, (tile, cap)) in self.tiles.iter_mut().zip(self.capacity.iter_mut()).enumerate() {
            let col = index.checked_rem(n).unwrap_or(0) as f64 * frequency;
            let row = index.checked_div(n).unwrap_or(0) as f64 * frequency;
            let food = (noise::sample(col, row, seeds.food) * 255.0).round() as i64;
            let water = (noise::sample(col, row, seeds.water) * 255.0).round() as i64;
            *tile = Tile::clamped(0, food, water);
            *cap = (tile.food, tile.water);
        }
        self.dirty.fill(false);
        self.changed.clear();
        debug!(
            tiles_per_row = n,
            seed_food = seeds.food,
            seed_water = seeds.water,
            "Tile field painted"
        );
    }

    /// Tiles along each axis.
    pub const fn tiles_per_row(&self) -> usize {
        self.tiles_per_row
    }

    /// Total number of tiles.
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false` for a constructed field; present for API symmetry.
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Side length of one tile in world units.
    pub const fn tile_width(&self) -> f64 {
        self.tile_width
    }

    /// Map a continuous position to the tile containing it, clamped into
    /// the grid on both axes.
    pub fn coord_at(&self, x: f64, y: f64) -> TileCoord {
        TileCoord::new(self.axis_index(x), self.axis_index(y))
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn axis_index(&self, value: f64) -> usize {
        let last = self.tiles_per_row.saturating_sub(1);
        let cell = (value / self.tile_width).floor();
        // NaN fails both comparisons and falls through to the cast, which
        // maps it to 0.
        if cell <= 0.0 {
            0
        } else if cell >= last as f64 {
            last
        } else {
            cell as usize
        }
    }

    /// Row-major index of a coordinate, with each axis clamped.
    fn index_of(&self, coord: TileCoord) -> usize {
        let last = self.tiles_per_row.saturating_sub(1);
        let col = coord.col.min(last);
        let row = coord.row.min(last);
        row.saturating_mul(self.tiles_per_row).saturating_add(col)
    }

    /// The tile containing a continuous position.
    ///
    /// Never fails: out-of-world positions resolve to the nearest edge tile.
    pub fn get(&self, x: f64, y: f64) -> &Tile {
        self.tile(self.coord_at(x, y))
    }

    /// The tile at a grid coordinate, with each axis clamped into the grid.
    pub fn tile(&self, coord: TileCoord) -> &Tile {
        self.tiles.get(self.index_of(coord)).unwrap_or(&EMPTY_TILE)
    }

    /// Set a tile's food, clamped to `[0, 255]`, and mark it changed.
    pub fn set_food(&mut self, coord: TileCoord, value: i64) {
        let index = self.index_of(coord);
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.food = evosim_types::structs::clamp_channel(value);
        }
        self.mark_dirty(index);
    }

    /// Set a tile's water, clamped to `[0, 255]`, and mark it changed.
    pub fn set_water(&mut self, coord: TileCoord, value: i64) {
        let index = self.index_of(coord);
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.water = evosim_types::structs::clamp_channel(value);
        }
        self.mark_dirty(index);
    }

    /// Remove up to `cap` food from a tile and return the amount removed.
    pub fn take_food(&mut self, coord: TileCoord, cap: u8) -> u8 {
        let available = self.tile(coord).food;
        let taken = available.min(cap);
        if taken == 0 {
            return 0;
        }
        self.set_food(coord, i64::from(available.saturating_sub(taken)));
        taken
    }

    /// Remove up to `cap` water from a tile and return the amount removed.
    pub fn take_water(&mut self, coord: TileCoord, cap: u8) -> u8 {
        let available = self.tile(coord).water;
        let taken = available.min(cap);
        if taken == 0 {
            return 0;
        }
        self.set_water(coord, i64::from(available.saturating_sub(taken)));
        taken
    }

    fn mark_dirty(&mut self, index: usize) {
        let Some(flag) = self.dirty.get_mut(index) else {
            return;
        };
        if !*flag {
            *flag = true;
            let n = self.tiles_per_row;
            let col = index.checked_rem(n).unwrap_or(0);
            let row = index.checked_div(n).unwrap_or(0);
            self.changed.push(TileCoord::new(col, row));
        }
    }

    /// Whether any tile changed since the last drain.
    pub const fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Take every tile changed since the last drain, in first-change order.
    pub fn drain_changed(&mut self) -> Vec<TileCoord> {
        self.dirty.fill(false);
        std::mem::take(&mut self.changed)
    }

    /// Iterate every tile with its coordinate, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = TileView> + '_ {
        let n = self.tiles_per_row;
        self.tiles.iter().enumerate().map(move |(index, tile)| TileView {
            coord: TileCoord::new(index.checked_rem(n).unwrap_or(0), index.checked_div(n).unwrap_or(0)),
            tile: *tile,
        })
    }

    /// Grow food and water on every tile by `amount`, up to the value the
    /// tile was painted with. Returns how many tiles changed.
    ///
    /// Goes through the clamped setters, so dirty tracking applies.
    pub fn regrow(&mut self, amount: u8) -> u32 {
        if amount == 0 {
            return 0;
        }
        let n = self.tiles_per_row;
        let mut grown: u32 = 0;
        for index in 0..self.tiles.len() {
            let (Some(tile), Some(&(max_food, max_water))) =
                (self.tiles.get(index).copied(), self.capacity.get(index))
            else {
                continue;
            };
            let coord = TileCoord::new(index.checked_rem(n).unwrap_or(0), index.checked_div(n).unwrap_or(0));
            let mut changed = false;
            if tile.food < max_food {
                let food = tile.food.saturating_add(amount).min(max_food);
                self.set_food(coord, i64::from(food));
                changed = true;
            }
            if tile.water < max_water {
                let water = tile.water.saturating_add(amount).min(max_water);
                self.set_water(coord, i64::from(water));
                changed = true;
            }
            if changed {
                grown = grown.saturating_add(1);
            }
        }
        grown
    }
}

/// A vector of `count` copies of `fill`, or `GridTooLarge` if the storage
/// cannot be reserved.
fn filled<T: Clone>(count: usize, fill: T, tiles_per_row: usize) -> Result<Vec<T>, WorldError> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(count)
        .map_err(|err| WorldError::GridTooLarge {
            tiles_per_row,
            reason: err.to_string(),
        })?;
    storage.resize(count, fill);
    Ok(storage)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn make_field() -> TileField {
        let mut rng = SmallRng::seed_from_u64(42);
        TileField::generate(100.0, 10, TerrainSeeds::random(&mut rng), 0.1).unwrap()
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(TileField::new(100.0, 0), Err(WorldError::EmptyGrid)));
    }

    #[test]
    fn rejects_bad_board_size() {
        assert!(matches!(TileField::new(0.0, 4), Err(WorldError::InvalidBoardSize(_))));
        assert!(matches!(TileField::new(f64::NAN, 4), Err(WorldError::InvalidBoardSize(_))));
        assert!(matches!(TileField::new(-3.0, 4), Err(WorldError::InvalidBoardSize(_))));
    }

    #[test]
    fn rejects_oversized_grid() {
        assert!(matches!(
            TileField::new(100.0, usize::MAX),
            Err(WorldError::GridTooLarge { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn rejects_grid_whose_storage_cannot_be_reserved() {
        // The tile count fits in a usize, but its bytes exceed isize::MAX.
        let result = TileField::new(100.0, 3_000_000_000);
        assert!(matches!(
            result,
            Err(WorldError::GridTooLarge {
                tiles_per_row: 3_000_000_000,
                ..
            })
        ));
    }

    #[test]
    fn taking_from_empty_tile_leaves_queue_untouched() {
        let mut field = make_field();
        let coord = TileCoord::new(2, 2);
        field.set_food(coord, 0);
        field.set_water(coord, 0);
        field.drain_changed();

        assert_eq!(field.take_food(coord, 20), 0);
        assert_eq!(field.take_water(coord, 20), 0);
        assert_eq!(field.take_food(coord, 0), 0);
        assert!(!field.has_changes());
    }

    #[test]
    fn dimensions() {
        let field = make_field();
        assert_eq!(field.tiles_per_row(), 10);
        assert_eq!(field.len(), 100);
        assert!((field.tile_width() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_divides_and_floors() {
        let field = make_field();
        assert_eq!(field.coord_at(0.0, 0.0), TileCoord::new(0, 0));
        assert_eq!(field.coord_at(9.99, 10.0), TileCoord::new(0, 1));
        assert_eq!(field.coord_at(55.0, 99.9), TileCoord::new(5, 9));
    }

    #[test]
    fn lookup_clamps_any_input() {
        let field = make_field();
        let extremes = [
            -1.0,
            -1e300,
            100.0,
            1e300,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
            f64::MAX,
            f64::MIN,
        ];
        for &x in &extremes {
            for &y in &extremes {
                let coord = field.coord_at(x, y);
                assert!(
                    coord.col < field.tiles_per_row() && coord.row < field.tiles_per_row(),
                    "coord {coord} for ({x}, {y})"
                );
                let _ = field.get(x, y);
            }
        }
        assert_eq!(field.coord_at(-5.0, 1e12), TileCoord::new(0, 9));
    }

    #[test]
    fn init_paints_from_noise_with_zero_temperature() {
        let field = make_field();
        assert!(field.tiles().all(|v| v.tile.temperature == 0));
        // A smooth field over 100 tiles is not flat.
        let first = field.tile(TileCoord::new(0, 0)).food;
        assert!(field.tiles().any(|v| v.tile.food != first));
        assert!(!field.has_changes());
    }

    #[test]
    fn init_is_deterministic_for_seeds() {
        let seeds = TerrainSeeds {
            food: 12.5,
            water: 99.25,
        };
        let a = TileField::generate(100.0, 10, seeds, 0.1).unwrap();
        let b = TileField::generate(100.0, 10, seeds, 0.1).unwrap();
        assert!(a.tiles().zip(b.tiles()).all(|(x, y)| x == y));
    }

    #[test]
    fn setters_clamp_and_mark_dirty() {
        let mut field = make_field();
        let coord = TileCoord::new(3, 4);
        field.set_food(coord, 999);
        field.set_water(coord, -20);
        assert_eq!(field.tile(coord).food, 255);
        assert_eq!(field.tile(coord).water, 0);
        assert_eq!(field.drain_changed(), vec![coord]);
        assert!(!field.has_changes());
    }

    #[test]
    fn change_queue_is_deduplicated_and_ordered() {
        let mut field = make_field();
        let a = TileCoord::new(1, 1);
        let b = TileCoord::new(7, 2);
        field.set_food(a, 10);
        field.set_food(b, 10);
        field.set_water(a, 10);
        assert_eq!(field.drain_changed(), vec![a, b]);
        field.set_food(a, 5);
        assert_eq!(field.drain_changed(), vec![a]);
    }

    #[test]
    fn out_of_grid_coord_clamps_on_write() {
        let mut field = make_field();
        field.set_food(TileCoord::new(50, 50), 7);
        assert_eq!(field.tile(TileCoord::new(9, 9)).food, 7);
        assert_eq!(field.drain_changed(), vec![TileCoord::new(9, 9)]);
    }

    #[test]
    fn take_food_is_capped_by_tile_and_cap() {
        let mut field = make_field();
        let coord = TileCoord::new(2, 2);
        field.set_food(coord, 30);
        assert_eq!(field.take_food(coord, 20), 20);
        assert_eq!(field.tile(coord).food, 10);
        assert_eq!(field.take_food(coord, 20), 10);
        assert_eq!(field.tile(coord).food, 0);
        assert_eq!(field.take_food(coord, 20), 0);
    }

    #[test]
    fn take_water_depletes_tile() {
        let mut field = make_field();
        let coord = TileCoord::new(0, 5);
        field.set_water(coord, 15);
        assert_eq!(field.take_water(coord, 40), 15);
        assert_eq!(field.tile(coord).water, 0);
    }

    #[test]
    fn regrow_restores_up_to_capacity() {
        let seeds = TerrainSeeds {
            food: 3.3,
            water: 4.4,
        };
        let mut field = TileField::generate(40.0, 4, seeds, 0.3).unwrap();
        let coord = TileCoord::new(1, 2);
        let original = *field.tile(coord);
        field.set_food(coord, 0);
        field.set_water(coord, 0);
        let _ = field.drain_changed();

        let grown = field.regrow(1);
        assert!(grown >= 1);
        assert_eq!(field.tile(coord).food, 1.min(original.food));
        assert!(field.drain_changed().contains(&coord));

        for _ in 0..300 {
            let _ = field.regrow(5);
        }
        assert_eq!(*field.tile(coord), original);
        // Nothing left to grow.
        let _ = field.drain_changed();
        assert_eq!(field.regrow(5), 0);
        assert!(!field.has_changes());
    }

    #[test]
    fn regrow_zero_is_noop() {
        let mut field = make_field();
        field.set_food(TileCoord::new(0, 0), 0);
        let _ = field.drain_changed();
        assert_eq!(field.regrow(0), 0);
        assert!(!field.has_changes());
    }
}
