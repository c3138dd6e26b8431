//! Position integration on a toroidal world.
//!
//! Movement wraps both axes modulo the world size. Tile lookups clamp
//! instead, so the two never disagree about which tile a creature is on:
//! a wrapped position is always inside the board.

use evosim_types::Position;

/// Wrap a coordinate into `[0, size)`.
///
/// Non-finite coordinates and non-positive sizes collapse to 0.
pub fn wrap(value: f64, size: f64) -> f64 {
    if !value.is_finite() || !(size > 0.0) {
        return 0.0;
    }
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs.
    if wrapped >= size { 0.0 } else { wrapped }
}

/// Advance `position` along `heading` by `speed * speed_coefficient`,
/// wrapping at the world edges.
pub fn step(
    position: Position,
    heading: f64,
    speed: f64,
    speed_coefficient: f64,
    world_size: f64,
) -> Position {
    let moved = position.project(heading, speed * speed_coefficient);
    Position::new(wrap(moved.x, world_size), wrap(moved.y, world_size))
}
