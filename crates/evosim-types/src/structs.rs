//! Core value structs shared across the workspace.

use serde::{Deserialize, Serialize};

/// Clamp an arbitrary integer into a `u8` channel value.
///
/// Every tile write goes through this so the `[0, 255]` range holds no
/// matter what the caller computed.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_channel(value: i64) -> u8 {
    if value < 0 {
        0
    } else if value > 255 {
        255
    } else {
        value as u8
    }
}

/// One cell of the world grid.
///
/// `temperature` is reserved for future terrain types and is currently
/// always 0. `food` and `water` are depleted by eating and drinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Temperature channel (reserved, rendered as red).
    pub temperature: u8,
    /// Food available on the tile (rendered as green).
    pub food: u8,
    /// Water available on the tile (rendered as blue).
    pub water: u8,
}

impl Tile {
    /// Build a tile from unclamped channel values.
    pub const fn clamped(temperature: i64, food: i64, water: i64) -> Self {
        Self {
            temperature: clamp_channel(temperature),
            food: clamp_channel(food),
            water: clamp_channel(water),
        }
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale three unit-interval values onto `[0, 255]` channels.
    ///
    /// Values outside `[0, 1]` (and NaN) are clamped first.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: unit_to_channel(r),
            g: unit_to_channel(g),
            b: unit_to_channel(b),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_channel(value: f64) -> u8 {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    // `as` saturates, and v * 255 is already within range.
    (v * 255.0) as u8
}

/// A continuous position in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` units away along `angle` (radians).
    pub fn project(self, angle: f64, distance: f64) -> Self {
        Self {
            x: angle.cos().mul_add(distance, self.x),
            y: angle.sin().mul_add(distance, self.y),
        }
    }
}

/// Aggregate statistics over the live population.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Number of living creatures.
    pub alive: u32,
    /// Mean food reserve across living creatures (0 if none).
    pub mean_food: f64,
    /// Mean water reserve across living creatures (0 if none).
    pub mean_water: f64,
    /// Highest generation number among living creatures.
    pub max_generation: u32,
}
