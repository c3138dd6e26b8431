//! Eye geometry and the controller's input contract.
//!
//! A creature has two eyes. Each casts a ray from the body center at
//! `heading - left_eye_angle` and `heading + right_eye_angle`, of length
//! `radius + vision_range`, and reads the tile under the ray's endpoint.
//! Endpoints are not wrapped; the tile lookup clamps them, so a creature
//! looking off the edge of the world sees an edge tile.

use std::f64::consts::FRAC_PI_2;

use evosim_types::{Color, Position, Tile};
use evosim_world::TileField;

/// Length of the controller input vector.
///
/// Layout: `r, g, b, food, water, left (temperature, food, water),
/// right (temperature, food, water), left eye angle, right eye angle`.
pub const SENSOR_INPUTS: usize = 13;

/// Both eye ray endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eyes {
    /// Left ray endpoint.
    pub left: Position,
    /// Right ray endpoint.
    pub right: Position,
}

impl Eyes {
    /// Cast both rays from `position`.
    pub fn cast(
        position: Position,
        heading: f64,
        left_eye_angle: f64,
        right_eye_angle: f64,
        reach: f64,
    ) -> Self {
        Self {
            left: position.project(heading - left_eye_angle, reach),
            right: position.project(heading + right_eye_angle, reach),
        }
    }

    /// The tiles under both endpoints.
    pub fn look(&self, field: &TileField) -> (Tile, Tile) {
        (
            *field.get(self.left.x, self.left.y),
            *field.get(self.right.x, self.right.y),
        )
    }
}

/// Everything a creature perceives in one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame {
    /// Own body color.
    pub color: Color,
    /// Own food reserve.
    pub food: u32,
    /// Own water reserve.
    pub water: u32,
    /// Tile under the left eye.
    pub left_tile: Tile,
    /// Tile under the right eye.
    pub right_tile: Tile,
    /// Own left eye angle, radians.
    pub left_eye_angle: f64,
    /// Own right eye angle, radians.
    pub right_eye_angle: f64,
}

impl SensorFrame {
    /// Normalized controller inputs in contract order.
    ///
    /// Channels divide by 255, reserves by the matching birth threshold,
    /// and eye angles by `π/2`.
    pub fn to_inputs(&self, birth_food: u32, birth_water: u32) -> Vec<f64> {
        vec![
            channel(self.color.r),
            channel(self.color.g),
            channel(self.color.b),
            reserve(self.food, birth_food),
            reserve(self.water, birth_water),
            channel(self.left_tile.temperature),
            channel(self.left_tile.food),
            channel(self.left_tile.water),
            channel(self.right_tile.temperature),
            channel(self.right_tile.food),
            channel(self.right_tile.water),
            self.left_eye_angle / FRAC_PI_2,
            self.right_eye_angle / FRAC_PI_2,
        ]
    }
}

fn channel(value: u8) -> f64 {
    f64::from(value) / 255.0
}

fn reserve(value: u32, threshold: u32) -> f64 {
    f64::from(value) / f64::from(threshold.max(1))
}
