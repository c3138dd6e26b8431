//! Birth requests.
//!
//! Reproduction never creates a creature inside the update pass. A parent
//! that can afford it pays the birth cost and emits a [`BirthRequest`]; the
//! scheduler turns requests into creatures after every creature has updated.

use evosim_types::{Color, CreatureId, Position};

use crate::config::CreatureConfig;

/// Everything needed to create a child once the tick's pass is over.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthRequest {
    /// The parent's id.
    pub parent: CreatureId,
    /// Child generation, one past the parent's.
    pub generation: u32,
    /// Where the child appears (the parent's position).
    pub position: Position,
    /// Child heading, radians.
    pub heading: f64,
    /// Child body color.
    pub color: Color,
    /// Child left eye angle, radians.
    pub left_eye_angle: f64,
    /// Child right eye angle, radians.
    pub right_eye_angle: f64,
    /// Child starting food; exactly the food debited from the parent.
    pub food: u32,
    /// Child starting water; exactly the water debited from the parent.
    pub water: u32,
    /// The parent's exported controller weights, mutated when the child's
    /// controller is built.
    pub weights: Vec<Vec<f64>>,
}

/// Whether the given reserves meet both birth thresholds.
pub const fn can_reproduce(food: u32, water: u32, config: &CreatureConfig) -> bool {
    food >= config.birth_food && water >= config.birth_water
}
