//! The controller's output contract.

use std::f64::consts::{FRAC_PI_2, TAU};

use evosim_types::{Action, Color};

/// Length of the controller output vector.
///
/// Layout: `r, g, b, heading, speed, action, left eye angle,
/// right eye angle`.
pub const CONTROL_OUTPUTS: usize = 8;

/// A creature's choice for one tick, decoded from controller outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// New body color.
    pub color: Color,
    /// New heading in radians, `[0, 2π)`.
    pub heading: f64,
    /// Fraction of full speed, `[0, 1]`.
    pub speed: f64,
    /// What to do this tick.
    pub action: Action,
    /// New left eye angle in radians, `[0, π/2]`.
    pub left_eye_angle: f64,
    /// New right eye angle in radians, `[0, π/2]`.
    pub right_eye_angle: f64,
}

impl Decision {
    /// Decode a controller output vector.
    ///
    /// Returns `None` unless exactly [`CONTROL_OUTPUTS`] values are given.
    /// Each value is clamped to `[0, 1]` (NaN reads as 0) before scaling.
    pub fn from_outputs(outputs: &[f64]) -> Option<Self> {
        let &[r, g, b, heading, speed, action, left, right] = outputs else {
            return None;
        };

        let mut heading = unit(heading) * TAU;
        if heading >= TAU {
            heading = 0.0;
        }

        Some(Self {
            color: Color::from_unit(r, g, b),
            heading,
            speed: unit(speed),
            action: Action::from_output(action),
            left_eye_angle: unit(left) * FRAC_PI_2,
            right_eye_angle: unit(right) * FRAC_PI_2,
        })
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
