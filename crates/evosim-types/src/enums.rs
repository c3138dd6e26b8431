//! Enumeration types for creature behavior and lifecycle.

use serde::{Deserialize, Serialize};

/// The closed set of actions a creature can take in one tick.
///
/// The controller emits a single scalar for the action; it is quantized
/// onto this enumeration by [`Action::from_output`]. The discriminant order
/// is the quantization order and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Move food from the occupied tile into the food reserve.
    Eat,
    /// Move water from the occupied tile into the water reserve.
    Drink,
    /// Spend reserves to queue a child.
    Reproduce,
    /// Hook point; no default effect.
    Fight,
    /// Hook point; no default effect.
    Sleep,
    /// Do nothing besides moving.
    Idle,
}

impl Action {
    /// Every action, in quantization order.
    pub const ALL: [Self; 6] = [
        Self::Eat,
        Self::Drink,
        Self::Reproduce,
        Self::Fight,
        Self::Sleep,
        Self::Idle,
    ];

    /// Number of distinct actions.
    pub const COUNT: usize = Self::ALL.len();

    /// Look up an action by its quantization index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Quantize a controller output in `[0, 1]` onto an action.
    ///
    /// Computes `floor(6 * value)` and clips the result into `0..=5`. This is
    /// a many-to-one mapping: each action owns a band of width `1/6`. The
    /// upper edge `value == 1.0` lands on [`Action::Idle`] rather than
    /// indexing past the end. Negative and NaN inputs land on
    /// [`Action::Eat`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn from_output(value: f64) -> Self {
        let last = Self::COUNT.saturating_sub(1);
        let scaled = (value * Self::COUNT as f64).floor();
        // `!(x >= 0)` also catches NaN.
        if !(scaled >= 0.0) {
            return Self::Eat;
        }
        let index = if scaled >= last as f64 {
            last
        } else {
            scaled as usize
        };
        Self::from_index(index).unwrap_or(Self::Idle)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Eat => write!(f, "eat"),
            Self::Drink => write!(f, "drink"),
            Self::Reproduce => write!(f, "reproduce"),
            Self::Fight => write!(f, "fight"),
            Self::Sleep => write!(f, "sleep"),
            Self::Idle => write!(f, "idle"),
        }
    }
}

/// Why a creature died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// The food reserve reached zero.
    Starvation,
    /// The water reserve reached zero (with food still remaining).
    Dehydration,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::Dehydration => write!(f, "dehydration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_bands() {
        assert_eq!(Action::from_output(0.0), Action::Eat);
        assert_eq!(Action::from_output(0.1), Action::Eat);
        assert_eq!(Action::from_output(0.2), Action::Drink);
        assert_eq!(Action::from_output(0.4), Action::Reproduce);
        assert_eq!(Action::from_output(0.5), Action::Fight);
        assert_eq!(Action::from_output(0.7), Action::Sleep);
        assert_eq!(Action::from_output(0.9), Action::Idle);
    }

    #[test]
    fn upper_edge_clips_to_last_action() {
        assert_eq!(Action::from_output(1.0), Action::Idle);
        assert_eq!(Action::from_output(1.5), Action::Idle);
        assert_eq!(Action::from_output(f64::INFINITY), Action::Idle);
    }

    #[test]
    fn out_of_range_low_maps_to_first_action() {
        assert_eq!(Action::from_output(-0.3), Action::Eat);
        assert_eq!(Action::from_output(f64::NAN), Action::Eat);
        assert_eq!(Action::from_output(f64::NEG_INFINITY), Action::Eat);
    }

    #[test]
    fn band_edges_are_exact() {
        // 0.5 * 6 == 3.0 exactly, so the band start belongs to Fight.
        assert_eq!(Action::from_output(0.5), Action::Fight);
        assert_eq!(Action::from_output(0.499), Action::Reproduce);
    }

    #[test]
    fn from_index_covers_all() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(Action::COUNT), None);
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Action::Reproduce).unwrap_or_default();
        assert_eq!(json, "\"reproduce\"");
        assert_eq!(DeathCause::Dehydration.to_string(), "dehydration");
    }
}
