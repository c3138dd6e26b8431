//! Death conditions.
//!
//! A creature dies the tick either reserve reaches zero. Reserves are
//! unsigned and debited with saturating subtraction, so "at or below zero"
//! is exactly "equal to zero".

use evosim_types::DeathCause;
use serde::{Deserialize, Serialize};

/// Lifecycle state. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vitality {
    /// Updating every tick.
    Alive,
    /// Queued for removal; produces no further effects.
    Dead(DeathCause),
}

impl Vitality {
    /// Whether the creature still updates.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Check whether the given reserves are fatal.
///
/// Starvation takes precedence when both reserves are empty.
pub const fn check_death(food: u32, water: u32) -> Option<DeathCause> {
    if food == 0 {
        return Some(DeathCause::Starvation);
    }
    if water == 0 {
        return Some(DeathCause::Dehydration);
    }
    None
}
