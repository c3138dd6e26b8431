//! Action handlers.
//!
//! The controller's action selector is quantized onto a closed set of
//! variants; [`perform`] dispatches to exactly one handler per variant.
//! Resource actions work on the tile under the creature's body, not the
//! tiles its eyes see.

use evosim_types::Action;
use evosim_world::TileField;
use tracing::trace;

use crate::config::CreatureConfig;
use crate::creature::Creature;
use crate::reproduction::{BirthRequest, can_reproduce};

/// Run the creature's current action.
///
/// Returns a birth request when the action was a successful `reproduce`.
pub fn perform(
    creature: &mut Creature,
    field: &mut TileField,
    config: &CreatureConfig,
) -> Option<BirthRequest> {
    match creature.action {
        Action::Eat => {
            eat(creature, field, config.eat_cap);
            None
        }
        Action::Drink => {
            drink(creature, field, config.drink_cap);
            None
        }
        Action::Reproduce => reproduce(creature, config),
        Action::Fight => {
            fight(creature);
            None
        }
        Action::Sleep => {
            sleep(creature);
            None
        }
        Action::Idle => None,
    }
}

/// Move up to `cap` food from the occupied tile into the food reserve.
/// Returns the amount moved.
pub fn eat(creature: &mut Creature, field: &mut TileField, cap: u8) -> u8 {
    let coord = field.coord_at(creature.position.x, creature.position.y);
    let taken = field.take_food(coord, cap);
    creature.food = creature.food.saturating_add(u32::from(taken));
    taken
}

/// Move up to `cap` water from the occupied tile into the water reserve.
/// Returns the amount moved.
pub fn drink(creature: &mut Creature, field: &mut TileField, cap: u8) -> u8 {
    let coord = field.coord_at(creature.position.x, creature.position.y);
    let taken = field.take_water(coord, cap);
    creature.water = creature.water.saturating_add(u32::from(taken));
    taken
}

/// Pay the birth cost and describe the child, if both reserves allow it.
///
/// The parent is debited exactly `birth_food` and `birth_water`, and the
/// child is endowed with exactly those amounts.
pub fn reproduce(creature: &mut Creature, config: &CreatureConfig) -> Option<BirthRequest> {
    if !can_reproduce(creature.food, creature.water, config) {
        return None;
    }
    creature.food = creature.food.saturating_sub(config.birth_food);
    creature.water = creature.water.saturating_sub(config.birth_water);

    Some(BirthRequest {
        parent: creature.id,
        generation: creature.generation.saturating_add(1),
        position: creature.position,
        heading: creature.heading,
        color: creature.color,
        left_eye_angle: creature.left_eye_angle,
        right_eye_angle: creature.right_eye_angle,
        food: config.birth_food,
        water: config.birth_water,
        weights: creature.brain.weights(),
    })
}

/// Hook for combat. No effect by default.
pub fn fight(creature: &Creature) {
    trace!(creature_id = %creature.id, "fight");
}

/// Hook for resting. No effect by default.
pub fn sleep(creature: &Creature) {
    trace!(creature_id = %creature.id, "sleep");
}
