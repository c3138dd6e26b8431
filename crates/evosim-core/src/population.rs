//! The live creature set.
//!
//! Creatures are keyed by id. Ids are handed out in increasing order, so
//! key order is birth order and iteration is stable within a tick.
//! Membership only changes between update passes, through the scheduler.

use std::collections::BTreeMap;

use evosim_agents::{Creature, CreatureConfig};
use evosim_types::{CreatureId, CreatureView, PopulationStats};

/// Live creatures in birth order.
#[derive(Debug, Clone, Default)]
pub struct Population {
    creatures: BTreeMap<CreatureId, Creature>,
}

impl Population {
    /// An empty population.
    pub const fn new() -> Self {
        Self {
            creatures: BTreeMap::new(),
        }
    }

    /// Add a creature. Returns `false` and leaves the population unchanged
    /// if the id is already present.
    pub fn insert(&mut self, creature: Creature) -> bool {
        let id = creature.id();
        if self.creatures.contains_key(&id) {
            return false;
        }
        self.creatures.insert(id, creature);
        true
    }

    /// Remove a creature by id.
    pub fn remove(&mut self, id: CreatureId) -> Option<Creature> {
        self.creatures.remove(&id)
    }

    /// Look up a creature.
    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    /// Look up a creature for mutation.
    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    /// Snapshot of every id in birth order.
    pub fn ids(&self) -> Vec<CreatureId> {
        self.creatures.keys().copied().collect()
    }

    /// Creatures in birth order.
    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    /// Number of creatures.
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// True when nothing is alive.
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Renderer snapshots in birth order.
    pub fn views(&self, config: &CreatureConfig) -> Vec<CreatureView> {
        self.iter().map(|c| c.view(config)).collect()
    }

    /// Aggregate statistics.
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> PopulationStats {
        let alive = u32::try_from(self.creatures.len()).unwrap_or(u32::MAX);
        if self.creatures.is_empty() {
            return PopulationStats::default();
        }
        let (food, water) = self.iter().fold((0_u64, 0_u64), |(f, w), c| {
            (
                f.saturating_add(u64::from(c.food())),
                w.saturating_add(u64::from(c.water())),
            )
        });
        let count = self.creatures.len() as f64;
        PopulationStats {
            alive,
            mean_food: food as f64 / count,
            mean_water: water as f64 / count,
            max_generation: self.iter().map(Creature::generation).max().unwrap_or(0),
        }
    }
}
