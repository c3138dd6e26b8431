//! Tunables for creature mechanics.
//!
//! Distances here are in world units. `evosim-core` converts its
//! tile-relative YAML settings into this struct once at build time and
//! passes it into every `update` call.

/// Configuration for creature sensing, metabolism, and reproduction.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureConfig {
    /// Side length of the toroidal world (default: 900.0).
    pub world_size: f64,

    /// Body radius (default: 9.0, one tile of the default board).
    pub radius: f64,

    /// Eye ray length past the body edge (default: 18.0).
    pub vision_range: f64,

    /// Distance covered per tick at full speed (default: 3.0).
    pub speed_coefficient: f64,

    /// Food and water spent every tick, whatever the action (default: 1).
    pub upkeep: u32,

    /// Most food one `eat` can take from a tile (default: 20).
    pub eat_cap: u8,

    /// Most water one `drink` can take from a tile (default: 20).
    pub drink_cap: u8,

    /// Food needed to reproduce, debited from the parent and given to the
    /// child (default: 60).
    pub birth_food: u32,

    /// Water needed to reproduce, debited from the parent and given to the
    /// child (default: 60).
    pub birth_water: u32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            world_size: 900.0,
            radius: 9.0,
            vision_range: 18.0,
            speed_coefficient: 3.0,
            upkeep: 1,
            eat_cap: 20,
            drink_cap: 20,
            birth_food: 60,
            birth_water: 60,
        }
    }
}

impl CreatureConfig {
    /// Distance from the body center to each eye endpoint.
    pub fn reach(&self) -> f64 {
        self.radius + self.vision_range
    }
}
