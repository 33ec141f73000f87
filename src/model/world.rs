//! The per-tick world snapshot
//!
//! Fully replaced every tick. Internally consistent for that tick; unit
//! identity carries across ticks only through `UnitId`.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;
use crate::model::units::{Bonus, Building, Faction, Minion, Tree, Wizard};

/// One of the three fixed routes across the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Top,
    Middle,
    Bottom,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Top, Lane::Middle, Lane::Bottom];
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub tick_index: Tick,
    pub wizards: Vec<Wizard>,
    pub minions: Vec<Minion>,
    pub buildings: Vec<Building>,
    pub trees: Vec<Tree>,
    pub bonuses: Vec<Bonus>,
}

impl World {
    pub fn wizards_of(&self, faction: Faction) -> impl Iterator<Item = &Wizard> {
        self.wizards.iter().filter(move |w| w.faction == faction)
    }

    pub fn minions_of(&self, faction: Faction) -> impl Iterator<Item = &Minion> {
        self.minions.iter().filter(move |m| m.faction == faction)
    }

    pub fn buildings_of(&self, faction: Faction) -> impl Iterator<Item = &Building> {
        self.buildings.iter().filter(move |b| b.faction == faction)
    }
}
