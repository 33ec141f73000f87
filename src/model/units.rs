//! Unit records delivered in the world snapshot
//!
//! Every unit is a circle with a position, a facing angle, and a faction.
//! Field values are host-supplied; identity is stable only through `UnitId`.

use serde::{Deserialize, Serialize};

use crate::core::types::{relative_bearing, Point, Tick, UnitId};

/// Faction a unit fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Academy,
    Renegades,
    /// Neutral creeps and runes
    Neutral,
    /// Map furniture such as trees
    Other,
}

impl Faction {
    /// Opposing playable faction. Neutral and Other map to themselves.
    pub fn opponent(&self) -> Faction {
        match self {
            Faction::Academy => Faction::Renegades,
            Faction::Renegades => Faction::Academy,
            other => *other,
        }
    }
}

/// The learnable skill tree: five branches of four upgrades each,
/// plus the five branch ultimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    RangeBonusPassive1,
    MagicalDamageBonusPassive1,
    StaffDamageBonusPassive1,
    MovementBonusFactorPassive1,
    MagicalDamageAbsorptionPassive1,

    RangeBonusAura1,
    MagicalDamageBonusAura1,
    StaffDamageBonusAura1,
    MovementBonusFactorAura1,
    MagicalDamageAbsorptionAura1,

    RangeBonusPassive2,
    MagicalDamageBonusPassive2,
    StaffDamageBonusPassive2,
    MovementBonusFactorPassive2,
    MagicalDamageAbsorptionPassive2,

    RangeBonusAura2,
    MagicalDamageBonusAura2,
    StaffDamageBonusAura2,
    MovementBonusFactorAura2,
    MagicalDamageAbsorptionAura2,

    AdvancedMagicMissile,
    FrostBolt,
    Fireball,
    Haste,
    Shield,
}

/// The controlled unit kind: a spell-casting wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wizard {
    pub id: UnitId,
    pub position: Point,
    /// Facing angle in radians, [-PI, PI]
    pub angle: f64,
    pub radius: f64,
    pub faction: Faction,
    pub life: f64,
    pub max_life: f64,
    pub mana: f64,
    pub max_mana: f64,
    pub vision_range: f64,
    pub cast_range: f64,
    pub skills: Vec<Skill>,
    /// Ticks until the wizard may act again
    pub remaining_action_cooldown: Tick,
    /// Full cooldown period between actions
    pub cooldown_period: Tick,
    pub is_me: bool,
}

impl Wizard {
    pub fn distance_to(&self, point: Point) -> f64 {
        self.position.distance_to(point)
    }

    /// Bearing of `point` relative to this wizard's facing, in [-PI, PI]
    pub fn angle_to(&self, point: Point) -> f64 {
        relative_bearing(self.position, self.angle, point)
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.contains(&skill)
    }

    pub fn can_act(&self) -> bool {
        self.remaining_action_cooldown == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinionKind {
    /// Melee axe swing
    OrcWoodcutter,
    /// Ranged blow dart
    FetishBlowdart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Minion {
    pub id: UnitId,
    pub position: Point,
    pub angle: f64,
    pub radius: f64,
    pub faction: Faction,
    pub kind: MinionKind,
    pub life: f64,
    pub max_life: f64,
    pub remaining_action_cooldown: Tick,
    pub cooldown_period: Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    GuardianTower,
    FactionBase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: UnitId,
    pub position: Point,
    pub angle: f64,
    pub radius: f64,
    pub faction: Faction,
    pub kind: BuildingKind,
    pub life: f64,
    pub max_life: f64,
    pub attack_range: f64,
    pub damage: f64,
    pub remaining_action_cooldown: Tick,
    pub cooldown_period: Tick,
}

/// Static circular obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub id: UnitId,
    pub position: Point,
    pub radius: f64,
}

/// Rune pickup, present only while spawned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub id: UnitId,
    pub position: Point,
    pub radius: f64,
}
