//! The per-tick command record sent back to the host
//!
//! Every field is optional; `None` means "no change requested". The host
//! treats turning and casting as mutually exclusive within a tick, so the
//! strategy never sets `turn` together with `action`.

use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;
use crate::model::units::Skill;

/// Action a wizard can perform this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Melee staff swing
    Staff,
    MagicMissile,
    FrostBolt,
    Fireball,
    Haste,
    Shield,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Command {
    /// Forward speed; negative values move backward
    pub speed: Option<f64>,
    /// Sideways speed; positive is counter-clockwise of facing
    pub strafe_speed: Option<f64>,
    /// Turn angle for this tick (host clamps to the turn rate)
    pub turn: Option<f64>,
    pub action: Option<ActionKind>,
    /// Projectiles detonate no closer than this distance
    pub min_cast_distance: Option<f64>,
    /// Angular offset of the cast relative to facing
    pub cast_angle: Option<f64>,
    pub skill_to_learn: Option<Skill>,
    /// Target of a status action such as Haste or Shield
    pub status_target_id: Option<UnitId>,
}
