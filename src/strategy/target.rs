//! Target acquisition and non-combat objectives
//!
//! At most one attack target per tick: opposing wizards first, then
//! minions, then buildings. A crowded category is attacked at its
//! lowest-health member so splash abilities pay off; a lone candidate is
//! simply the nearest thing to hit.

use ordered_float::OrderedFloat;

use crate::core::types::{Point, Tick, UnitId};
use crate::model::units::{Faction, Wizard};
use crate::model::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Wizard,
    Minion,
    Building,
}

/// Lightweight copy of the chosen target's combat-relevant fields
#[derive(Debug, Clone)]
pub struct Target {
    pub id: UnitId,
    pub kind: TargetKind,
    pub position: Point,
    pub radius: f64,
    pub life: f64,
}

/// A non-combat goal that overrides ordinary target acquisition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Objective {
    /// Stay close to an allied wizard
    FollowAlly(UnitId),
    /// Reach a rune spot before the pickup window closes
    GrabBonus { position: Point, deadline: Tick },
}

/// Select at most one attack target within the engagement radius
pub fn acquire_target(me: &Wizard, world: &World, engagement_radius: f64) -> Option<Target> {
    let opponent = me.faction.opponent();

    let wizards: Vec<Target> = world
        .wizards_of(opponent)
        .filter(|w| me.distance_to(w.position) < engagement_radius)
        .map(|w| Target {
            id: w.id,
            kind: TargetKind::Wizard,
            position: w.position,
            radius: w.radius,
            life: w.life,
        })
        .collect();
    if let Some(target) = pick(me, wizards) {
        return Some(target);
    }

    let minions: Vec<Target> = world
        .minions_of(opponent)
        .filter(|m| me.distance_to(m.position) < engagement_radius)
        .map(|m| Target {
            id: m.id,
            kind: TargetKind::Minion,
            position: m.position,
            radius: m.radius,
            life: m.life,
        })
        .collect();
    if let Some(target) = pick(me, minions) {
        return Some(target);
    }

    let buildings: Vec<Target> = world
        .buildings_of(opponent)
        .filter(|b| me.distance_to(b.position) < engagement_radius)
        .map(|b| Target {
            id: b.id,
            kind: TargetKind::Building,
            position: b.position,
            radius: b.radius,
            life: b.life,
        })
        .collect();
    pick(me, buildings)
}

/// Lowest health wins in a crowd (distance breaks ties); a lone candidate
/// stands as the nearest.
fn pick(me: &Wizard, candidates: Vec<Target>) -> Option<Target> {
    if candidates.len() > 1 {
        candidates.into_iter().min_by_key(|t| {
            (
                OrderedFloat(t.life),
                OrderedFloat(me.distance_to(t.position)),
            )
        })
    } else {
        candidates
            .into_iter()
            .min_by_key(|t| OrderedFloat(me.distance_to(t.position)))
    }
}

/// Does a fireball pay off against this target?
///
/// Minion packs and buildings always absorb the splash; wizards only when
/// at least one more enemy wizard stands inside the engagement radius.
pub fn splash_worthwhile(
    target: &Target,
    me: &Wizard,
    world: &World,
    engagement_radius: f64,
) -> bool {
    match target.kind {
        TargetKind::Minion | TargetKind::Building => true,
        TargetKind::Wizard => {
            world
                .wizards_of(me.faction.opponent())
                .filter(|w| me.distance_to(w.position) < engagement_radius)
                .count()
                >= 2
        }
    }
}
