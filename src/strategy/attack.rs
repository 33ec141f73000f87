//! Attack resolution and the orientation gate
//!
//! Pure resolution functions; the strategy applies the results. Turning
//! and casting are mutually exclusive in the command schema, so an attack
//! that fails the orientation gate turns this tick and casts on a later
//! one - the Orienting/Casting phases make that protocol explicit.

use crate::core::types::Point;
use crate::model::command::ActionKind;
use crate::model::game::GameConstants;
use crate::model::units::{Skill, Wizard};
use crate::strategy::target::Target;

/// Where the two-phase attack protocol currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    /// Still rotating toward the target
    Orienting,
    /// Facing is good; casts go out
    Casting,
}

/// Result of the orientation gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Facing is within tolerance; cast with this angular offset
    Oriented { cast_angle: f64 },
    /// Facing is off; turn by this much instead of casting
    TurnNeeded { turn: f64 },
}

/// An action the agent can take against the chosen target this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackPick {
    pub action: ActionKind,
    pub min_cast_distance: f64,
}

/// Resolve which attack, if any, the distance and resources allow.
///
/// Evaluated in order: melee inside staff range; nothing beyond cast range
/// (reposition instead); otherwise the first learned, affordable ranged
/// ability - fireball only when the splash pays off and would not catch
/// the caster, then frost bolt, then magic missile.
pub fn resolve_action(
    me: &Wizard,
    game: &GameConstants,
    target: &Target,
    splash_worthwhile: bool,
) -> Option<AttackPick> {
    let distance = me.distance_to(target.position);
    let min_cast_distance = (distance - target.radius).max(0.0);

    if distance < game.staff_range {
        // Staff swings need no minimum detonation distance.
        return Some(AttackPick { action: ActionKind::Staff, min_cast_distance: 0.0 });
    }
    if distance > me.cast_range {
        return None;
    }

    let splash_safe = min_cast_distance > game.fireball_explosion_radius + me.radius;
    if me.has_skill(Skill::Fireball)
        && me.mana > game.fireball_manacost
        && splash_worthwhile
        && splash_safe
    {
        return Some(AttackPick { action: ActionKind::Fireball, min_cast_distance });
    }
    if me.has_skill(Skill::FrostBolt) && me.mana > game.frost_bolt_manacost {
        return Some(AttackPick { action: ActionKind::FrostBolt, min_cast_distance });
    }
    if me.mana > game.magic_missile_manacost {
        return Some(AttackPick { action: ActionKind::MagicMissile, min_cast_distance });
    }
    None
}

/// The orientation gate.
///
/// Tolerance widens with the target's angular half-width (a close, fat
/// target is hard to miss) plus half the melee arc. Inside tolerance the
/// cast angle keeps the bearing's sign so the projectile aims at the
/// target's near edge; outside, the agent must turn first.
pub fn orientation_to(
    me: &Wizard,
    game: &GameConstants,
    target_position: Point,
    target_radius: f64,
) -> Orientation {
    let distance = me.distance_to(target_position).max(1e-9);
    let bearing = me.angle_to(target_position);
    let half_width = (target_radius / distance).atan();
    let off_edge = bearing.abs() - half_width;
    if off_edge <= 0.0 {
        return Orientation::Oriented { cast_angle: 0.0 };
    }
    if off_edge < game.staff_sector / 2.0 {
        return Orientation::Oriented { cast_angle: off_edge.copysign(bearing) };
    }
    Orientation::TurnNeeded { turn: bearing }
}

/// Status self-cast for ticks that carry no offensive action: Shield when
/// falling back, Haste when pushing. Requires the skill, the mana, and an
/// expired action cooldown.
pub fn self_cast(me: &Wizard, game: &GameConstants, retreating: bool) -> Option<ActionKind> {
    if !me.can_act() {
        return None;
    }
    if retreating {
        if me.has_skill(Skill::Shield) && me.mana > game.shield_manacost {
            return Some(ActionKind::Shield);
        }
    } else if me.has_skill(Skill::Haste) && me.mana > game.haste_manacost {
        return Some(ActionKind::Haste);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UnitId;
    use crate::model::units::Faction;
    use crate::strategy::target::TargetKind;

    fn me_with_mana(mana: f64) -> Wizard {
        Wizard {
            id: UnitId(1),
            position: Point::new(0.0, 0.0),
            angle: 0.0,
            radius: 35.0,
            faction: Faction::Academy,
            life: 100.0,
            max_life: 100.0,
            mana,
            max_mana: 100.0,
            vision_range: 600.0,
            cast_range: 500.0,
            skills: Vec::new(),
            remaining_action_cooldown: 0,
            cooldown_period: 60,
            is_me: true,
        }
    }

    fn target_at(x: f64) -> Target {
        Target {
            id: UnitId(2),
            kind: TargetKind::Minion,
            position: Point::new(x, 0.0),
            radius: 25.0,
            life: 50.0,
        }
    }

    #[test]
    fn test_melee_inside_staff_range() {
        let me = me_with_mana(100.0);
        let game = GameConstants::default();
        let pick = resolve_action(&me, &game, &target_at(game.staff_range - 1e-6), true).unwrap();
        assert_eq!(pick.action, ActionKind::Staff);
        assert!(pick.min_cast_distance.abs() < 1e-9);
    }

    #[test]
    fn test_nothing_beyond_cast_range() {
        let me = me_with_mana(100.0);
        let game = GameConstants::default();
        assert!(resolve_action(&me, &game, &target_at(me.cast_range + 1.0), true).is_none());
    }

    #[test]
    fn test_missile_when_nothing_else_learned() {
        let me = me_with_mana(100.0);
        let game = GameConstants::default();
        let pick = resolve_action(&me, &game, &target_at(400.0), true).unwrap();
        assert_eq!(pick.action, ActionKind::MagicMissile);
    }

    #[test]
    fn test_no_ranged_without_mana() {
        let me = me_with_mana(5.0);
        let game = GameConstants::default();
        assert!(resolve_action(&me, &game, &target_at(400.0), true).is_none());
    }

    #[test]
    fn test_frost_bolt_outranks_missile() {
        let mut me = me_with_mana(100.0);
        me.skills.push(Skill::FrostBolt);
        let game = GameConstants::default();
        let pick = resolve_action(&me, &game, &target_at(400.0), false).unwrap();
        assert_eq!(pick.action, ActionKind::FrostBolt);
    }

    #[test]
    fn test_fireball_needs_splash_distance() {
        let mut me = me_with_mana(200.0);
        me.max_mana = 200.0;
        me.skills.push(Skill::Fireball);
        let game = GameConstants::default();

        // Far enough: explosion radius 100 + own radius 35 < 400 - 25.
        let far = resolve_action(&me, &game, &target_at(400.0), true).unwrap();
        assert_eq!(far.action, ActionKind::Fireball);

        // Too close: the blast would catch the caster.
        let near = resolve_action(&me, &game, &target_at(150.0), true).unwrap();
        assert_ne!(near.action, ActionKind::Fireball);
    }

    #[test]
    fn test_fireball_withheld_from_lone_wizard() {
        let mut me = me_with_mana(200.0);
        me.skills.push(Skill::Fireball);
        let game = GameConstants::default();
        let pick = resolve_action(&me, &game, &target_at(400.0), false).unwrap();
        assert_ne!(pick.action, ActionKind::Fireball);
    }

    #[test]
    fn test_dead_ahead_always_oriented() {
        let me = me_with_mana(100.0);
        let game = GameConstants::default();
        for distance in [50.0, 200.0, 499.0] {
            match orientation_to(&me, &game, Point::new(distance, 0.0), 25.0) {
                Orientation::Oriented { cast_angle } => assert_eq!(cast_angle, 0.0),
                Orientation::TurnNeeded { .. } => panic!("dead ahead must be oriented"),
            }
        }
    }

    #[test]
    fn test_abeam_target_needs_turn() {
        let me = me_with_mana(100.0);
        let game = GameConstants::default();
        match orientation_to(&me, &game, Point::new(0.0, 300.0), 25.0) {
            Orientation::TurnNeeded { turn } => {
                assert!((turn - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
            }
            Orientation::Oriented { .. } => panic!("abeam target requires turning"),
        }
    }

    #[test]
    fn test_cast_angle_keeps_bearing_sign() {
        let mut me = me_with_mana(100.0);
        me.angle = 0.1; // Target slightly clockwise of facing
        let game = GameConstants::default();
        match orientation_to(&me, &game, Point::new(300.0, 0.0), 5.0) {
            Orientation::Oriented { cast_angle } => assert!(cast_angle < 0.0),
            Orientation::TurnNeeded { .. } => panic!("offset within arc should cast"),
        }
    }

    #[test]
    fn test_self_cast_shield_when_retreating() {
        let mut me = me_with_mana(100.0);
        me.skills.push(Skill::Shield);
        let game = GameConstants::default();
        assert_eq!(self_cast(&me, &game, true), Some(ActionKind::Shield));
        assert_eq!(self_cast(&me, &game, false), None);
    }

    #[test]
    fn test_self_cast_blocked_by_cooldown() {
        let mut me = me_with_mana(100.0);
        me.skills.push(Skill::Shield);
        me.remaining_action_cooldown = 10;
        let game = GameConstants::default();
        assert_eq!(self_cast(&me, &game, true), None);
    }
}
