//! Property tests for the deterministic decision kernels

use proptest::prelude::*;

use arc_arena::core::config::StrategyConfig;
use arc_arena::core::types::{Point, Tick, UnitId};
use arc_arena::model::{ActionKind, Faction, GameConstants, Wizard};
use arc_arena::strategy::danger::{threatens, Threat};
use arc_arena::strategy::navigation::steer;
use arc_arena::strategy::skills::next_skill;
use arc_arena::strategy::target::{Target, TargetKind};
use arc_arena::strategy::attack::resolve_action;

fn wizard_with(mana: f64, skills: Vec<arc_arena::model::Skill>) -> Wizard {
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
        skills,
        remaining_action_cooldown: 0,
        cooldown_period: 60,
        is_me: true,
    }
}

fn mana_cost(action: ActionKind, game: &GameConstants) -> f64 {
    match action {
        ActionKind::MagicMissile => game.magic_missile_manacost,
        ActionKind::FrostBolt => game.frost_bolt_manacost,
        ActionKind::Fireball => game.fireball_manacost,
        ActionKind::Haste => game.haste_manacost,
        ActionKind::Shield => game.shield_manacost,
        ActionKind::Staff => 0.0,
    }
}

proptest! {
    /// The next skill is always the first unlearned entry, and adding it
    /// to the learned set makes the selection move strictly onward.
    #[test]
    fn skill_selection_is_monotonic(mask in prop::collection::vec(any::<bool>(), 25)) {
        let order = StrategyConfig::default().skill_order;
        let mut learned: Vec<_> = order
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(s, _)| *s)
            .collect();

        while let Some(next) = next_skill(&learned, &order) {
            prop_assert!(!learned.contains(&next));
            let expected = order.iter().find(|s| !learned.contains(s)).copied();
            prop_assert_eq!(Some(next), expected);
            learned.push(next);
        }
        prop_assert_eq!(learned.len(), order.len());
    }

    /// Growing an opponent's attack range never turns a dangerous spot safe.
    #[test]
    fn danger_is_monotone_in_attack_range(
        distance in 0.0f64..2000.0,
        range in 0.0f64..1000.0,
        growth in 0.0f64..1000.0,
        remaining in 0u64..120,
        life in 1.0f64..100.0,
    ) {
        let threat = Threat {
            position: Point::new(distance, 0.0),
            facing: 0.0,
            attack_range: range,
            max_single_hit: 12.0,
            remaining_cooldown: remaining as Tick,
            cooldown_period: 60,
            life: 100.0,
        };
        let mut longer = threat.clone();
        longer.attack_range = range + growth;

        let here = Point::new(0.0, 0.0);
        if threatens(&threat, here, 35.0, life, 12.0) {
            prop_assert!(threatens(&longer, here, 35.0, life, 12.0));
        }
    }

    /// Resolved attacks respect resources and reach: ranged abilities are
    /// affordable, melee never happens beyond staff range, and nothing at
    /// all resolves beyond cast range.
    #[test]
    fn attacks_respect_mana_and_reach(
        mana in 0.0f64..150.0,
        distance in 1.0f64..700.0,
        has_frost in any::<bool>(),
        has_fire in any::<bool>(),
    ) {
        let game = GameConstants::default();
        let mut skills = Vec::new();
        if has_frost {
            skills.push(arc_arena::model::Skill::FrostBolt);
        }
        if has_fire {
            skills.push(arc_arena::model::Skill::Fireball);
        }
        let me = wizard_with(mana, skills);
        let target = Target {
            id: UnitId(2),
            kind: TargetKind::Minion,
            position: Point::new(distance, 0.0),
            radius: 25.0,
            life: 50.0,
        };

        match resolve_action(&me, &game, &target, true) {
            Some(pick) => match pick.action {
                ActionKind::Staff => prop_assert!(distance < game.staff_range),
                ranged => {
                    prop_assert!(distance <= me.cast_range);
                    prop_assert!(me.mana > mana_cost(ranged, &game));
                }
            },
            None => {}
        }
    }

    /// Steering never exceeds the speed caps in any direction.
    #[test]
    fn steering_respects_speed_caps(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        facing in -3.14f64..3.14,
    ) {
        let game = GameConstants::default();
        if let Some(s) = steer(Point::new(0.0, 0.0), facing, Point::new(x, y), &game) {
            prop_assert!(s.speed <= game.wizard_forward_speed + 1e-9);
            prop_assert!(s.speed >= -game.wizard_backward_speed - 1e-9);
            prop_assert!(s.strafe.abs() <= game.wizard_strafe_speed + 1e-9);
        }
    }
}
