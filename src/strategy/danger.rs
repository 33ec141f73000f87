//! Danger and health assessment
//!
//! Pure functions of the snapshot and a candidate position; nothing here
//! mutates. A position is dangerous when some opposing unit can credibly
//! damage an occupant within the next short horizon.

use crate::core::types::{relative_bearing, Point, Tick};
use crate::model::game::GameConstants;
use crate::model::units::{Building, Faction, Minion, MinionKind, Skill, Wizard};
use crate::model::world::World;

/// Flattened view of one opposing unit's ability to do harm
#[derive(Debug, Clone)]
pub struct Threat {
    pub position: Point,
    /// Facing angle; buildings report 0 and are skipped by facing filters
    pub facing: f64,
    pub attack_range: f64,
    /// Largest damage a single action from this unit can deal
    pub max_single_hit: f64,
    pub remaining_cooldown: Tick,
    pub cooldown_period: Tick,
    pub life: f64,
}

impl Threat {
    pub fn from_wizard(wizard: &Wizard, game: &GameConstants) -> Self {
        let mut max_hit = game.magic_missile_direct_damage;
        if wizard.has_skill(Skill::FrostBolt) {
            max_hit = max_hit.max(game.frost_bolt_direct_damage);
        }
        if wizard.has_skill(Skill::Fireball) {
            max_hit = max_hit.max(game.fireball_explosion_max_damage);
        }
        Self {
            position: wizard.position,
            facing: wizard.angle,
            attack_range: wizard.cast_range,
            max_single_hit: max_hit,
            remaining_cooldown: wizard.remaining_action_cooldown,
            cooldown_period: wizard.cooldown_period,
            life: wizard.life,
        }
    }

    pub fn from_minion(minion: &Minion, game: &GameConstants) -> Self {
        let (attack_range, damage) = match minion.kind {
            MinionKind::OrcWoodcutter => {
                (game.orc_woodcutter_attack_range, game.orc_woodcutter_damage)
            }
            MinionKind::FetishBlowdart => {
                (game.fetish_blowdart_attack_range, game.dart_direct_damage)
            }
        };
        Self {
            position: minion.position,
            facing: minion.angle,
            attack_range,
            max_single_hit: damage,
            remaining_cooldown: minion.remaining_action_cooldown,
            cooldown_period: minion.cooldown_period,
            life: minion.life,
        }
    }

    pub fn from_building(building: &Building) -> Self {
        Self {
            position: building.position,
            facing: building.angle,
            attack_range: building.attack_range,
            max_single_hit: building.damage,
            remaining_cooldown: building.remaining_action_cooldown,
            cooldown_period: building.cooldown_period,
            life: building.life,
        }
    }

    /// A unit more than halfway through its cooldown cannot act soon
    pub fn can_act_soon(&self) -> bool {
        self.remaining_cooldown * 2 <= self.cooldown_period
    }
}

/// Collect every opposing wizard, minion, and building as a threat
pub fn collect_threats(world: &World, game: &GameConstants, opponent: Faction) -> Vec<Threat> {
    let mut threats = Vec::new();
    threats.extend(world.wizards_of(opponent).map(|w| Threat::from_wizard(w, game)));
    threats.extend(world.minions_of(opponent).map(|m| Threat::from_minion(m, game)));
    threats.extend(world.buildings_of(opponent).map(Threat::from_building));
    threats
}

/// Can this threat credibly hurt an occupant of `position`?
///
/// The threat's reach is inflated by the occupant's diameter as a safety
/// margin. Threats deep in cooldown are ignored unless the occupant is so
/// low that a single hit (or the buffer alone) would finish it, in which
/// case any in-reach threat counts.
pub fn threatens(
    threat: &Threat,
    position: Point,
    agent_radius: f64,
    agent_life: f64,
    low_life_buffer: f64,
) -> bool {
    let reach = threat.attack_range + 2.0 * agent_radius;
    if threat.position.distance_to(position) > reach {
        return false;
    }
    let desperate = agent_life - low_life_buffer <= 0.0
        || agent_life - low_life_buffer < threat.max_single_hit;
    desperate || threat.can_act_soon()
}

/// Is any threat able to hurt an occupant of `position`?
pub fn position_in_danger(
    position: Point,
    threats: &[Threat],
    agent_radius: f64,
    agent_life: f64,
    low_life_buffer: f64,
) -> bool {
    threats
        .iter()
        .any(|t| threatens(t, position, agent_radius, agent_life, low_life_buffer))
}

/// Aggregate escalation check: enemy life bearing down on the agent
/// against own-side life backing it up.
///
/// Enemies count when inside the vision envelope and facing the agent
/// within the melee half-arc. Support counts the agent itself plus allied
/// wizards and minions inside the forward cone. Buildings have no facing
/// and participate on neither side.
pub fn outnumbered(
    me: &Wizard,
    world: &World,
    game: &GameConstants,
    ratio: f64,
    support_cone_half_angle: f64,
) -> bool {
    let opponent = me.faction.opponent();
    let half_arc = game.staff_sector / 2.0;

    let mut enemy_pressure = 0.0;
    for wizard in world.wizards_of(opponent) {
        if me.distance_to(wizard.position) < me.vision_range
            && relative_bearing(wizard.position, wizard.angle, me.position).abs() <= half_arc
        {
            enemy_pressure += wizard.life;
        }
    }
    for minion in world.minions_of(opponent) {
        if me.distance_to(minion.position) < me.vision_range
            && relative_bearing(minion.position, minion.angle, me.position).abs() <= half_arc
        {
            enemy_pressure += minion.life;
        }
    }

    let mut support = me.life;
    for wizard in world.wizards_of(me.faction) {
        if !wizard.is_me
            && me.distance_to(wizard.position) < me.vision_range
            && me.angle_to(wizard.position).abs() <= support_cone_half_angle
        {
            support += wizard.life;
        }
    }
    for minion in world.minions_of(me.faction) {
        if me.distance_to(minion.position) < me.vision_range
            && me.angle_to(minion.position).abs() <= support_cone_half_angle
        {
            support += minion.life;
        }
    }

    enemy_pressure > ratio * support
}
