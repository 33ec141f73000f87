//! The per-tick decision policy
//!
//! Architecture: one configurable policy behind the `TickStrategy` trait.
//! The strategy owns small per-match state (lane choice, route cursor,
//! current objective, attack phase, seeded RNG) and resolves each snapshot
//! into a single command. Control flow per tick: skill choice, anti-stuck
//! shake, retreat checks, danger assessment, objective update, target
//! acquisition, attack-or-navigate, collision avoidance, emission.

pub mod attack;
pub mod avoidance;
pub mod danger;
pub mod navigation;
pub mod skills;
pub mod target;

pub use attack::{AttackPhase, AttackPick, Orientation};
pub use danger::Threat;
pub use navigation::{Navigator, Steering, TileGraph, WaypointRoute};
pub use target::{Objective, Target, TargetKind};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::StrategyConfig;
use crate::core::error::Result;
use crate::core::types::{Point, Tick, UnitId};
use crate::model::command::{ActionKind, Command};
use crate::model::game::GameConstants;
use crate::model::units::Wizard;
use crate::model::world::{Lane, World};

/// One decision per simulation tick
pub trait TickStrategy {
    fn decide(&mut self, me: &Wizard, world: &World, game: &GameConstants) -> Command;
}

/// The decision policy and its per-match state
pub struct Strategy {
    config: StrategyConfig,
    lane: Lane,
    navigator: Navigator,
    objective: Option<Objective>,
    attack_phase: AttackPhase,
    rng: ChaCha8Rng,
}

impl Strategy {
    /// Create a strategy with the default seed
    pub fn new(config: StrategyConfig) -> Result<Self> {
        // Deterministic for testing
        Self::with_seed(config, 42)
    }

    /// Create with a specific RNG seed for deterministic behavior
    pub fn with_seed(config: StrategyConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let lane = config
            .lane
            .unwrap_or_else(|| Lane::ALL[rng.gen_range(0..Lane::ALL.len())]);
        let navigator = Navigator::new(&config, lane);
        Ok(Self {
            config,
            lane,
            navigator,
            objective: None,
            attack_phase: AttackPhase::Orienting,
            rng,
        })
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn attack_phase(&self) -> AttackPhase {
        self.attack_phase
    }

    pub fn objective(&self) -> Option<Objective> {
        self.objective
    }

    /// Escort an allied wizard until it disappears from the snapshot
    pub fn follow_ally(&mut self, id: UnitId) {
        self.objective = Some(Objective::FollowAlly(id));
    }

    pub fn clear_objective(&mut self) {
        self.objective = None;
    }

    fn in_spawn_area(&self, position: Point) -> bool {
        position.x < self.config.spawn_extent
            && position.y > self.config.map_size - self.config.spawn_extent
    }

    fn shake_due(&self, tick: Tick) -> bool {
        tick > 0 && tick % self.config.shake_period == 0
    }

    /// One random jolt to break out of terrain locks
    fn shake(&mut self, command: &mut Command, game: &GameConstants) {
        command.speed = Some(if self.rng.gen() {
            game.wizard_forward_speed
        } else {
            -game.wizard_backward_speed
        });
        command.strafe_speed = Some(if self.rng.gen() {
            game.wizard_strafe_speed
        } else {
            -game.wizard_strafe_speed
        });
    }

    /// Swing at whatever hostile is already inside staff reach
    fn defensive_melee(
        &self,
        command: &mut Command,
        me: &Wizard,
        world: &World,
        game: &GameConstants,
    ) -> bool {
        let opponent = me.faction.opponent();
        let mut candidates: Vec<(Point, f64)> = Vec::new();
        candidates.extend(world.wizards_of(opponent).map(|w| (w.position, w.radius)));
        candidates.extend(world.minions_of(opponent).map(|m| (m.position, m.radius)));
        candidates.extend(world.buildings_of(opponent).map(|b| (b.position, b.radius)));

        let Some((position, radius)) = candidates
            .into_iter()
            .filter(|(p, _)| me.distance_to(*p) < game.staff_range)
            .min_by(|a, b| {
                me.distance_to(a.0)
                    .partial_cmp(&me.distance_to(b.0))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        else {
            return false;
        };

        match attack::orientation_to(me, game, position, radius) {
            Orientation::Oriented { cast_angle } => {
                command.action = Some(ActionKind::Staff);
                command.cast_angle = Some(cast_angle);
                command.min_cast_distance = Some(0.0);
                true
            }
            Orientation::TurnNeeded { .. } => false,
        }
    }

    /// Track the rune windows and drop finished or stale objectives
    fn update_objective(&mut self, me: &Wizard, world: &World, game: &GameConstants) {
        let tick = world.tick_index;
        match self.objective {
            Some(Objective::GrabBonus { position, deadline }) => {
                let arrived = me.distance_to(position) < me.radius + game.bonus_radius;
                let bonus_present = world
                    .bonuses
                    .iter()
                    .any(|b| b.position.distance_to(position) < game.bonus_radius);
                if tick > deadline || (arrived && !bonus_present) {
                    self.objective = None;
                }
            }
            Some(Objective::FollowAlly(id)) => {
                let ally_visible = world
                    .wizards
                    .iter()
                    .any(|w| w.id == id && w.faction == me.faction && !w.is_me);
                if !ally_visible {
                    self.objective = None;
                }
            }
            None => {
                let interval = game.bonus_appearance_interval_ticks;
                if interval == 0 {
                    return;
                }
                // A spawned rune in reach beats waiting for the next one.
                if let Some(bonus) = world
                    .bonuses
                    .iter()
                    .find(|b| me.distance_to(b.position) < self.config.bonus_pursuit_radius)
                {
                    self.objective = Some(Objective::GrabBonus {
                        position: bonus.position,
                        deadline: tick + interval,
                    });
                    return;
                }
                // Head out early when a spawn is imminent and close by.
                let until_spawn = interval - (tick % interval);
                if until_spawn <= self.config.bonus_anticipation_ticks {
                    let near = game
                        .bonus_positions()
                        .into_iter()
                        .filter(|p| me.distance_to(*p) < self.config.bonus_pursuit_radius)
                        .min_by(|a, b| {
                            me.distance_to(*a)
                                .partial_cmp(&me.distance_to(*b))
                                .unwrap_or(std::cmp::Ordering::Equal)
                        });
                    if let Some(position) = near {
                        self.objective = Some(Objective::GrabBonus {
                            position,
                            deadline: tick + until_spawn + interval,
                        });
                    }
                }
            }
        }
    }

    /// Where the active objective wants the agent, if anywhere
    fn objective_destination(&self, me: &Wizard, world: &World) -> Option<Point> {
        match self.objective? {
            Objective::GrabBonus { position, .. } => Some(position),
            Objective::FollowAlly(id) => {
                let ally = world.wizards.iter().find(|w| w.id == id)?;
                (me.distance_to(ally.position) > self.config.follow_distance)
                    .then_some(ally.position)
            }
        }
    }

    /// Follow the lane route, forward or back
    fn navigate(
        &mut self,
        command: &mut Command,
        me: &Wizard,
        world: &World,
        game: &GameConstants,
        retreating: bool,
    ) {
        if let Some(point) = self.navigator.advance_point(me.position, me.radius, retreating) {
            self.steer_through(command, me, world, game, point);
        }
    }

    /// Move toward an arbitrary destination (objective routing)
    fn navigate_to(
        &mut self,
        command: &mut Command,
        me: &Wizard,
        world: &World,
        game: &GameConstants,
        destination: Point,
    ) {
        let hop = self.navigator.point_toward(me.position, destination);
        self.steer_through(command, me, world, game, hop);
    }

    /// Shared tail of every movement: avoidance adjustment, then steering.
    /// The turn is suppressed on ticks that already carry an action, since
    /// the schema cannot express turn-and-cast together.
    fn steer_through(
        &mut self,
        command: &mut Command,
        me: &Wizard,
        world: &World,
        game: &GameConstants,
        destination: Point,
    ) {
        let obstacles = avoidance::collect_obstacles(me, world);
        let adjusted = avoidance::adjust_destination(
            me.position,
            me.radius,
            destination,
            &obstacles,
            &self.config,
        );
        if let Some(steering) = navigation::steer(me.position, me.angle, adjusted, game) {
            command.speed = Some(steering.speed);
            command.strafe_speed = Some(steering.strafe);
            if command.action.is_none() {
                command.turn = Some(steering.turn);
            }
        }
    }
}

impl TickStrategy for Strategy {
    fn decide(&mut self, me: &Wizard, world: &World, game: &GameConstants) -> Command {
        let mut command = Command::default();
        command.skill_to_learn = skills::next_skill(&me.skills, &self.config.skill_order);

        if self.in_spawn_area(me.position) {
            // Back at base means either a respawn or a finished retreat;
            // route progress and objectives are void either way.
            self.navigator.reset();
            self.objective = None;
        }

        if self.shake_due(world.tick_index) {
            self.shake(&mut command, game);
            return command;
        }

        let opponent = me.faction.opponent();
        let threats = danger::collect_threats(world, game, opponent);
        let hurt = me.life < self.config.retreat_life_fraction * me.max_life;
        let outnumbered = danger::outnumbered(
            me,
            world,
            game,
            self.config.outnumber_ratio,
            self.config.support_cone_half_angle,
        );
        let exposed = danger::position_in_danger(
            me.position,
            &threats,
            me.radius,
            me.life,
            self.config.low_life_buffer,
        );

        if hurt || outnumbered || exposed {
            tracing::debug!(
                tick = world.tick_index,
                hurt,
                outnumbered,
                exposed,
                "falling back"
            );
            self.attack_phase = AttackPhase::Orienting;
            if !self.defensive_melee(&mut command, me, world, game) {
                if let Some(action) = attack::self_cast(me, game, true) {
                    command.action = Some(action);
                    command.status_target_id = Some(me.id);
                }
            }
            self.navigate(&mut command, me, world, game, true);
            if command.speed.is_none() && !self.in_spawn_area(me.position) {
                // Route exhausted mid-map; fall back on the straight line home.
                let home = self.navigator.home();
                self.navigate_to(&mut command, me, world, game, home);
            }
            return command;
        }

        self.update_objective(me, world, game);
        if let Some(destination) = self.objective_destination(me, world) {
            self.attack_phase = AttackPhase::Orienting;
            self.navigate_to(&mut command, me, world, game, destination);
            return command;
        }

        if let Some(target) = target::acquire_target(me, world, me.vision_range) {
            let splash = target::splash_worthwhile(&target, me, world, me.vision_range);
            if let Some(pick) = attack::resolve_action(me, game, &target, splash) {
                match attack::orientation_to(me, game, target.position, target.radius) {
                    Orientation::Oriented { cast_angle } => {
                        self.attack_phase = AttackPhase::Casting;
                        command.action = Some(pick.action);
                        command.cast_angle = Some(cast_angle);
                        command.min_cast_distance = Some(pick.min_cast_distance);
                    }
                    Orientation::TurnNeeded { turn } => {
                        self.attack_phase = AttackPhase::Orienting;
                        command.turn = Some(turn);
                    }
                }
                return command;
            }
            // Target seen but out of reach; close the distance below.
        }

        self.attack_phase = AttackPhase::Orienting;
        if let Some(action) = attack::self_cast(me, game, false) {
            command.action = Some(action);
            command.status_target_id = Some(me.id);
        }
        self.navigate(&mut command, me, world, game, false);
        command
    }
}
