//! Local collision avoidance
//!
//! Keeps the agent from grinding against trees and friendly units.
//! Recomputed fresh from the snapshot every tick; no history. The chosen
//! mechanism adjusts the movement destination, never the final goal.

use ordered_float::OrderedFloat;

use crate::core::config::{AvoidanceMode, StrategyConfig};
use crate::core::types::Point;
use crate::model::units::Wizard;
use crate::model::world::World;

/// A unit the agent must not walk through
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub position: Point,
    pub radius: f64,
}

/// Non-hostile, non-self circles near the agent: trees, allied and neutral
/// wizards and minions, friendly buildings. Hostile units are handled by
/// combat, not steering.
pub fn collect_obstacles(me: &Wizard, world: &World) -> Vec<Obstacle> {
    let opponent = me.faction.opponent();
    let mut obstacles = Vec::new();
    obstacles.extend(
        world
            .trees
            .iter()
            .map(|t| Obstacle { position: t.position, radius: t.radius }),
    );
    obstacles.extend(
        world
            .wizards
            .iter()
            .filter(|w| !w.is_me && w.faction != opponent)
            .map(|w| Obstacle { position: w.position, radius: w.radius }),
    );
    obstacles.extend(
        world
            .minions
            .iter()
            .filter(|m| m.faction != opponent)
            .map(|m| Obstacle { position: m.position, radius: m.radius }),
    );
    obstacles.extend(
        world
            .buildings
            .iter()
            .filter(|b| b.faction == me.faction)
            .map(|b| Obstacle { position: b.position, radius: b.radius }),
    );
    obstacles
}

/// Adjust a movement destination around nearby obstacles
pub fn adjust_destination(
    me_position: Point,
    me_radius: f64,
    destination: Point,
    obstacles: &[Obstacle],
    config: &StrategyConfig,
) -> Point {
    match config.avoidance {
        AvoidanceMode::SpringForce => spring_adjust(
            me_position,
            me_radius,
            destination,
            obstacles,
            config.spring_rest_length,
        ),
        AvoidanceMode::RingSample => ring_adjust(
            me_position,
            me_radius,
            destination,
            obstacles,
            config.ring_sample_count,
            config.ring_sample_radius,
            config.avoidance_margin,
        ),
    }
}

/// Repulsive-force model: every obstacle compressing the rest gap pushes
/// the agent away, harder the deeper the penetration. Any active force
/// redirects the movement along the net push.
fn spring_adjust(
    me_position: Point,
    me_radius: f64,
    destination: Point,
    obstacles: &[Obstacle],
    rest_length: f64,
) -> Point {
    let mut net = Point::default();
    let mut active = false;
    for obstacle in obstacles {
        let rest = me_radius + obstacle.radius + rest_length;
        let distance = me_position.distance_to(obstacle.position).max(1e-9);
        if distance < rest {
            let penetration = rest - distance;
            let away = (me_position - obstacle.position).normalized();
            net = net + away * (penetration / distance);
            active = true;
        }
    }
    if !active || net.length() < 1e-9 {
        return destination;
    }
    me_position + net.normalized() * me_position.distance_to(destination)
}

/// Sampled-clearance model: when the direct heading is blocked, probe a
/// ring of candidate points and re-aim at the clear one closest to the
/// original destination. A fully blocked ring leaves the destination
/// unchanged (best effort).
fn ring_adjust(
    me_position: Point,
    me_radius: f64,
    destination: Point,
    obstacles: &[Obstacle],
    sample_count: usize,
    ring_radius: f64,
    margin: f64,
) -> Point {
    let clear = |point: Point| {
        obstacles
            .iter()
            .all(|o| point.distance_to(o.position) > o.radius + me_radius + margin)
    };

    let heading = (destination - me_position).normalized();
    if heading.length() < 1e-9 {
        return destination;
    }
    let step = me_position + heading * ring_radius;
    if clear(step) {
        return destination;
    }

    (0..sample_count)
        .filter_map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / sample_count as f64;
            let sample = me_position + Point::new(theta.cos(), theta.sin()) * ring_radius;
            clear(sample).then_some(sample)
        })
        .min_by_key(|p| OrderedFloat(p.distance_to(destination)))
        .unwrap_or(destination)
}
