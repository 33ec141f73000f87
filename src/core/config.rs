//! Strategy configuration with documented constants
//!
//! All tunable values and routing tables are collected here. The config is
//! built once at process start, validated, and injected into the strategy;
//! nothing in it mutates afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use crate::core::error::{ArenaError, Result};
use crate::core::types::{Point, Tick};
use crate::model::units::Skill;
use crate::model::world::Lane;

/// Long-distance routing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMode {
    /// Fixed per-lane waypoint sequence with an index cursor
    WaypointList,
    /// Named-tile adjacency graph with BFS hop selection
    TileGraph,
}

/// Local obstacle avoidance mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvoidanceMode {
    /// Repulsive forces from penetrating obstacles redirect the heading
    SpringForce,
    /// Probe a ring of candidate points and re-aim at the best clear one
    RingSample,
}

/// A named tile of the coarse navigation mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavTile {
    pub name: String,
    pub position: Point,
}

impl NavTile {
    pub fn new(name: &str, x: f64, y: f64) -> Self {
        Self { name: name.to_string(), position: Point::new(x, y) }
    }
}

/// Configuration for the decision strategy
///
/// Defaults reproduce the tuning for the standard 4000x4000 arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub navigation: NavigationMode,
    pub avoidance: AvoidanceMode,

    /// Pin the lane choice; `None` picks a random lane at construction
    pub lane: Option<Lane>,

    /// Total priority order over skills; the first unlearned entry is
    /// requested each tick
    pub skill_order: Vec<Skill>,

    /// Ordered waypoint sequence per lane, home corner to enemy corner
    pub lane_waypoints: HashMap<Lane, Vec<Point>>,

    /// Tiles of the coarse navigation mesh
    pub tiles: Vec<NavTile>,

    /// Tiles closer than this are considered directly travelable (graph edge)
    pub tile_link_distance: f64,

    /// Destinations closer than this skip the tile graph entirely
    pub direct_travel_distance: f64,

    /// Side length of the map this config was built for
    pub map_size: f64,

    /// Spawn detection box: x below this and y above `map_size` minus this
    ///
    /// Re-appearing inside the box means the agent respawned; the route
    /// cursor and any objective are reset.
    pub spawn_extent: f64,

    // === RETREAT / DANGER ===
    /// Retreat outright below this fraction of max life
    pub retreat_life_fraction: f64,

    /// Retreat when enemy life in the threat envelope exceeds own-side
    /// life by this ratio. Observed useful range is 1.2 to 2.0; higher
    /// values hold ground longer.
    pub outnumber_ratio: f64,

    /// Half-angle of the forward cone in which allies count as support
    pub support_cone_half_angle: f64,

    /// Life buffer subtracted before comparing against enemy burst damage.
    /// At the default (one magic missile), danger triggers while the agent
    /// can still survive one more hit.
    pub low_life_buffer: f64,

    // === ANTI-STUCK ===
    /// Every this many ticks the agent emits one random shake movement
    /// to break out of terrain locks. Tick 0 never shakes.
    pub shake_period: Tick,

    // === OBJECTIVES ===
    /// Only chase rune bonuses closer than this
    pub bonus_pursuit_radius: f64,

    /// Start moving toward a rune spot this many ticks before it spawns
    pub bonus_anticipation_ticks: Tick,

    /// Stop closing on a followed ally once within this distance
    pub follow_distance: f64,

    // === AVOIDANCE ===
    /// Surface gap below which an obstacle starts pushing back
    pub spring_rest_length: f64,

    /// Number of probe points on the clearance ring
    pub ring_sample_count: usize,

    /// Radius of the clearance ring around the agent
    pub ring_sample_radius: f64,

    /// Extra clearance added to summed radii in overlap checks
    pub avoidance_margin: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::for_map_size(4000.0)
    }
}

impl StrategyConfig {
    /// Build the standard tables scaled to a square map of the given size
    pub fn for_map_size(map_size: f64) -> Self {
        let s = map_size / 4000.0;
        Self {
            navigation: NavigationMode::WaypointList,
            avoidance: AvoidanceMode::RingSample,
            lane: None,
            skill_order: default_skill_order(),
            lane_waypoints: default_lane_waypoints(s),
            tiles: default_tiles(s),
            tile_link_distance: 1200.0 * s,
            direct_travel_distance: 800.0 * s,
            map_size,
            spawn_extent: 400.0 * s,
            retreat_life_fraction: 0.5,
            outnumber_ratio: 1.2,
            support_cone_half_angle: FRAC_PI_2,
            low_life_buffer: 12.0,
            shake_period: 100,
            bonus_pursuit_radius: 1000.0 * s,
            bonus_anticipation_ticks: 200,
            follow_distance: 200.0 * s,
            spring_rest_length: 40.0 * s,
            ring_sample_count: 12,
            ring_sample_radius: 70.0 * s,
            avoidance_margin: 10.0 * s,
        }
    }

    /// Parse a TOML profile; missing fields take their defaults
    pub fn from_profile_str(contents: &str) -> Result<Self> {
        let config: StrategyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML profile from disk
    pub fn load_profile(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_profile_str(&contents)
    }

    /// Validate internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.skill_order.is_empty() {
            return Err(ArenaError::InvalidConfig("skill_order is empty".into()));
        }
        let unique: std::collections::HashSet<_> = self.skill_order.iter().collect();
        if unique.len() != self.skill_order.len() {
            return Err(ArenaError::InvalidConfig(
                "skill_order contains duplicates".into(),
            ));
        }
        for lane in Lane::ALL {
            match self.lane_waypoints.get(&lane) {
                None => {
                    return Err(ArenaError::InvalidConfig(format!(
                        "no waypoints for lane {:?}",
                        lane
                    )))
                }
                Some(points) if points.len() < 2 => {
                    return Err(ArenaError::InvalidConfig(format!(
                        "lane {:?} needs at least 2 waypoints, has {}",
                        lane,
                        points.len()
                    )))
                }
                Some(_) => {}
            }
        }
        if self.tiles.len() < 2 {
            return Err(ArenaError::InvalidConfig(format!(
                "tile graph needs at least 2 tiles, has {}",
                self.tiles.len()
            )));
        }
        if self.tile_link_distance <= 0.0 || self.direct_travel_distance <= 0.0 {
            return Err(ArenaError::InvalidConfig(
                "tile distances must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.retreat_life_fraction) {
            return Err(ArenaError::InvalidConfig(format!(
                "retreat_life_fraction ({}) must be within [0, 1]",
                self.retreat_life_fraction
            )));
        }
        if self.outnumber_ratio < 1.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "outnumber_ratio ({}) must be >= 1.0",
                self.outnumber_ratio
            )));
        }
        if self.shake_period == 0 {
            return Err(ArenaError::InvalidConfig("shake_period must be > 0".into()));
        }
        if self.ring_sample_count == 0 || self.ring_sample_radius <= 0.0 {
            return Err(ArenaError::InvalidConfig(
                "ring sampling needs a positive count and radius".into(),
            ));
        }
        if self.spring_rest_length <= 0.0 || self.avoidance_margin < 0.0 {
            return Err(ArenaError::InvalidConfig(
                "avoidance distances out of range".into(),
            ));
        }
        if self.map_size <= 0.0 || self.spawn_extent <= 0.0 || self.spawn_extent >= self.map_size {
            return Err(ArenaError::InvalidConfig(
                "spawn box must fit inside the map".into(),
            ));
        }
        Ok(())
    }
}

/// Skill learning order: all passives and auras branch by branch,
/// then the ultimates, damage abilities first.
fn default_skill_order() -> Vec<Skill> {
    vec![
        Skill::RangeBonusPassive1,
        Skill::MagicalDamageBonusPassive1,
        Skill::StaffDamageBonusPassive1,
        Skill::MovementBonusFactorPassive1,
        Skill::MagicalDamageAbsorptionPassive1,
        Skill::RangeBonusAura1,
        Skill::MagicalDamageBonusAura1,
        Skill::StaffDamageBonusAura1,
        Skill::MovementBonusFactorAura1,
        Skill::MagicalDamageAbsorptionAura1,
        Skill::RangeBonusPassive2,
        Skill::MagicalDamageBonusPassive2,
        Skill::StaffDamageBonusPassive2,
        Skill::MovementBonusFactorPassive2,
        Skill::MagicalDamageAbsorptionPassive2,
        Skill::RangeBonusAura2,
        Skill::MagicalDamageBonusAura2,
        Skill::StaffDamageBonusAura2,
        Skill::MovementBonusFactorAura2,
        Skill::MagicalDamageAbsorptionAura2,
        Skill::AdvancedMagicMissile,
        Skill::FrostBolt,
        Skill::Fireball,
        Skill::Haste,
        Skill::Shield,
    ]
}

fn default_lane_waypoints(s: f64) -> HashMap<Lane, Vec<Point>> {
    let p = |x: f64, y: f64| Point::new(x * s, y * s);
    let mut waypoints = HashMap::new();
    waypoints.insert(
        Lane::Top,
        vec![
            // Up the west edge.
            p(200.0, 3400.0),
            p(200.0, 3000.0),
            p(200.0, 2600.0),
            p(200.0, 2200.0),
            p(200.0, 1800.0),
            p(200.0, 1400.0),
            p(200.0, 1000.0),
            p(200.0, 600.0),
            p(200.0, 200.0),
            // East along the north edge.
            p(600.0, 200.0),
            p(1000.0, 200.0),
            p(1400.0, 200.0),
            p(1800.0, 200.0),
            p(2200.0, 200.0),
            p(2600.0, 200.0),
            p(3000.0, 200.0),
            p(3400.0, 200.0),
            p(3800.0, 200.0),
        ],
    );
    waypoints.insert(
        Lane::Middle,
        vec![
            // Around the home base.
            p(200.0, 3400.0),
            p(600.0, 3400.0),
            // Along the diagonal.
            p(1000.0, 3000.0),
            p(1400.0, 2600.0),
            p(1800.0, 2200.0),
            p(2200.0, 1800.0),
            p(2600.0, 1400.0),
            p(3000.0, 1000.0),
            p(3400.0, 600.0),
            // Around the enemy base.
            p(3400.0, 200.0),
            p(3800.0, 200.0),
        ],
    );
    waypoints.insert(
        Lane::Bottom,
        vec![
            // East along the south edge.
            p(600.0, 3800.0),
            p(1000.0, 3800.0),
            p(1400.0, 3800.0),
            p(1800.0, 3800.0),
            p(2200.0, 3800.0),
            p(2600.0, 3800.0),
            p(3000.0, 3800.0),
            p(3400.0, 3800.0),
            p(3800.0, 3800.0),
            // Up the east edge.
            p(3800.0, 3400.0),
            p(3800.0, 3000.0),
            p(3800.0, 2600.0),
            p(3800.0, 2200.0),
            p(3800.0, 1800.0),
            p(3800.0, 1400.0),
            p(3800.0, 1000.0),
            p(3800.0, 600.0),
            p(3800.0, 200.0),
        ],
    );
    waypoints
}

/// Tiles cover both lane runs, the center diagonal, and the four corners.
/// Spacing keeps every intended hop under the default link distance.
fn default_tiles(s: f64) -> Vec<NavTile> {
    let t = |name: &str, x: f64, y: f64| NavTile::new(name, x * s, y * s);
    vec![
        t("home_base", 200.0, 3800.0),
        t("top_1", 200.0, 3000.0),
        t("top_2", 200.0, 2200.0),
        t("top_3", 200.0, 1400.0),
        t("top_4", 200.0, 600.0),
        t("top_corner", 200.0, 200.0),
        t("north_1", 1000.0, 200.0),
        t("north_2", 1800.0, 200.0),
        t("north_3", 2600.0, 200.0),
        t("north_4", 3400.0, 200.0),
        t("enemy_base", 3800.0, 200.0),
        t("south_1", 1000.0, 3800.0),
        t("south_2", 1800.0, 3800.0),
        t("south_3", 2600.0, 3800.0),
        t("south_4", 3400.0, 3800.0),
        t("bottom_corner", 3800.0, 3800.0),
        t("east_1", 3800.0, 3000.0),
        t("east_2", 3800.0, 2200.0),
        t("east_3", 3800.0, 1400.0),
        t("east_4", 3800.0, 600.0),
        t("mid_1", 1000.0, 3000.0),
        t("mid_2", 1600.0, 2400.0),
        t("center", 2000.0, 2000.0),
        t("mid_3", 2400.0, 1600.0),
        t("mid_4", 3000.0, 1000.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StrategyConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_skill_order_covers_all_without_duplicates() {
        let order = default_skill_order();
        assert_eq!(order.len(), 25);
        let unique: std::collections::HashSet<_> = order.iter().collect();
        assert_eq!(unique.len(), order.len());
    }

    #[test]
    fn test_empty_skill_order_rejected() {
        let mut config = StrategyConfig::default();
        config.skill_order.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_skill_rejected() {
        let mut config = StrategyConfig::default();
        config.skill_order.push(config.skill_order[0]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_lane_rejected() {
        let mut config = StrategyConfig::default();
        config
            .lane_waypoints
            .insert(Lane::Middle, vec![Point::new(0.0, 0.0)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_lane_rejected() {
        let mut config = StrategyConfig::default();
        config.lane_waypoints.remove(&Lane::Top);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_outnumber_ratio_below_one_rejected() {
        let mut config = StrategyConfig::default();
        config.outnumber_ratio = 0.8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scaled_config_keeps_proportions() {
        let half = StrategyConfig::for_map_size(2000.0);
        assert!(half.validate().is_ok());
        let top = &half.lane_waypoints[&Lane::Top];
        assert_eq!(top[0], Point::new(100.0, 1700.0));
    }

    #[test]
    fn test_profile_overrides_defaults() {
        let config = StrategyConfig::from_profile_str(
            "navigation = \"TileGraph\"\noutnumber_ratio = 1.6\n",
        )
        .expect("profile should parse");
        assert_eq!(config.navigation, NavigationMode::TileGraph);
        assert_eq!(config.outnumber_ratio, 1.6);
        // Untouched fields keep their defaults
        assert_eq!(config.shake_period, 100);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        assert!(StrategyConfig::from_profile_str("outnumber_ratio = 0.5\n").is_err());
    }

    #[test]
    fn test_default_tile_graph_is_connected() {
        // Every tile must reach every other through links shorter than
        // the configured link distance.
        let config = StrategyConfig::default();
        let n = config.tiles.len();
        let mut reached = vec![false; n];
        let mut queue = vec![0usize];
        reached[0] = true;
        while let Some(i) = queue.pop() {
            for j in 0..n {
                if !reached[j]
                    && config.tiles[i]
                        .position
                        .distance_to(config.tiles[j].position)
                        <= config.tile_link_distance
                {
                    reached[j] = true;
                    queue.push(j);
                }
            }
        }
        assert!(reached.iter().all(|&r| r), "tile graph has unreachable tiles");
    }
}
