//! Route following and long-distance routing
//!
//! Two interchangeable routing strategies sit behind the `Navigator`:
//! a fixed per-lane waypoint list with an index cursor, and a coarse
//! named-tile graph searched breadth-first. Both resolve into the same
//! forward/strafe steering.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::config::{NavTile, NavigationMode, StrategyConfig};
use crate::core::types::{relative_bearing, Point};
use crate::model::game::GameConstants;
use crate::model::world::Lane;

/// Distances below this count as already arrived
const ARRIVAL_EPSILON: f64 = 1e-3;

/// Movement request resolved from a destination point
#[derive(Debug, Clone, Copy)]
pub struct Steering {
    pub speed: f64,
    pub strafe: f64,
    /// Bearing to the destination; also the turn the agent wants
    pub turn: f64,
}

/// Resolve a destination into forward/strafe speeds.
///
/// The unit direction to the target is projected onto the agent's forward
/// and perpendicular axes; each projection is scaled by its speed cap,
/// with the forward cap picked by the projection's sign. Returns `None`
/// when the agent has effectively arrived.
pub fn steer(
    position: Point,
    facing: f64,
    destination: Point,
    game: &GameConstants,
) -> Option<Steering> {
    if position.distance_to(destination) < ARRIVAL_EPSILON {
        return None;
    }
    let bearing = relative_bearing(position, facing, destination);
    let forward = bearing.cos();
    let sideways = bearing.sin();
    let forward_cap = if forward >= 0.0 {
        game.wizard_forward_speed
    } else {
        game.wizard_backward_speed
    };
    Some(Steering {
        speed: forward * forward_cap,
        strafe: sideways * game.wizard_strafe_speed,
        turn: bearing,
    })
}

/// Fixed ordered waypoint sequence with an index cursor
#[derive(Debug, Clone)]
pub struct WaypointRoute {
    points: Vec<Point>,
    cursor: isize,
    retreating: bool,
}

impl WaypointRoute {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points, cursor: 0, retreating: false }
    }

    /// Back to the first waypoint, advancing
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.retreating = false;
    }

    pub fn current(&self) -> Option<Point> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|i| self.points.get(i))
            .copied()
    }

    /// Waypoint to move toward this tick, advancing the cursor on arrival.
    ///
    /// A direction change shifts the cursor one step the new way so the
    /// point just left does not immediately re-trigger. Past either end
    /// of the route, `None`: the agent has nowhere further to go.
    pub fn next_target(
        &mut self,
        position: Point,
        arrival_radius: f64,
        retreating: bool,
    ) -> Option<Point> {
        if self.retreating != retreating {
            self.cursor += if retreating { -1 } else { 1 };
            self.retreating = retreating;
        }
        if let Some(current) = self.current() {
            if position.distance_to(current) < arrival_radius {
                self.cursor += if retreating { -1 } else { 1 };
            }
        }
        self.current()
    }
}

/// Coarse navigation mesh over named tiles
#[derive(Debug, Clone)]
pub struct TileGraph {
    tiles: Vec<NavTile>,
    adjacency: Vec<Vec<usize>>,
    direct_travel_distance: f64,
}

impl TileGraph {
    /// Link every tile pair within the given travel distance
    pub fn new(tiles: Vec<NavTile>, link_distance: f64, direct_travel_distance: f64) -> Self {
        let mut adjacency = vec![Vec::new(); tiles.len()];
        for i in 0..tiles.len() {
            for j in (i + 1)..tiles.len() {
                if tiles[i].position.distance_to(tiles[j].position) <= link_distance {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }
        Self { tiles, adjacency, direct_travel_distance }
    }

    /// Index of the tile containing (nearest to) a position
    pub fn tile_at(&self, position: Point) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, tile) in self.tiles.iter().enumerate() {
            let d = tile.position.distance_to(position);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Point to move toward next on the way to `destination`.
    ///
    /// Short trips skip the graph. Longer ones search breadth-first from
    /// the destination's tile back toward the agent's, so the first tile
    /// found adjacent to the agent's is the immediate hop. No path means
    /// the graph is cut; log it and fall back to moving directly.
    pub fn next_hop(&self, from: Point, destination: Point) -> Point {
        if from.distance_to(destination) <= self.direct_travel_distance {
            return destination;
        }
        let (Some(here), Some(goal)) = (self.tile_at(from), self.tile_at(destination)) else {
            return destination;
        };
        if here == goal {
            return destination;
        }
        match self.first_hop(goal, here) {
            Some(hop) => self.tiles[hop].position,
            None => {
                tracing::warn!(
                    from = %self.tiles[here].name,
                    to = %self.tiles[goal].name,
                    "no tile path, moving directly"
                );
                destination
            }
        }
    }

    /// BFS from `start` until a tile adjacent to `next_to` is dequeued.
    /// Neighbors are marked visited as they are enqueued.
    fn first_hop(&self, start: usize, next_to: usize) -> Option<usize> {
        let mut visited = AHashSet::new();
        visited.insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(tile) = queue.pop_front() {
            if self.adjacency[tile].contains(&next_to) {
                return Some(tile);
            }
            for &neighbor in &self.adjacency[tile] {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }
}

/// Mode-selected router owning the per-match route state
#[derive(Debug, Clone)]
pub struct Navigator {
    mode: NavigationMode,
    route: WaypointRoute,
    graph: TileGraph,
    home: Point,
    enemy_base: Point,
}

impl Navigator {
    /// Build the router for a chosen lane. The caller has validated the
    /// config, so the lane's waypoints are present.
    pub fn new(config: &StrategyConfig, lane: Lane) -> Self {
        let points = config
            .lane_waypoints
            .get(&lane)
            .cloned()
            .unwrap_or_default();
        let graph = TileGraph::new(
            config.tiles.clone(),
            config.tile_link_distance,
            config.direct_travel_distance,
        );
        let corner = config.spawn_extent / 2.0;
        Self {
            mode: config.navigation,
            route: WaypointRoute::new(points),
            graph,
            home: Point::new(corner, config.map_size - corner),
            enemy_base: Point::new(config.map_size - corner, corner),
        }
    }

    /// Forget route progress (the agent respawned)
    pub fn reset(&mut self) {
        self.route.reset();
    }

    /// The home corner retreats aim for
    pub fn home(&self) -> Point {
        self.home
    }

    /// Next point along the lane, toward the enemy base or back home
    pub fn advance_point(
        &mut self,
        position: Point,
        arrival_radius: f64,
        retreating: bool,
    ) -> Option<Point> {
        match self.mode {
            NavigationMode::WaypointList => {
                self.route.next_target(position, arrival_radius, retreating)
            }
            NavigationMode::TileGraph => {
                let destination = if retreating { self.home } else { self.enemy_base };
                if position.distance_to(destination) < arrival_radius {
                    return None;
                }
                Some(self.graph.next_hop(position, destination))
            }
        }
    }

    /// Next point on the way to an arbitrary destination (objectives)
    pub fn point_toward(&self, position: Point, destination: Point) -> Point {
        match self.mode {
            NavigationMode::WaypointList => destination,
            NavigationMode::TileGraph => self.graph.next_hop(position, destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameConstants {
        GameConstants::default()
    }

    #[test]
    fn test_steer_dead_ahead_is_full_forward() {
        let s = steer(Point::new(0.0, 0.0), 0.0, Point::new(100.0, 0.0), &game()).unwrap();
        assert!((s.speed - game().wizard_forward_speed).abs() < 1e-9);
        assert!(s.strafe.abs() < 1e-9);
        assert!(s.turn.abs() < 1e-9);
    }

    #[test]
    fn test_steer_behind_uses_backward_cap() {
        let s = steer(Point::new(0.0, 0.0), 0.0, Point::new(-100.0, 0.0), &game()).unwrap();
        assert!((s.speed + game().wizard_backward_speed).abs() < 1e-9);
    }

    #[test]
    fn test_steer_abeam_is_pure_strafe() {
        let s = steer(Point::new(0.0, 0.0), 0.0, Point::new(0.0, 100.0), &game()).unwrap();
        assert!(s.speed.abs() < 1e-9);
        assert!((s.strafe - game().wizard_strafe_speed).abs() < 1e-9);
    }

    #[test]
    fn test_steer_arrived_requests_nothing() {
        assert!(steer(Point::new(5.0, 5.0), 0.0, Point::new(5.0, 5.0), &game()).is_none());
    }

    #[test]
    fn test_route_advances_on_arrival() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let mut route = WaypointRoute::new(vec![a, b]);

        // Standing on the first waypoint moves the cursor to the second.
        assert_eq!(route.next_target(a, 35.0, false), Some(b));
    }

    #[test]
    fn test_route_halts_past_the_end() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let mut route = WaypointRoute::new(vec![a, b]);
        assert_eq!(route.next_target(a, 35.0, false), Some(b));
        assert_eq!(route.next_target(b, 35.0, false), None);
        // Still halted on the following tick.
        assert_eq!(route.next_target(b, 35.0, false), None);
    }

    #[test]
    fn test_route_reversal_shifts_cursor() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64 * 100.0, 0.0)).collect();
        let mut route = WaypointRoute::new(points.clone());
        // Walk forward to index 2.
        route.next_target(points[0], 35.0, false);
        route.next_target(points[1], 35.0, false);
        // Direction change: the shift skips back past the point just left.
        let target = route.next_target(Point::new(150.0, 0.0), 35.0, true);
        assert_eq!(target, Some(points[1]));
    }

    #[test]
    fn test_route_reset() {
        let points: Vec<Point> = (0..3).map(|i| Point::new(i as f64 * 100.0, 0.0)).collect();
        let mut route = WaypointRoute::new(points.clone());
        route.next_target(points[0], 35.0, false);
        route.reset();
        assert_eq!(route.current(), Some(points[0]));
    }

    fn small_graph(link: f64) -> TileGraph {
        TileGraph::new(
            vec![
                NavTile::new("a", 0.0, 0.0),
                NavTile::new("b", 500.0, 0.0),
                NavTile::new("c", 1000.0, 0.0),
            ],
            link,
            300.0,
        )
    }

    #[test]
    fn test_direct_edge_routes_single_hop() {
        let graph = small_graph(600.0);
        // Agent on tile a, destination on tile b: the hop is b itself.
        let hop = graph.next_hop(Point::new(10.0, 10.0), Point::new(500.0, 0.0));
        assert_eq!(hop, Point::new(500.0, 0.0));
    }

    #[test]
    fn test_two_hop_route_goes_through_middle() {
        let graph = small_graph(600.0);
        let hop = graph.next_hop(Point::new(0.0, 0.0), Point::new(1000.0, 0.0));
        assert_eq!(hop, Point::new(500.0, 0.0));
    }

    #[test]
    fn test_disconnected_graph_falls_back_to_direct() {
        // Links too short for any edge to form.
        let graph = small_graph(100.0);
        let destination = Point::new(1000.0, 0.0);
        let hop = graph.next_hop(Point::new(0.0, 0.0), destination);
        assert_eq!(hop, destination);
    }

    #[test]
    fn test_short_trip_skips_graph() {
        let graph = small_graph(600.0);
        let destination = Point::new(200.0, 100.0);
        assert_eq!(graph.next_hop(Point::new(0.0, 0.0), destination), destination);
    }

    #[test]
    fn test_navigator_tile_mode_advances_toward_enemy_base() {
        let mut config = StrategyConfig::default();
        config.navigation = NavigationMode::TileGraph;
        let mut navigator = Navigator::new(&config, Lane::Middle);
        let spawn = Point::new(200.0, 3800.0);
        let hop = navigator.advance_point(spawn, 35.0, false);
        assert!(hop.is_some());
        // The hop leads away from the home corner.
        assert!(hop.unwrap().distance_to(navigator.enemy_base) < spawn.distance_to(navigator.enemy_base));
    }

    #[test]
    fn test_navigator_waypoint_mode_starts_at_lane_head() {
        let config = StrategyConfig::default();
        let mut navigator = Navigator::new(&config, Lane::Middle);
        let spawn = Point::new(100.0, 3700.0);
        let first = navigator.advance_point(spawn, 35.0, false).unwrap();
        assert_eq!(first, config.lane_waypoints[&Lane::Middle][0]);
    }
}
