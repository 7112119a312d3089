//! Occupancy-map environment for a planar double integrator
//!
//! Successors apply each acceleration from a fixed control grid over one
//! primitive duration. A primitive that leaves the map, collides, or exceeds
//! the velocity bound is reported with infinite cost rather than omitted,
//! so that incremental searches observe cost changes on a stable edge set.

use itertools::iproduct;
use nalgebra::Vector2;

use crate::common::{Environment, Successor, Waypoint, WaypointKey};
use crate::primitive::Primitive;
use crate::utils::OccupancyGrid;

/// Vehicle model and discretization parameters
#[derive(Debug, Clone)]
pub struct MapEnvConfig {
    /// Primitive duration [s]
    pub dt: f64,
    /// Acceleration magnitude of the control grid [m/s^2]
    pub u_max: f64,
    /// Velocity bound [m/s]
    pub v_max: f64,
    /// Weight of elapsed time against control effort in the edge cost
    pub time_weight: f64,
    /// Goal acceptance radius [m]
    pub goal_tol: f64,
    /// Position quantization for state keys [m]
    pub pos_res: f64,
    /// Velocity quantization for state keys [m/s]
    pub vel_res: f64,
    /// Collision-check samples per primitive
    pub check_samples: usize,
}

impl Default for MapEnvConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,
            u_max: 0.5,
            v_max: 1.0,
            time_weight: 1.0,
            goal_tol: 0.5,
            pos_res: 0.25,
            vel_res: 0.25,
            check_samples: 10,
        }
    }
}

/// Motion-primitive environment over an [`OccupancyGrid`]
pub struct MapEnv {
    grid: OccupancyGrid,
    goal: Vector2<f64>,
    controls: Vec<Vector2<f64>>,
    config: MapEnvConfig,
}

impl MapEnv {
    pub fn new(grid: OccupancyGrid, goal: Vector2<f64>, config: MapEnvConfig) -> Self {
        let controls = iproduct!(-1..=1i32, -1..=1i32)
            .map(|(i, j)| Vector2::new(i as f64 * config.u_max, j as f64 * config.u_max))
            .collect();
        Self {
            grid,
            goal,
            controls,
            config,
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn goal(&self) -> Vector2<f64> {
        self.goal
    }

    pub fn num_controls(&self) -> usize {
        self.controls.len()
    }

    /// Key of a waypoint under this environment's discretization
    pub fn key_of(&self, wp: &Waypoint) -> WaypointKey {
        WaypointKey::quantize(wp, self.config.pos_res, self.config.vel_res, self.config.dt)
    }

    fn primitive_feasible(&self, pr: &Primitive) -> bool {
        if pr.end().speed() > self.config.v_max + 1e-9 {
            return false;
        }
        for wp in pr.sample(self.config.check_samples) {
            if self.grid.is_occupied(wp.pos.x, wp.pos.y) {
                return false;
            }
        }
        true
    }
}

impl Environment for MapEnv {
    type Key = WaypointKey;
    type Coord = Waypoint;
    type Primitive = Primitive;

    fn is_goal(&self, coord: &Waypoint) -> bool {
        (coord.pos - self.goal).norm() <= self.config.goal_tol
    }

    /// Lower bound on remaining cost: time to the goal at full speed,
    /// weighted by the time cost; control effort is nonnegative
    fn heuristic(&self, coord: &Waypoint) -> f64 {
        self.config.time_weight * (coord.pos - self.goal).norm() / self.config.v_max
    }

    fn successors(&self, coord: &Waypoint) -> Vec<Successor<WaypointKey, Waypoint>> {
        self.controls
            .iter()
            .enumerate()
            .map(|(action_id, &u)| {
                let pr = Primitive::new(coord, u, self.config.dt);
                let cost = if self.primitive_feasible(&pr) {
                    pr.cost(self.config.time_weight)
                } else {
                    f64::INFINITY
                };
                let end = pr.end();
                Successor {
                    key: self.key_of(&end),
                    coord: end,
                    cost,
                    action_id,
                }
            })
            .collect()
    }

    fn forward_action(&self, coord: &Waypoint, action_id: usize) -> Primitive {
        Primitive::new(coord, self.controls[action_id], self.config.dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_search::{GraphSearch, StateSpace};

    /// Square boundary (0,0)..(10,10) with a wall segment at x=5, y=4..6,
    /// optionally with extra obstacle points
    fn boxed_env(extra: &[(f64, f64)], goal: Vector2<f64>) -> MapEnv {
        let mut ox = Vec::new();
        let mut oy = Vec::new();
        for i in 0..11 {
            ox.push(i as f64);
            oy.push(0.0);
            ox.push(i as f64);
            oy.push(10.0);
            ox.push(0.0);
            oy.push(i as f64);
            ox.push(10.0);
            oy.push(i as f64);
        }
        for i in 4..7 {
            ox.push(5.0);
            oy.push(i as f64);
        }
        for &(x, y) in extra {
            ox.push(x);
            oy.push(y);
        }
        let grid = OccupancyGrid::new(&ox, &oy, 1.0, 0.5);
        MapEnv::new(grid, goal, MapEnvConfig::default())
    }

    #[test]
    fn test_successors_enumerate_control_grid() {
        let env = boxed_env(&[], Vector2::new(7.0, 7.0));
        let wp = Waypoint::at_rest(3.0, 3.0);
        let succs = env.successors(&wp);
        assert_eq!(succs.len(), 9);

        // deterministic enumeration
        let again = env.successors(&wp);
        for (a, b) in succs.iter().zip(again.iter()) {
            assert_eq!(a.key, b.key);
            assert_eq!(a.action_id, b.action_id);
            assert_eq!(a.cost.is_finite(), b.cost.is_finite());
        }

        // coasting from rest stays put and costs only time
        let coast = &succs[4];
        assert_eq!(coast.coord.pos, wp.pos);
        assert!((coast.cost - env.config.time_weight * env.config.dt).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_bound_marks_edge_infeasible() {
        let env = boxed_env(&[], Vector2::new(7.0, 7.0));
        let wp = Waypoint::new(Vector2::new(3.0, 3.0), Vector2::new(1.0, 0.0), 0.0);
        let succs = env.successors(&wp);
        // control (u_max, 0) would push the speed to 1.5
        assert!(succs[7].cost.is_infinite());
        // coasting at the bound stays feasible
        assert!(succs[4].cost.is_finite());
    }

    #[test]
    fn test_collision_marks_edge_infeasible() {
        let env = boxed_env(&[], Vector2::new(7.0, 7.0));
        // heading straight at the wall point (5, 5)
        let wp = Waypoint::new(Vector2::new(4.0, 5.0), Vector2::new(1.0, 0.0), 0.0);
        let succs = env.successors(&wp);
        // coasting crosses the inflated wall
        assert!(succs[4].cost.is_infinite());
    }

    #[test]
    fn test_forward_action_reproduces_successor() {
        let env = boxed_env(&[], Vector2::new(7.0, 7.0));
        let wp = Waypoint::at_rest(2.0, 2.0);
        let succs = env.successors(&wp);
        for s in &succs {
            let pr = env.forward_action(&wp, s.action_id);
            let end = pr.end();
            assert!((end.pos - s.coord.pos).norm() < 1e-12);
            assert!((end.vel - s.coord.vel).norm() < 1e-12);
            assert_eq!(env.key_of(&end), s.key);
        }
    }

    #[test]
    fn test_heuristic_admissible_at_goal() {
        let env = boxed_env(&[], Vector2::new(7.0, 7.0));
        let at_goal = Waypoint::at_rest(7.0, 7.0);
        assert_eq!(env.heuristic(&at_goal), 0.0);
        assert!(env.is_goal(&at_goal));
        assert!(!env.is_goal(&Waypoint::at_rest(2.0, 2.0)));
    }

    #[test]
    fn test_astar_plans_around_wall() {
        let env = boxed_env(&[], Vector2::new(7.0, 7.0));
        let start = Waypoint::at_rest(2.0, 2.0);
        let start_key = env.key_of(&start);

        let mut ss = StateSpace::new(2.0, 1.0);
        let traj = GraphSearch::new(false)
            .astar(&start, &start_key, &env, &mut ss, -1, 20.0)
            .unwrap();

        assert!(!traj.is_empty());
        let ws = traj.waypoints();
        let last = ws.last().unwrap();
        assert!((last.pos - env.goal()).norm() <= env.config.goal_tol + 1e-9);

        // the trajectory stays clear of the map's obstacles
        for pr in &traj.primitives {
            for wp in pr.sample(10) {
                assert!(env.grid().is_free(wp.pos.x, wp.pos.y));
            }
        }
    }

    #[test]
    fn test_lpastar_replans_after_map_change() {
        let goal = Vector2::new(7.0, 7.0);
        let env = boxed_env(&[], goal);
        let start = Waypoint::at_rest(2.0, 2.0);
        let start_key = env.key_of(&start);
        let search = GraphSearch::new(false);

        let mut ss = StateSpace::new(2.0, 1.0);
        let (c1, traj1) = search
            .lpastar(&start, &start_key, &env, &mut ss, -1, 0.0)
            .unwrap();
        assert!(!traj1.is_empty());

        // unchanged map: nothing to repair
        assert_eq!(ss.refresh_edges(&env), 0);
        let (c1b, _) = search
            .lpastar(&start, &start_key, &env, &mut ss, -1, 0.0)
            .unwrap();
        assert_eq!(c1, c1b);
        assert_eq!(ss.expand_iteration(), 0);

        // drop an obstacle onto the middle of the found path and repair
        let ws = traj1.waypoints();
        let mid = ws[ws.len() / 2].pos;
        let env2 = boxed_env(&[(mid.x, mid.y)], goal);
        assert!(ss.refresh_edges(&env2) > 0);

        let (c2, traj2) = search
            .lpastar(&start, &start_key, &env2, &mut ss, -1, 0.0)
            .unwrap();
        assert!(c2 >= c1 - 1e-9);
        assert!(!traj2.is_empty());
        for pr in &traj2.primitives {
            for wp in pr.sample(10) {
                assert!(env2.grid().is_free(wp.pos.x, wp.pos.y));
            }
        }
    }
}
