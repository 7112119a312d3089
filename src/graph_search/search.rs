//! Weighted A* and Lifelong Planning A* over a [`StateSpace`]
//!
//! Both engines share the state space and its queue. A* is single-shot:
//! it relaxes `g` values directly and terminates on the first goal pop.
//! LPA* keeps the dual `g`/`rhs` bookkeeping locally consistent so that a
//! later call on the same state space, after edge costs changed, only
//! re-expands the inconsistent region.
//!
//! Reference: Koenig, S., Likhachev, M., & Furcy, D. (2004).
//! "Lifelong Planning A*".

use crate::common::{Environment, PlanningError, PlanningResult, TimedState};
use crate::graph_search::node::{NodeId, PredEdge, SuccEdge};
use crate::graph_search::state_space::{QueueKey, StateSpace};
use crate::primitive::Trajectory;

/// Search driver over an environment oracle and a reusable state space
pub struct GraphSearch {
    /// Print expansion and trace-back progress
    pub verbose: bool,
}

impl GraphSearch {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Weighted A* from `start_coord` to the environment's goal
    ///
    /// If the queue is non-empty the previous frontier is resumed and no
    /// re-initialization happens. `max_expand < 0` means unbounded;
    /// `max_t <= 0` disables the time horizon, otherwise the search also
    /// succeeds on any state at or past the horizon. A start inside the
    /// goal region yields an empty trajectory.
    pub fn astar<E: Environment>(
        &self,
        start_coord: &E::Coord,
        start_key: &E::Key,
        env: &E,
        ss: &mut StateSpace<E::Key, E::Coord>,
        max_expand: i64,
        max_t: f64,
    ) -> PlanningResult<Trajectory<E::Primitive>> {
        if env.is_goal(start_coord) {
            return Ok(Trajectory::default());
        }
        if max_expand == 0 {
            return Err(PlanningError::ExpansionBudgetExhausted(0));
        }

        if ss.queue_is_empty() {
            if self.verbose {
                println!("A*: start from a new node");
            }
            let id = ss.get_or_create(start_key, start_coord, env);
            ss.nodes[id].g = 0.0;
            let key = ss.astar_key(id);
            ss.push(id, key);
        }

        let mut expand_iteration = 0usize;
        let curr = loop {
            let curr = match ss.pop() {
                Some(id) => id,
                None => {
                    ss.expand_iteration = expand_iteration;
                    if self.verbose {
                        println!("A*: priority queue is empty");
                    }
                    return Err(PlanningError::QueueExhausted);
                }
            };
            expand_iteration += 1;
            ss.nodes[curr].closed = true;

            let succs = env.successors(&ss.nodes[curr].coord);
            let curr_key = ss.nodes[curr].key.clone();

            for s in &succs {
                // infeasible primitive, skip
                if s.cost.is_infinite() {
                    continue;
                }

                let sid = ss.get_or_create(&s.key, &s.coord, env);
                // multi-parent graph: record every discovered edge
                ss.nodes[sid].pred_edges.push(PredEdge {
                    key: curr_key.clone(),
                    action_id: s.action_id,
                    cost: s.cost,
                });

                let tentative = ss.nodes[curr].g + s.cost;
                if tentative < ss.nodes[sid].g {
                    ss.nodes[sid].g = tentative;
                    let key = ss.astar_key(sid);
                    if ss.nodes[sid].in_heap() {
                        ss.update_key(sid, key);
                    } else {
                        // re-opens the node if it was already closed, which
                        // can happen under an inflated heuristic
                        ss.push(sid, key);
                    }
                }
            }

            if env.is_goal(&ss.nodes[curr].coord) {
                break curr;
            }
            if max_t > 0.0
                && ss.nodes[curr].coord.time() >= max_t
                && ss.nodes[curr].g.is_finite()
            {
                if self.verbose {
                    println!("A*: time horizon {} reached", max_t);
                }
                break curr;
            }
            if max_expand > 0 && expand_iteration as i64 >= max_expand {
                ss.expand_iteration = expand_iteration;
                if self.verbose {
                    println!("A*: expansion budget {} reached", max_expand);
                }
                return Err(PlanningError::ExpansionBudgetExhausted(expand_iteration));
            }
            if ss.queue_is_empty() {
                ss.expand_iteration = expand_iteration;
                if self.verbose {
                    println!("A*: priority queue is empty");
                }
                return Err(PlanningError::QueueExhausted);
            }
        };

        ss.expand_iteration = expand_iteration;
        if self.verbose {
            println!(
                "A*: goal g: {}, expanded {} nodes",
                ss.nodes[curr].g, expand_iteration
            );
        }
        Ok(self.recover_trajectory(curr, ss, env, start_key))
    }

    /// Lifelong Planning A* from `start_coord` to the environment's goal
    ///
    /// The state space persists between calls; after edge costs change
    /// (see [`StateSpace::refresh_edges`]) a repeated call re-expands only
    /// the locally inconsistent region. Returns the goal cost with the
    /// trajectory. With `max_t > 0` every expansion past the horizon
    /// becomes the goal candidate, so the search degrades to a horizon
    /// sweep; this mirrors the single-shot engine's time-bounded mode.
    pub fn lpastar<E: Environment>(
        &self,
        start_coord: &E::Coord,
        start_key: &E::Key,
        env: &E,
        ss: &mut StateSpace<E::Key, E::Coord>,
        max_expand: i64,
        max_t: f64,
    ) -> PlanningResult<(f64, Trajectory<E::Primitive>)> {
        if env.is_goal(start_coord) {
            if self.verbose {
                println!("LPA*: start is inside the goal region");
            }
            return Ok((0.0, Trajectory::default()));
        }
        if max_expand == 0 {
            return Err(PlanningError::ExpansionBudgetExhausted(0));
        }

        ss.max_t = if max_t > 0.0 { max_t } else { f64::INFINITY };

        if ss.index.contains_key(start_key) {
            ss.start = ss.index.get(start_key).copied();
        } else {
            if self.verbose {
                println!("LPA*: start from a new node");
            }
            let id = ss.get_or_create(start_key, start_coord, env);
            ss.nodes[id].rhs = 0.0;
            ss.start = Some(id);
            let key = ss.calculate_key(id);
            ss.push(id, key);
        }

        // goal candidate from the previous run's reconstructed chain
        let mut goal: Option<NodeId> = match ss.best_child.last() {
            Some(&id) if env.is_goal(&ss.nodes[id].coord) => Some(id),
            _ => None,
        };

        let mut expand_iteration = 0usize;
        loop {
            let goal_key = goal.map_or(QueueKey::infinite(), |id| ss.calculate_key(id));
            let goal_inconsistent = goal.map_or(false, |id| !ss.nodes[id].is_consistent());
            if !(ss.peek_key() < goal_key || goal_inconsistent) {
                break;
            }

            let curr = match ss.pop() {
                Some(id) => id,
                None => {
                    ss.expand_iteration = expand_iteration;
                    if self.verbose {
                        println!("LPA*: priority queue is empty");
                    }
                    return Err(PlanningError::QueueExhausted);
                }
            };
            expand_iteration += 1;
            ss.nodes[curr].closed = true;

            if ss.nodes[curr].g > ss.nodes[curr].rhs {
                // over-consistent: commit the lookahead value
                ss.nodes[curr].g = ss.nodes[curr].rhs;
            } else {
                // under-consistent: invalidate and reschedule
                ss.nodes[curr].g = f64::INFINITY;
                ss.update_node(curr);
            }

            // successor edges are queried once and cached on the node
            let explored = ss.nodes[curr].succ_edges.is_empty();
            let succs: Vec<SuccEdge<E::Key, E::Coord>> = if explored {
                env.successors(&ss.nodes[curr].coord)
                    .into_iter()
                    .map(|s| SuccEdge {
                        key: s.key,
                        coord: s.coord,
                        action_id: s.action_id,
                        cost: s.cost,
                    })
                    .collect()
            } else {
                ss.nodes[curr].succ_edges.clone()
            };
            let curr_key = ss.nodes[curr].key.clone();

            for s in &succs {
                let sid = ss.get_or_create(&s.key, &s.coord, env);
                if explored {
                    ss.nodes[curr].succ_edges.push(s.clone());
                }
                if !ss.nodes[sid].pred_edges.iter().any(|pe| pe.key == curr_key) {
                    ss.nodes[sid].pred_edges.push(PredEdge {
                        key: curr_key.clone(),
                        action_id: s.action_id,
                        cost: s.cost,
                    });
                }
                ss.update_node(sid);
            }

            // with a time horizon, any expansion is a goal candidate
            if env.is_goal(&ss.nodes[curr].coord) || max_t > 0.0 {
                goal = Some(curr);
            }

            if max_expand > 0 && expand_iteration as i64 >= max_expand {
                ss.expand_iteration = expand_iteration;
                if self.verbose {
                    println!("LPA*: expansion budget {} reached", max_expand);
                }
                return Err(PlanningError::ExpansionBudgetExhausted(expand_iteration));
            }
            if ss.queue_is_empty() {
                ss.expand_iteration = expand_iteration;
                if self.verbose {
                    println!("LPA*: priority queue is empty");
                }
                return Err(PlanningError::QueueExhausted);
            }
        }

        ss.expand_iteration = expand_iteration;
        match goal {
            Some(gid) => {
                if self.verbose {
                    let n = &ss.nodes[gid];
                    println!(
                        "LPA*: goal g: {}, rhs: {}, expanded {} nodes",
                        n.g, n.rhs, expand_iteration
                    );
                }
                let traj = self.recover_trajectory(gid, ss, env, start_key);
                let g = ss.nodes[gid].g;
                if g.is_finite() {
                    Ok((g, traj))
                } else {
                    Err(PlanningError::QueueExhausted)
                }
            }
            None => Err(PlanningError::QueueExhausted),
        }
    }

    /// Walk predecessors from `terminal` back to the start, materializing
    /// the primitive of each chosen edge
    ///
    /// At each node the edge minimizing `pred.g + cost` is taken; ties
    /// prefer the predecessor with the larger `g`, which favors the
    /// freshest expansion path over equal-cost ancestors. If a node has
    /// predecessors but none with a finite path cost, the walk stops and
    /// the start-side-truncated trajectory is returned. The chain of
    /// visited nodes is left in the state space's `best_child`, in forward
    /// order.
    fn recover_trajectory<E: Environment>(
        &self,
        terminal: NodeId,
        ss: &mut StateSpace<E::Key, E::Coord>,
        env: &E,
        start_key: &E::Key,
    ) -> Trajectory<E::Primitive> {
        ss.best_child.clear();

        let mut prs: Vec<E::Primitive> = Vec::new();
        let mut curr = terminal;
        while !ss.nodes[curr].pred_edges.is_empty() {
            if self.verbose {
                let n = &ss.nodes[curr];
                println!(
                    "trace t: {:.2} -> {:.2}, g: {}, rhs: {}, h: {}",
                    n.coord.time(),
                    n.coord.time() - ss.dt,
                    n.g,
                    n.rhs,
                    n.h
                );
            }
            ss.best_child.push(curr);

            let mut min_id: Option<usize> = None;
            let mut min_rhs = f64::INFINITY;
            let mut min_g = f64::INFINITY;
            for (i, pe) in ss.nodes[curr].pred_edges.iter().enumerate() {
                if let Some(&pid) = ss.index.get(&pe.key) {
                    let pg = ss.nodes[pid].g;
                    let cand = pg + pe.cost;
                    if min_rhs > cand {
                        min_rhs = cand;
                        min_g = pg;
                        min_id = Some(i);
                    } else if pe.cost.is_finite() && min_rhs == cand && min_g < pg {
                        min_g = pg;
                        min_id = Some(i);
                    }
                }
            }

            match min_id {
                Some(i) => {
                    let pkey = ss.nodes[curr].pred_edges[i].key.clone();
                    let action_id = ss.nodes[curr].pred_edges[i].action_id;
                    let pid = match ss.index.get(&pkey) {
                        Some(&pid) => pid,
                        None => break,
                    };
                    prs.push(env.forward_action(&ss.nodes[pid].coord, action_id));
                    curr = pid;
                }
                None => {
                    if self.verbose {
                        eprintln!(
                            "trace back failure, {} predecessors but none finite",
                            ss.nodes[curr].pred_edges.len()
                        );
                    }
                    break;
                }
            }

            if ss.nodes[curr].key == *start_key {
                ss.best_child.push(curr);
                break;
            }
        }

        prs.reverse();
        ss.best_child.reverse();
        Trajectory::new(prs)
    }
}
