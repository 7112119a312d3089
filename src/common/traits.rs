//! Traits defining the contract between the search core and an environment
//!
//! The graph-search engines are generic over an [`Environment`] oracle that
//! enumerates kinodynamically feasible motion primitives from a state. The
//! core treats keys and coordinates as opaque; it only reads the time
//! component of a coordinate through [`TimedState`].

use std::fmt::Debug;
use std::hash::Hash;

/// A continuous state that carries a time component
pub trait TimedState {
    /// Time of this state in seconds
    fn time(&self) -> f64;
}

/// One successor edge reported by an environment
///
/// An infinite `cost` marks a primitive that satisfies the dynamics but is
/// infeasible (collision, bound violation). Environments report such edges
/// rather than omitting them so that incremental search sees cost changes.
#[derive(Debug, Clone)]
pub struct Successor<K, C> {
    /// Resulting continuous state
    pub coord: C,
    /// Discretized identity of the resulting state
    pub key: K,
    /// Cost of the connecting primitive, `f64::INFINITY` if infeasible
    pub cost: f64,
    /// Index of the control that generated the primitive
    pub action_id: usize,
}

/// Oracle queried by the search engines
///
/// Implementations must be deterministic: `successors` has to enumerate the
/// same edges in the same order for the same coordinate, or searches are not
/// reproducible. All operations are expected to be pure and cheap.
pub trait Environment {
    /// Discretized state identity produced by this environment
    type Key: Clone + Eq + Hash + Debug;
    /// Continuous state payload
    type Coord: Clone + TimedState;
    /// Motion segment materialized during trajectory reconstruction
    type Primitive;

    /// Whether the state satisfies the goal condition
    fn is_goal(&self, coord: &Self::Coord) -> bool;

    /// Estimated cost-to-goal; admissible for optimal A*
    fn heuristic(&self, coord: &Self::Coord) -> f64;

    /// All primitives applicable from `coord`, feasible or not
    fn successors(&self, coord: &Self::Coord) -> Vec<Successor<Self::Key, Self::Coord>>;

    /// Reproduce the primitive generated by applying `action_id` at `coord`
    fn forward_action(&self, coord: &Self::Coord, action_id: usize) -> Self::Primitive;
}
