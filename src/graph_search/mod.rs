//! Graph-search core: weighted A* and Lifelong Planning A*
//!
//! The search works over an opaque [`Environment`](crate::common::Environment)
//! oracle that enumerates motion primitives from a state. A [`StateSpace`]
//! owns every search record and the priority queue; it persists across calls
//! so LPA* can re-plan incrementally after edge costs change.

pub mod node;
pub mod search;
pub mod state_space;

pub use node::{Node, NodeId, PredEdge, SuccEdge};
pub use search::GraphSearch;
pub use state_space::{QueueKey, StateSpace};
