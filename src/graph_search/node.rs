//! Per-state search records

/// Index of a node in the state-space slab
pub type NodeId = usize;

/// Edge into a node, recorded on the destination
#[derive(Debug, Clone)]
pub struct PredEdge<K> {
    pub key: K,
    pub action_id: usize,
    pub cost: f64,
}

/// Edge out of a node, cached on the source after its first expansion
#[derive(Debug, Clone)]
pub struct SuccEdge<K, C> {
    pub key: K,
    pub coord: C,
    pub action_id: usize,
    pub cost: f64,
}

/// Search record for one discretized state
///
/// `g` is the best known cost from the start; `rhs` is the one-step-lookahead
/// cost maintained by LPA* (unused by A*). A node is locally consistent when
/// `g == rhs`. `heap_slot` is the node's position in the state-space heap, or
/// `None` when it is not queued.
#[derive(Debug, Clone)]
pub struct Node<K, C> {
    pub key: K,
    pub coord: C,
    pub g: f64,
    pub rhs: f64,
    pub h: f64,
    pub heap_slot: Option<usize>,
    pub opened: bool,
    pub closed: bool,
    pub pred_edges: Vec<PredEdge<K>>,
    pub succ_edges: Vec<SuccEdge<K, C>>,
}

impl<K, C> Node<K, C> {
    pub fn new(key: K, coord: C, h: f64) -> Self {
        Self {
            key,
            coord,
            g: f64::INFINITY,
            rhs: f64::INFINITY,
            h,
            heap_slot: None,
            opened: false,
            closed: false,
            pred_edges: Vec::new(),
            succ_edges: Vec::new(),
        }
    }

    /// Whether the node currently sits in the priority queue
    pub fn in_heap(&self) -> bool {
        self.heap_slot.is_some()
    }

    /// LPA* local consistency: `g == rhs`
    ///
    /// Two infinities compare equal here, which is intended: an unreached
    /// node is consistent.
    pub fn is_consistent(&self) -> bool {
        self.g == self.rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_unreached_and_consistent() {
        let n: Node<u32, f64> = Node::new(7, 0.0, 1.5);
        assert!(n.g.is_infinite());
        assert!(n.rhs.is_infinite());
        assert!(n.is_consistent());
        assert!(!n.in_heap());
        assert!(!n.opened && !n.closed);
        assert!(n.pred_edges.is_empty() && n.succ_edges.is_empty());
    }

    #[test]
    fn test_consistency_tracks_g_rhs() {
        let mut n: Node<u32, f64> = Node::new(1, 0.0, 0.0);
        n.rhs = 2.0;
        assert!(!n.is_consistent());
        n.g = 2.0;
        assert!(n.is_consistent());
    }
}
