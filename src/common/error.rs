//! Error types for motion_primitive_planner

use std::fmt;

/// Failure modes surfaced by the graph-search engines
///
/// Every condition is an explicit return value; the core never panics on a
/// failed search. A valid `StateSpace` is left behind in all cases so the
/// caller may resume with a larger budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// The expansion budget ran out before a goal was reached
    ExpansionBudgetExhausted(usize),
    /// The priority queue drained: no reachable goal in the explored horizon
    QueueExhausted,
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningError::ExpansionBudgetExhausted(n) => {
                write!(f, "Expansion budget exhausted after {} expansions", n)
            }
            PlanningError::QueueExhausted => write!(f, "Priority queue exhausted before goal"),
        }
    }
}

impl std::error::Error for PlanningError {}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanningError::ExpansionBudgetExhausted(42);
        assert_eq!(
            format!("{}", err),
            "Expansion budget exhausted after 42 expansions"
        );
        assert_eq!(
            format!("{}", PlanningError::QueueExhausted),
            "Priority queue exhausted before goal"
        );
    }
}
