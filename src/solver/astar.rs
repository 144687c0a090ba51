use crate::{graph::Graph, search::SearchState, solver::GraphSolver};

/// A* guided by the heuristic stored on every node.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GraphSolver for AstarSolver {
    fn heuristic(&self, graph: &Graph, index: usize) -> f64 {
        graph
            .nodes
            .get_index(index)
            .map_or(0.0, |(_, node)| node.h as f64)
    }
}

/// Solves the graph from `S` to `Z` with [AstarSolver].
pub fn solve(graph: &Graph) -> SearchState {
    AstarSolver::new().solve(graph)
}
