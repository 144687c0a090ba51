use crate::{graph::Graph, solver::GraphSolver};

/// Uniform-cost search. Gives exact shortest costs between any two nodes.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GraphSolver for DijkstraSolver {
    fn heuristic(&self, _: &Graph, _: usize) -> f64 {
        0.0
    }
}
