use crate::config::{GOAL, START};
use crate::graph::{EdgeKey, Graph};
use crate::search::{best_first, SearchState};
use itertools::Itertools;

pub mod astar;
pub mod dijkstra;

pub trait GraphSolver {
    /// Estimated remaining cost from the node at `index` to the goal.
    fn heuristic(&self, graph: &Graph, index: usize) -> f64;

    /// Searches from the start node `S` to the goal node `Z`.
    fn solve(&self, graph: &Graph) -> SearchState {
        self.solve_between(graph, START, GOAL)
    }

    /// Searches between two arbitrary nodes. Node heuristics estimate the cost to `Z`, so with any
    /// other goal only a zero heuristic keeps the result optimal.
    fn solve_between(&self, graph: &Graph, start: &str, goal: &str) -> SearchState {
        best_first(graph, start, goal, |ix| self.heuristic(graph, ix))
    }

    /// Sums the weights along a path, or [None] if two consecutive nodes share no edge.
    fn path_weight(&self, graph: &Graph, path: &[String]) -> Option<u32> {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| {
                let key = EdgeKey::new(a, b);
                graph
                    .edges
                    .iter()
                    .filter(|e| e.key() == key)
                    .map(|e| e.weight)
                    .min()
            })
            .sum()
    }
}
