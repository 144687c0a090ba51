use crate::graph::{FxIndexMap, Graph};
use serde::Serialize;

/// Search bookkeeping of one node. `g` and `f` stay infinite until the node is discovered.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeState {
    pub g: f64,
    pub f: f64,
    pub parent: Option<String>,
    pub visited: bool,
}

/// Result of a single search: the state of every node plus the order in which nodes were closed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchState {
    pub start: String,
    pub goal: String,
    pub nodes: FxIndexMap<String, NodeState>,
    /// Closed nodes in the order they were expanded.
    pub expanded: Vec<String>,
}

impl SearchState {
    pub fn get(&self, label: &str) -> Option<&NodeState> {
        self.nodes.get(label)
    }
    /// Whether the search closed the goal. An unreached goal means no path exists.
    pub fn goal_reached(&self) -> bool {
        self.get(&self.goal).is_some_and(|s| s.visited)
    }
    /// The path from start to goal, read backwards from the goal's parent chain.
    pub fn path(&self) -> Option<Vec<String>> {
        if !self.goal_reached() {
            return None;
        }
        let mut path: Vec<String> = std::iter::successors(Some(self.goal.as_str()), |label| {
            self.get(label).and_then(|s| s.parent.as_deref())
        })
        .map(str::to_owned)
        .collect();
        path.reverse();
        Some(path)
    }
    /// Cost of the path to the goal, if there is one.
    pub fn path_cost(&self) -> Option<f64> {
        self.goal_reached()
            .then(|| self.get(&self.goal).map(|s| s.g))
            .flatten()
    }
}

#[derive(Clone, Copy)]
struct Entry {
    g: f64,
    f: f64,
    parent: Option<usize>,
    visited: bool,
}

impl Default for Entry {
    fn default() -> Self {
        Entry {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: None,
            visited: false,
        }
    }
}

/// Nodes waiting for expansion in insertion order. Selecting the minimum uses a stable sort, so
/// among equal estimates the node that has been waiting longest comes first.
struct OpenList {
    members: Vec<usize>,
}

impl OpenList {
    fn new(first: usize) -> OpenList {
        OpenList {
            members: vec![first],
        }
    }
    fn push(&mut self, ix: usize) {
        if !self.members.contains(&ix) {
            self.members.push(ix);
        }
    }
    fn pop_min<F>(&mut self, estimate: F) -> Option<usize>
    where
        F: Fn(usize) -> f64,
    {
        if self.members.is_empty() {
            return None;
        }
        self.members
            .sort_by(|&a, &b| estimate(a).total_cmp(&estimate(b)));
        Some(self.members.remove(0))
    }
}

/// Best-first search from `start` until `goal` is closed or nothing is left to expand. With a
/// zero heuristic this is Dijkstra's algorithm, with an admissible one it is A*.
///
/// # Panics
/// If `start` or `goal` is not a node of the graph.
pub(crate) fn best_first<FH>(graph: &Graph, start: &str, goal: &str, mut heuristic: FH) -> SearchState
where
    FH: FnMut(usize) -> f64,
{
    let start_ix = graph
        .index_of(start)
        .unwrap_or_else(|| panic!("start node `{start}` is not part of the graph"));
    let goal_ix = graph
        .index_of(goal)
        .unwrap_or_else(|| panic!("goal node `{goal}` is not part of the graph"));
    let edges = graph.indexed_edges();

    let mut entries = vec![Entry::default(); graph.node_count()];
    entries[start_ix].g = 0.0;
    entries[start_ix].f = heuristic(start_ix);
    let mut open = OpenList::new(start_ix);
    let mut expanded = Vec::new();

    while let Some(current) = open.pop_min(|ix| entries[ix].f) {
        entries[current].visited = true;
        expanded.push(current);
        if current == goal_ix {
            break;
        }
        let g = entries[current].g;
        // Edges are undirected: first those leaving from the current node, then those ending in it.
        let forward = edges
            .iter()
            .filter(|e| e.0 == current)
            .map(|&(_, to, w)| (to, w));
        let backward = edges
            .iter()
            .filter(|e| e.1 == current)
            .map(|&(from, _, w)| (from, w));
        for (next, weight) in forward.chain(backward) {
            if entries[next].visited {
                continue;
            }
            let tentative = g + weight as f64;
            if tentative < entries[next].g {
                entries[next].g = tentative;
                entries[next].f = tentative + heuristic(next);
                entries[next].parent = Some(current);
                open.push(next);
            }
        }
    }

    let nodes = entries
        .iter()
        .enumerate()
        .map(|(ix, e)| {
            (
                graph.label(ix).to_owned(),
                NodeState {
                    g: e.g,
                    f: e.f,
                    parent: e.parent.map(|p| graph.label(p).to_owned()),
                    visited: e.visited,
                },
            )
        })
        .collect();
    SearchState {
        start: start.to_owned(),
        goal: goal.to_owned(),
        nodes,
        expanded: expanded
            .into_iter()
            .map(|ix| graph.label(ix).to_owned())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_list_is_stable_among_ties() {
        let mut open = OpenList::new(3);
        open.push(1);
        open.push(2);
        open.push(1);
        let f = [0.0, 4.0, 4.0, 4.0];
        assert_eq!(open.pop_min(|ix| f[ix]), Some(3));
        assert_eq!(open.pop_min(|ix| f[ix]), Some(1));
        assert_eq!(open.pop_min(|ix| f[ix]), Some(2));
        assert_eq!(open.pop_min(|ix| f[ix]), None);
    }

    #[test]
    fn open_list_prefers_lower_estimate() {
        let mut open = OpenList::new(0);
        open.push(1);
        let f = [7.0, 2.0];
        assert_eq!(open.pop_min(|ix| f[ix]), Some(1));
    }
}
