use crate::config::{GOAL, START};
use crate::error::GraphError;
use crate::geometry::Point;
use core::fmt;
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexMap;
use itertools::Itertools;
use log::warn;
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub const START_COLOR: &str = "#dbeafe";
pub const GOAL_COLOR: &str = "#dcfce7";
pub const NODE_COLOR: &str = "#f3f4f6";

/// Fill colour a renderer should use for the node with this label.
pub fn default_color(label: &str) -> &'static str {
    match label {
        START => START_COLOR,
        GOAL => GOAL_COLOR,
        _ => NODE_COLOR,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    /// Estimated cost to the goal.
    pub h: u32,
    pub color: String,
}

impl Node {
    pub fn new(label: &str, position: Point, h: u32) -> Node {
        Node {
            x: position.x,
            y: position.y,
            h,
            color: default_color(label).to_owned(),
        }
    }
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An undirected edge. `from` and `to` only record the order in which the edge was created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

impl Edge {
    pub fn new(from: &str, to: &str, weight: u32) -> Edge {
        Edge {
            from: from.to_owned(),
            to: to.to_owned(),
            weight,
        }
    }
    pub fn connects(&self, label: &str) -> bool {
        self.from == label || self.to == label
    }
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.from, &self.to)
    }
}

/// Direction-independent identity of an edge: the sorted pair of endpoint labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(String, String);

impl EdgeKey {
    pub fn new(a: &str, b: &str) -> EdgeKey {
        if a <= b {
            EdgeKey(a.to_owned(), b.to_owned())
        } else {
            EdgeKey(b.to_owned(), a.to_owned())
        }
    }
}

/// A practice graph: labelled nodes with positions and heuristics, joined by weighted edges.
/// Produced by [GraphGenerator](crate::generator::GraphGenerator) or parsed from provider
/// output with [Graph::from_json].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: FxIndexMap<String, Node>,
    pub edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct RawGraph {
    nodes: FxIndexMap<String, RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawNode {
    x: f64,
    y: f64,
    h: f64,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Deserialize)]
struct RawEdge {
    from: String,
    to: String,
    weight: f64,
}

fn is_count(value: f64) -> bool {
    value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64
}

impl Graph {
    /// Checks numeric fields and converts them to integers. Zero weights are raised to one.
    fn from_raw(raw: RawGraph) -> Result<Graph, GraphError> {
        let mut nodes = FxIndexMap::default();
        for (label, node) in raw.nodes {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(GraphError::InvalidCoordinate {
                    label,
                    x: node.x,
                    y: node.y,
                });
            }
            if !is_count(node.h) {
                return Err(GraphError::InvalidHeuristic { label, h: node.h });
            }
            let color = node
                .color
                .unwrap_or_else(|| default_color(&label).to_owned());
            nodes.insert(
                label,
                Node {
                    x: node.x,
                    y: node.y,
                    h: node.h as u32,
                    color,
                },
            );
        }
        let mut edges = Vec::with_capacity(raw.edges.len());
        for edge in raw.edges {
            if !is_count(edge.weight) {
                return Err(GraphError::InvalidWeight {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                });
            }
            let mut weight = edge.weight as u32;
            if weight == 0 {
                warn!("Edge {}-{} has zero weight, raising it to 1", edge.from, edge.to);
                weight = 1;
            }
            edges.push(Edge {
                from: edge.from,
                to: edge.to,
                weight,
            });
        }
        Ok(Graph { nodes, edges })
    }
}

/// Builds an undirected petgraph graph whose node indices equal the given indices.
pub(crate) fn undirected(node_count: usize, edges: &[(usize, usize, u32)]) -> UnGraph<(), u32> {
    let mut graph = UnGraph::with_capacity(node_count, edges.len());
    for _ in 0..node_count {
        graph.add_node(());
    }
    for &(a, b, w) in edges {
        graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), w);
    }
    graph
}

/// Marks every node reachable from `start` by a breadth-first traversal.
pub(crate) fn reachable_from(graph: &UnGraph<(), u32>, start: usize) -> Vec<bool> {
    let mut reached = vec![false; graph.node_count()];
    let mut bfs = Bfs::new(graph, NodeIndex::new(start));
    while let Some(ix) = bfs.next(graph) {
        reached[ix.index()] = true;
    }
    reached
}

impl Graph {
    /// Parses provider output and runs [validate](Self::validate) on it.
    pub fn from_json(json: &str) -> Result<Graph, GraphError> {
        let raw: RawGraph = serde_json::from_str(json)?;
        let graph = Graph::from_raw(raw)?;
        graph.validate()?;
        Ok(graph)
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn node(&self, label: &str) -> Option<&Node> {
        self.nodes.get(label)
    }
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.nodes.get_index_of(label)
    }
    pub fn label(&self, index: usize) -> &str {
        self.nodes
            .get_index(index)
            .map(|(label, _)| label.as_str())
            .unwrap_or_default()
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        let key = EdgeKey::new(a, b);
        self.edges.iter().any(|e| e.key() == key)
    }
    /// Number of edges touching the node.
    pub fn degree(&self, label: &str) -> usize {
        self.edges.iter().filter(|e| e.connects(label)).count()
    }

    /// Edges as `(from, to, weight)` index triples.
    ///
    /// # Panics
    /// If an edge references a label that is not a node. [validate](Self::validate) rules this out.
    pub fn indexed_edges(&self) -> Vec<(usize, usize, u32)> {
        self.edges
            .iter()
            .map(|e| match (self.index_of(&e.from), self.index_of(&e.to)) {
                (Some(a), Some(b)) => (a, b, e.weight),
                _ => panic!("edge {}-{} references a node outside the graph", e.from, e.to),
            })
            .collect()
    }

    /// Labels of nodes that cannot be reached from the start node. Every node if there is no start.
    pub fn unreachable_from_start(&self) -> Vec<String> {
        let Some(start) = self.index_of(START) else {
            return self.nodes.keys().cloned().collect();
        };
        let graph = undirected(self.node_count(), &self.indexed_edges());
        reachable_from(&graph, start)
            .into_iter()
            .enumerate()
            .filter(|(_, reached)| !reached)
            .map(|(ix, _)| self.label(ix).to_owned())
            .collect()
    }
    pub fn is_connected(&self) -> bool {
        self.unreachable_from_start().is_empty()
    }

    /// Labels in table order: start first, goal last and the rest alphabetically.
    pub fn display_order(&self) -> Vec<&str> {
        self.nodes
            .keys()
            .map(|k| k.as_str())
            .sorted_by_key(|&label| (label == GOAL, label != START, label))
            .collect()
    }

    /// Checks everything the solver and its callers rely on: start and goal exist, coordinates
    /// are finite, edges join two distinct known nodes at most once with a positive weight, every
    /// node is reachable from the start and no heuristic overestimates the true cost to the goal.
    pub fn validate(&self) -> Result<(), GraphError> {
        for required in [START, GOAL] {
            if !self.nodes.contains_key(required) {
                return Err(GraphError::MissingNode(required.to_owned()));
            }
        }
        for (label, node) in &self.nodes {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(GraphError::InvalidCoordinate {
                    label: label.clone(),
                    x: node.x,
                    y: node.y,
                });
            }
        }
        let mut seen: FxHashSet<EdgeKey> = FxHashSet::default();
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !self.nodes.contains_key(endpoint.as_str()) {
                    return Err(GraphError::UnknownEndpoint {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
            if edge.from == edge.to {
                return Err(GraphError::SelfLoop(edge.from.clone()));
            }
            if edge.weight == 0 {
                return Err(GraphError::InvalidWeight {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    weight: 0.0,
                });
            }
            if !seen.insert(edge.key()) {
                return Err(GraphError::DuplicateEdge(edge.from.clone(), edge.to.clone()));
            }
        }
        let unreachable = self.unreachable_from_start();
        if !unreachable.is_empty() {
            return Err(GraphError::Disconnected(unreachable));
        }
        self.check_admissible()
    }

    /// Compares every heuristic with the exact shortest cost to the goal.
    pub fn check_admissible(&self) -> Result<(), GraphError> {
        let goal = self
            .index_of(GOAL)
            .ok_or_else(|| GraphError::MissingNode(GOAL.to_owned()))?;
        let graph = undirected(self.node_count(), &self.indexed_edges());
        let costs = dijkstra(&graph, NodeIndex::new(goal), None, |e| *e.weight());
        for (ix, (label, node)) in self.nodes.iter().enumerate() {
            // Nodes cut off from the goal have no finite cost to overestimate.
            if let Some(&cost) = costs.get(&NodeIndex::new(ix)) {
                if node.h > cost {
                    return Err(GraphError::InadmissibleHeuristic {
                        label: label.clone(),
                        h: node.h,
                        cost,
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Nodes:")?;
        for label in self.display_order() {
            let node = &self.nodes[label];
            writeln!(f, "{label}: ({:.0}, {:.0}) h = {}", node.x, node.y, node.h)?;
        }
        writeln!(f, "\nEdges:")?;
        for edge in &self.edges {
            writeln!(f, "{} - {}: {}", edge.from, edge.to, edge.weight)?;
        }
        Ok(())
    }
}
