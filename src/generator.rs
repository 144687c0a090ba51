//! Procedural generation of practice graphs.
//!
//! Nodes are scattered by bounded rejection sampling, edges prefer near neighbours and avoid
//! passing close to unrelated nodes, and a final repair pass links any part of the graph the
//! start cannot reach. Edge weights are never below the scaled Euclidean length of the edge, so
//! the scaled straight-line distance to the goal is an admissible heuristic.
use crate::config::{Difficulty, GeneratorConfig, GOAL, INTERMEDIATE_LABELS, START};
use crate::error::GenerateError;
use crate::geometry::{segment_distance, Point};
use crate::graph::{reachable_from, undirected, Edge, FxIndexMap, Graph, Node};
use fxhash::FxHashSet;
use itertools::{iproduct, Itertools};
use log::{debug, info, warn};
use rand::Rng;

// Positions of the anchors in the placement order.
const START_IX: usize = 0;
const GOAL_IX: usize = 1;

type IndexEdge = (usize, usize, u32);

/// Generates graphs according to a [GeneratorConfig]. All randomness comes from the [Rng] passed to
/// [generate](Self::generate), so a seeded generator reproduces the same graph.
#[derive(Clone, Debug, Default)]
pub struct GraphGenerator {
    pub config: GeneratorConfig,
}

/// Generates a graph with the default configuration.
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Result<Graph, GenerateError> {
    GraphGenerator::new().generate(difficulty, rng)
}

/// Start, goal and then the intermediate labels, matching the placement order.
fn labels(node_count: usize) -> Vec<&'static str> {
    let intermediate = node_count.saturating_sub(2).min(INTERMEDIATE_LABELS.len());
    [START, GOAL]
        .into_iter()
        .chain(INTERMEDIATE_LABELS[..intermediate].iter().copied())
        .collect()
}

/// Uniform sample from `lo..hi`, or `lo` if the range is empty.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

impl GraphGenerator {
    pub fn new() -> GraphGenerator {
        GraphGenerator {
            config: GeneratorConfig::default(),
        }
    }
    pub fn with_config(config: GeneratorConfig) -> GraphGenerator {
        GraphGenerator { config }
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Graph, GenerateError> {
        let labels = labels(difficulty.node_count());
        let positions = self.place_nodes(labels.len(), rng);
        let mut edges = self.synthesize_edges(&positions, difficulty, rng);
        self.connect_start(&positions, &mut edges);
        self.repair_connectivity(&positions, &labels, &mut edges, rng)?;

        let goal = positions[GOAL_IX];
        let nodes: FxIndexMap<String, Node> = labels
            .iter()
            .zip(&positions)
            .map(|(&label, p)| {
                let h = self.config.scaled_estimate(p.distance(&goal));
                (label.to_owned(), Node::new(label, *p, h))
            })
            .collect();
        let edges = edges
            .into_iter()
            .map(|(u, v, weight)| Edge::new(labels[u], labels[v], weight))
            .collect::<Vec<_>>();
        info!(
            "Generated {} graph with {} nodes and {} edges",
            difficulty,
            nodes.len(),
            edges.len()
        );
        Ok(Graph { nodes, edges })
    }

    /// Places start and goal at the fixed anchors and draws the remaining positions inside the
    /// margins. Draws are rejected while they come closer than the node clearance to a placed node
    /// and attempts remain; once the shared budget runs out every draw is accepted.
    pub(crate) fn place_nodes<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Point> {
        let c = &self.config;
        let mut placed = vec![c.start_position(), c.goal_position()];
        let mut attempts = 0;
        while placed.len() < count {
            let candidate = Point::new(
                uniform(rng, c.margin_x, c.width - c.margin_x),
                uniform(rng, c.margin_y, c.height - c.margin_y),
            );
            attempts += 1;
            let clear = placed
                .iter()
                .all(|p| p.distance(&candidate) >= c.node_clearance);
            if clear {
                placed.push(candidate);
            } else if attempts >= c.max_placement_attempts {
                warn!(
                    "Placement attempts exhausted, accepting node {} without clearance",
                    placed.len()
                );
                placed.push(candidate);
            }
        }
        placed
    }

    /// Whether some node other than the endpoints lies within the edge clearance of `u`-`v`.
    fn blocked(&self, positions: &[Point], u: usize, v: usize) -> bool {
        positions.iter().enumerate().any(|(k, p)| {
            k != u
                && k != v
                && segment_distance(p, &positions[u], &positions[v]) < self.config.edge_clearance
        })
    }

    /// Connects every node but the goal, left to right, to some of its nearest neighbours.
    pub(crate) fn synthesize_edges<R: Rng + ?Sized>(
        &self,
        positions: &[Point],
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Vec<IndexEdge> {
        let c = &self.config;
        let by_x = (0..positions.len())
            .sorted_by(|&a, &b| positions[a].x.total_cmp(&positions[b].x))
            .collect::<Vec<_>>();
        let mut edges: Vec<IndexEdge> = Vec::new();
        let mut keys: FxHashSet<(usize, usize)> = FxHashSet::default();

        for &u in &by_x {
            if u == GOAL_IX {
                continue;
            }
            let origin = positions[u];
            let nearest = by_x
                .iter()
                .copied()
                .filter(|&v| v != u)
                .sorted_by(|&a, &b| {
                    origin
                        .distance(&positions[a])
                        .total_cmp(&origin.distance(&positions[b]))
                })
                .collect::<Vec<_>>();
            let target = rng.gen_range(1..=2) + difficulty.extra_connections();

            for &v in nearest.iter().take(target + c.candidate_slack) {
                let degree = edges.iter().filter(|e| e.0 == u || e.1 == u).count();
                if degree >= target {
                    break;
                }
                let key = (u.min(v), u.max(v));
                if keys.contains(&key) {
                    continue;
                }
                if self.blocked(positions, u, v) {
                    debug!("Edge {}-{} passes too close to another node", u, v);
                    continue;
                }
                let jitter = rng.gen_range(0..=c.weight_jitter);
                let weight = (c.scaled_cost(origin.distance(&positions[v])) + jitter).max(1);
                edges.push((u, v, weight));
                keys.insert(key);
            }
        }
        edges
    }

    /// Links the start to its nearest node if edge synthesis left it isolated.
    pub(crate) fn connect_start(&self, positions: &[Point], edges: &mut Vec<IndexEdge>) {
        if edges.iter().any(|e| e.0 == START_IX || e.1 == START_IX) {
            return;
        }
        let start = positions[START_IX];
        let nearest = (0..positions.len())
            .filter(|&v| v != START_IX)
            .min_by(|&a, &b| {
                start
                    .distance(&positions[a])
                    .total_cmp(&start.distance(&positions[b]))
            });
        if let Some(v) = nearest {
            let weight = self.config.scaled_cost(start.distance(&positions[v])).max(1);
            debug!("Start had no edges, connecting it to node {}", v);
            edges.push((START_IX, v, weight));
        }
    }

    /// Adds the shortest edge between the part of the graph reachable from the start and the rest
    /// until nothing is left out. Each round brings one more node into reach.
    pub(crate) fn repair_connectivity<R: Rng + ?Sized>(
        &self,
        positions: &[Point],
        labels: &[&str],
        edges: &mut Vec<IndexEdge>,
        rng: &mut R,
    ) -> Result<(), GenerateError> {
        loop {
            let reached = reachable_from(&undirected(positions.len(), edges), START_IX);
            let (reachable, unreachable): (Vec<usize>, Vec<usize>) =
                (0..positions.len()).partition(|&ix| reached[ix]);
            if unreachable.is_empty() {
                return Ok(());
            }
            let closest = iproduct!(reachable.iter().copied(), unreachable.iter().copied()).min_by(
                |&(a, b), &(c, d)| {
                    positions[a]
                        .distance(&positions[b])
                        .total_cmp(&positions[c].distance(&positions[d]))
                },
            );
            let Some((u, v)) = closest else {
                return Err(GenerateError::RepairExhausted {
                    unreachable: unreachable
                        .iter()
                        .map(|&ix| labels[ix].to_owned())
                        .collect(),
                });
            };
            let jitter = rng.gen_range(0..=self.config.repair_jitter);
            let weight =
                (self.config.scaled_cost(positions[u].distance(&positions[v])) + jitter).max(1);
            info!(
                "Connecting {} to {} to reach {} disconnected nodes",
                labels[u],
                labels[v],
                unreachable.len()
            );
            edges.push((u, v, weight));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_generator() -> GraphGenerator {
        GraphGenerator::with_config(GeneratorConfig {
            weight_jitter: 0,
            repair_jitter: 0,
            ..GeneratorConfig::default()
        })
    }

    #[test]
    fn labels_follow_placement_order() {
        assert_eq!(labels(6), vec!["S", "Z", "A", "B", "C", "D"]);
        assert_eq!(labels(9).len(), 9);
    }

    #[test]
    fn same_seed_same_graph() {
        let generator = GraphGenerator::new();
        for difficulty in [Difficulty::Easy, Difficulty::Hard] {
            let a = generator
                .generate(difficulty, &mut StdRng::seed_from_u64(7))
                .unwrap();
            let b = generator
                .generate(difficulty, &mut StdRng::seed_from_u64(7))
                .unwrap();
            assert_eq!(a, b);
            assert_eq!(a.to_json(), b.to_json());
        }
    }

    #[test]
    fn anchors_and_colors() {
        let graph = generate(Difficulty::Easy, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(graph.node_count(), 6);
        let start = &graph.nodes[START];
        let goal = &graph.nodes[GOAL];
        assert_eq!((start.x, start.y), (100.0, 250.0));
        assert_eq!((goal.x, goal.y), (700.0, 250.0));
        assert_eq!(goal.h, 0);
        assert_eq!(start.h, 15);
        assert_eq!(start.color, crate::graph::START_COLOR);
        assert_eq!(goal.color, crate::graph::GOAL_COLOR);
    }

    /// Placement must terminate with every node even if the clearance can never be met.
    #[test]
    fn impossible_clearance_still_places_all_nodes() {
        let generator = GraphGenerator::with_config(GeneratorConfig {
            node_clearance: 10_000.0,
            max_placement_attempts: 25,
            ..GeneratorConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(3);
        let positions = generator.place_nodes(9, &mut rng);
        assert_eq!(positions.len(), 9);
        let graph = generator.generate(Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(graph.node_count(), 9);
        assert!(graph.is_connected());
    }

    #[test]
    fn placed_nodes_respect_margins_and_clearance() {
        let generator = GraphGenerator::new();
        let c = &generator.config;
        for seed in 0..50 {
            let positions = generator.place_nodes(6, &mut StdRng::seed_from_u64(seed));
            for p in &positions[2..] {
                assert!(p.x >= c.margin_x && p.x < c.width - c.margin_x);
                assert!(p.y >= c.margin_y && p.y < c.height - c.margin_y);
            }
            // Six nodes fit comfortably, so the attempt budget is never the reason for acceptance.
            for (a, b) in positions.iter().tuple_combinations() {
                assert!(a.distance(b) >= c.node_clearance);
            }
        }
    }

    #[test]
    fn blocked_edges_are_skipped() {
        let generator = quiet_generator();
        // B sits right on the segment between S and A.
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(1000.0, 1000.0),
            Point::new(200.0, 0.0),
            Point::new(100.0, 10.0),
        ];
        assert!(generator.blocked(&positions, 0, 2));
        assert!(!generator.blocked(&positions, 0, 3));
        let edges = generator.synthesize_edges(&positions, Difficulty::Easy, &mut StdRng::seed_from_u64(0));
        assert!(!edges.iter().any(|&(u, v, _)| (u, v) == (0, 2) || (u, v) == (2, 0)));
    }

    #[test]
    fn isolated_start_joins_nearest_node() {
        let generator = quiet_generator();
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(400.0, 0.0),
            Point::new(90.0, 0.0),
        ];
        let mut edges = vec![(1, 2, 9)];
        generator.connect_start(&positions, &mut edges);
        assert_eq!(edges[1], (0, 2, 3));
        // A start that already has an edge is left alone.
        generator.connect_start(&positions, &mut edges);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn repair_adds_closest_links() {
        let generator = quiet_generator();
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(500.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(100.0, 0.0),
        ];
        let mut edges = Vec::new();
        generator
            .repair_connectivity(
                &positions,
                &["S", "Z", "A", "B"],
                &mut edges,
                &mut StdRng::seed_from_u64(0),
            )
            .unwrap();
        assert_eq!(edges, vec![(0, 2, 1), (2, 3, 3), (3, 1, 10)]);
    }

    #[test]
    fn edge_weights_cover_scaled_length() {
        let generator = GraphGenerator::new();
        for seed in 0..100 {
            let graph = generator
                .generate(Difficulty::Hard, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            for edge in &graph.edges {
                let a = graph.nodes[edge.from.as_str()].position();
                let b = graph.nodes[edge.to.as_str()].position();
                assert!(edge.weight >= 1);
                assert!(edge.weight as f64 >= a.distance(&b) / generator.config.scale);
                assert!(edge.weight <= generator.config.scaled_cost(a.distance(&b)).max(1) + 2);
            }
        }
    }
}
