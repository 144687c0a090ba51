/// Fuzzes the generator by checking for many seeds that every graph is connected, free of parallel
/// edges and zero weights, and carries admissible heuristics, and that A* agrees with Dijkstra.
use astar_practice::{
    generate,
    graph::EdgeKey,
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GraphSolver},
    Difficulty, Graph, GOAL, START,
};
use fxhash::FxHashSet;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::prelude::*;

const N_GRAPHS: u64 = 500;

fn random_graphs(difficulty: Difficulty, rng: &mut StdRng) -> Vec<Graph> {
    (0..N_GRAPHS)
        .map(|_| generate(difficulty, rng).unwrap())
        .collect()
}

#[test]
fn fuzz_structure() {
    let mut rng = StdRng::seed_from_u64(0);
    for difficulty in [Difficulty::Easy, Difficulty::Hard] {
        for graph in random_graphs(difficulty, &mut rng) {
            assert_eq!(graph.node_count(), difficulty.node_count());
            assert!(graph.nodes.contains_key(START) && graph.nodes.contains_key(GOAL));
            if !graph.is_connected() {
                println!("{graph}");
            }
            assert!(graph.unreachable_from_start().is_empty());
            let mut keys = FxHashSet::default();
            for edge in &graph.edges {
                assert!(edge.weight >= 1);
                assert_ne!(edge.from, edge.to);
                assert!(keys.insert(EdgeKey::new(&edge.from, &edge.to)));
            }
            assert!(graph.validate().is_ok());
        }
    }
}

#[test]
fn fuzz_admissible() {
    let mut rng = StdRng::seed_from_u64(1);
    let dijkstra = DijkstraSolver;
    for difficulty in [Difficulty::Easy, Difficulty::Hard] {
        for graph in random_graphs(difficulty, &mut rng) {
            let reference = UnGraph::<(), u32>::from_edges(
                graph
                    .indexed_edges()
                    .into_iter()
                    .map(|(a, b, w)| (a as u32, b as u32, w)),
            );
            let goal = graph.index_of(GOAL).unwrap();
            let costs = petgraph::algo::dijkstra(&reference, NodeIndex::new(goal), None, |e| {
                *e.weight()
            });
            for (ix, (label, node)) in graph.nodes.iter().enumerate() {
                let state = dijkstra.solve_between(&graph, label, GOAL);
                let cost = state.path_cost().unwrap();
                assert_eq!(cost, costs[&NodeIndex::new(ix)] as f64);
                if node.h as f64 > cost {
                    println!("{graph}");
                }
                assert!(node.h as f64 <= cost);
            }
        }
    }
}

#[test]
fn fuzz_optimal() {
    let mut rng = StdRng::seed_from_u64(2);
    let astar = AstarSolver::new();
    let dijkstra = DijkstraSolver;
    for difficulty in [Difficulty::Easy, Difficulty::Hard] {
        for graph in random_graphs(difficulty, &mut rng) {
            let state = astar.solve(&graph);
            assert!(state.goal_reached());
            let expected = dijkstra.solve(&graph).path_cost().unwrap();
            assert_eq!(state.path_cost(), Some(expected));

            let path = state.path().unwrap();
            assert_eq!(path.first().map(String::as_str), Some(START));
            assert_eq!(path.last().map(String::as_str), Some(GOAL));
            assert_eq!(astar.path_weight(&graph, &path).map(|w| w as f64), Some(expected));

            // Same graph, same search.
            assert_eq!(astar.solve(&graph), state);
        }
    }
}
