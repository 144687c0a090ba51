//! # astar_practice
//!
//! Generates small random weighted graphs for practising the
//! [A* search algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm) by hand, and solves
//! them. Nodes are scattered over a canvas with a minimum spacing, every node carries an
//! [admissible](https://en.wikipedia.org/wiki/Admissible_heuristic) straight-line estimate of its
//! cost to the goal `Z`, and every node is reachable from the start `S`. The solver reports the
//! full search state (`g`, `f`, parent and visited flag of every node) so that a hand-made
//! solution can be checked row by row.
//!
//! ```
//! use astar_practice::{generate, solve, Difficulty};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let graph = generate(Difficulty::Easy, &mut StdRng::seed_from_u64(42)).unwrap();
//! let state = solve(&graph);
//! assert!(state.goal_reached());
//! ```
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod graph;
pub mod provider;
pub mod report;
mod search;
pub mod solver;

pub use config::{Difficulty, GeneratorConfig, GOAL, START};
pub use error::{GenerateError, GraphError, ProviderError};
pub use generator::{generate, GraphGenerator};
pub use geometry::{point_distance, segment_distance, Point};
pub use graph::{Edge, Graph, Node};
pub use search::{NodeState, SearchState};
pub use solver::astar::{solve, AstarSolver};
pub use solver::dijkstra::DijkstraSolver;
pub use solver::GraphSolver;
