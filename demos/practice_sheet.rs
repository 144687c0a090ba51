use astar_practice::report::SearchTable;
use astar_practice::{solve, Difficulty, GraphGenerator};
use rand::{rngs::StdRng, SeedableRng};

// Prints a practice graph, the blank table to fill in and the worked solution.
//
//     cargo run --example practice_sheet -- hard 7
//
// The first argument picks the difficulty, the second seeds the generator.
fn main() {
    let mut args = std::env::args().skip(1);
    let difficulty: Difficulty = args
        .next()
        .map(|s| s.parse().unwrap())
        .unwrap_or_default();
    let seed: u64 = args.next().map(|s| s.parse().unwrap()).unwrap_or(0);

    let mut rng = StdRng::seed_from_u64(seed);
    let graph = GraphGenerator::new().generate(difficulty, &mut rng).unwrap();
    println!("{}", graph);
    println!("{}", SearchTable::blank(&graph));

    let state = solve(&graph);
    println!("{}", SearchTable::solved(&graph, &state));
    match state.path() {
        Some(path) => println!(
            "Shortest path: {} (cost {})",
            path.join(" -> "),
            state.path_cost().unwrap_or_default()
        ),
        None => println!("No path from {} to {}", state.start, state.goal),
    }
}
