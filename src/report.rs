//! Markdown tables of the search state, one row per node.
use crate::config::START;
use crate::graph::Graph;
use crate::search::SearchState;
use core::fmt;

const HEADER: &str = "| Node | Dist from Start (g) | Heuristic (h) | Total (f = g + h) | Previous Node | Visited? |";
const SEPARATOR: &str = "| :--- | :--- | :--- | :--- | :--- | :--- |";

fn cost(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "∞".to_owned()
    }
}

/// A search table for a graph. Without a [SearchState] it is the blank sheet a student starts
/// from: only the start has known values.
#[derive(Clone, Copy, Debug)]
pub struct SearchTable<'a> {
    graph: &'a Graph,
    state: Option<&'a SearchState>,
}

impl<'a> SearchTable<'a> {
    pub fn blank(graph: &'a Graph) -> SearchTable<'a> {
        SearchTable { graph, state: None }
    }
    pub fn solved(graph: &'a Graph, state: &'a SearchState) -> SearchTable<'a> {
        SearchTable {
            graph,
            state: Some(state),
        }
    }
}

impl fmt::Display for SearchTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        writeln!(f, "{SEPARATOR}")?;
        for label in self.graph.display_order() {
            let h = self.graph.nodes[label].h;
            let row = match self.state.and_then(|s| s.get(label)) {
                Some(s) => (
                    cost(s.g),
                    cost(s.f),
                    s.parent.clone().unwrap_or_else(|| "-".to_owned()),
                    if s.visited { "Yes" } else { "No" },
                ),
                None if label == START => ("0".to_owned(), h.to_string(), "-".to_owned(), "No"),
                None => (cost(f64::INFINITY), cost(f64::INFINITY), String::new(), "No"),
            };
            writeln!(
                f,
                "| {label} | {} | {h} | {} | {} | {} |",
                row.0, row.1, row.2, row.3
            )?;
        }
        Ok(())
    }
}
