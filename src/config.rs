use crate::geometry::Point;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Label of the start node in every generated or validated graph.
pub const START: &str = "S";
/// Label of the goal node in every generated or validated graph.
pub const GOAL: &str = "Z";
/// Labels handed out to intermediate nodes, in placement order.
pub const INTERMEDIATE_LABELS: [&str; 9] = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];

/// Controls the size and density of a generated graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// Total number of nodes, start and goal included.
    pub fn node_count(self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Hard => 9,
        }
    }
    /// Added on top of the random base connection count of every node.
    pub fn extra_connections(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Hard => 1,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty `{other}`, expected `easy` or `hard`")),
        }
    }
}

/// Layout and weighting parameters of the generator. Distances are in canvas units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: f64,
    pub height: f64,
    /// Horizontal distance of start and goal from the left and right canvas edges.
    pub anchor_inset: f64,
    /// Intermediate nodes keep this far from the left and right edges.
    pub margin_x: f64,
    /// Intermediate nodes keep this far from the top and bottom edges.
    pub margin_y: f64,
    /// Minimum distance between any two nodes, as long as attempts remain.
    pub node_clearance: f64,
    /// Placement attempts shared by all intermediate nodes.
    pub max_placement_attempts: usize,
    /// Minimum distance between an edge and any node it does not connect.
    pub edge_clearance: f64,
    /// Canvas units per unit of cost.
    pub scale: f64,
    /// Random extra weight of synthesized edges, inclusive.
    pub weight_jitter: u32,
    /// Random extra weight of edges added by connectivity repair, inclusive.
    pub repair_jitter: u32,
    /// How many candidates past the connection target are inspected before giving up on a node.
    pub candidate_slack: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            anchor_inset: 100.0,
            margin_x: 150.0,
            margin_y: 80.0,
            node_clearance: 110.0,
            max_placement_attempts: 2000,
            edge_clearance: 45.0,
            scale: 40.0,
            weight_jitter: 2,
            repair_jitter: 1,
            candidate_slack: 2,
        }
    }
}

impl GeneratorConfig {
    /// Reads a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<GeneratorConfig> {
        serde_json::from_str(json)
    }
    pub fn start_position(&self) -> Point {
        Point::new(self.anchor_inset, self.height / 2.0)
    }
    pub fn goal_position(&self) -> Point {
        Point::new(self.width - self.anchor_inset, self.height / 2.0)
    }
    /// Converts a canvas distance to the smallest integral cost that is not below it.
    pub fn scaled_cost(&self, distance: f64) -> u32 {
        (distance / self.scale).ceil() as u32
    }
    /// Converts a canvas distance to a heuristic estimate that never exceeds [scaled_cost](Self::scaled_cost).
    pub fn scaled_estimate(&self, distance: f64) -> u32 {
        (distance / self.scale).floor() as u32
    }
}
