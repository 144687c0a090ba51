use serde::{Deserialize, Serialize};

/// A position on the drawing plane. Coordinates follow canvas conventions, so `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
    pub fn distance(&self, other: &Point) -> f64 {
        point_distance(self, other)
    }
}

/// Euclidean distance between two points.
pub fn point_distance(p: &Point, q: &Point) -> f64 {
    (p.x - q.x).hypot(p.y - q.y)
}

/// Shortest distance from `p` to the segment between `v` and `w`. The projection of `p` onto the
/// line through `v` and `w` is clamped to the segment, so points beyond either end measure to
/// that endpoint.
pub fn segment_distance(p: &Point, v: &Point, w: &Point) -> f64 {
    let dx = w.x - v.x;
    let dy = w.y - v.y;
    let l2 = dx * dx + dy * dy;
    if l2 == 0.0 {
        return point_distance(p, v);
    }
    let t = (((p.x - v.x) * dx + (p.y - v.y) * dy) / l2).clamp(0.0, 1.0);
    let projection = Point::new(v.x + t * dx, v.y + t * dy);
    point_distance(p, &projection)
}
