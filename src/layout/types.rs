use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A position in layout units.
///
/// Equality, hashing and ordering are exact on the coordinate values, with
/// `-0.0` treated as `0.0`. Ordering is lexicographic on `(x, y)`, which is
/// the canonical order used for shape identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    fn key(self) -> (u64, u64) {
        (normalized(self.x).to_bits(), normalized(self.y).to_bits())
    }
}

fn normalized(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        normalized(self.x)
            .total_cmp(&normalized(other.x))
            .then_with(|| normalized(self.y).total_cmp(&normalized(other.y)))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One rank of nodes sharing an x-position.
#[derive(Debug, Clone)]
pub struct Layer {
    pub index: usize,
    pub x: f64,
    pub nodes: Vec<Point>,
}

/// Identifies an edge by its layer-transition and the node indices on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub transition: usize,
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer_{}_L{}_to_R{}", self.transition, self.from, self.to)
    }
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub id: EdgeId,
    pub start: Point,
    pub end: Point,
}

impl EdgeLayout {
    pub fn transition(&self) -> usize {
        self.id.transition
    }

    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    pub fn is_endpoint(&self, point: Point) -> bool {
        point == self.start || point == self.end
    }
}

/// The piece of an edge between two consecutive points along it.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Index of the parent edge in [`Layout::edges`].
    pub edge: usize,
    pub transition: usize,
    pub start: Point,
    pub end: Point,
    /// Set when either end is a layer node rather than an intersection.
    pub touches_node: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Triangle,
    Quadrilateral,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Triangle => f.write_str("triangle"),
            ShapeKind::Quadrilateral => f.write_str("quadrilateral"),
        }
    }
}

/// A minimal closed polygon discovered between two adjacent layers.
///
/// Triangle vertices are in canonical order; quadrilateral vertices are in
/// drawing order (see [`super::winding`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub transition: usize,
    pub vertices: Vec<Point>,
}

impl Shape {
    /// Sorted vertex tuple used for deduplication and comparisons.
    pub fn canonical(&self) -> Vec<Point> {
        let mut vertices = self.vertices.clone();
        vertices.sort();
        vertices
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionSummary {
    pub transition: usize,
    pub segments: usize,
    pub triangles: usize,
    pub quadrilaterals: usize,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub layers: Vec<Layer>,
    pub edges: Vec<EdgeLayout>,
    /// Every distinct crossing point, in canonical order.
    pub intersections: Vec<Point>,
    pub segments: Vec<Segment>,
    pub shapes: Vec<Shape>,
    pub transitions: Vec<TransitionSummary>,
}

impl Layout {
    pub fn triangles(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| shape.kind == ShapeKind::Triangle)
    }

    pub fn quadrilaterals(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| shape.kind == ShapeKind::Quadrilateral)
    }

    /// Intersection points recorded on one edge, in travel order.
    pub fn intersections_on_edge(&self, edge: usize) -> Vec<Point> {
        let Some(layout) = self.edges.get(edge) else {
            return Vec::new();
        };
        let mut points: Vec<Point> = Vec::new();
        for segment in self.segments.iter().filter(|segment| segment.edge == edge) {
            for point in [segment.start, segment.end] {
                if !layout.is_endpoint(point) && !points.contains(&point) {
                    points.push(point);
                }
            }
        }
        points.sort();
        points
    }
}
