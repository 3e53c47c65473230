//! Exact geometric predicates shared by every stage of the pipeline.
//!
//! All tolerance-based decisions go through [`EPSILON`]: point snapping,
//! parallelism, collinearity, containment and endpoint exclusion.

use std::collections::HashMap;

use super::types::Point;

/// The single numeric tolerance of the engine.
///
/// Absolute for point coincidence, relative (a sine of the enclosed angle)
/// for parallel and collinear tests.
pub const EPSILON: f64 = 1e-9;

fn sub(a: Point, b: Point) -> (f64, f64) {
    (a.x - b.x, a.y - b.y)
}

fn cross(u: (f64, f64), v: (f64, f64)) -> f64 {
    u.0 * v.1 - u.1 * v.0
}

fn length(u: (f64, f64)) -> f64 {
    u.0.hypot(u.1)
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    cross(sub(b, a), sub(c, a))
}

pub fn points_coincide(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= EPSILON && (a.y - b.y).abs() <= EPSILON
}

/// Whether `c` lies on the line through `a` and `b`.
///
/// Coincident points count as collinear.
pub fn collinear(a: Point, b: Point, c: Point) -> bool {
    let u = sub(b, a);
    let v = sub(c, a);
    let scale = length(u) * length(v);
    if scale <= EPSILON * EPSILON {
        return true;
    }
    cross(u, v).abs() <= EPSILON * scale
}

/// Whether `p` lies on the closed segment `ab`.
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    if points_coincide(p, a) || points_coincide(p, b) {
        return true;
    }
    if !collinear(a, b, p) {
        return false;
    }
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

/// The single transversal crossing point of segments `a` and `b`.
///
/// Parallel or overlapping segments, segments that miss each other and
/// segments meeting only at an endpoint of either one yield `None`.
pub fn proper_intersection(a: (Point, Point), b: (Point, Point)) -> Option<Point> {
    let r = sub(a.1, a.0);
    let s = sub(b.1, b.0);
    let denom = cross(r, s);
    if denom.abs() <= EPSILON * length(r) * length(s) {
        return None;
    }
    let qp = sub(b.0, a.0);
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    if !(-EPSILON..=1.0 + EPSILON).contains(&t) || !(-EPSILON..=1.0 + EPSILON).contains(&u) {
        return None;
    }
    let point = Point::new(a.0.x + t * r.0, a.0.y + t * r.1);
    if [a.0, a.1, b.0, b.1]
        .into_iter()
        .any(|end| points_coincide(point, end))
    {
        return None;
    }
    Some(point)
}

/// Whether `p` lies inside triangle `abc` or on its boundary.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = orient(a, b, p);
    let d2 = orient(b, c, p);
    let d3 = orient(c, a, p);
    let has_neg = d1 < -EPSILON || d2 < -EPSILON || d3 < -EPSILON;
    let has_pos = d1 > EPSILON || d2 > EPSILON || d3 > EPSILON;
    !(has_neg && has_pos)
}

/// Whether `p` lies strictly inside the closed polygon `ring`.
///
/// Points on the boundary are not enclosed. Uses the winding number, so the
/// ring may be given in either orientation.
pub fn polygon_encloses(ring: &[Point], p: Point) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut winding = 0i32;
    for (idx, &a) in ring.iter().enumerate() {
        let b = ring[(idx + 1) % ring.len()];
        if point_on_segment(p, a, b) {
            return false;
        }
        if a.y <= p.y {
            if b.y > p.y && orient(a, b, p) > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && orient(a, b, p) < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Whether the closed ring has two non-adjacent sides that touch.
pub fn ring_self_intersects(ring: &[Point]) -> bool {
    let n = ring.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let a = (ring[i], ring[(i + 1) % n]);
            let b = (ring[j], ring[(j + 1) % n]);
            if segments_touch(a, b) {
                return true;
            }
        }
    }
    false
}

fn segments_touch(a: (Point, Point), b: (Point, Point)) -> bool {
    if proper_intersection(a, b).is_some() {
        return true;
    }
    point_on_segment(a.0, b.0, b.1)
        || point_on_segment(a.1, b.0, b.1)
        || point_on_segment(b.0, a.0, a.1)
        || point_on_segment(b.1, a.0, a.1)
}

/// Snaps nearly-equal points onto one shared value.
///
/// Points are bucketed on a grid of [`EPSILON`]-sized cells; a lookup checks
/// the neighbouring cells so that pairs straddling a cell border still merge.
#[derive(Debug, Default)]
pub(crate) struct PointInterner {
    cells: HashMap<(i64, i64), Vec<Point>>,
}

impl PointInterner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn intern(&mut self, point: Point) -> Point {
        let (cx, cy) = cell_of(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let cell = (cx.saturating_add(dx), cy.saturating_add(dy));
                let Some(bucket) = self.cells.get(&cell) else {
                    continue;
                };
                if let Some(existing) = bucket.iter().find(|p| points_coincide(**p, point)) {
                    return *existing;
                }
            }
        }
        self.cells.entry((cx, cy)).or_default().push(point);
        point
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}

fn cell_of(point: Point) -> (i64, i64) {
    (
        (point.x / EPSILON).floor() as i64,
        (point.y / EPSILON).floor() as i64,
    )
}
