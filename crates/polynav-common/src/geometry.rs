//! 2D geometric predicates for navigation mesh queries
//!
//! All operations work on raw double-precision coordinates. Comparisons to
//! zero go through the named tolerances below; the tolerance a predicate uses
//! is part of its contract.

use crate::Point;

/// Tolerance for degenerate-triangle denominators and collinearity gates in
/// orientation decisions.
pub const DEGENERACY_EPSILON: f64 = 1e-10;

/// Tolerance for point equality and on-segment collinearity.
pub const POINT_EPSILON: f64 = 1e-9;

/// Tolerance below which two segments are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-8;

/// Calculate twice the signed area of triangle abc.
///
/// The sign gives the orientation of c relative to the directed segment a→b:
/// - Positive: c lies to the left
/// - Negative: c lies to the right
/// - Zero: collinear
#[inline]
pub fn signed_area2(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Check if two points are equal within `POINT_EPSILON` in each coordinate.
#[inline]
pub fn points_equal(p: Point, q: Point) -> bool {
    (p.x - q.x).abs() < POINT_EPSILON && (p.y - q.y).abs() < POINT_EPSILON
}

/// Check if point p lies inside triangle (v0, v1, v2), boundary included.
///
/// Uses barycentric coordinates. A triangle whose denominator falls below
/// `DEGENERACY_EPSILON` is degenerate and contains nothing.
pub fn point_in_triangle(p: Point, v0: Point, v1: Point, v2: Point) -> bool {
    let d = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if d.abs() < DEGENERACY_EPSILON {
        return false;
    }

    let a = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / d;
    let b = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / d;
    let c = 1.0 - a - b;

    a >= 0.0 && b >= 0.0 && c >= 0.0
}

/// Check if point p lies on segment ab, endpoints included.
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() >= POINT_EPSILON {
        return false;
    }

    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    dot >= 0.0 && dot <= (b - a).length_squared()
}

/// Find the intersection point of segments p1→q1 and p2→q2.
///
/// Parallel and collinear segments report no intersection.
pub fn segment_intersection(p1: Point, q1: Point, p2: Point, q2: Point) -> Option<Point> {
    let r = q1 - p1;
    let s = q2 - p2;

    let rxs = r.x * s.y - r.y * s.x;
    if rxs.abs() < PARALLEL_EPSILON {
        return None;
    }

    let qp = p2 - p1;
    let t = (qp.x * s.y - qp.y * s.x) / rxs;
    let u = (qp.x * r.y - qp.y * r.x) / rxs;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + r * t)
    } else {
        None
    }
}

/// Find the point on segment ab closest to p.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < DEGENERACY_EPSILON {
        // Segment is a point
        return a;
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}
