//! Path queries over a navigation mesh
//!
//! This module stitches the engine together behind a single entry point:
//! locate the endpoints, project the goal onto the start polygon's boundary
//! when it falls outside the mesh, search a corridor of triangles, and pull
//! the corridor taut into the final polyline.

use polynav_common::{closest_point_on_segment, segment_intersection, Point};

use crate::astar;
use crate::funnel;
use crate::mesh::{NavMesh, Polygon};

/// Options for a path query
#[derive(Debug, Clone, Copy, Default)]
pub struct PathOptions {
    /// Project an off-mesh goal by clipping the start→goal segment against
    /// the outer ring of the start polygon, instead of taking the closest
    /// boundary point.
    pub clip_to_boundary: bool,
}

/// Query interface over an immutable navigation mesh.
///
/// Holds no state beyond the mesh borrow; every query allocates its search
/// bookkeeping locally, so one mesh can serve queries from multiple threads
/// concurrently.
#[derive(Debug)]
pub struct NavMeshQuery<'a> {
    nav_mesh: &'a NavMesh,
}

impl<'a> NavMeshQuery<'a> {
    /// Creates a query interface over a navigation mesh.
    pub fn new(nav_mesh: &'a NavMesh) -> Self {
        Self { nav_mesh }
    }

    /// The mesh this query interface reads from.
    pub fn nav_mesh(&self) -> &NavMesh {
        self.nav_mesh
    }

    /// Checks whether `p` lies inside the navigable region.
    pub fn is_point_in_nav_mesh(&self, p: Point) -> bool {
        self.nav_mesh.is_point_in_nav_mesh(p)
    }

    /// Finds a path from `start` to `end` with default options.
    pub fn find_path(&self, start: Point, end: Point) -> Vec<Point> {
        self.find_path_with_options(start, end, &PathOptions::default())
    }

    /// Finds a piecewise-linear path from `start` to `end` inside the mesh.
    ///
    /// The returned polyline begins at `start` and ends at the effective
    /// goal: `end` itself when it lies in the mesh, otherwise the projection
    /// of `end` onto the boundary of the start point's polygon in the mode
    /// the options select.
    ///
    /// An empty path means the start lies outside the mesh, the goal could
    /// not be projected onto a triangle, or no corridor connects the two
    /// triangles.
    pub fn find_path_with_options(
        &self,
        start: Point,
        end: Point,
        options: &PathOptions,
    ) -> Vec<Point> {
        let Some(start_tri) = self.nav_mesh.find_triangle_containing(start) else {
            return Vec::new();
        };

        let (goal, goal_tri) = match self.nav_mesh.find_triangle_containing(end) {
            Some(tri) => (end, tri),
            None => {
                let Some(poly) = self.nav_mesh.polygon_owning(start_tri) else {
                    return Vec::new();
                };
                let polygon = &self.nav_mesh.polygon_map().polygons[poly];
                let goal = project_goal(start, end, polygon, options);
                match self.nav_mesh.find_triangle_containing(goal) {
                    Some(tri) => (goal, tri),
                    None => return Vec::new(),
                }
            }
        };

        if start_tri == goal_tri {
            return vec![start, goal];
        }

        let tail = astar::find_corridor(self.nav_mesh, start_tri, goal_tri);
        if tail.is_empty() {
            // A search that comes back empty against an adjacent goal still
            // has a one-portal corridor worth of freedom: walk straight
            if self.nav_mesh.triangle(start_tri).neighbors.contains(&goal_tri) {
                return vec![start, goal];
            }
            return Vec::new();
        }

        let mut corridor = Vec::with_capacity(tail.len() + 1);
        corridor.push(start_tri);
        corridor.extend_from_slice(&tail);

        let portals = funnel::extract_portals(self.nav_mesh, &corridor);
        funnel::string_pull(start, goal, &portals)
    }
}

/// Projects an off-mesh goal onto the boundary of the start polygon.
fn project_goal(start: Point, end: Point, polygon: &Polygon, options: &PathOptions) -> Point {
    if options.clip_to_boundary {
        if let Some(hit) = clip_to_outer_ring(start, end, polygon) {
            return hit;
        }
    }
    closest_boundary_point(polygon, end)
}

/// Finds the intersection of segment `start`→`end` with the polygon's outer
/// ring nearest to `start`.
fn clip_to_outer_ring(start: Point, end: Point, polygon: &Polygon) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for (a, b) in ring_edges(&polygon.points) {
        if let Some(hit) = segment_intersection(start, end, a, b) {
            let dist_sq = start.distance_squared(hit);
            if best.map_or(true, |(best_dist, _)| dist_sq < best_dist) {
                best = Some((dist_sq, hit));
            }
        }
    }
    best.map(|(_, hit)| hit)
}

/// Finds the boundary point of `polygon` closest to `p`, holes included.
///
/// Candidates are enumerated as outer-ring vertices, the closest point of
/// each outer-ring edge, then each hole ring's edges in declared order; the
/// first candidate at the minimum squared distance wins ties.
pub fn closest_boundary_point(polygon: &Polygon, p: Point) -> Point {
    let mut best_dist = f64::MAX;
    let mut best = p;

    let mut consider = |candidate: Point| {
        let dist_sq = p.distance_squared(candidate);
        if dist_sq < best_dist {
            best_dist = dist_sq;
            best = candidate;
        }
    };

    for &vertex in &polygon.points {
        consider(vertex);
    }
    for (a, b) in ring_edges(&polygon.points) {
        consider(closest_point_on_segment(p, a, b));
    }
    for hole in &polygon.holes {
        for (a, b) in ring_edges(hole) {
            consider(closest_point_on_segment(p, a, b));
        }
    }

    best
}

/// Iterator over the consecutive edges of an implicitly closed ring.
fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    (0..ring.len()).map(move |i| (ring[i], ring[(i + 1) % ring.len()]))
}
