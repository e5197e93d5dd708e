//! Corridor portals and the funnel string-pulling pass
//!
//! A corridor of adjacent triangles is reduced to the sequence of shared
//! edges crossed along it, each oriented (left, right) with respect to the
//! direction of travel; the funnel then emits the shortest polyline from
//! start to goal that stays inside the corridor.

use polynav_common::{points_equal, signed_area2, Point};

use crate::mesh::{NavMesh, TriRef};

/// An edge shared by two consecutive corridor triangles, oriented so that
/// `left` lies to the left when traveling forward through it.
#[derive(Debug, Clone, Copy)]
pub struct Portal {
    /// Left endpoint of the shared edge.
    pub left: Point,
    /// Right endpoint of the shared edge.
    pub right: Point,
}

/// Extracts the oriented portal sequence of a corridor.
///
/// Consecutive triangles share their edge vertices by epsilon equality, not
/// by index, since the provider may not deduplicate vertex storage. A pair
/// that does not share exactly two vertices has broken adjacency and
/// contributes no portal.
pub(crate) fn extract_portals(mesh: &NavMesh, corridor: &[TriRef]) -> Vec<Portal> {
    let mut portals = Vec::with_capacity(corridor.len().saturating_sub(1));

    for pair in corridor.windows(2) {
        let from = mesh.triangle(pair[0]);
        let to = mesh.triangle(pair[1]);

        let mut shared = [Point::ZERO; 2];
        let mut count = 0;
        for v in &from.vertices {
            if to.vertices.iter().any(|w| points_equal(*v, *w)) {
                if count < 2 {
                    shared[count] = *v;
                }
                count += 1;
            }
        }
        if count != 2 {
            continue;
        }

        let (left, right) = if signed_area2(from.centroid, shared[0], shared[1]) > 0.0 {
            (shared[0], shared[1])
        } else {
            (shared[1], shared[0])
        };
        portals.push(Portal { left, right });
    }

    portals
}

/// Runs the funnel over the portal sequence and emits the shortest polyline
/// from `start` to `goal` inside the corridor.
///
/// The classic simple-stupid-funnel: a cone (apex, left, right) is narrowed
/// portal by portal; when a side would cross over the other, the opposite
/// bound becomes the next apex and the scan restarts just past the portal
/// that set it. The goal is processed uniformly through a sentinel portal
/// whose endpoints both sit on the goal.
///
/// Side tests use the raw signed area; only the apex-coincidence tests use
/// epsilon point equality.
pub(crate) fn string_pull(start: Point, goal: Point, portals: &[Portal]) -> Vec<Point> {
    if portals.is_empty() {
        return vec![start, goal];
    }

    let mut funnel_portals = Vec::with_capacity(portals.len() + 1);
    funnel_portals.extend_from_slice(portals);
    funnel_portals.push(Portal {
        left: goal,
        right: goal,
    });

    let mut path = vec![start];

    let mut apex = start;
    let mut left = start;
    let mut right = start;
    let mut left_index = 0usize;
    let mut right_index = 0usize;

    let mut i = 0usize;
    while i < funnel_portals.len() {
        let Portal {
            left: portal_left,
            right: portal_right,
        } = funnel_portals[i];

        // Right side: tighten if the new right does not widen the funnel
        if signed_area2(apex, right, portal_right) <= 0.0 {
            if points_equal(apex, right) || signed_area2(apex, left, portal_right) > 0.0 {
                right = portal_right;
                right_index = i;
            } else {
                // Right would cross over left: the left bound becomes the
                // next apex and the scan restarts past the portal that set it
                push_waypoint(&mut path, left);
                apex = left;
                right = apex;
                let apex_index = left_index;
                right_index = apex_index;
                i = apex_index + 1;
                continue;
            }
        }

        // Left side, mirrored
        if signed_area2(apex, left, portal_left) >= 0.0 {
            if points_equal(apex, left) || signed_area2(apex, right, portal_left) < 0.0 {
                left = portal_left;
                left_index = i;
            } else {
                push_waypoint(&mut path, right);
                apex = right;
                left = apex;
                let apex_index = right_index;
                left_index = apex_index;
                i = apex_index + 1;
                continue;
            }
        }

        i += 1;
    }

    push_waypoint(&mut path, goal);
    path
}

/// Appends a waypoint unless it repeats the previous one within epsilon.
fn push_waypoint(path: &mut Vec<Point>, p: Point) {
    let repeat = path.last().is_some_and(|last| points_equal(*last, p));
    if !repeat {
        path.push(p);
    }
}
