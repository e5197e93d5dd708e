//! A* search over the triangle adjacency graph
//!
//! Nodes are triangles identified by their flat-list index. Both the edge
//! cost and the heuristic are Euclidean distances between triangle
//! centroids, which keeps the heuristic admissible and consistent for the
//! corridor metric.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::mesh::{NavMesh, TriRef};

/// State of a node in the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    /// Node hasn't been touched yet
    New,
    /// Node is in the open list
    Open,
    /// Node has been expanded
    Closed,
}

/// Per-triangle search bookkeeping, allocated fresh for every search
#[derive(Debug, Clone)]
struct Node {
    /// Cost from the start triangle to this one
    g: f64,
    /// Estimated cost from this triangle to the goal
    h: f64,
    /// Total cost (g + h)
    f: f64,
    /// Triangle this node was reached from
    parent: Option<TriRef>,
    /// State of the node in the search
    state: NodeState,
}

impl Node {
    fn new() -> Self {
        Self {
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
            state: NodeState::New,
        }
    }
}

/// Entry in the open list
#[derive(Debug, Clone, Copy)]
struct HeapNode {
    /// Triangle this entry refers to
    tri: TriRef,
    /// Total cost at the time the entry was pushed
    f: f64,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f
    }
}

impl Eq for HeapNode {}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for a min-heap (lowest f value first), with a
        // total order over NaN so the heap never misbehaves
        match other.f.partial_cmp(&self.f) {
            Some(ordering) => ordering,
            None => {
                if other.f.is_nan() && !self.f.is_nan() {
                    Ordering::Less
                } else if !other.f.is_nan() && self.f.is_nan() {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }
        }
    }
}

/// Runs A* from `start` to `goal` over the triangle adjacency graph.
///
/// Returns the corridor *after* the start triangle, in travel order, up to
/// and including the goal; the start triangle carries no parent edge, so the
/// caller prepends it. Returns an empty corridor when the goal is
/// unreachable.
///
/// Relaxed triangles are re-pushed onto the open list and stale entries
/// skipped when popped, so each triangle is expanded at most once.
pub(crate) fn find_corridor(mesh: &NavMesh, start: TriRef, goal: TriRef) -> Vec<TriRef> {
    let mut nodes = vec![Node::new(); mesh.triangle_count()];
    let mut open = BinaryHeap::new();

    let goal_centroid = mesh.triangle(goal).centroid;

    let start_h = mesh.triangle(start).centroid.distance(goal_centroid);
    {
        let node = &mut nodes[start.index()];
        node.h = start_h;
        node.f = start_h;
        node.state = NodeState::Open;
    }
    open.push(HeapNode {
        tri: start,
        f: start_h,
    });

    let mut found = false;
    while let Some(HeapNode { tri, f }) = open.pop() {
        {
            let node = &mut nodes[tri.index()];
            // Stale entry for a triangle that was already relaxed or expanded
            if node.state == NodeState::Closed || f > node.f {
                continue;
            }
            node.state = NodeState::Closed;
        }

        if tri == goal {
            found = true;
            break;
        }

        let current = mesh.triangle(tri);
        let current_g = nodes[tri.index()].g;

        for &neighbor in &current.neighbors {
            let (state, old_g) = {
                let node = &nodes[neighbor.index()];
                (node.state, node.g)
            };
            if state == NodeState::Closed {
                continue;
            }

            let neighbor_centroid = mesh.triangle(neighbor).centroid;
            let tentative_g = current_g + current.centroid.distance(neighbor_centroid);

            match state {
                NodeState::New => {
                    let h = neighbor_centroid.distance(goal_centroid);
                    let node = &mut nodes[neighbor.index()];
                    node.g = tentative_g;
                    node.h = h;
                    node.f = tentative_g + h;
                    node.parent = Some(tri);
                    node.state = NodeState::Open;
                    open.push(HeapNode {
                        tri: neighbor,
                        f: node.f,
                    });
                }
                NodeState::Open if tentative_g < old_g => {
                    let node = &mut nodes[neighbor.index()];
                    node.g = tentative_g;
                    node.f = tentative_g + node.h;
                    node.parent = Some(tri);
                    open.push(HeapNode {
                        tri: neighbor,
                        f: node.f,
                    });
                }
                _ => {}
            }
        }
    }

    if !found {
        return Vec::new();
    }

    // Walk parent links back from the goal, excluding the start
    let mut corridor = Vec::new();
    let mut current = goal;
    while current != start {
        corridor.push(current);
        match nodes[current.index()].parent {
            Some(parent) => current = parent,
            None => return Vec::new(),
        }
    }
    corridor.reverse();
    corridor
}
