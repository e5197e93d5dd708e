//! Polygon map data model and the navigation mesh built over it
//!
//! The map comes from an upstream triangulator: polygons carry an outer
//! ring, optional hole rings and a list of triangles covering the interior
//! minus the holes. The navmesh flattens every polygon's triangles into one
//! indexable list and answers point-location queries against it.

use polynav_common::{point_in_triangle, points_equal, Error, Point, Result};

/// Reference to a triangle in the navmesh's flat triangle list.
///
/// Triangle identity throughout the engine is this index; vertex coordinates
/// are never compared to identify triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriRef(u32);

impl TriRef {
    /// Creates a triangle reference from a flat-list index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// The flat-list index of the triangle.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A triangle of the navigable region, as supplied by the provider.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Triangle {
    /// Corner points of the triangle. Never collinear.
    pub vertices: [Point; 3],
    /// Arithmetic mean of the three vertices, precomputed.
    pub centroid: Point,
    /// Indices, within the owning polygon's triangle list, of the triangles
    /// sharing exactly two vertices with this one.
    pub neighbors: Vec<u32>,
}

impl Triangle {
    /// Creates a triangle with its centroid precomputed and no adjacency.
    pub fn new(vertices: [Point; 3]) -> Self {
        let centroid = (vertices[0] + vertices[1] + vertices[2]) / 3.0;
        Self {
            vertices,
            centroid,
            neighbors: Vec::new(),
        }
    }

    /// Number of vertices shared with `other`, compared by epsilon equality.
    pub(crate) fn shared_vertex_count(&self, other: &Triangle) -> usize {
        self.vertices
            .iter()
            .filter(|v| other.vertices.iter().any(|w| points_equal(**v, *w)))
            .count()
    }
}

/// Discover triangle adjacency by shared edges.
///
/// Links every pair of triangles sharing exactly two vertices by epsilon
/// equality. The relation is symmetric and a triangle never links to itself.
/// Quadratic in the triangle count; runs once per polygon at map build time.
pub fn link_neighbors(triangles: &mut [Triangle]) {
    for tri in triangles.iter_mut() {
        tri.neighbors.clear();
    }
    for i in 0..triangles.len() {
        for j in i + 1..triangles.len() {
            if triangles[i].shared_vertex_count(&triangles[j]) == 2 {
                triangles[i].neighbors.push(j as u32);
                triangles[j].neighbors.push(i as u32);
            }
        }
    }
}

/// A simple polygon with optional holes, triangulated by the provider.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Polygon {
    /// Outer ring, counter-clockwise, implicitly closed.
    pub points: Vec<Point>,
    /// Hole rings, clockwise, implicitly closed.
    pub holes: Vec<Vec<Point>>,
    /// Triangles covering the interior minus the holes, adjacency-linked.
    pub triangles: Vec<Triangle>,
}

impl Polygon {
    /// Creates a polygon from its outer ring, with no holes or triangles.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            holes: Vec::new(),
            triangles: Vec::new(),
        }
    }
}

/// Ordered collection of pairwise disjoint polygons.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PolygonMap {
    /// The polygons of the map.
    pub polygons: Vec<Polygon>,
}

/// Flattened triangle as stored by the navmesh: provider data plus global
/// adjacency and the owning polygon's index.
#[derive(Debug, Clone)]
pub struct MeshTri {
    /// Corner points of the triangle.
    pub vertices: [Point; 3],
    /// Precomputed centroid.
    pub centroid: Point,
    /// References to adjacent triangles, rebased onto the flat list.
    pub neighbors: Vec<TriRef>,
    /// Index of the owning polygon in the map.
    pub polygon: u32,
}

/// Immutable navigation mesh over a polygon map.
///
/// Construction concatenates every polygon's triangles in polygon order into
/// a flat list, rebasing the provider's polygon-local neighbor indices onto
/// it. The mesh never changes after construction, so one instance can serve
/// queries from multiple threads without coordination.
#[derive(Debug)]
pub struct NavMesh {
    map: PolygonMap,
    tris: Vec<MeshTri>,
}

impl NavMesh {
    /// Builds a navigation mesh from a triangulated polygon map.
    ///
    /// Validates the provider contract: neighbor indices must be in range,
    /// the adjacency relation symmetric and never reflexive, and every
    /// linked pair must share exactly two vertices.
    pub fn new(map: PolygonMap) -> Result<Self> {
        let mut tris = Vec::new();

        for (pi, polygon) in map.polygons.iter().enumerate() {
            let base = tris.len();
            for (ti, tri) in polygon.triangles.iter().enumerate() {
                let mut neighbors = Vec::with_capacity(tri.neighbors.len());
                for &local in &tri.neighbors {
                    let local = local as usize;
                    if local >= polygon.triangles.len() {
                        return Err(Error::InvalidMesh(format!(
                            "polygon {pi} triangle {ti}: neighbor index {local} out of range"
                        )));
                    }
                    if local == ti {
                        return Err(Error::BrokenAdjacency(format!(
                            "polygon {pi} triangle {ti} lists itself as a neighbor"
                        )));
                    }
                    let other = &polygon.triangles[local];
                    if !other.neighbors.contains(&(ti as u32)) {
                        return Err(Error::BrokenAdjacency(format!(
                            "polygon {pi}: triangle {ti} links {local} but not back"
                        )));
                    }
                    if tri.shared_vertex_count(other) != 2 {
                        return Err(Error::BrokenAdjacency(format!(
                            "polygon {pi}: triangles {ti} and {local} do not share an edge"
                        )));
                    }
                    neighbors.push(TriRef::new((base + local) as u32));
                }
                tris.push(MeshTri {
                    vertices: tri.vertices,
                    centroid: tri.centroid,
                    neighbors,
                    polygon: pi as u32,
                });
            }
        }

        Ok(Self { map, tris })
    }

    /// The polygon map the mesh was built from.
    pub fn polygon_map(&self) -> &PolygonMap {
        &self.map
    }

    /// Total number of triangles across all polygons.
    pub fn triangle_count(&self) -> usize {
        self.tris.len()
    }

    /// The flattened triangle behind a reference.
    #[inline]
    pub fn triangle(&self, tri: TriRef) -> &MeshTri {
        &self.tris[tri.index()]
    }

    /// Iterator over all triangles in flat-list order.
    pub fn triangles(&self) -> impl Iterator<Item = &MeshTri> {
        self.tris.iter()
    }

    /// Index of the polygon whose triangle list contains `tri`.
    pub fn polygon_owning(&self, tri: TriRef) -> Option<usize> {
        self.tris.get(tri.index()).map(|t| t.polygon as usize)
    }

    /// Finds the first triangle in flat-list order containing `p`, boundary
    /// included.
    ///
    /// A point exactly on a shared edge resolves to whichever of the touching
    /// triangles comes first in the list; the order is deterministic but
    /// callers should not rely on which triangle wins.
    pub fn find_triangle_containing(&self, p: Point) -> Option<TriRef> {
        self.tris
            .iter()
            .position(|t| point_in_triangle(p, t.vertices[0], t.vertices[1], t.vertices[2]))
            .map(|i| TriRef::new(i as u32))
    }

    /// Checks whether `p` lies inside the navigable region.
    pub fn is_point_in_nav_mesh(&self, p: Point) -> bool {
        self.find_triangle_containing(p).is_some()
    }
}
