//! Shortest-path queries over static, pre-triangulated 2D polygon maps
//!
//! The map comes from an upstream triangulator as polygons (outer ring plus
//! optional holes) covered by adjacency-linked triangles. [`NavMesh`]
//! flattens the map into one triangle list and answers point-location
//! queries against it; [`NavMeshQuery`] answers path queries: A* over the
//! triangle adjacency graph picks a corridor, and a funnel pass pulls the
//! shortest polyline through it. Goals outside the mesh are projected onto
//! the boundary of the start polygon first.
//!
//! ```
//! use polynav::{link_neighbors, NavMesh, NavMeshQuery, Point, Polygon, PolygonMap, Triangle};
//!
//! let mut polygon = Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ]);
//! polygon.triangles = vec![
//!     Triangle::new([Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 4.0)]),
//!     Triangle::new([Point::new(0.0, 0.0), Point::new(4.0, 4.0), Point::new(0.0, 4.0)]),
//! ];
//! link_neighbors(&mut polygon.triangles);
//!
//! let mesh = NavMesh::new(PolygonMap { polygons: vec![polygon] })?;
//! let query = NavMeshQuery::new(&mesh);
//!
//! assert!(query.is_point_in_nav_mesh(Point::new(2.0, 1.0)));
//! let path = query.find_path(Point::new(1.0, 0.5), Point::new(1.0, 3.5));
//! assert_eq!(path.first(), Some(&Point::new(1.0, 0.5)));
//! # Ok::<(), polynav::Error>(())
//! ```

mod astar;
mod funnel;
pub mod mesh;
pub mod query;

mod path_query_tests;
#[cfg(test)]
pub mod test_mesh_helpers;

pub use funnel::Portal;
pub use mesh::{link_neighbors, MeshTri, NavMesh, Polygon, PolygonMap, Triangle, TriRef};
pub use polynav_common::{Error, Point, Result};
pub use query::{closest_boundary_point, NavMeshQuery, PathOptions};
