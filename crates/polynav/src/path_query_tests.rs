//! End-to-end path query tests
//!
//! Scenario coverage over the fixture meshes: routing around a hole, goal
//! projection in both modes, failure cases, and the universal path laws
//! (endpoints, determinism, reversal symmetry, corridor optimality,
//! boundary crossings).

#[cfg(test)]
mod tests {
    use crate::astar;
    use crate::mesh::TriRef;
    use crate::query::{NavMeshQuery, PathOptions};
    use crate::test_mesh_helpers::{holed_square_mesh, twin_squares_mesh, Lcg};
    use polynav_common::{point_in_triangle, points_equal, segment_intersection, Point};

    fn path_length(path: &[Point]) -> f64 {
        path.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    #[test]
    fn test_route_around_hole() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let start = Point::new(10.0, 10.0);
        let goal = Point::new(40.0, 40.0);
        let path = query.find_path(start, goal);

        assert!(path.len() >= 3, "path must route around the hole");
        assert_eq!(path[0], start);
        assert_eq!(*path.last().unwrap(), goal);

        let length = path_length(&path);
        assert!(length > 42.426, "shorter than the straight line: {length}");
        assert!(length < 60.0, "longer than the perimeter route: {length}");
    }

    #[test]
    fn test_projection_to_closest_boundary_point() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let path = query.find_path(Point::new(10.0, 10.0), Point::new(53.0, 35.0));

        assert!(!path.is_empty());
        assert_eq!(path[0], Point::new(10.0, 10.0));
        let end = *path.last().unwrap();
        assert!((end.x - 50.0).abs() < 1e-6);
        assert!((end.y - 35.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_by_clipping_to_boundary() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let options = PathOptions {
            clip_to_boundary: true,
        };
        let path =
            query.find_path_with_options(Point::new(10.0, 10.0), Point::new(53.0, 35.0), &options);

        assert!(!path.is_empty());
        let end = *path.last().unwrap();
        // The segment (10,10)->(53,35) leaves the square through x = 50
        assert_eq!(end.x, 50.0);
        assert!((end.y - (10.0 + 1000.0 / 43.0)).abs() < 1e-6);
    }

    #[test]
    fn test_start_inside_hole_yields_empty_path() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        assert!(query
            .find_path(Point::new(25.0, 25.0), Point::new(10.0, 10.0))
            .is_empty());
    }

    #[test]
    fn test_containment_truth_table() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        assert!(!query.is_point_in_nav_mesh(Point::new(25.0, 25.0)));
        assert!(query.is_point_in_nav_mesh(Point::new(10.0, 10.0)));
        // Corner vertex belongs to the mesh
        assert!(query.is_point_in_nav_mesh(Point::new(50.0, 50.0)));
        // Just past the right edge
        assert!(!query.is_point_in_nav_mesh(Point::new(50.0000001, 25.0)));
    }

    #[test]
    fn test_disjoint_polygons_have_no_path() {
        let mesh = twin_squares_mesh();
        let query = NavMeshQuery::new(&mesh);

        assert!(query
            .find_path(Point::new(0.5, 0.5), Point::new(10.5, 0.5))
            .is_empty());
    }

    #[test]
    fn test_path_within_one_twin_square() {
        let mesh = twin_squares_mesh();
        let query = NavMeshQuery::new(&mesh);

        let start = Point::new(0.5, 0.2);
        let goal = Point::new(0.5, 0.8);
        let path = query.find_path(start, goal);
        assert_eq!(path, vec![start, goal]);
    }

    #[test]
    fn test_same_triangle_short_circuit() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let start = Point::new(20.0, 5.0);
        let goal = Point::new(30.0, 8.0);
        assert_eq!(query.find_path(start, goal), vec![start, goal]);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let start = Point::new(10.0, 10.0);
        let goal = Point::new(40.0, 40.0);
        let first = query.find_path(start, goal);
        let second = query.find_path(start, goal);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reversal_symmetry_of_length() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let a = Point::new(10.0, 10.0);
        let b = Point::new(40.0, 40.0);
        let forward = path_length(&query.find_path(a, b));
        let backward = path_length(&query.find_path(b, a));

        assert!((forward - backward).abs() <= 1e-6 * forward.max(backward));
    }

    #[test]
    fn test_funnel_no_longer_than_centroid_polyline() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let start = Point::new(10.0, 10.0);
        let goal = Point::new(40.0, 40.0);
        let start_tri = mesh.find_triangle_containing(start).unwrap();
        let goal_tri = mesh.find_triangle_containing(goal).unwrap();

        let mut corridor = vec![start_tri];
        corridor.extend(astar::find_corridor(&mesh, start_tri, goal_tri));

        let mut centroid_polyline = vec![start];
        centroid_polyline.extend(corridor.iter().map(|t| mesh.triangle(*t).centroid));
        centroid_polyline.push(goal);

        let smoothed = path_length(&query.find_path(start, goal));
        assert!(smoothed <= path_length(&centroid_polyline));
    }

    #[test]
    fn test_path_touches_boundary_only_at_waypoints() {
        let mesh = holed_square_mesh();
        let query = NavMeshQuery::new(&mesh);

        let path = query.find_path(Point::new(10.0, 10.0), Point::new(40.0, 40.0));
        assert!(path.len() >= 2);

        let polygon = &mesh.polygon_map().polygons[0];
        let mut boundary_edges = Vec::new();
        let rings = std::iter::once(&polygon.points).chain(polygon.holes.iter());
        for ring in rings {
            for i in 0..ring.len() {
                boundary_edges.push((ring[i], ring[(i + 1) % ring.len()]));
            }
        }

        for segment in path.windows(2) {
            for &(a, b) in &boundary_edges {
                if let Some(hit) = segment_intersection(segment[0], segment[1], a, b) {
                    assert!(
                        points_equal(hit, segment[0]) || points_equal(hit, segment[1]),
                        "segment {segment:?} crosses boundary edge ({a:?}, {b:?}) at {hit:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_sampled_barycentric_points_are_contained() {
        let mesh = holed_square_mesh();
        let mut rng = Lcg::new(1);

        for index in 0..mesh.triangle_count() {
            let tri = mesh.triangle(TriRef::new(index as u32));
            let [v0, v1, v2] = tri.vertices;
            for _ in 0..16 {
                let mut u = rng.unit();
                let mut v = rng.unit();
                if u + v > 1.0 {
                    u = 1.0 - u;
                    v = 1.0 - v;
                }
                let p = v0 * u + v1 * v + v2 * (1.0 - u - v);

                assert!(point_in_triangle(p, v0, v1, v2));
                assert!(mesh.is_point_in_nav_mesh(p));
            }
        }
    }

    #[test]
    fn test_locator_consistency_with_containment() {
        let mesh = holed_square_mesh();
        let mut rng = Lcg::new(7);

        for _ in 0..64 {
            let p = Point::new(rng.unit() * 60.0 - 5.0, rng.unit() * 60.0 - 5.0);
            assert_eq!(
                mesh.is_point_in_nav_mesh(p),
                mesh.find_triangle_containing(p).is_some()
            );
        }
    }

    #[test]
    fn test_concurrent_queries_share_one_mesh() {
        let mesh = holed_square_mesh();

        std::thread::scope(|scope| {
            for i in 0..4 {
                let mesh = &mesh;
                scope.spawn(move || {
                    let query = NavMeshQuery::new(mesh);
                    let start = Point::new(10.0, 10.0 + i as f64);
                    let path = query.find_path(start, Point::new(40.0, 40.0));
                    assert!(!path.is_empty());
                    assert_eq!(path[0], start);
                });
            }
        });
    }
}
