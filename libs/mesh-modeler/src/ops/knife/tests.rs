//! Tests for the knife tool.

use super::*;
use crate::primitives::{create_cube, create_plane};
use crate::topology::{compact, Face};
use approx::assert_relative_eq;

const TOP: usize = 1;

fn on_top(start: DVec3, end: DVec3) -> KnifeStroke {
    KnifeStroke {
        start,
        end,
        start_face: Some(TOP),
        end_face: Some(TOP),
    }
}

#[test]
fn test_diagonal_cut_gives_two_triangles() {
    let mut store = create_cube(1.0).unwrap();
    let original_area = store.face_area(&store.faces()[TOP]);
    let stroke = on_top(DVec3::new(-0.5, 0.5, -0.5), DVec3::new(0.5, 0.5, 0.5));

    let result = knife_cut(&mut store, &stroke).unwrap();
    assert_eq!(result.split_faces, vec![TOP]);
    assert_eq!(result.new_faces.len(), 2);
    assert!(store.faces()[TOP].deleted);
    assert_eq!(store.vertex_count(), 8);

    let mut area = 0.0;
    for &f in &result.new_faces {
        let face = store.faces()[f];
        assert_eq!(face.vertex_count, 3);
        assert_relative_eq!(store.face_normal(&face).unwrap().y, 1.0, epsilon = 1e-12);
        area += store.face_area(&face);
    }
    assert_relative_eq!(area, original_area, epsilon = 1e-12);
}

#[test]
fn test_straight_cut_across_opposite_sides() {
    let mut store = create_cube(1.0).unwrap();
    let stroke = on_top(DVec3::new(-0.5, 0.5, 0.0), DVec3::new(0.5, 0.5, 0.0));

    let result = knife_cut(&mut store, &stroke).unwrap();
    assert_eq!(result.split_faces, vec![TOP]);
    assert_eq!(store.vertex_count(), 10);
    // Four-corner pieces stay quads instead of being fanned into four
    // triangles.
    assert_eq!(result.new_faces.len(), 2);
    assert!(result.new_faces.iter().all(|&f| store.faces()[f].is_quad()));

    let area: f64 = result
        .new_faces
        .iter()
        .map(|&f| store.face_area(&store.faces()[f]))
        .sum();
    assert_relative_eq!(area, 1.0, epsilon = 1e-12);

    compact(&mut store);
    store.validate().unwrap();
}

#[test]
fn test_cut_across_split_plane_shares_vertices() {
    let mut store = TopologyStore::new();
    for (x, z) in [(-1.0, -1.0), (-1.0, 1.0), (0.0, 1.0), (0.0, -1.0), (1.0, 1.0), (1.0, -1.0)] {
        store.add_vertex(DVec3::new(x, 0.0, z));
    }
    store.add_face(Face::quad([0, 1, 2, 3]));
    store.add_face(Face::quad([3, 2, 4, 5]));

    let stroke = KnifeStroke {
        start: DVec3::new(-1.0, 0.0, 0.2),
        end: DVec3::new(1.0, 0.0, 0.2),
        start_face: Some(0),
        end_face: Some(1),
    };
    let result = knife_cut(&mut store, &stroke).unwrap();
    assert_eq!(result.split_faces, vec![0, 1]);
    assert_eq!(result.new_faces.len(), 4);
    // Left border, shared middle side, right border.
    assert_eq!(store.vertex_count(), 9);
}

#[test]
fn test_missing_end_face_floods_from_start() {
    let mut store = create_plane(2.0).unwrap();
    let stroke = KnifeStroke {
        start: DVec3::new(-1.0, 0.0, 0.0),
        end: DVec3::new(1.0, 0.0, 0.0),
        start_face: Some(0),
        end_face: None,
    };
    let result = knife_cut(&mut store, &stroke).unwrap();
    assert_eq!(result.split_faces, vec![0]);
}

/// A stroke drawn on the top plane but starting and ending off the cube.
fn unanchored(start: DVec3, end: DVec3) -> KnifeStroke {
    KnifeStroke {
        start,
        end,
        start_face: None,
        end_face: None,
    }
}

#[test]
fn test_unanchored_diagonal_cuts_only_the_top() {
    let mut store = create_cube(1.0).unwrap();
    let bottom = store.faces()[0];
    let stroke = unanchored(DVec3::new(-0.8, 0.5, -0.8), DVec3::new(0.8, 0.5, 0.8));

    let result = knife_cut(&mut store, &stroke).unwrap();
    assert_eq!(result.split_faces, vec![TOP]);
    assert_eq!(result.new_faces.len(), 2);
    assert_eq!(store.vertex_count(), 8);
    assert_eq!(store.faces()[0], bottom);
}

#[test]
fn test_unanchored_straight_cut_leaves_other_faces() {
    let mut store = create_cube(1.0).unwrap();
    let stroke = unanchored(DVec3::new(-0.8, 0.5, 0.0), DVec3::new(0.8, 0.5, 0.0));

    let plan = plan_knife(&store, &stroke).unwrap();
    assert_eq!(plan.iter().map(|c| c.face).collect::<Vec<_>>(), vec![TOP]);

    let result = knife_cut(&mut store, &stroke).unwrap();
    assert_eq!(result.split_faces, vec![TOP]);
    assert_eq!(store.live_faces().count(), 7);
    assert_eq!(store.vertex_count(), 10);
}

#[test]
fn test_crossing_snaps_on_side_parameter() {
    let mut store = TopologyStore::new();
    for (x, z) in [(0.0, 0.0), (0.0, 0.001), (1000.0, 0.001), (1000.0, 0.0)] {
        store.add_vertex(DVec3::new(x, 0.0, z));
    }
    store.add_face(Face::quad([0, 1, 2, 3]));
    let mut cache = HashMap::new();
    let at = |slot, edge_t| Crossing {
        slot,
        edge_t,
        stroke_t: 0.0,
    };

    // Far from the corner in absolute terms, but close in parameter.
    assert_eq!(crossing_vertex(&mut store, &mut cache, 0, &at(1, 5e-5)), 1);
    assert_eq!(crossing_vertex(&mut store, &mut cache, 0, &at(1, 1.0 - 5e-5)), 2);
    // Close in absolute terms on a short side, but mid-side in parameter.
    assert_eq!(crossing_vertex(&mut store, &mut cache, 0, &at(0, 0.05)), 4);
    assert_eq!(store.vertex_count(), 5);
}

#[test]
fn test_knife_rejections_leave_store_untouched() {
    let mut store = create_cube(1.0).unwrap();
    let before = store.clone();

    let point = DVec3::new(0.0, 0.5, 0.0);
    assert!(matches!(
        knife_cut(&mut store, &on_top(point, point)),
        Err(EditError::DegenerateGeometry { .. })
    ));

    let inside = on_top(DVec3::new(-0.1, 0.5, 0.0), DVec3::new(0.1, 0.5, 0.0));
    assert!(matches!(
        knife_cut(&mut store, &inside),
        Err(EditError::Unsatisfiable { .. })
    ));

    // Runs exactly along the top-front side: nothing can be split.
    let along = on_top(DVec3::new(-0.5, 0.5, 0.5), DVec3::new(0.5, 0.5, 0.5));
    assert!(knife_cut(&mut store, &along).is_err());
    assert_eq!(store, before);
}

#[test]
fn test_preview_matches_cut() {
    let store = create_cube(1.0).unwrap();
    let stroke = on_top(DVec3::new(-0.5, 0.5, 0.0), DVec3::new(0.5, 0.5, 0.0));
    let segments = preview_segments(&store, &stroke).unwrap();
    assert_eq!(segments.len(), 1);
    let (a, b) = segments[0];
    assert_relative_eq!(a.x, -0.5, epsilon = 1e-12);
    assert_relative_eq!(b.x, 0.5, epsilon = 1e-12);
    assert_relative_eq!(a.z, 0.0, epsilon = 1e-12);
}
