use approx::assert_relative_eq;
use config::constants::{BevelSettings, ModelerConfig};
use glam::DVec3;
use mesh_modeler::ops::knife::{knife_cut, KnifeStroke};
use mesh_modeler::topology::{compact, find_edge, EdgeKey};
use mesh_modeler::{IndexedMesh, MeshModeler, Primitive, TopologyStore};
use std::collections::HashSet;

const TOP: usize = 1;

fn assert_invariants(store: &TopologyStore) {
    for (index, face) in store.live_faces() {
        let corners = face.corners();
        for &v in corners {
            assert!(v < store.vertex_count(), "face {index} references {v}");
            assert!(!store.vertices()[v].deleted, "face {index} references dead {v}");
        }
        let unique: HashSet<usize> = corners.iter().copied().collect();
        assert_eq!(unique.len(), corners.len(), "face {index} repeats a corner");
    }
    let edges = store.build_edges();
    let keys: HashSet<EdgeKey> = edges.iter().map(|e| e.key()).collect();
    assert_eq!(keys.len(), edges.len(), "duplicate edge keys");
}

/// A short editing session touching every kind of edit.
fn edited_modeler() -> MeshModeler {
    let mut modeler = MeshModeler::default();
    modeler.extrude_face(TOP, 0.8).unwrap();
    modeler.subdivide_selected_face().unwrap();
    let edge = find_edge(&modeler.edges(), 0, 1).unwrap();
    modeler.loop_cut(edge, 0.3).unwrap();
    let edge = find_edge(&modeler.edges(), 0, 3).unwrap();
    modeler
        .bevel_edge(edge, &BevelSettings { distance: 0.05, segments: 2, ..Default::default() })
        .unwrap();
    modeler
}

#[test]
fn invariants_hold_after_every_edit() {
    let mut modeler = MeshModeler::default();
    assert_invariants(modeler.store());

    modeler.extrude_face(TOP, 0.8).unwrap();
    assert_invariants(modeler.store());
    modeler.subdivide_selected_face().unwrap();
    assert_invariants(modeler.store());
    modeler.set_merge_operands(0, 1).unwrap();
    modeler.merge_selected().unwrap();
    assert_invariants(modeler.store());
    modeler.select_vertex(0).unwrap();
    modeler.split_selected_vertex().unwrap();
    assert_invariants(modeler.store());
    modeler.delete_face(0).unwrap();
    assert_invariants(modeler.store());
    assert_invariants(edited_modeler().store());
}

#[test]
fn rejected_edits_are_total() {
    let mut modeler = edited_modeler();
    let before = modeler.store().clone();

    assert!(modeler.extrude_face(usize::MAX, 1.0).is_err());
    assert!(modeler.extrude_edge(usize::MAX, 1.0).is_err());
    assert!(modeler.bridge_edges(0, 0).is_err());
    assert!(modeler.merge_vertices(3, 3).is_err());
    assert!(modeler.split_vertex(0, usize::MAX).is_err());
    assert!(modeler.move_vertex(usize::MAX, DVec3::X).is_err());
    assert_eq!(modeler.store(), &before);
    assert!(!modeler.status().is_empty());
}

#[test]
fn export_import_preserves_triangle_count() {
    let modeler = edited_modeler();
    let mesh = modeler.export_mesh();
    assert!(mesh.validate());

    let parsed = IndexedMesh::from_obj(&modeler.to_obj()).unwrap();
    assert_eq!(parsed.triangle_count(), mesh.triangle_count());

    let store = TopologyStore::from_indexed(&parsed).unwrap();
    assert_eq!(IndexedMesh::from_store(&store).triangle_count(), mesh.triangle_count());
}

#[test]
fn compaction_is_idempotent() {
    let mut store = edited_modeler().store().clone();
    store.tombstone_face(2);
    compact(&mut store);
    let once = serde_json::to_string(&store).unwrap();

    let table = compact(&mut store);
    assert_eq!(serde_json::to_string(&store).unwrap(), once);
    assert!((0..store.vertex_count()).all(|v| table.vertex(v) == Some(v)));
}

#[test]
fn loop_select_on_fresh_cube_is_four() {
    let modeler = MeshModeler::default();
    let edge_count = modeler.edges().len();
    assert_eq!(edge_count, 12);
    for seed in 0..edge_count {
        let mut modeler = modeler.clone();
        assert_eq!(modeler.select_edge_loop(seed).unwrap().len(), 4, "seed {seed}");
    }
}

#[test]
fn extrude_top_face_scenario() {
    let mut modeler = MeshModeler::default();
    let original_y = modeler.store().position(4).y;
    modeler.select_face(TOP).unwrap();
    let cap = modeler.extrude_face(TOP, 1.0).unwrap();

    let store = modeler.store();
    // The top face is gone and 5 faces were added.
    assert_eq!(store.face_count(), 6 - 1 + 5);
    assert_eq!(store.vertex_count(), 12);
    for v in 8..12 {
        assert_relative_eq!(store.position(v).y, original_y + 1.0, epsilon = 1e-12);
    }
    assert_eq!(modeler.selection().selected_face, Some(cap));
    assert!(store.faces()[cap].corners().iter().all(|&v| v >= 8));
}

#[test]
fn bevel_edge_scenario() {
    let mut modeler = MeshModeler::default();
    let edge = find_edge(&modeler.edges(), 7, 6).unwrap();
    modeler.select_edge(edge).unwrap();

    let settings = BevelSettings {
        distance: 0.1,
        segments: 1,
        ..Default::default()
    };
    let faces = modeler.bevel_edge(edge, &settings).unwrap();
    assert_eq!(faces.len(), 2);
    assert!(faces.iter().all(|&f| modeler.store().faces()[f].is_quad()));

    let store = modeler.store();
    let referenced: HashSet<usize> = store
        .live_faces()
        .flat_map(|(_, f)| f.corners().to_vec())
        .collect();
    assert_eq!(referenced.len(), store.vertex_count());
}

/// Corner to corner, so both pieces are triangles. A midpoint-to-midpoint
/// stroke leaves two quads, since four-corner pieces are kept whole rather
/// than fanned.
#[test]
fn knife_across_top_face_scenario() {
    let mut store = Primitive::cube().build().unwrap();
    let original_area = store.face_area(&store.faces()[TOP]);
    let stroke = KnifeStroke {
        start: DVec3::new(-0.5, 0.5, -0.5),
        end: DVec3::new(0.5, 0.5, 0.5),
        start_face: Some(TOP),
        end_face: Some(TOP),
    };

    let result = knife_cut(&mut store, &stroke).unwrap();
    assert!(store.faces()[TOP].deleted);
    assert_eq!(result.new_faces.len(), 2);
    let area: f64 = result
        .new_faces
        .iter()
        .map(|&f| {
            assert_eq!(store.faces()[f].vertex_count, 3);
            store.face_area(&store.faces()[f])
        })
        .sum();
    assert_relative_eq!(area, original_area, epsilon = 1e-12);

    compact(&mut store);
    assert_invariants(&store);
}

#[test]
fn knife_stroke_off_the_cube_cuts_one_face() {
    let mut store = Primitive::cube().build().unwrap();
    let stroke = KnifeStroke {
        start: DVec3::new(-0.8, 0.5, -0.8),
        end: DVec3::new(0.8, 0.5, 0.8),
        start_face: None,
        end_face: None,
    };

    let result = knife_cut(&mut store, &stroke).unwrap();
    assert_eq!(result.split_faces, vec![TOP]);
    for (_, face) in store.live_faces() {
        if face.vertex_count == 3 {
            assert!(face.corners().iter().all(|&v| store.position(v).y > 0.0));
        }
    }
    assert_eq!(store.live_faces().filter(|(_, f)| f.is_quad()).count(), 5);
}

#[test]
fn limits_bound_growth() {
    let config = ModelerConfig {
        max_vertices: 18,
        ..Default::default()
    };
    let mut modeler = MeshModeler::new(Primitive::cube(), config).unwrap();
    modeler.extrude_face(TOP, 1.0).unwrap();
    modeler.extrude_selected_face().unwrap();
    assert_eq!(modeler.store().vertex_count(), 16);
    assert!(modeler.extrude_selected_face().is_err());
    assert_eq!(modeler.store().vertex_count(), 16);
    assert!(modeler.status().starts_with("Extrude face: Too many vertices"));
}
