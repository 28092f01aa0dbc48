//! # Topology Compaction
//!
//! Garbage-collects tombstoned vertices and faces.
//!
//! ## Algorithm
//!
//! 1. Tombstone live faces referencing out-of-range, deleted or repeated
//!    vertices.
//! 2. Collect the vertices still referenced by a live face and assign them
//!    dense indices in ascending old order.
//! 3. Remap surviving faces; drop any with fewer than 3 unique corners.
//!
//! The returned [`RemapTable`] carries old→new maps for vertices and faces
//! so the session can fix every dependent index.

use super::{Face, TopologyStore, Vertex};
use tracing::debug;

/// Old→new index maps produced by [`compact`]. `None` marks a removed slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemapTable {
    pub vertices: Vec<Option<usize>>,
    pub faces: Vec<Option<usize>>,
}

impl RemapTable {
    /// New index of an old vertex.
    #[inline]
    pub fn vertex(&self, old: usize) -> Option<usize> {
        self.vertices.get(old).copied().flatten()
    }

    /// New index of an old face.
    #[inline]
    pub fn face(&self, old: usize) -> Option<usize> {
        self.faces.get(old).copied().flatten()
    }
}

/// Rebuilds dense vertex and face arrays.
///
/// Running it twice in a row yields identical arrays.
pub fn compact(store: &mut TopologyStore) -> RemapTable {
    let vertex_count = store.vertex_count();

    for face in store.faces_mut().iter_mut() {
        if face.deleted {
            continue;
        }
        let broken = face.vertex_count < 3
            || face.vertex_count > 4
            || face
                .corners()
                .iter()
                .any(|&v| v >= vertex_count)
            || !face.has_distinct_corners();
        if broken {
            face.deleted = true;
        }
    }
    let vertices_snapshot: Vec<bool> = store.vertices().iter().map(|v| v.deleted).collect();
    for face in store.faces_mut().iter_mut() {
        if !face.deleted && face.corners().iter().any(|&v| vertices_snapshot[v]) {
            face.deleted = true;
        }
    }

    let mut referenced = vec![false; vertex_count];
    for (_, face) in store.live_faces() {
        for &v in face.corners() {
            referenced[v] = true;
        }
    }

    let mut vertex_map = vec![None; vertex_count];
    let mut vertices: Vec<Vertex> = Vec::with_capacity(vertex_count);
    for (old, vertex) in store.vertices().iter().enumerate() {
        if referenced[old] {
            vertex_map[old] = Some(vertices.len());
            vertices.push(Vertex::new(vertex.position));
        }
    }

    let mut face_map = vec![None; store.face_count()];
    let mut faces: Vec<Face> = Vec::with_capacity(store.face_count());
    for (old, face) in store.faces().iter().enumerate() {
        if face.deleted {
            continue;
        }
        let mut corners: Vec<usize> = Vec::with_capacity(4);
        for &v in face.corners() {
            if let Some(new) = vertex_map[v] {
                if !corners.contains(&new) {
                    corners.push(new);
                }
            }
        }
        if let Some(remapped) = Face::from_corners(&corners) {
            face_map[old] = Some(faces.len());
            faces.push(remapped);
        }
    }

    debug!(
        vertices_before = vertex_count,
        vertices_after = vertices.len(),
        faces_before = store.face_count(),
        faces_after = faces.len(),
        "compacted topology"
    );

    *store.vertices_mut() = vertices;
    *store.faces_mut() = faces;

    RemapTable {
        vertices: vertex_map,
        faces: face_map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;
    use glam::DVec3;

    #[test]
    fn test_compact_drops_tombstoned_face_and_orphans() {
        let mut store = create_cube(1.0).unwrap();
        store.tombstone_face(0);
        let table = compact(&mut store);

        assert_eq!(store.face_count(), 5);
        assert_eq!(table.face(0), None);
        assert_eq!(table.face(1), Some(0));
        // Every cube vertex still belongs to some other face.
        assert_eq!(store.vertex_count(), 8);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_compact_removes_unreferenced_vertices() {
        let mut store = create_cube(1.0).unwrap();
        let orphan = store.add_vertex(DVec3::splat(9.0));
        let table = compact(&mut store);
        assert_eq!(table.vertex(orphan), None);
        assert_eq!(store.vertex_count(), 8);
    }

    #[test]
    fn test_compact_tombstones_faces_with_repeated_corners() {
        let mut store = create_cube(1.0).unwrap();
        let face = store.face_mut(2).unwrap();
        face.indices[1] = face.indices[0];
        compact(&mut store);
        assert_eq!(store.face_count(), 5);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_compact_tombstones_faces_on_deleted_vertices() {
        let mut store = create_cube(1.0).unwrap();
        store.tombstone_vertex(0);
        let table = compact(&mut store);
        assert_eq!(store.face_count(), 3);
        assert_eq!(table.vertex(0), None);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_compact_is_idempotent() {
        let mut store = create_cube(1.0).unwrap();
        store.tombstone_face(3);
        store.add_vertex(DVec3::ONE);
        compact(&mut store);
        let first = store.clone();
        let table = compact(&mut store);
        assert_eq!(store, first);
        assert!(table.vertices.iter().enumerate().all(|(i, m)| *m == Some(i)));
    }
}
