//! # Indexed Mesh
//!
//! Triangle mesh handed to exporters and the renderer.
//!
//! All geometry stays f64; conversion to f32 buffers only happens at the
//! renderer boundary.

use crate::error::{EditError, EditResult};
use crate::topology::{triangle_normal, Face, TopologyStore};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and indices.
///
/// # Example
///
/// ```rust
/// use mesh_modeler::export::IndexedMesh;
/// use mesh_modeler::primitives::create_cube;
///
/// let store = create_cube(1.0).unwrap();
/// let mesh = IndexedMesh::from_store(&store);
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedMesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Exports the live faces of `store`.
    ///
    /// Every referenced live vertex becomes one record, in ascending
    /// original index order. Quads emit two triangles split along 0-2.
    pub fn from_store(store: &TopologyStore) -> Self {
        let mut remap: Vec<Option<u32>> = vec![None; store.vertex_count()];
        for (_, face) in store.live_faces() {
            for &v in face.corners() {
                remap[v] = Some(0);
            }
        }

        let mut mesh = Self::with_capacity(store.vertex_count(), store.face_count() * 2);
        for (index, slot) in remap.iter_mut().enumerate() {
            if slot.is_some() {
                *slot = Some(mesh.add_vertex(store.position(index)));
            }
        }

        for (_, face) in store.live_faces() {
            let [a, b, c, d] = face.indices.map(|v| remap[v].unwrap_or_default());
            mesh.add_triangle(a, b, c);
            if face.is_quad() {
                mesh.add_triangle(a, c, d);
            }
        }
        mesh
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Checks that every triangle references three distinct in-range
    /// vertices.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        self.triangles.iter().all(|tri| {
            tri.iter().all(|&i| i < vertex_count) && tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]
        })
    }

    /// Exports vertices as a flattened `[x, y, z, ...]` f32 array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports triangle indices as a flattened u32 array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

impl TopologyStore {
    /// Imports an indexed triangle mesh, one triangle face per record.
    ///
    /// Triangles with repeated indices are skipped; out-of-range indices
    /// are rejected.
    pub fn from_indexed(mesh: &IndexedMesh) -> EditResult<Self> {
        let mut store = TopologyStore::with_capacity(mesh.vertex_count(), mesh.triangle_count());
        for &p in mesh.vertices() {
            store.add_vertex(p);
        }
        for (index, tri) in mesh.triangles().iter().enumerate() {
            let [a, b, c] = tri.map(|i| i as usize);
            if [a, b, c].iter().any(|&i| i >= mesh.vertex_count()) {
                return Err(EditError::InvalidFace { index });
            }
            if a == b || b == c || a == c {
                continue;
            }
            store.add_face(Face::triangle([a, b, c]));
        }
        Ok(store)
    }
}

/// A flat-shaded triangle for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderTriangle {
    pub positions: [DVec3; 3],
    /// Normal of the source face
    pub normal: DVec3,
    /// Source face index
    pub face: usize,
}

/// Fans every live face into triangles (quads as 0-1-2 and 0-2-3), each
/// carrying its face's normal. Degenerate faces fall back to `+Y`.
pub fn render_triangles(store: &TopologyStore) -> Vec<RenderTriangle> {
    let mut triangles = Vec::with_capacity(store.face_count() * 2);
    for (index, face) in store.live_faces() {
        let p = store.face_positions(face);
        let normal = store
            .face_normal(face)
            .or_else(|| (p.len() == 4).then(|| triangle_normal(p[0], p[2], p[3])).flatten())
            .unwrap_or(DVec3::Y);
        triangles.push(RenderTriangle {
            positions: [p[0], p[1], p[2]],
            normal,
            face: index,
        });
        if face.is_quad() {
            triangles.push(RenderTriangle {
                positions: [p[0], p[2], p[3]],
                normal,
                face: index,
            });
        }
    }
    triangles
}

/// Flattens render triangles into interleaved-free f32 position and normal
/// buffers, three vertices per triangle.
pub fn render_buffers(triangles: &[RenderTriangle]) -> (Vec<f32>, Vec<f32>) {
    let mut positions = Vec::with_capacity(triangles.len() * 9);
    let mut normals = Vec::with_capacity(triangles.len() * 9);
    for tri in triangles {
        for p in tri.positions {
            positions.extend([p.x as f32, p.y as f32, p.z as f32]);
            normals.extend([tri.normal.x as f32, tri.normal.y as f32, tri.normal.z as f32]);
        }
    }
    (positions, normals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{create_cube, create_plane};

    #[test]
    fn test_export_skips_tombstones() {
        let mut store = create_cube(1.0).unwrap();
        store.tombstone_face(1);
        let extra = store.add_vertex(DVec3::splat(9.0));
        let mesh = IndexedMesh::from_store(&store);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 10);
        assert!(mesh.validate());
        assert!(!mesh.vertices().contains(&store.position(extra)));
    }

    #[test]
    fn test_export_keeps_vertex_order() {
        let mut store = create_plane(2.0).unwrap();
        store.tombstone_face(0);
        let a = store.add_vertex(DVec3::new(5.0, 0.0, 0.0));
        store.add_face(Face::triangle([3, a, 1]));
        let mesh = IndexedMesh::from_store(&store);
        assert_eq!(mesh.vertices(), &[store.position(1), store.position(3), store.position(a)]);
        assert_eq!(mesh.triangles(), &[[1, 2, 0]]);
    }

    #[test]
    fn test_flat_buffers() {
        let mesh = IndexedMesh::from_store(&create_cube(2.0).unwrap());
        assert_eq!(mesh.vertices_f32().len(), 24);
        assert_eq!(mesh.indices_u32().len(), 36);
    }

    #[test]
    fn test_import_rejects_out_of_range() {
        let mut mesh = IndexedMesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.validate());
        assert!(TopologyStore::from_indexed(&mesh).is_err());
    }

    #[test]
    fn test_render_triangles_carry_face_normals() {
        let store = create_cube(1.0).unwrap();
        let triangles = render_triangles(&store);
        assert_eq!(triangles.len(), 12);
        for tri in &triangles {
            let expected = store.face_normal(&store.faces()[tri.face]).unwrap();
            assert_eq!(tri.normal, expected);
        }
        let (positions, normals) = render_buffers(&triangles);
        assert_eq!(positions.len(), 12 * 9);
        assert_eq!(normals.len(), positions.len());
    }
}
