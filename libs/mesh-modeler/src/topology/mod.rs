//! # Topology Store
//!
//! Arena of vertices and faces with tombstone flags.
//!
//! Vertices and faces are only ever appended; deletion sets the `deleted`
//! flag and leaves the slot in place so every index held by an in-flight
//! operation stays valid. [`compact`] is the only routine that physically
//! removes slots, producing a [`RemapTable`] for every dependent index.
//!
//! Faces are triangles or quads. A triangle stores its third index twice
//! so all faces share the `[usize; 4]` layout.

pub mod compact;
pub mod edges;


pub use compact::{compact, RemapTable};
pub use edges::{build_edges, find_edge, Edge, EdgeKey};

use crate::error::{EditError, EditResult};
use config::constants::NORMAL_EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Local-space position
    pub position: DVec3,
    /// Tombstone flag, cleared only by compaction
    pub deleted: bool,
}

impl Vertex {
    /// Creates a live vertex.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            deleted: false,
        }
    }
}

/// A triangle or quad face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Corner vertex indices; slot 3 repeats slot 2 for triangles
    pub indices: [usize; 4],
    /// 3 or 4
    pub vertex_count: usize,
    /// Tombstone flag, cleared only by compaction
    pub deleted: bool,
}

impl Face {
    /// Creates a live quad.
    pub fn quad(indices: [usize; 4]) -> Self {
        Self {
            indices,
            vertex_count: 4,
            deleted: false,
        }
    }

    /// Creates a live triangle.
    pub fn triangle(indices: [usize; 3]) -> Self {
        Self {
            indices: [indices[0], indices[1], indices[2], indices[2]],
            vertex_count: 3,
            deleted: false,
        }
    }

    /// Creates a face from 3 or 4 corners.
    pub fn from_corners(corners: &[usize]) -> Option<Self> {
        match *corners {
            [a, b, c] => Some(Self::triangle([a, b, c])),
            [a, b, c, d] => Some(Self::quad([a, b, c, d])),
            _ => None,
        }
    }

    /// Returns the live corner indices.
    #[inline]
    pub fn corners(&self) -> &[usize] {
        &self.indices[..self.vertex_count]
    }

    /// Returns true for four-vertex faces.
    #[inline]
    pub fn is_quad(&self) -> bool {
        self.vertex_count == 4
    }

    /// Returns the side starting at `slot`, as `(corner[slot], corner[slot + 1])`.
    #[inline]
    pub fn side(&self, slot: usize) -> (usize, usize) {
        let n = self.vertex_count;
        (self.indices[slot % n], self.indices[(slot + 1) % n])
    }

    /// Iterates the face's sides in winding order.
    pub fn sides(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.vertex_count).map(move |slot| self.side(slot))
    }

    /// Returns true if `vertex` is one of the corners.
    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.corners().contains(&vertex)
    }

    /// Returns the slot of the side joining `a` and `b` in either direction.
    pub fn slot_of_edge(&self, a: usize, b: usize) -> Option<usize> {
        (0..self.vertex_count).find(|&slot| {
            let (p, q) = self.side(slot);
            (p == a && q == b) || (p == b && q == a)
        })
    }

    /// Returns true if no corner repeats.
    pub fn has_distinct_corners(&self) -> bool {
        let corners = self.corners();
        (0..corners.len()).all(|i| !corners[i + 1..].contains(&corners[i]))
    }

    /// Rewrites every occurrence of `from` to `to`.
    pub(crate) fn replace_vertex(&mut self, from: usize, to: usize) {
        for index in &mut self.indices {
            if *index == from {
                *index = to;
            }
        }
    }
}

/// Normal of the triangle `(p0, p1, p2)`, or `None` when degenerate.
pub fn triangle_normal(p0: DVec3, p1: DVec3, p2: DVec3) -> Option<DVec3> {
    let cross = (p1 - p0).cross(p2 - p0);
    let length = cross.length();
    if length.is_finite() && length > NORMAL_EPSILON {
        Some(cross / length)
    } else {
        None
    }
}

/// Vertex and face arena owned by one editing session.
///
/// # Example
///
/// ```rust
/// use mesh_modeler::topology::{Face, TopologyStore};
/// use glam::DVec3;
///
/// let mut store = TopologyStore::new();
/// let a = store.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = store.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = store.add_vertex(DVec3::new(0.0, 0.0, 1.0));
/// store.add_face(Face::triangle([a, c, b]));
/// assert_eq!(store.build_edges().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyStore {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl TopologyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Builds a store from raw arrays, validating every face.
    pub fn from_parts(positions: Vec<DVec3>, faces: Vec<Face>) -> EditResult<Self> {
        let store = Self {
            vertices: positions.into_iter().map(Vertex::new).collect(),
            faces,
        };
        store.validate()?;
        Ok(store)
    }

    /// Returns every vertex slot, including tombstones.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns every face slot, including tombstones.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of vertex slots.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of face slots.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of non-deleted vertices.
    pub fn live_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| !v.deleted).count()
    }

    /// Number of non-deleted faces.
    pub fn live_face_count(&self) -> usize {
        self.faces.iter().filter(|f| !f.deleted).count()
    }

    /// Returns true if the store holds no live face.
    pub fn is_empty(&self) -> bool {
        self.live_face_count() == 0
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> usize {
        self.vertices.push(Vertex::new(position));
        self.vertices.len() - 1
    }

    /// Appends a face and returns its index.
    pub fn add_face(&mut self, face: Face) -> usize {
        self.faces.push(face);
        self.faces.len() - 1
    }

    /// Appends a polygon, emitting a single face for 3 or 4 corners and a
    /// triangle fan from the first corner otherwise. Returns the new face
    /// indices.
    pub fn add_polygon(&mut self, corners: &[usize]) -> Vec<usize> {
        if let Some(face) = Face::from_corners(corners) {
            return vec![self.add_face(face)];
        }
        self.add_fan(corners)
    }

    /// Appends a triangle fan over `corners` rooted at the first corner.
    pub fn add_fan(&mut self, corners: &[usize]) -> Vec<usize> {
        if corners.len() < 3 {
            return Vec::new();
        }
        (1..corners.len() - 1)
            .map(|i| self.add_face(Face::triangle([corners[0], corners[i], corners[i + 1]])))
            .collect()
    }

    /// Marks a face deleted.
    pub fn tombstone_face(&mut self, index: usize) {
        if let Some(face) = self.faces.get_mut(index) {
            face.deleted = true;
        }
    }

    /// Marks a vertex deleted.
    pub fn tombstone_vertex(&mut self, index: usize) {
        if let Some(vertex) = self.vertices.get_mut(index) {
            vertex.deleted = true;
        }
    }

    /// Returns true if `index` names a non-deleted vertex.
    #[inline]
    pub fn is_live_vertex(&self, index: usize) -> bool {
        self.vertices.get(index).is_some_and(|v| !v.deleted)
    }

    /// Returns the live vertex at `index`.
    pub fn live_vertex(&self, index: usize) -> EditResult<&Vertex> {
        self.vertices
            .get(index)
            .filter(|v| !v.deleted)
            .ok_or(EditError::InvalidVertex { index })
    }

    /// Returns the live face at `index`.
    pub fn live_face(&self, index: usize) -> EditResult<&Face> {
        self.faces
            .get(index)
            .filter(|f| !f.deleted)
            .ok_or(EditError::InvalidFace { index })
    }

    /// Returns the live quad at `index`.
    pub fn live_quad(&self, index: usize) -> EditResult<&Face> {
        let face = self.live_face(index)?;
        if !face.is_quad() {
            return Err(EditError::NotQuad {
                face: index,
                vertex_count: face.vertex_count,
            });
        }
        Ok(face)
    }

    /// Iterates live faces with their indices.
    pub fn live_faces(&self) -> impl Iterator<Item = (usize, &Face)> + '_ {
        self.faces.iter().enumerate().filter(|(_, f)| !f.deleted)
    }

    /// Position of the vertex at `index`.
    ///
    /// Callers pass indices taken from live faces or validated beforehand.
    #[inline]
    pub fn position(&self, index: usize) -> DVec3 {
        self.vertices[index].position
    }

    /// Moves a vertex.
    pub(crate) fn set_position(&mut self, index: usize, position: DVec3) {
        if let Some(vertex) = self.vertices.get_mut(index) {
            vertex.position = position;
        }
    }

    /// Mutable access to a face slot.
    pub(crate) fn face_mut(&mut self, index: usize) -> Option<&mut Face> {
        self.faces.get_mut(index)
    }

    /// Corner positions of a face in winding order.
    pub fn face_positions(&self, face: &Face) -> Vec<DVec3> {
        face.corners().iter().map(|&i| self.position(i)).collect()
    }

    /// Normal from the face's first three corners, `None` when degenerate.
    pub fn face_normal(&self, face: &Face) -> Option<DVec3> {
        let [a, b, c, _] = face.indices;
        triangle_normal(self.position(a), self.position(b), self.position(c))
    }

    /// Average of the face's corner positions.
    pub fn face_centroid(&self, face: &Face) -> DVec3 {
        let corners = face.corners();
        let sum: DVec3 = corners.iter().map(|&i| self.position(i)).sum();
        sum / corners.len() as f64
    }

    /// Surface area of a face (quads split along 0-2).
    pub fn face_area(&self, face: &Face) -> f64 {
        let p = self.face_positions(face);
        let mut area = 0.5 * (p[1] - p[0]).cross(p[2] - p[0]).length();
        if face.is_quad() {
            area += 0.5 * (p[2] - p[0]).cross(p[3] - p[0]).length();
        }
        area
    }

    /// Live faces having `a`-`b` as a side, with the side's slot.
    pub fn faces_with_edge(&self, a: usize, b: usize) -> Vec<(usize, usize)> {
        self.live_faces()
            .filter_map(|(index, face)| face.slot_of_edge(a, b).map(|slot| (index, slot)))
            .collect()
    }

    /// Live faces using `vertex` as a corner.
    pub fn faces_with_vertex(&self, vertex: usize) -> Vec<usize> {
        self.live_faces()
            .filter(|(_, face)| face.contains(vertex))
            .map(|(index, _)| index)
            .collect()
    }

    /// Derives the deduplicated edge list of the live faces.
    pub fn build_edges(&self) -> Vec<Edge> {
        build_edges(self)
    }

    /// Checks the store invariants.
    ///
    /// Checks:
    /// - Every face has 3 or 4 corners
    /// - Every live face references in-range, live vertices
    /// - No corner repeats within a live face
    pub fn validate(&self) -> EditResult<()> {
        for (index, face) in self.faces.iter().enumerate() {
            if face.vertex_count != 3 && face.vertex_count != 4 {
                return Err(EditError::InvalidFace { index });
            }
            if face.deleted {
                continue;
            }
            if face.corners().iter().any(|&v| !self.is_live_vertex(v)) {
                return Err(EditError::InvalidFace { index });
            }
            if !face.has_distinct_corners() {
                return Err(EditError::InvalidFace { index });
            }
        }
        Ok(())
    }

    pub(crate) fn faces_mut(&mut self) -> &mut Vec<Face> {
        &mut self.faces
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
        &mut self.vertices
    }
}
