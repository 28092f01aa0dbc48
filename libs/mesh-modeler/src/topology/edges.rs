//! # Edge Index
//!
//! Edges are never stored. They are derived on demand from the live faces
//! and deduplicated by their canonical `(min, max)` vertex pair, keeping the
//! first-seen orientation. Any edge index handed to an operation refers to
//! the list most recently returned by [`build_edges`].

use super::TopologyStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unordered vertex pair normalized to `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey(pub usize, pub usize);

impl EdgeKey {
    /// Creates the canonical key of the pair.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// An edge in first-seen face orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    /// Canonical key of this edge.
    #[inline]
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.a, self.b)
    }

    /// Returns true if the edge joins `a` and `b` in either direction.
    #[inline]
    pub fn joins(&self, a: usize, b: usize) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }

    /// Returns true if `vertex` is an endpoint.
    #[inline]
    pub fn touches(&self, vertex: usize) -> bool {
        self.a == vertex || self.b == vertex
    }

    /// The endpoint that is not `vertex`.
    #[inline]
    pub fn other(&self, vertex: usize) -> usize {
        if self.a == vertex {
            self.b
        } else {
            self.a
        }
    }
}

/// Derives the edge list of every live face.
///
/// Sides touching deleted vertices are skipped. Runs in O(total face sides).
pub fn build_edges(store: &TopologyStore) -> Vec<Edge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for (_, face) in store.live_faces() {
        for (a, b) in face.sides() {
            if a == b || !store.is_live_vertex(a) || !store.is_live_vertex(b) {
                continue;
            }
            if seen.insert(EdgeKey::new(a, b)) {
                edges.push(Edge { a, b });
            }
        }
    }

    edges
}

/// Finds the index of the edge joining `a` and `b`.
pub fn find_edge(edges: &[Edge], a: usize, b: usize) -> Option<usize> {
    edges.iter().position(|edge| edge.joins(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;

    #[test]
    fn test_edge_key_is_canonical() {
        assert_eq!(EdgeKey::new(5, 2), EdgeKey(2, 5));
        assert_eq!(EdgeKey::new(2, 5), EdgeKey::new(5, 2));
    }

    #[test]
    fn test_cube_has_twelve_unique_edges() {
        let store = create_cube(1.0).unwrap();
        let edges = build_edges(&store);
        assert_eq!(edges.len(), 12);

        let keys: HashSet<EdgeKey> = edges.iter().map(Edge::key).collect();
        assert_eq!(keys.len(), edges.len());
    }

    #[test]
    fn test_deleted_faces_contribute_no_edges() {
        let mut store = create_cube(1.0).unwrap();
        for face in 0..store.face_count() {
            store.tombstone_face(face);
        }
        assert!(build_edges(&store).is_empty());
    }

    #[test]
    fn test_sides_touching_deleted_vertices_are_skipped() {
        let mut store = create_cube(1.0).unwrap();
        store.tombstone_vertex(0);
        let edges = build_edges(&store);
        assert!(edges.iter().all(|e| !e.touches(0)));
        assert_eq!(edges.len(), 9);
    }

    #[test]
    fn test_find_edge_ignores_direction() {
        let store = create_cube(1.0).unwrap();
        let edges = build_edges(&store);
        let edge = edges[3];
        assert_eq!(find_edge(&edges, edge.b, edge.a), Some(3));
        assert_eq!(find_edge(&edges, 0, 6), None);
    }
}
