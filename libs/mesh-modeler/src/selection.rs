//! # Selection State
//!
//! Selected and hovered elements plus the operand slots of two-element
//! tools. Edge indices refer to the most recently derived edge list.
//!
//! Compaction invalidates positional state: [`SelectionState::remap`] maps
//! every face, vertex and edge reference through the [`RemapTable`] and
//! drops what no longer resolves. Loop and ring sets are cleared outright.

use crate::topology::{find_edge, Edge, RemapTable};
use serde::{Deserialize, Serialize};

/// Which element kind picking and hover operate on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    Face,
    Edge,
    Vertex,
}

/// Every index the session holds into the topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_face: Option<usize>,
    pub hovered_face: Option<usize>,
    pub selected_edge: Option<usize>,
    pub hovered_edge: Option<usize>,
    pub selected_vertex: Option<usize>,
    pub hovered_vertex: Option<usize>,
    /// Additive face selection
    pub face_selection: Vec<usize>,
    /// Additive vertex selection
    pub vertex_selection: Vec<usize>,
    /// Edges collected by loop select
    pub loop_edges: Vec<usize>,
    /// Edges collected by ring select
    pub ring_edges: Vec<usize>,
    /// Bridge operands A and B
    pub bridge_edges: [Option<usize>; 2],
    pub merge_keep: Option<usize>,
    pub merge_remove: Option<usize>,
}

impl SelectionState {
    /// Clears everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Clears the hover slots.
    pub fn clear_hover(&mut self) {
        self.hovered_face = None;
        self.hovered_edge = None;
        self.hovered_vertex = None;
    }

    /// Selects a single face, dropping edge and vertex picks.
    pub fn select_face(&mut self, face: usize) {
        self.selected_face = Some(face);
        self.selected_edge = None;
        self.selected_vertex = None;
    }

    /// Selects a single edge, dropping face and vertex picks.
    pub fn select_edge(&mut self, edge: usize) {
        self.selected_edge = Some(edge);
        self.selected_face = None;
        self.selected_vertex = None;
    }

    /// Selects a single vertex, dropping face and edge picks.
    pub fn select_vertex(&mut self, vertex: usize) {
        self.selected_vertex = Some(vertex);
        self.selected_face = None;
        self.selected_edge = None;
    }

    /// Loop edges, ring edges and the selected edge, deduplicated in that
    /// order.
    pub fn active_edges(&self) -> Vec<usize> {
        let mut active: Vec<usize> = Vec::new();
        let candidates = self
            .loop_edges
            .iter()
            .chain(self.ring_edges.iter())
            .chain(self.selected_edge.iter());
        for &edge in candidates {
            if !active.contains(&edge) {
                active.push(edge);
            }
        }
        active
    }

    /// Maps every reference through a compaction.
    ///
    /// `old_edges` and `new_edges` are the edge lists derived immediately
    /// before and after the compaction.
    pub fn remap(&mut self, table: &RemapTable, old_edges: &[Edge], new_edges: &[Edge]) {
        let edge = |index: Option<usize>| -> Option<usize> {
            let old = old_edges.get(index?)?;
            let a = table.vertex(old.a)?;
            let b = table.vertex(old.b)?;
            find_edge(new_edges, a, b)
        };

        self.selected_face = self.selected_face.and_then(|f| table.face(f));
        self.hovered_face = self.hovered_face.and_then(|f| table.face(f));
        self.selected_vertex = self.selected_vertex.and_then(|v| table.vertex(v));
        self.hovered_vertex = self.hovered_vertex.and_then(|v| table.vertex(v));
        self.selected_edge = edge(self.selected_edge);
        self.hovered_edge = edge(self.hovered_edge);
        self.bridge_edges = [edge(self.bridge_edges[0]), edge(self.bridge_edges[1])];
        self.merge_keep = self.merge_keep.and_then(|v| table.vertex(v));
        self.merge_remove = self.merge_remove.and_then(|v| table.vertex(v));

        self.face_selection = self
            .face_selection
            .iter()
            .filter_map(|&f| table.face(f))
            .collect();
        self.vertex_selection = self
            .vertex_selection
            .iter()
            .filter_map(|&v| table.vertex(v))
            .collect();

        self.loop_edges.clear();
        self.ring_edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;
    use crate::topology::compact;

    #[test]
    fn test_active_edges_deduplicates() {
        let selection = SelectionState {
            loop_edges: vec![1, 4],
            ring_edges: vec![4, 7],
            selected_edge: Some(1),
            ..Default::default()
        };
        assert_eq!(selection.active_edges(), vec![1, 4, 7]);
    }

    #[test]
    fn test_remap_follows_compaction() {
        let mut store = create_cube(1.0).unwrap();
        let old_edges = store.build_edges();
        let picked = old_edges[5];

        let mut selection = SelectionState {
            selected_face: Some(4),
            hovered_face: Some(0),
            selected_edge: Some(5),
            selected_vertex: Some(7),
            loop_edges: vec![1, 2],
            face_selection: vec![0, 4],
            ..Default::default()
        };

        store.tombstone_face(0);
        let table = compact(&mut store);
        let new_edges = store.build_edges();
        selection.remap(&table, &old_edges, &new_edges);

        assert_eq!(selection.selected_face, Some(3));
        assert_eq!(selection.hovered_face, None);
        assert_eq!(selection.face_selection, vec![3]);
        assert_eq!(selection.selected_vertex, table.vertex(7));
        let edge = new_edges[selection.selected_edge.unwrap()];
        assert!(edge.joins(table.vertex(picked.a).unwrap(), table.vertex(picked.b).unwrap()));
        assert!(selection.loop_edges.is_empty());
    }
}
