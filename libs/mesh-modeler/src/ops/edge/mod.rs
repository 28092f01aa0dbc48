//! # Edge Operations
//!
//! Edits seeded by an edge of the derived edge list.
//!
//! Operations take the edge by its endpoints so batched tools can resolve
//! their indices once and keep applying them while the topology grows.
//! Callers re-derive the edge list afterwards to reselect by endpoints.
//!
//! - **extrude_edge**: pull a wall out of an edge
//! - **bevel_edge**: replace an edge by offset quad strips
//! - **loop_cut**: split every quad crossed by the edge's loop
//! - **select_loop** / **select_ring**: breadth-first quad walks
//! - **dissolve_edge**, **bridge_edges**, **merge_vertices**,
//!   **split_vertex**: connectivity edits

mod bevel;
mod connect;
mod extrude;
mod loop_cut;
mod select;


pub use bevel::{bevel_edge, miter_factor, EdgeBevel};
pub use connect::{bridge_edges, dissolve_edge, merge_vertices, split_vertex};
pub use extrude::{extrude_edge, EdgeExtrusion};
pub use loop_cut::{loop_cut, LoopCut};
pub use select::{select_loop, select_ring};

use crate::error::{EditError, EditResult};
use crate::ops::edge_direction;
use crate::topology::{Edge, TopologyStore};
use glam::DVec3;

/// Checks that `edge` joins two distinct live vertices and returns its
/// unit direction.
pub(crate) fn require_edge(store: &TopologyStore, edge: Edge) -> EditResult<DVec3> {
    store.live_vertex(edge.a)?;
    store.live_vertex(edge.b)?;
    if edge.a == edge.b {
        return Err(EditError::degenerate(format!("edge {}-{} is a point", edge.a, edge.b)));
    }
    edge_direction(store, edge.a, edge.b)
        .ok_or_else(|| EditError::degenerate(format!("edge {}-{} has zero length", edge.a, edge.b)))
}

/// Returns true if some live face walks the edge from `a` to `b`.
pub(crate) fn traversed_forward(store: &TopologyStore, a: usize, b: usize) -> bool {
    store
        .faces_with_edge(a, b)
        .into_iter()
        .any(|(face, slot)| store.faces()[face].side(slot) == (a, b))
}
