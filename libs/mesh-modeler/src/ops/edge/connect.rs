//! Connectivity edits: dissolve, bridge, merge and split.

use super::{require_edge, traversed_forward};
use crate::error::{EditError, EditResult};
use crate::ops::boundary::{boundary_cycle, fill_cycle};
use crate::topology::{Edge, Face, TopologyStore};
use tracing::debug;

/// Removes `edge` by merging its two adjacent faces into one polygon.
pub fn dissolve_edge(store: &mut TopologyStore, edge: Edge) -> EditResult<Vec<usize>> {
    require_edge(store, edge)?;
    let adjacent = store.faces_with_edge(edge.a, edge.b);
    let &[(first, _), (second, _)] = &adjacent[..] else {
        return Err(EditError::unsatisfiable(format!(
            "edge {}-{} has {} adjacent faces, dissolve needs 2",
            edge.a,
            edge.b,
            adjacent.len()
        )));
    };
    let cycle = boundary_cycle(store, &[first, second])?;

    store.tombstone_face(first);
    store.tombstone_face(second);
    let created = fill_cycle(store, &cycle);

    debug!(a = edge.a, b = edge.b, corners = cycle.len(), "Dissolved edge");
    Ok(created)
}

/// Joins two edges with a quad, pairing endpoints to minimize the total
/// connecting length.
pub fn bridge_edges(store: &mut TopologyStore, first: Edge, second: Edge) -> EditResult<usize> {
    require_edge(store, first)?;
    require_edge(store, second)?;
    if second.touches(first.a) || second.touches(first.b) {
        return Err(EditError::unsatisfiable(
            "bridge needs 4 distinct vertices across both edges",
        ));
    }

    let distance = |i: usize, j: usize| store.position(i).distance(store.position(j));
    let straight = distance(first.a, second.a) + distance(first.b, second.b);
    let crossed = distance(first.a, second.b) + distance(first.b, second.a);
    let (to_a, to_b) = if crossed < straight {
        (second.b, second.a)
    } else {
        (second.a, second.b)
    };

    let quad = if traversed_forward(store, first.a, first.b) {
        [first.b, first.a, to_a, to_b]
    } else {
        [first.a, first.b, to_b, to_a]
    };
    let face = store.add_face(Face::quad(quad));

    debug!(?first, ?second, face, "Bridged edges");
    Ok(face)
}

/// Welds `remove` into `keep`.
///
/// Every face using `remove` is rewritten to `keep`. A quad left with three
/// distinct corners becomes a triangle; a face left with fewer is
/// tombstoned. Returns the number of faces tombstoned.
pub fn merge_vertices(store: &mut TopologyStore, keep: usize, remove: usize) -> EditResult<usize> {
    store.live_vertex(keep)?;
    store.live_vertex(remove)?;
    if keep == remove {
        return Err(EditError::invalid_parameter("cannot merge a vertex into itself"));
    }

    let mut collapsed = 0;
    for index in store.faces_with_vertex(remove) {
        let Some(face) = store.face_mut(index) else {
            continue;
        };
        face.replace_vertex(remove, keep);

        let mut corners: Vec<usize> = Vec::with_capacity(4);
        for &v in face.corners() {
            if !corners.contains(&v) {
                corners.push(v);
            }
        }
        match Face::from_corners(&corners) {
            Some(rebuilt) => *face = rebuilt,
            None => {
                face.deleted = true;
                collapsed += 1;
            }
        }
    }
    store.tombstone_vertex(remove);

    debug!(keep, remove, collapsed, "Merged vertices");
    Ok(collapsed)
}

/// Gives `face` its own copy of `vertex`, detaching it from the other faces
/// that share the vertex. Returns the new vertex.
pub fn split_vertex(store: &mut TopologyStore, vertex: usize, face: usize) -> EditResult<usize> {
    let position = store.live_vertex(vertex)?.position;
    if !store.live_face(face)?.contains(vertex) {
        return Err(EditError::unsatisfiable(format!(
            "face {face} does not use vertex {vertex}"
        )));
    }
    if store.faces_with_vertex(vertex).len() < 2 {
        return Err(EditError::unsatisfiable(format!(
            "vertex {vertex} is used by a single face"
        )));
    }

    let copy = store.add_vertex(position);
    if let Some(target) = store.face_mut(face) {
        target.replace_vertex(vertex, copy);
    }

    debug!(vertex, face, copy, "Split vertex");
    Ok(copy)
}
