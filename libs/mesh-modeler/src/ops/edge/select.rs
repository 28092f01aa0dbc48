//! Loop and ring selection.
//!
//! Both are breadth-first walks over quad adjacency returning indices into
//! the edge list they were given. Branches and merges are followed; the
//! visited sets keep every state to a single expansion.

use crate::error::EditResult;
use crate::ops::edge_at;
use crate::topology::{find_edge, Edge, EdgeKey, TopologyStore};
use std::collections::{HashSet, VecDeque};

/// Collects the edges reached from `seed` by repeatedly crossing quads to
/// their opposite side. The seed is included.
pub fn select_loop(store: &TopologyStore, edges: &[Edge], seed: usize) -> EditResult<Vec<usize>> {
    let start = edge_at(edges, seed)?;

    let mut visited: HashSet<EdgeKey> = HashSet::from([start.key()]);
    let mut queue = VecDeque::from([start]);
    let mut selected = Vec::new();

    while let Some(edge) = queue.pop_front() {
        if let Some(index) = find_edge(edges, edge.a, edge.b) {
            selected.push(index);
        }
        for (face, slot) in store.faces_with_edge(edge.a, edge.b) {
            let face = store.faces()[face];
            if !face.is_quad() {
                continue;
            }
            let (a, b) = face.side(slot + 2);
            if visited.insert(EdgeKey::new(a, b)) {
                queue.push_back(Edge { a, b });
            }
        }
    }
    Ok(selected)
}

/// Collects the sides perpendicular to `seed` in every quad of the strip
/// running across it. The seed itself is not included.
pub fn select_ring(store: &TopologyStore, edges: &[Edge], seed: usize) -> EditResult<Vec<usize>> {
    let start = edge_at(edges, seed)?;

    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut queue: VecDeque<(usize, usize)> = store.faces_with_edge(start.a, start.b).into_iter().collect();
    let mut seen_edges: HashSet<EdgeKey> = HashSet::new();
    let mut selected = Vec::new();

    while let Some((index, slot)) = queue.pop_front() {
        if !visited.insert((index, slot)) {
            continue;
        }
        let face = store.faces()[index];
        if !face.is_quad() {
            continue;
        }

        for side in [slot + 1, slot + 3] {
            let (a, b) = face.side(side);
            if seen_edges.insert(EdgeKey::new(a, b)) {
                if let Some(found) = find_edge(edges, a, b) {
                    selected.push(found);
                }
            }
        }

        let (a, b) = face.side(slot + 2);
        for (next, next_slot) in store.faces_with_edge(a, b) {
            if next != index {
                queue.push_back((next, next_slot));
            }
        }
    }
    Ok(selected)
}
