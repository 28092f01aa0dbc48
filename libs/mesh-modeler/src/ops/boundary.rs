//! # Boundary Reconstruction
//!
//! Rebuilds the outline of a group of faces so they can be replaced by one
//! polygon. Shared by face and edge dissolve.
//!
//! ## Algorithm
//!
//! 1. Count every side of the group by canonical key; sides seen exactly
//!    once form the boundary.
//! 2. Walk the boundary graph from the first boundary side, keeping its
//!    orientation so the result inherits the group's winding.
//! 3. Accept only a single simple cycle: the walk must close, use every
//!    boundary side, and never revisit a vertex.

use crate::error::{EditError, EditResult};
use crate::topology::{triangle_normal, EdgeKey, TopologyStore};
use std::collections::{HashMap, HashSet};

/// Returns the boundary cycle of `faces` in winding order.
pub fn boundary_cycle(store: &TopologyStore, faces: &[usize]) -> EditResult<Vec<usize>> {
    let mut counts: HashMap<EdgeKey, usize> = HashMap::new();
    let mut sides = Vec::new();
    for &index in faces {
        let face = store.live_face(index)?;
        for (a, b) in face.sides() {
            *counts.entry(EdgeKey::new(a, b)).or_insert(0) += 1;
            sides.push((a, b));
        }
    }

    let boundary: Vec<(usize, usize)> = sides
        .into_iter()
        .filter(|&(a, b)| counts[&EdgeKey::new(a, b)] == 1)
        .collect();
    if boundary.len() < 3 {
        return Err(EditError::unsatisfiable("boundary has fewer than 3 edges"));
    }

    let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(a, b) in &boundary {
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }

    let (start, first) = boundary[0];
    let mut used = HashSet::from([EdgeKey::new(start, first)]);
    let mut cycle = vec![start];
    let mut current = first;

    while current != start {
        if cycle.contains(&current) || cycle.len() > boundary.len() {
            return Err(EditError::unsatisfiable("boundary is not a simple cycle"));
        }
        cycle.push(current);
        let next = adjacency[&current]
            .iter()
            .copied()
            .find(|&n| !used.contains(&EdgeKey::new(current, n)))
            .ok_or_else(|| EditError::unsatisfiable("boundary does not close"))?;
        used.insert(EdgeKey::new(current, next));
        current = next;
    }

    if used.len() != boundary.len() {
        return Err(EditError::unsatisfiable("boundary splits into several loops"));
    }
    if cycle.len() < 3 {
        return Err(EditError::unsatisfiable("boundary has fewer than 3 vertices"));
    }
    Ok(cycle)
}

/// Emits `cycle` as new faces: a triangle or quad when it has 3 or 4
/// corners, otherwise a triangle fan.
///
/// The fan is rooted at the first vertex that yields no zero-area
/// triangle, falling back to the cycle's first vertex.
pub fn fill_cycle(store: &mut TopologyStore, cycle: &[usize]) -> Vec<usize> {
    if cycle.len() <= 4 {
        return store.add_polygon(cycle);
    }

    let n = cycle.len();
    let root = (0..n)
        .find(|&r| {
            (1..n - 1).all(|i| {
                let a = store.position(cycle[r]);
                let b = store.position(cycle[(r + i) % n]);
                let c = store.position(cycle[(r + i + 1) % n]);
                triangle_normal(a, b, c).is_some()
            })
        })
        .unwrap_or(0);

    let rotated: Vec<usize> = (0..n).map(|i| cycle[(root + i) % n]).collect();
    store.add_fan(&rotated)
}
