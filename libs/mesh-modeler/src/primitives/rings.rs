//! # Ring Stitching
//!
//! Shared helpers for round primitives. A ring lies in the XZ plane at a
//! fixed height with vertex `j` at angle `2πj / segments`.

use crate::topology::{Face, TopologyStore};
use glam::DVec3;
use std::f64::consts::TAU;

/// Adds a ring of `segments` vertices and returns their indices.
pub fn add_ring(store: &mut TopologyStore, y: f64, radius: f64, segments: u32) -> Vec<usize> {
    (0..segments)
        .map(|j| {
            let theta = TAU * j as f64 / segments as f64;
            store.add_vertex(DVec3::new(radius * theta.cos(), y, radius * theta.sin()))
        })
        .collect()
}

/// Adds a pole, a one-vertex ring on the Y axis.
pub fn add_pole(store: &mut TopologyStore, y: f64) -> Vec<usize> {
    vec![store.add_vertex(DVec3::new(0.0, y, 0.0))]
}

/// Stitches `upper` to the ring directly below it.
///
/// A pole on either side is fanned with triangles; equal-count rings are
/// joined with quads. Mismatched rings are left open.
pub fn stitch_rings(store: &mut TopologyStore, upper: &[usize], lower: &[usize]) {
    match (upper.len(), lower.len()) {
        (1, n) if n >= 3 => {
            let pole = upper[0];
            for j in 0..n {
                let next = (j + 1) % n;
                store.add_face(Face::triangle([pole, lower[next], lower[j]]));
            }
        }
        (n, 1) if n >= 3 => {
            let pole = lower[0];
            for j in 0..n {
                let next = (j + 1) % n;
                store.add_face(Face::triangle([upper[j], upper[next], pole]));
            }
        }
        (n, m) if n == m && n >= 3 => {
            for j in 0..n {
                let next = (j + 1) % n;
                store.add_face(Face::quad([upper[j], upper[next], lower[next], lower[j]]));
            }
        }
        _ => {}
    }
}

/// Stitches every consecutive pair of a top-to-bottom ring stack.
pub fn stitch_stack(store: &mut TopologyStore, rings: &[Vec<usize>]) {
    for pair in rings.windows(2) {
        stitch_rings(store, &pair[0], &pair[1]);
    }
}
