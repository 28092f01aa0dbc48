//! Subdivision and axis cuts.

use crate::error::EditResult;
use crate::ops::{rotate_quad, split_quad};
use crate::topology::{Face, TopologyStore};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Local axis a cut runs across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutAxis {
    /// Halve the face's extent along X
    X,
    /// Halve the face's extent along Z
    Z,
}

impl CutAxis {
    fn direction(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Z => DVec3::Z,
        }
    }
}

/// Splits a quad into four quads meeting at its centroid.
///
/// Each new quad keeps one original corner, the midpoints of its two
/// adjacent sides and the centroid, wound like the original.
pub fn subdivide_face(store: &mut TopologyStore, face: usize) -> EditResult<[usize; 4]> {
    let source = *store.live_quad(face)?;
    let c = source.indices;

    let midpoints = [0, 1, 2, 3].map(|i| {
        let mid = (store.position(c[i]) + store.position(c[(i + 1) % 4])) * 0.5;
        store.add_vertex(mid)
    });
    let center = store.add_vertex(store.face_centroid(&source));

    let created = [0, 1, 2, 3].map(|i| {
        store.add_face(Face::quad([c[i], midpoints[i], center, midpoints[(i + 3) % 4]]))
    });
    store.tombstone_face(face);

    debug!(face, ?created, "Subdivided face");
    Ok(created)
}

/// Splits a quad into two quads through the midpoints of the opposite
/// side pair that runs most closely along `axis`.
pub fn cut_face(store: &mut TopologyStore, face: usize, axis: CutAxis) -> EditResult<[usize; 2]> {
    let source = *store.live_quad(face)?;
    let axis_dir = axis.direction();

    let alignment = |slot: usize| -> f64 {
        let (a, b) = source.side(slot);
        let (c, d) = source.side(slot + 2);
        let first = (store.position(b) - store.position(a)).normalize_or_zero();
        let second = (store.position(d) - store.position(c)).normalize_or_zero();
        first.dot(axis_dir).abs() + second.dot(axis_dir).abs()
    };
    let slot = if alignment(1) > alignment(0) { 1 } else { 0 };

    let corners = rotate_quad(source.indices, slot);
    let [p0, p1, p2, p3] = corners;
    let m = store.add_vertex((store.position(p0) + store.position(p1)) * 0.5);
    let n = store.add_vertex((store.position(p2) + store.position(p3)) * 0.5);
    let created = split_quad(store, corners, m, n);
    store.tombstone_face(face);

    debug!(face, ?axis, ?created, "Cut face");
    Ok(created)
}
