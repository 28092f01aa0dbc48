//! # Mesh Operations
//!
//! Topology edits on a [`TopologyStore`](crate::topology::TopologyStore).
//!
//! Every operation validates its inputs before the first write, so an
//! `Err` always leaves the store untouched. Operations append vertices and
//! faces and tombstone what they replace; compaction and selection updates
//! are the session's job.
//!
//! - [`face`]: extrude, subdivide, axis cut, delete, dissolve
//! - [`edge`]: extrude, bevel, loop cut, loop/ring select, dissolve,
//!   bridge, merge, split
//! - [`knife`]: free-form multi-face cutting

pub mod boundary;
pub mod edge;
pub mod face;
pub mod knife;

use crate::error::{EditError, EditResult};
use crate::topology::{Edge, TopologyStore};
use glam::DVec3;

/// Looks up `index` in a freshly derived edge list.
pub fn edge_at(edges: &[Edge], index: usize) -> EditResult<Edge> {
    edges.get(index).copied().ok_or(EditError::InvalidEdge {
        index,
        edge_count: edges.len(),
    })
}

/// Replaces the quad `corners` (in winding order) by two quads split
/// between `m` on side 0-1 and `n` on side 2-3.
///
/// Returns the new face indices `[p0, m, n, p3]` and `[m, p1, p2, n]`.
pub(crate) fn split_quad(store: &mut TopologyStore, corners: [usize; 4], m: usize, n: usize) -> [usize; 2] {
    let [p0, p1, p2, p3] = corners;
    [
        store.add_face(crate::topology::Face::quad([p0, m, n, p3])),
        store.add_face(crate::topology::Face::quad([m, p1, p2, n])),
    ]
}

/// Corners of a quad rotated so that `slot` becomes side 0.
pub(crate) fn rotate_quad(indices: [usize; 4], slot: usize) -> [usize; 4] {
    [
        indices[slot % 4],
        indices[(slot + 1) % 4],
        indices[(slot + 2) % 4],
        indices[(slot + 3) % 4],
    ]
}

/// Normalized direction from `a` to `b`, `None` for zero-length edges.
pub(crate) fn edge_direction(store: &TopologyStore, a: usize, b: usize) -> Option<DVec3> {
    let delta = store.position(b) - store.position(a);
    let length = delta.length();
    (length > config::constants::NORMAL_EPSILON).then(|| delta / length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_quad() {
        assert_eq!(rotate_quad([10, 11, 12, 13], 0), [10, 11, 12, 13]);
        assert_eq!(rotate_quad([10, 11, 12, 13], 3), [13, 10, 11, 12]);
    }

    #[test]
    fn test_edge_at_reports_range() {
        let edges = vec![Edge { a: 0, b: 1 }];
        assert_eq!(edge_at(&edges, 0).unwrap(), Edge { a: 0, b: 1 });
        assert_eq!(
            edge_at(&edges, 3),
            Err(EditError::InvalidEdge {
                index: 3,
                edge_count: 1
            })
        );
    }
}
