//! Edge extrusion.

use super::{require_edge, traversed_forward};
use crate::error::{EditError, EditResult};
use crate::topology::{Edge, Face, TopologyStore};
use config::constants::{EPSILON, NORMAL_EPSILON};
use glam::DVec3;
use tracing::debug;

/// Result of [`extrude_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeExtrusion {
    /// The connecting quad
    pub face: usize,
    /// The offset copy of the source edge
    pub outer: Edge,
}

/// Averaged normal of the live faces around `a`-`b`, `+Y` when there is
/// none or it cancels out.
pub(crate) fn edge_normal(store: &TopologyStore, a: usize, b: usize) -> DVec3 {
    let sum: DVec3 = store
        .faces_with_edge(a, b)
        .into_iter()
        .map(|(face, _)| {
            let [i, j, k, _] = store.faces()[face].indices;
            let (p0, p1, p2) = (store.position(i), store.position(j), store.position(k));
            (p1 - p0).cross(p2 - p0)
        })
        .sum();
    if sum.length() > NORMAL_EPSILON {
        sum.normalize()
    } else {
        DVec3::Y
    }
}

/// Offsets both endpoints of `edge` along the averaged adjacent normal and
/// joins old and new edges with a quad.
///
/// The quad walks the source edge opposite to its existing face so the
/// result stays consistently wound.
pub fn extrude_edge(store: &mut TopologyStore, edge: Edge, distance: f64) -> EditResult<EdgeExtrusion> {
    require_edge(store, edge)?;
    if !distance.is_finite() || distance.abs() < EPSILON {
        return Err(EditError::invalid_parameter(format!(
            "extrude distance must be finite and non-zero: {distance}"
        )));
    }

    let Edge { a, b } = edge;
    let offset = edge_normal(store, a, b) * distance;
    let a2 = store.add_vertex(store.position(a) + offset);
    let b2 = store.add_vertex(store.position(b) + offset);

    let quad = if traversed_forward(store, a, b) {
        [b, a, a2, b2]
    } else {
        [a, b, b2, a2]
    };
    let face = store.add_face(Face::quad(quad));

    debug!(a, b, face, distance, "Extruded edge");
    Ok(EdgeExtrusion {
        face,
        outer: Edge { a: a2, b: b2 },
    })
}
