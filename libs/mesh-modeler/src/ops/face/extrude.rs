//! Face extrusion.

use super::require_normal;
use crate::error::{EditError, EditResult};
use crate::topology::{Face, TopologyStore};
use config::constants::EPSILON;
use tracing::debug;

/// Faces and vertices created by [`extrude_face`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceExtrusion {
    /// The new cap, wound like the source face
    pub cap: usize,
    /// Side walls, one per source side in winding order
    pub sides: [usize; 4],
    /// Offset copies of the source corners
    pub vertices: [usize; 4],
}

/// Extrudes a quad by `distance` along its normal.
///
/// The source face is tombstoned and replaced by a cap and four side
/// quads, each side joining an old edge to its offset copy. Side walls face
/// outward for positive distances.
pub fn extrude_face(store: &mut TopologyStore, face: usize, distance: f64) -> EditResult<FaceExtrusion> {
    let source = *store.live_quad(face)?;
    if !distance.is_finite() || distance.abs() < EPSILON {
        return Err(EditError::invalid_parameter(format!(
            "extrude distance must be finite and non-zero: {distance}"
        )));
    }
    let normal = require_normal(store, face)?;
    let offset = normal * distance;

    let old = source.indices;
    let vertices = old.map(|v| store.add_vertex(store.position(v) + offset));

    let cap = store.add_face(Face::quad(vertices));
    let sides = [0, 1, 2, 3].map(|i| {
        let j = (i + 1) % 4;
        store.add_face(Face::quad([old[i], old[j], vertices[j], vertices[i]]))
    });
    store.tombstone_face(face);

    debug!(face, cap, distance, "Extruded face");
    Ok(FaceExtrusion { cap, sides, vertices })
}
