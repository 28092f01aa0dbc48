//! # Face Operations
//!
//! Quad-level edits driven by the selected face:
//! - **extrude_face**: push a quad along its normal, stitching side walls
//! - **subdivide_face**: split a quad into four around its centroid
//! - **cut_face**: split a quad in two across an axis-aligned midline
//! - **delete_face**: tombstone a face
//! - **dissolve_face**: merge a face with its most coplanar neighbor

mod dissolve;
mod extrude;
mod split;


pub use dissolve::{delete_face, dissolve_face, dissolve_neighbor};
pub use extrude::{extrude_face, FaceExtrusion};
pub use split::{cut_face, subdivide_face, CutAxis};

use crate::error::{EditError, EditResult};
use crate::topology::TopologyStore;
use glam::DVec3;

/// Normal of a live face, rejecting degenerate ones.
pub(crate) fn require_normal(store: &TopologyStore, index: usize) -> EditResult<DVec3> {
    let face = store.live_face(index)?;
    store
        .face_normal(face)
        .ok_or_else(|| EditError::degenerate(format!("face {index} has no normal")))
}
