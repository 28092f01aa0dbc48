//! # Plane Primitive

use super::require_positive;
use crate::error::EditResult;
use crate::topology::{Face, TopologyStore};
use glam::DVec3;

/// Creates a single upward-facing quad in the XZ plane.
///
/// # Example
///
/// ```rust
/// use mesh_modeler::primitives::create_plane;
///
/// let store = create_plane(2.0).unwrap();
/// assert_eq!(store.vertex_count(), 4);
/// assert_eq!(store.face_count(), 1);
/// ```
pub fn create_plane(size: f64) -> EditResult<TopologyStore> {
    require_positive("plane size", size)?;

    let h = size / 2.0;
    let mut store = TopologyStore::with_capacity(4, 1);
    let a = store.add_vertex(DVec3::new(-h, 0.0, -h));
    let b = store.add_vertex(DVec3::new(-h, 0.0, h));
    let c = store.add_vertex(DVec3::new(h, 0.0, h));
    let d = store.add_vertex(DVec3::new(h, 0.0, -h));
    store.add_face(Face::quad([a, b, c, d]));
    Ok(store)
}
