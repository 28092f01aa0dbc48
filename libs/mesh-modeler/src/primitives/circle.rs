//! # Circle Primitive
//!
//! A flat disc: a center pole fanned to one ring.

use super::rings::{add_pole, add_ring, stitch_rings};
use super::{require_positive, require_ring_segments};
use crate::error::EditResult;
use crate::topology::TopologyStore;

/// Creates an upward-facing disc of `segments` triangles.
///
/// # Example
///
/// ```rust
/// use mesh_modeler::primitives::create_circle;
///
/// let store = create_circle(12, 1.0).unwrap();
/// assert_eq!(store.vertex_count(), 13);
/// assert_eq!(store.face_count(), 12);
/// ```
pub fn create_circle(segments: u32, radius: f64) -> EditResult<TopologyStore> {
    require_ring_segments(segments)?;
    require_positive("circle radius", radius)?;

    let mut store = TopologyStore::with_capacity(segments as usize + 1, segments as usize);
    let center = add_pole(&mut store, 0.0);
    let ring = add_ring(&mut store, 0.0, radius, segments);
    stitch_rings(&mut store, &center, &ring);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_circle_faces_up() {
        let store = create_circle(8, 1.0).unwrap();
        for (_, face) in store.live_faces() {
            let normal = store.face_normal(face).unwrap();
            assert!((normal - DVec3::Y).length() < 1e-9);
        }
    }

    #[test]
    fn test_circle_is_all_triangles() {
        let store = create_circle(5, 2.0).unwrap();
        assert!(store.faces().iter().all(|f| f.vertex_count == 3));
    }

    #[test]
    fn test_circle_invalid_params() {
        assert!(create_circle(2, 1.0).is_err());
        assert!(create_circle(8, 0.0).is_err());
    }
}
