//! # Cylinder and Cone Primitives
//!
//! Capped shapes built from the same ring stack as the capsule.

use super::rings::{add_pole, add_ring, stitch_stack};
use super::{require_positive, require_ring_segments};
use crate::error::EditResult;
use crate::topology::TopologyStore;

/// Creates a capped, Y-aligned cylinder centered at the origin.
///
/// # Example
///
/// ```rust
/// use mesh_modeler::primitives::create_cylinder;
///
/// let store = create_cylinder(8, 0.5, 2.0).unwrap();
/// assert_eq!(store.vertex_count(), 2 + 2 * 8);
/// assert_eq!(store.face_count(), 3 * 8);
/// ```
pub fn create_cylinder(segments: u32, radius: f64, height: f64) -> EditResult<TopologyStore> {
    require_ring_segments(segments)?;
    require_positive("cylinder radius", radius)?;
    require_positive("cylinder height", height)?;

    let h = height / 2.0;
    let mut store = TopologyStore::new();
    let stack = vec![
        add_pole(&mut store, h),
        add_ring(&mut store, h, radius, segments),
        add_ring(&mut store, -h, radius, segments),
        add_pole(&mut store, -h),
    ];
    stitch_stack(&mut store, &stack);
    Ok(store)
}

/// Creates a Y-aligned cone with its apex up, centered at the origin.
///
/// # Example
///
/// ```rust
/// use mesh_modeler::primitives::create_cone;
///
/// let store = create_cone(8, 0.5, 1.0).unwrap();
/// assert_eq!(store.vertex_count(), 2 + 8);
/// assert_eq!(store.face_count(), 2 * 8);
/// ```
pub fn create_cone(segments: u32, radius: f64, height: f64) -> EditResult<TopologyStore> {
    require_ring_segments(segments)?;
    require_positive("cone radius", radius)?;
    require_positive("cone height", height)?;

    let h = height / 2.0;
    let mut store = TopologyStore::new();
    let stack = vec![
        add_pole(&mut store, h),
        add_ring(&mut store, -h, radius, segments),
        add_pole(&mut store, -h),
    ];
    stitch_stack(&mut store, &stack);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_side_is_quads() {
        let store = create_cylinder(6, 1.0, 1.0).unwrap();
        assert_eq!(store.faces().iter().filter(|f| f.is_quad()).count(), 6);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_cylinder_and_cone_face_outward() {
        for store in [
            create_cylinder(10, 1.0, 2.0).unwrap(),
            create_cone(10, 1.0, 2.0).unwrap(),
        ] {
            for (_, face) in store.live_faces() {
                let normal = store.face_normal(face).unwrap();
                assert!(normal.dot(store.face_centroid(face)) > 0.0);
            }
        }
    }

    #[test]
    fn test_invalid_params() {
        assert!(create_cylinder(2, 1.0, 1.0).is_err());
        assert!(create_cone(8, 1.0, 0.0).is_err());
    }
}
