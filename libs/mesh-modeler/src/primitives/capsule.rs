//! # Capsule Primitive
//!
//! Pole → upper hemisphere rings → cylinder rings → lower hemisphere rings
//! → pole, stitched ring to ring.

use super::rings::{add_pole, add_ring, stitch_stack};
use super::{require_positive, require_ring_segments, require_segments};
use crate::error::EditResult;
use crate::topology::TopologyStore;
use config::constants::EPSILON;
use std::f64::consts::FRAC_PI_2;

/// Creates a Y-aligned capsule.
///
/// # Arguments
///
/// * `segments` - Vertices per ring
/// * `hemi_rings` - Rings per hemisphere, equator included
/// * `cylinder_rings` - Extra rings between the two equators
/// * `radius` - Hemisphere radius
/// * `height` - Total height, pole to pole
///
/// When `height <= 2 * radius` the cylindrical section vanishes; the two
/// equators then coincide and only one is emitted.
pub fn create_capsule(
    segments: u32,
    hemi_rings: u32,
    cylinder_rings: u32,
    radius: f64,
    height: f64,
) -> EditResult<TopologyStore> {
    require_ring_segments(segments)?;
    require_segments("hemisphere rings", hemi_rings, 1)?;
    require_positive("capsule radius", radius)?;
    require_positive("capsule height", height)?;

    let half_cylinder = (height / 2.0 - radius).max(0.0);
    let has_cylinder = half_cylinder > EPSILON;

    let mut store = TopologyStore::new();
    let mut stack = Vec::new();

    stack.push(add_pole(&mut store, half_cylinder + radius));
    for k in 1..=hemi_rings {
        let phi = FRAC_PI_2 * k as f64 / hemi_rings as f64;
        stack.push(add_ring(
            &mut store,
            half_cylinder + radius * phi.cos(),
            radius * phi.sin(),
            segments,
        ));
    }

    if has_cylinder {
        for c in 1..=cylinder_rings {
            let t = c as f64 / (cylinder_rings + 1) as f64;
            stack.push(add_ring(
                &mut store,
                half_cylinder - 2.0 * half_cylinder * t,
                radius,
                segments,
            ));
        }
    }

    let first_lower = if has_cylinder { hemi_rings } else { hemi_rings - 1 };
    for k in (1..=first_lower).rev() {
        let phi = FRAC_PI_2 * k as f64 / hemi_rings as f64;
        stack.push(add_ring(
            &mut store,
            -half_cylinder - radius * phi.cos(),
            radius * phi.sin(),
            segments,
        ));
    }
    stack.push(add_pole(&mut store, -half_cylinder - radius));

    stitch_stack(&mut store, &stack);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capsule_ring_count() {
        let store = create_capsule(8, 3, 2, 0.5, 2.0).unwrap();
        // 2 poles + (3 upper + 2 cylinder + 3 lower) rings
        assert_eq!(store.vertex_count(), 2 + 8 * 8);
        // 2 fans + 7 quad bands
        assert_eq!(store.face_count(), 2 * 8 + 7 * 8);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_capsule_spans_height() {
        let store = create_capsule(8, 4, 1, 0.5, 3.0).unwrap();
        let (min, max) = store
            .vertices()
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), v| {
                (lo.min(v.position.y), hi.max(v.position.y))
            });
        assert!((max - 1.5).abs() < 1e-12);
        assert!((min + 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_short_capsule_is_a_sphere() {
        let store = create_capsule(8, 3, 4, 1.0, 1.0).unwrap();
        // Single equator, no cylinder rings
        assert_eq!(store.vertex_count(), 2 + 5 * 8);
        for vertex in store.vertices() {
            assert!((vertex.position.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_capsule_normals_point_outward() {
        let store = create_capsule(12, 4, 2, 0.5, 2.0).unwrap();
        for (_, face) in store.live_faces() {
            let normal = store.face_normal(face).unwrap();
            assert!(normal.dot(store.face_centroid(face)) > 0.0);
        }
    }

    #[test]
    fn test_capsule_invalid_params() {
        assert!(create_capsule(8, 0, 1, 0.5, 2.0).is_err());
        assert!(create_capsule(8, 2, 1, 0.0, 2.0).is_err());
    }
}
