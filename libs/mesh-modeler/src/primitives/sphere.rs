//! # Sphere Primitive
//!
//! Generates a UV sphere using latitude/longitude sampling.

use super::rings::{add_pole, add_ring, stitch_stack};
use super::{require_positive, require_ring_segments, require_segments};
use crate::error::EditResult;
use crate::topology::TopologyStore;
use std::f64::consts::PI;

/// Creates a UV sphere.
///
/// # Arguments
///
/// * `lat_segments` - Latitude bands from pole to pole (at least 2)
/// * `lon_segments` - Vertices per ring (at least 3)
/// * `radius` - Sphere radius
///
/// # Algorithm
///
/// - Poles at `±radius` on the Y axis
/// - Ring `i` (1..lat) at polar angle `φ = π i / lat`
/// - Pole fans at both ends, quads between rings
///
/// # Example
///
/// ```rust
/// use mesh_modeler::primitives::create_sphere;
///
/// let store = create_sphere(4, 8, 1.0).unwrap();
/// assert_eq!(store.vertex_count(), 2 + 3 * 8);
/// assert_eq!(store.face_count(), 4 * 8);
/// ```
pub fn create_sphere(lat_segments: u32, lon_segments: u32, radius: f64) -> EditResult<TopologyStore> {
    require_segments("latitude segments", lat_segments, 2)?;
    require_ring_segments(lon_segments)?;
    require_positive("sphere radius", radius)?;

    let mut store = TopologyStore::with_capacity(
        2 + (lat_segments as usize - 1) * lon_segments as usize,
        (lat_segments * lon_segments) as usize,
    );

    let mut stack = Vec::with_capacity(lat_segments as usize + 1);
    stack.push(add_pole(&mut store, radius));
    for i in 1..lat_segments {
        let phi = PI * i as f64 / lat_segments as f64;
        stack.push(add_ring(
            &mut store,
            radius * phi.cos(),
            radius * phi.sin(),
            lon_segments,
        ));
    }
    stack.push(add_pole(&mut store, -radius));

    stitch_stack(&mut store, &stack);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_on_surface() {
        let radius = 2.5;
        let store = create_sphere(6, 12, radius).unwrap();
        for vertex in store.vertices() {
            assert!((vertex.position.length() - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sphere_quad_grid_between_pole_fans() {
        let store = create_sphere(5, 10, 1.0).unwrap();
        let triangles = store.faces().iter().filter(|f| f.vertex_count == 3).count();
        let quads = store.faces().iter().filter(|f| f.is_quad()).count();
        assert_eq!(triangles, 20);
        assert_eq!(quads, 30);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_sphere_normals_point_outward() {
        let store = create_sphere(6, 12, 1.0).unwrap();
        for (_, face) in store.live_faces() {
            let normal = store.face_normal(face).unwrap();
            assert!(normal.dot(store.face_centroid(face)) > 0.0);
        }
    }

    #[test]
    fn test_sphere_invalid_params() {
        assert!(create_sphere(1, 8, 1.0).is_err());
        assert!(create_sphere(4, 2, 1.0).is_err());
        assert!(create_sphere(4, 8, -1.0).is_err());
    }
}
