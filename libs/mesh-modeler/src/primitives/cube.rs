//! # Cube Primitive
//!
//! Generates an axis-aligned cube of quads centered at the origin.

use super::require_positive;
use crate::error::EditResult;
use crate::topology::{Face, TopologyStore};
use glam::DVec3;

/// Creates a cube with edge length `size`.
///
/// # Returns
///
/// A store with 8 vertices and 6 quads. Face order is bottom, top, front
/// (+Z), back (-Z), left (-X), right (+X).
///
/// # Example
///
/// ```rust
/// use mesh_modeler::primitives::create_cube;
///
/// let store = create_cube(1.0).unwrap();
/// assert_eq!(store.vertex_count(), 8);
/// assert_eq!(store.face_count(), 6);
/// ```
pub fn create_cube(size: f64) -> EditResult<TopologyStore> {
    require_positive("cube size", size)?;

    let h = size / 2.0;
    let mut store = TopologyStore::with_capacity(8, 6);

    // Bottom ring (y = -h)
    let v0 = store.add_vertex(DVec3::new(-h, -h, -h));
    let v1 = store.add_vertex(DVec3::new(h, -h, -h));
    let v2 = store.add_vertex(DVec3::new(h, -h, h));
    let v3 = store.add_vertex(DVec3::new(-h, -h, h));

    // Top ring (y = +h)
    let v4 = store.add_vertex(DVec3::new(-h, h, -h));
    let v5 = store.add_vertex(DVec3::new(h, h, -h));
    let v6 = store.add_vertex(DVec3::new(h, h, h));
    let v7 = store.add_vertex(DVec3::new(-h, h, h));

    // Counter-clockwise seen from outside
    store.add_face(Face::quad([v0, v1, v2, v3])); // bottom
    store.add_face(Face::quad([v4, v7, v6, v5])); // top
    store.add_face(Face::quad([v3, v2, v6, v7])); // front
    store.add_face(Face::quad([v1, v0, v4, v5])); // back
    store.add_face(Face::quad([v0, v3, v7, v4])); // left
    store.add_face(Face::quad([v2, v1, v5, v6])); // right

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_counts() {
        let store = create_cube(1.0).unwrap();
        assert_eq!(store.vertex_count(), 8);
        assert_eq!(store.face_count(), 6);
        assert!(store.faces().iter().all(Face::is_quad));
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let store = create_cube(2.0).unwrap();
        for (_, face) in store.live_faces() {
            let normal = store.face_normal(face).unwrap();
            let centroid = store.face_centroid(face);
            assert_relative_eq!(normal.dot(centroid), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cube_top_face_is_index_one() {
        let store = create_cube(1.0).unwrap();
        let top = store.faces()[1];
        assert!(top.corners().iter().all(|&v| store.position(v).y == 0.5));
    }

    #[test]
    fn test_cube_invalid_size() {
        assert!(create_cube(0.0).is_err());
        assert!(create_cube(-1.0).is_err());
        assert!(create_cube(f64::NAN).is_err());
    }
}
