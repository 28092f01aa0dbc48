//! Per-face stroke crossings.
//!
//! Each face is tested in its own plane: a 2D basis is built from its first
//! three corners, the stroke and the face's sides are projected into it,
//! and every side is intersected with the stroke segment.

use crate::topology::{Face, TopologyStore};
use config::constants::{EPSILON, KNIFE_ENDPOINT_EPSILON};
use glam::{DVec2, DVec3};

/// Slack on both segment parameters before clamping.
const PARAM_TOLERANCE: f64 = 1e-9;

/// Where the stroke crosses one side of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Side slot in the face's winding
    pub slot: usize,
    /// Parameter along the side, from its first corner
    pub edge_t: f64,
    /// Parameter along the stroke
    pub stroke_t: f64,
}

/// A face the stroke crosses on two distinct sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCut {
    pub face: usize,
    /// Crossing nearer the stroke start
    pub entry: Crossing,
    /// Crossing nearer the stroke end
    pub exit: Crossing,
    /// Summed distance of the stroke endpoints from the face plane
    pub offset: f64,
}

/// Orthonormal in-plane basis of a face.
struct FaceBasis {
    origin: DVec3,
    normal: DVec3,
    u: DVec3,
    v: DVec3,
}

impl FaceBasis {
    fn new(store: &TopologyStore, face: &Face) -> Option<Self> {
        let normal = store.face_normal(face)?;
        let origin = store.position(face.indices[0]);
        let u = (store.position(face.indices[1]) - origin).try_normalize()?;
        Some(Self {
            origin,
            normal,
            u,
            v: normal.cross(u),
        })
    }

    fn plane_distance(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.normal).abs()
    }

    fn project(&self, point: DVec3) -> DVec2 {
        let d = point - self.origin;
        DVec2::new(d.dot(self.u), d.dot(self.v))
    }
}

/// Clamped intersection of segments `p0`-`p1` and `q0`-`q1`, returning the
/// parameters along each.
pub fn segment_intersection(p0: DVec2, p1: DVec2, q0: DVec2, q1: DVec2) -> Option<(f64, f64)> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = r.perp_dot(s);
    if denom.abs() < EPSILON {
        return None;
    }
    let d = q0 - p0;
    let t = d.perp_dot(s) / denom;
    let u = d.perp_dot(r) / denom;
    let range = -PARAM_TOLERANCE..=1.0 + PARAM_TOLERANCE;
    (range.contains(&t) && range.contains(&u)).then(|| (t.clamp(0.0, 1.0), u.clamp(0.0, 1.0)))
}

/// Point on the side at `crossing`.
pub fn crossing_point(store: &TopologyStore, face: &Face, crossing: &Crossing) -> DVec3 {
    let (a, b) = face.side(crossing.slot);
    store.position(a).lerp(store.position(b), crossing.edge_t)
}

/// Corner slot a crossing snaps to when its side parameter is within
/// [`KNIFE_ENDPOINT_EPSILON`] of either end.
pub fn snapped_corner(crossing: &Crossing, corners: usize) -> Option<usize> {
    if crossing.edge_t <= KNIFE_ENDPOINT_EPSILON {
        Some(crossing.slot)
    } else if crossing.edge_t >= 1.0 - KNIFE_ENDPOINT_EPSILON {
        Some((crossing.slot + 1) % corners)
    } else {
        None
    }
}

/// Perimeter position in half-side steps: corner `k` sits at `2k`, the
/// inside of side `k` at `2k + 1`.
fn perimeter_position(crossing: &Crossing, corners: usize) -> usize {
    match snapped_corner(crossing, corners) {
        Some(corner) => 2 * corner,
        None => 2 * crossing.slot + 1,
    }
}

/// Whether cutting a face with `corners` corners between `entry` and
/// `exit` leaves two pieces of at least three corners each.
pub fn is_splittable(entry: &Crossing, exit: &Crossing, corners: usize) -> bool {
    let span = 2 * corners;
    let p = perimeter_position(entry, corners);
    let q = perimeter_position(exit, corners);
    if p == q {
        return false;
    }
    // Both ends plus every corner strictly between them.
    let piece = |from: usize, to: usize| {
        let steps = (to + span - from) % span;
        2 + (1..steps).filter(|k| (from + k) % 2 == 0).count()
    };
    piece(p, q) >= 3 && piece(q, p) >= 3
}

/// Tests `face` against the stroke `start`-`end` (local space).
///
/// The face qualifies when at least two distinct sides are crossed and the
/// first and last crossings along the stroke split it into two pieces. A
/// stroke that only runs along one side never qualifies.
pub fn face_cut(store: &TopologyStore, index: usize, start: DVec3, end: DVec3) -> Option<FaceCut> {
    let face = store.faces().get(index).filter(|f| !f.deleted)?;
    let basis = FaceBasis::new(store, face)?;
    let (p0, p1) = (basis.project(start), basis.project(end));

    let mut crossings: Vec<Crossing> = face
        .sides()
        .enumerate()
        .filter_map(|(slot, (a, b))| {
            let q0 = basis.project(store.position(a));
            let q1 = basis.project(store.position(b));
            segment_intersection(p0, p1, q0, q1).map(|(stroke_t, edge_t)| Crossing {
                slot,
                edge_t,
                stroke_t,
            })
        })
        .collect();
    if crossings.len() < 2 {
        return None;
    }
    crossings.sort_by(|x, y| x.stroke_t.total_cmp(&y.stroke_t));

    let entry = crossings[0];
    let exit = *crossings.last()?;
    is_splittable(&entry, &exit, face.vertex_count).then(|| FaceCut {
        face: index,
        entry,
        exit,
        offset: basis.plane_distance(start) + basis.plane_distance(end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_intersection_cross() {
        let hit = segment_intersection(
            DVec2::new(-1.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, -1.0),
            DVec2::new(0.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(hit.0, 0.5);
        assert_relative_eq!(hit.1, 0.5);
    }

    #[test]
    fn test_segment_intersection_miss_and_parallel() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(1.0, 0.0);
        assert!(segment_intersection(a, b, DVec2::new(2.0, -1.0), DVec2::new(2.0, 1.0)).is_none());
        assert!(segment_intersection(a, b, DVec2::new(0.0, 1.0), DVec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_face_cut_across_top() {
        let store = create_cube(1.0).unwrap();
        let cut = face_cut(&store, 1, DVec3::new(-0.5, 0.5, 0.0), DVec3::new(0.5, 0.5, 0.0)).unwrap();
        assert_ne!(cut.entry.slot, cut.exit.slot);
        assert_relative_eq!(cut.entry.edge_t, 0.5, epsilon = 1e-9);
        assert_relative_eq!(cut.exit.edge_t, 0.5, epsilon = 1e-9);
        assert!(cut.entry.stroke_t < cut.exit.stroke_t);
    }

    #[test]
    fn test_stroke_along_a_side_does_not_qualify() {
        let store = create_cube(1.0).unwrap();
        let (start, end) = (DVec3::new(-0.8, 0.5, -0.8), DVec3::new(0.8, 0.5, 0.8));
        // Side faces see the stroke on their top side, touching two corners.
        for side in 2..6 {
            assert!(face_cut(&store, side, start, end).is_none(), "face {side}");
        }
        let top = face_cut(&store, 1, start, end).unwrap();
        assert_relative_eq!(top.offset, 0.0, epsilon = 1e-12);
        assert_relative_eq!(face_cut(&store, 0, start, end).unwrap().offset, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_splittable_by_perimeter_position() {
        let at = |slot, edge_t| Crossing { slot, edge_t, stroke_t: 0.0 };
        // Opposite corners, opposite midpoints, adjacent midpoints.
        assert!(is_splittable(&at(0, 0.0), &at(2, 0.0), 4));
        assert!(is_splittable(&at(0, 0.5), &at(2, 0.5), 4));
        assert!(is_splittable(&at(0, 0.5), &at(1, 0.5), 4));
        // Adjacent corners, one shared corner, same side.
        assert!(!is_splittable(&at(0, 0.0), &at(1, 0.0), 4));
        assert!(!is_splittable(&at(3, 1.0), &at(0, 0.0), 4));
        assert!(!is_splittable(&at(1, 0.2), &at(1, 0.7), 4));
        // Within the endpoint tolerance counts as the corner.
        assert!(!is_splittable(&at(0, 0.99995), &at(1, 0.00005), 4));
        // Triangle: corner to the opposite side.
        assert!(is_splittable(&at(0, 0.0), &at(1, 0.5), 3));
    }

    #[test]
    fn test_face_cut_inside_face_does_not_qualify() {
        let store = create_cube(1.0).unwrap();
        assert!(face_cut(&store, 1, DVec3::new(-0.1, 0.5, 0.0), DVec3::new(0.1, 0.5, 0.0)).is_none());
    }
}
