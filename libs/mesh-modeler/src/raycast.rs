//! # Raycaster
//!
//! Scene picking and hover resolution against the live faces.
//!
//! Rays are given in world space. Faces are tested in local space as one
//! triangle (0-1-2) or two (0-1-2, 0-2-3); the ray parameter is shared by
//! both spaces because the direction is mapped without renormalizing.
//!
//! Hover scoring for vertices and edges is `along + 3 * lateral` in world
//! units, restricted to candidates within the lateral radius.

use crate::topology::{Edge, TopologyStore};
use crate::transform::ObjectTransform;
use config::constants::{EPSILON, HOVER_LATERAL_WEIGHT};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Creates a ray; the direction is not required to be unit length.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Closest face hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub face: usize,
    /// Ray parameter of the hit
    pub t: f64,
    pub local_point: DVec3,
    pub world_point: DVec3,
}

/// Hover candidate with its score (lower is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverHit {
    pub index: usize,
    pub score: f64,
    pub world_point: DVec3,
}

/// Two-sided Möller–Trumbore intersection; returns the ray parameter.
pub fn intersect_triangle(origin: DVec3, direction: DVec3, p0: DVec3, p1: DVec3, p2: DVec3) -> Option<f64> {
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;
    let pvec = direction.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = origin - p0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(edge1);
    let v = direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(qvec) * inv_det;
    (t > EPSILON).then_some(t)
}

/// Finds the closest live face hit by a world-space ray.
pub fn raycast(store: &TopologyStore, transform: &ObjectTransform, ray: &Ray) -> Option<RayHit> {
    let origin = transform.to_local(ray.origin);
    let direction = transform.direction_to_local(ray.direction);

    let mut best: Option<(usize, f64)> = None;
    for (index, face) in store.live_faces() {
        let p = store.face_positions(face);
        let mut hit = intersect_triangle(origin, direction, p[0], p[1], p[2]);
        if face.is_quad() {
            if let Some(t) = intersect_triangle(origin, direction, p[0], p[2], p[3]) {
                hit = Some(hit.map_or(t, |h| h.min(t)));
            }
        }
        if let Some(t) = hit {
            if best.map_or(true, |(_, b)| t < b) {
                best = Some((index, t));
            }
        }
    }

    best.map(|(face, t)| RayHit {
        face,
        t,
        local_point: origin + direction * t,
        world_point: ray.at(t),
    })
}

/// Resolves the hovered vertex.
pub fn hover_vertex(
    store: &TopologyStore,
    transform: &ObjectTransform,
    ray: &Ray,
    radius: f64,
) -> Option<HoverHit> {
    let direction = ray.direction.try_normalize()?;
    let mut referenced = vec![false; store.vertex_count()];
    for (_, face) in store.live_faces() {
        for &v in face.corners() {
            referenced[v] = true;
        }
    }

    let mut best: Option<HoverHit> = None;
    for (index, vertex) in store.vertices().iter().enumerate() {
        if vertex.deleted || !referenced[index] {
            continue;
        }
        let world = transform.to_world(vertex.position);
        let along = (world - ray.origin).dot(direction);
        if along < 0.0 {
            continue;
        }
        let lateral = (world - (ray.origin + direction * along)).length();
        if lateral > radius {
            continue;
        }
        let score = along + HOVER_LATERAL_WEIGHT * lateral;
        if best.map_or(true, |b| score < b.score) {
            best = Some(HoverHit {
                index,
                score,
                world_point: world,
            });
        }
    }
    best
}

/// Resolves the hovered edge of `edges`.
pub fn hover_edge(
    store: &TopologyStore,
    edges: &[Edge],
    transform: &ObjectTransform,
    ray: &Ray,
    radius: f64,
) -> Option<HoverHit> {
    let direction = ray.direction.try_normalize()?;
    let mut best: Option<HoverHit> = None;

    for (index, edge) in edges.iter().enumerate() {
        let p = transform.to_world(store.position(edge.a));
        let q = transform.to_world(store.position(edge.b));
        let (along, closest_on_ray, closest_on_edge) = closest_ray_segment(ray.origin, direction, p, q);
        let lateral = (closest_on_ray - closest_on_edge).length();
        if lateral > radius {
            continue;
        }
        let score = along + HOVER_LATERAL_WEIGHT * lateral;
        if best.map_or(true, |b| score < b.score) {
            best = Some(HoverHit {
                index,
                score,
                world_point: closest_on_edge,
            });
        }
    }
    best
}

/// Closest points between a ray (unit `direction`, `s >= 0`) and the
/// segment `p`-`q`. Returns `(s, point_on_ray, point_on_segment)`.
pub fn closest_ray_segment(origin: DVec3, direction: DVec3, p: DVec3, q: DVec3) -> (f64, DVec3, DVec3) {
    let d2 = q - p;
    let r = origin - p;
    let e = d2.length_squared();

    if e < EPSILON {
        let s = (p - origin).dot(direction).max(0.0);
        return (s, origin + direction * s, p);
    }

    let b = direction.dot(d2);
    let c = direction.dot(r);
    let f = d2.dot(r);
    let denom = e - b * b;

    let mut s = if denom > EPSILON {
        ((b * f - c * e) / denom).max(0.0)
    } else {
        0.0
    };
    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c).max(0.0);
    } else if t > 1.0 {
        t = 1.0;
        s = (b - c).max(0.0);
    }

    (s, origin + direction * s, p + d2 * t)
}
