//! Edge bevel.
//!
//! The edge is offset into each adjacent face along that face's in-plane
//! side direction. Every side gets a strip of `segments` quads whose rows
//! sit at `distance * (t / segments)^profile`, scaled per endpoint by the
//! miter factor so sharp corners are not undercut.

use super::require_edge;
use crate::error::{EditError, EditResult};
use crate::topology::{Edge, Face, TopologyStore};
use config::constants::{
    BevelSettings, BEVEL_MITER_EDGE_FRACTION, BEVEL_MITER_MAX, BEVEL_SIDE_PARALLEL_DOT, EPSILON,
    MAX_BEVEL_SEGMENTS, NORMAL_EPSILON,
};
use glam::DVec3;
use tracing::debug;

/// Result of [`bevel_edge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeBevel {
    /// Strip quads, side by side, inner row first
    pub faces: Vec<usize>,
    /// Outermost row of the first side
    pub outer: Edge,
}

/// One offset direction with the winding its strip must follow.
#[derive(Debug, Clone, Copy)]
struct BevelSide {
    direction: DVec3,
    /// The strip walks the edge from `a` to `b`
    forward: bool,
}

fn validate_settings(settings: &BevelSettings) -> EditResult<()> {
    if !settings.distance.is_finite() || settings.distance <= EPSILON {
        return Err(EditError::invalid_parameter(format!(
            "bevel distance must be positive: {}",
            settings.distance
        )));
    }
    if settings.segments == 0 || settings.segments > MAX_BEVEL_SEGMENTS {
        return Err(EditError::invalid_parameter(format!(
            "bevel segments must be in 1..={MAX_BEVEL_SEGMENTS}: {}",
            settings.segments
        )));
    }
    if !settings.profile.is_finite() || settings.profile <= 0.0 {
        return Err(EditError::invalid_parameter(format!(
            "bevel profile must be positive: {}",
            settings.profile
        )));
    }
    Ok(())
}

/// Side directions from the faces around `a`-`b`, oriented toward each
/// face's centroid. A lone side gets an opposite fallback.
fn bevel_sides(store: &TopologyStore, a: usize, b: usize, direction: DVec3) -> Vec<BevelSide> {
    let midpoint = (store.position(a) + store.position(b)) * 0.5;
    let mut sides: Vec<BevelSide> = Vec::with_capacity(2);

    for (index, slot) in store.faces_with_edge(a, b) {
        let face = &store.faces()[index];
        let Some(normal) = store.face_normal(face) else {
            continue;
        };
        let Some(mut side) = normal.cross(direction).try_normalize() else {
            continue;
        };
        if side.dot(store.face_centroid(face) - midpoint) < 0.0 {
            side = -side;
        }
        if sides
            .iter()
            .any(|s| s.direction.dot(side).abs() > BEVEL_SIDE_PARALLEL_DOT)
        {
            continue;
        }
        sides.push(BevelSide {
            direction: side,
            forward: face.side(slot) == (a, b),
        });
        if sides.len() == 2 {
            break;
        }
    }

    if sides.len() == 1 {
        let only = sides[0];
        sides.push(BevelSide {
            direction: -only.direction,
            forward: !only.forward,
        });
    }
    sides
}

/// Offset scale at `vertex` of the beveled edge `vertex`-`other`.
///
/// Uses the sharpest angle to any other edge at `vertex`:
/// `clamp(1 / sin(angle / 2), 1, BEVEL_MITER_MAX)`, capped so the offset
/// stays within a fraction of the shortest neighboring edge. Returns 1 when
/// there is no such edge.
pub fn miter_factor(store: &TopologyStore, vertex: usize, other: usize, distance: f64) -> f64 {
    let origin = store.position(vertex);
    let Some(along) = (store.position(other) - origin).try_normalize() else {
        return 1.0;
    };

    let mut sharpest: Option<f64> = None;
    let mut shortest = f64::INFINITY;
    for face in store.faces_with_vertex(vertex) {
        for (p, q) in store.faces()[face].sides() {
            let neighbor = match (p == vertex, q == vertex) {
                (true, false) => q,
                (false, true) => p,
                _ => continue,
            };
            if neighbor == other {
                continue;
            }
            let delta = store.position(neighbor) - origin;
            let length = delta.length();
            if length < NORMAL_EPSILON {
                continue;
            }
            let angle = along.dot(delta / length).clamp(-1.0, 1.0).acos();
            sharpest = Some(sharpest.map_or(angle, |s| s.min(angle)));
            shortest = shortest.min(length);
        }
    }

    let Some(angle) = sharpest else {
        return 1.0;
    };
    let half_sin = (angle * 0.5).sin();
    let factor = if half_sin > NORMAL_EPSILON {
        (1.0 / half_sin).clamp(1.0, BEVEL_MITER_MAX)
    } else {
        BEVEL_MITER_MAX
    };
    factor.min(BEVEL_MITER_EDGE_FRACTION * shortest / distance)
}

/// Bevels `edge` with quad strips, one strip per adjacent side.
pub fn bevel_edge(store: &mut TopologyStore, edge: Edge, settings: &BevelSettings) -> EditResult<EdgeBevel> {
    let direction = require_edge(store, edge)?;
    validate_settings(settings)?;

    let Edge { a, b } = edge;
    let sides = bevel_sides(store, a, b, direction);
    if sides.is_empty() {
        return Err(EditError::unsatisfiable(format!(
            "edge {a}-{b} has no face to bevel into"
        )));
    }

    let (miter_a, miter_b) = if settings.use_miter {
        (
            miter_factor(store, a, b, settings.distance),
            miter_factor(store, b, a, settings.distance),
        )
    } else {
        (1.0, 1.0)
    };

    let (pa, pb) = (store.position(a), store.position(b));
    let segments = settings.segments as usize;
    let mut faces = Vec::with_capacity(sides.len() * segments);
    let mut outer = None;

    for side in &sides {
        let (mut prev_a, mut prev_b) = (a, b);
        for t in 1..=segments {
            let offset = settings.distance * (t as f64 / segments as f64).powf(settings.profile);
            let next_a = store.add_vertex(pa + side.direction * offset * miter_a);
            let next_b = store.add_vertex(pb + side.direction * offset * miter_b);
            let quad = if side.forward {
                [prev_a, prev_b, next_b, next_a]
            } else {
                [prev_b, prev_a, next_a, next_b]
            };
            faces.push(store.add_face(Face::quad(quad)));
            (prev_a, prev_b) = (next_a, next_b);
        }
        outer.get_or_insert(Edge { a: prev_a, b: prev_b });
    }

    let outer = outer.ok_or_else(|| EditError::unsatisfiable("bevel produced no strip"))?;
    debug!(a, b, strips = sides.len(), faces = faces.len(), "Beveled edge");
    Ok(EdgeBevel { faces, outer })
}
