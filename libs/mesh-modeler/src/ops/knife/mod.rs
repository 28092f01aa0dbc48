//! # Knife Tool
//!
//! Free-form cutting along a straight stroke between two picked points.
//!
//! ## Algorithm
//!
//! 1. Every live face is tested in its own plane; it qualifies when the
//!    stroke crosses two distinct sides and would split it ([`crossing`]).
//! 2. Qualifying faces are routed: the shortest path between the anchor
//!    faces, or the connected strip around one of them, or around the face
//!    whose plane lies closest to the stroke ([`route`]).
//! 3. Each routed face gets its two crossings as vertices (reusing a
//!    corner when the side parameter is within
//!    [`config::constants::KNIFE_ENDPOINT_EPSILON`] of either end, and
//!    sharing vertices on shared sides), and its corner ring is split into
//!    two pieces.
//!
//! The cut runs on a copy of the store that replaces the original only
//! when at least one face was split.

pub mod crossing;
pub mod route;

#[cfg(test)]
mod tests;

pub use crossing::{face_cut, is_splittable, segment_intersection, snapped_corner, Crossing, FaceCut};

use crate::error::{EditError, EditResult};
use crate::topology::{EdgeKey, TopologyStore};
use config::constants::KNIFE_MIN_STROKE_LENGTH;
use crossing::crossing_point;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A knife stroke in local space with the faces its endpoints were picked
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnifeStroke {
    pub start: DVec3,
    pub end: DVec3,
    pub start_face: Option<usize>,
    pub end_face: Option<usize>,
}

/// Result of [`knife_cut`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnifeResult {
    /// Faces that were split and tombstoned
    pub split_faces: Vec<usize>,
    /// Faces created from the pieces
    pub new_faces: Vec<usize>,
}

/// Computes the face cuts a stroke would make, without mutating.
pub fn plan_knife(store: &TopologyStore, stroke: &KnifeStroke) -> EditResult<Vec<FaceCut>> {
    if stroke.start.distance(stroke.end) < KNIFE_MIN_STROKE_LENGTH {
        return Err(EditError::degenerate("knife points coincide"));
    }

    let cuts: HashMap<usize, FaceCut> = store
        .live_faces()
        .filter_map(|(index, _)| face_cut(store, index, stroke.start, stroke.end))
        .map(|cut| (cut.face, cut))
        .collect();
    if cuts.is_empty() {
        return Err(EditError::unsatisfiable("knife stroke crosses no face"));
    }

    // Faces whose plane holds the stroke come first, so an unanchored
    // stroke floods from the surface it was drawn on.
    let mut qualifying: Vec<usize> = cuts.keys().copied().collect();
    qualifying.sort_by(|a, b| cuts[a].offset.total_cmp(&cuts[b].offset).then(a.cmp(b)));
    Ok(route::route(store, &qualifying, stroke.start_face, stroke.end_face)
        .into_iter()
        .filter_map(|face| cuts.get(&face).copied())
        .collect())
}

/// Local-space segments the stroke would cut, one per routed face.
pub fn preview_segments(store: &TopologyStore, stroke: &KnifeStroke) -> EditResult<Vec<(DVec3, DVec3)>> {
    Ok(plan_knife(store, stroke)?
        .iter()
        .map(|cut| {
            let face = &store.faces()[cut.face];
            (
                crossing_point(store, face, &cut.entry),
                crossing_point(store, face, &cut.exit),
            )
        })
        .collect())
}

/// Vertex for a crossing: an existing corner when the crossing sits on
/// it, otherwise a vertex shared by every face using the same side.
fn crossing_vertex(
    store: &mut TopologyStore,
    cache: &mut HashMap<EdgeKey, usize>,
    face: usize,
    crossing: &Crossing,
) -> usize {
    let face = store.faces()[face];
    if let Some(corner) = snapped_corner(crossing, face.vertex_count) {
        return face.indices[corner];
    }
    let (a, b) = face.side(crossing.slot);
    let point = store.position(a).lerp(store.position(b), crossing.edge_t);
    *cache
        .entry(EdgeKey::new(a, b))
        .or_insert_with(|| store.add_vertex(point))
}

/// Splits one face between its crossings. Returns the new faces, or
/// `None` when the crossings leave a piece with fewer than three corners.
fn split_face(
    store: &mut TopologyStore,
    cache: &mut HashMap<EdgeKey, usize>,
    cut: &FaceCut,
) -> Option<Vec<usize>> {
    let face = store.faces()[cut.face];
    let entry = crossing_vertex(store, cache, cut.face, &cut.entry);
    let exit = crossing_vertex(store, cache, cut.face, &cut.exit);
    if entry == exit {
        return None;
    }

    let mut ring: Vec<usize> = Vec::with_capacity(face.vertex_count + 2);
    for (slot, (a, _)) in face.sides().enumerate() {
        ring.push(a);
        for (crossing, vertex) in [(&cut.entry, entry), (&cut.exit, exit)] {
            if crossing.slot == slot && !face.contains(vertex) && !ring.contains(&vertex) {
                ring.push(vertex);
            }
        }
    }

    let i = ring.iter().position(|&v| v == entry)?;
    let j = ring.iter().position(|&v| v == exit)?;
    let n = ring.len();
    let walk = |from: usize, to: usize| -> Vec<usize> {
        let steps = (to + n - from) % n;
        (0..=steps).map(|k| ring[(from + k) % n]).collect()
    };
    let first = walk(i, j);
    let second = walk(j, i);
    if first.len() < 3 || second.len() < 3 {
        return None;
    }

    store.tombstone_face(cut.face);
    let mut created = store.add_polygon(&first);
    created.extend(store.add_polygon(&second));
    Some(created)
}

/// Cuts the mesh along `stroke`.
pub fn knife_cut(store: &mut TopologyStore, stroke: &KnifeStroke) -> EditResult<KnifeResult> {
    let plan = plan_knife(store, stroke)?;

    let mut work = store.clone();
    let mut cache: HashMap<EdgeKey, usize> = HashMap::new();
    let mut result = KnifeResult::default();
    for cut in &plan {
        if let Some(created) = split_face(&mut work, &mut cache, cut) {
            result.split_faces.push(cut.face);
            result.new_faces.extend(created);
        }
    }

    if result.split_faces.is_empty() {
        return Err(EditError::unsatisfiable("knife stroke splits no face"));
    }
    *store = work;

    debug!(
        planned = plan.len(),
        split = result.split_faces.len(),
        created = result.new_faces.len(),
        "Knife cut"
    );
    Ok(result)
}
