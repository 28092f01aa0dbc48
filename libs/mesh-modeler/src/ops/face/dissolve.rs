//! Face deletion and dissolve.

use super::require_normal;
use crate::error::{EditError, EditResult};
use crate::ops::boundary::{boundary_cycle, fill_cycle};
use crate::topology::TopologyStore;
use config::constants::DISSOLVE_COPLANAR_MIN_DOT;
use tracing::debug;

/// Tombstones a live face.
pub fn delete_face(store: &mut TopologyStore, face: usize) -> EditResult<()> {
    store.live_face(face)?;
    store.tombstone_face(face);
    debug!(face, "Deleted face");
    Ok(())
}

/// Returns the live neighbor of `face` that shares exactly one side with
/// it and has the most similar normal, if that similarity reaches the
/// coplanarity threshold.
pub fn dissolve_neighbor(store: &TopologyStore, face: usize) -> EditResult<Option<usize>> {
    let source = *store.live_face(face)?;
    let normal = require_normal(store, face)?;

    let mut best: Option<(usize, f64)> = None;
    for (index, other) in store.live_faces() {
        if index == face {
            continue;
        }
        let shared: Vec<usize> = other
            .corners()
            .iter()
            .copied()
            .filter(|&v| source.contains(v))
            .collect();
        if shared.len() != 2 || source.slot_of_edge(shared[0], shared[1]).is_none() {
            continue;
        }
        let Some(other_normal) = store.face_normal(other) else {
            continue;
        };
        let score = normal.dot(other_normal);
        if score >= DISSOLVE_COPLANAR_MIN_DOT && best.map_or(true, |(_, b)| score > b) {
            best = Some((index, score));
        }
    }
    Ok(best.map(|(index, _)| index))
}

/// Merges `face` with its most coplanar neighbor into one polygon.
///
/// The shared outline is rebuilt from the pair's boundary and emitted as a
/// quad when it has four corners, as a triangle fan otherwise.
pub fn dissolve_face(store: &mut TopologyStore, face: usize) -> EditResult<Vec<usize>> {
    let neighbor = dissolve_neighbor(store, face)?
        .ok_or_else(|| EditError::unsatisfiable(format!("face {face} has no coplanar neighbor")))?;
    let cycle = boundary_cycle(store, &[face, neighbor])?;

    store.tombstone_face(face);
    store.tombstone_face(neighbor);
    let created = fill_cycle(store, &cycle);

    debug!(face, neighbor, corners = cycle.len(), "Dissolved face");
    Ok(created)
}
