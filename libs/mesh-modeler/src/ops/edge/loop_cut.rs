//! Loop cut.
//!
//! Starting from the seed edge, the walk crosses each quad to its opposite
//! side and continues into the quad beyond, in both directions, until it
//! reaches a triangle, an open border or a face it has already cut. Every
//! crossed side gets one cut vertex at `ratio` measured from the side that
//! continues the seed's first endpoint, and each quad is split between its
//! two cut vertices.

use super::require_edge;
use crate::error::{EditError, EditResult};
use crate::ops::{rotate_quad, split_quad};
use crate::topology::{Edge, EdgeKey, TopologyStore};
use config::constants::clamp_loop_cut_ratio;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Result of [`loop_cut`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopCut {
    /// Quads that were split, in walk order
    pub cut_faces: Vec<usize>,
    /// Replacement quads, two per cut face
    pub new_faces: Vec<usize>,
    /// One vertex per crossed side
    pub new_vertices: Vec<usize>,
}

/// A quad on the loop with the slot of the side it was entered through and
/// the entry side's vertex that continues the seed's `a` endpoint.
#[derive(Debug, Clone, Copy)]
struct LoopStep {
    face: usize,
    slot: usize,
    a_side: usize,
}

/// Walks the quads crossed by the loop through `edge`.
fn collect_loop(store: &TopologyStore, edge: Edge) -> Vec<LoopStep> {
    let mut visited: HashSet<usize> = HashSet::new();
    let mut steps = Vec::new();

    for (start, slot) in store.faces_with_edge(edge.a, edge.b) {
        let mut current = Some(LoopStep {
            face: start,
            slot,
            a_side: edge.a,
        });

        while let Some(step) = current.take() {
            let face = store.faces()[step.face];
            if !face.is_quad() || !visited.insert(step.face) {
                break;
            }
            steps.push(step);

            let c = face.indices;
            let (x, y) = face.side(step.slot + 2);
            // Side s+3 joins c[s] to c[s+3]; side s+1 joins c[s+1] to c[s+2].
            let a_side = if step.a_side == c[step.slot % 4] {
                c[(step.slot + 3) % 4]
            } else {
                c[(step.slot + 2) % 4]
            };

            current = store
                .faces_with_edge(x, y)
                .into_iter()
                .find(|&(f, _)| f != step.face)
                .map(|(f, s)| LoopStep {
                    face: f,
                    slot: s,
                    a_side,
                });
        }
    }
    steps
}

/// Splits every quad on the loop through `edge` at `ratio`.
///
/// The ratio is clamped away from the endpoints; NaN selects the default.
pub fn loop_cut(store: &mut TopologyStore, edge: Edge, ratio: f64) -> EditResult<LoopCut> {
    require_edge(store, edge)?;
    let ratio = clamp_loop_cut_ratio(ratio);

    let steps = collect_loop(store, edge);
    if steps.is_empty() {
        return Err(EditError::unsatisfiable(format!(
            "edge {}-{} borders no quad",
            edge.a, edge.b
        )));
    }

    let mut cache: HashMap<EdgeKey, usize> = HashMap::new();
    let mut new_vertices = Vec::new();
    let mut cut_at = |store: &mut TopologyStore, from: usize, to: usize| -> usize {
        *cache.entry(EdgeKey::new(from, to)).or_insert_with(|| {
            let v = store.add_vertex(store.position(from).lerp(store.position(to), ratio));
            new_vertices.push(v);
            v
        })
    };

    let mut cut_faces = Vec::with_capacity(steps.len());
    let mut new_faces = Vec::with_capacity(steps.len() * 2);
    for step in &steps {
        let corners = rotate_quad(store.faces()[step.face].indices, step.slot);
        let [p0, p1, p2, p3] = corners;
        // p0 continues into p3 and p1 into p2.
        let (m, n) = if step.a_side == p0 {
            (cut_at(&mut *store, p0, p1), cut_at(&mut *store, p3, p2))
        } else {
            (cut_at(&mut *store, p1, p0), cut_at(&mut *store, p2, p3))
        };
        new_faces.extend(split_quad(store, corners, m, n));
        store.tombstone_face(step.face);
        cut_faces.push(step.face);
    }

    debug!(
        a = edge.a,
        b = edge.b,
        ratio,
        faces = cut_faces.len(),
        "Loop cut"
    );
    Ok(LoopCut {
        cut_faces,
        new_faces,
        new_vertices,
    })
}
