//! Interactive translation of the selection.
//!
//! A drag records the start positions of every affected vertex, so each
//! update applies the total displacement from the start rather than
//! accumulating per-frame deltas.

use super::MeshModeler;
use crate::error::{EditError, EditResult};
use glam::DVec3;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct DragState {
    /// Vertex index and local position at drag start
    origins: Vec<(usize, DVec3)>,
}

impl MeshModeler {
    /// Returns true while a drag is in flight.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts dragging the vertices the selection covers.
    pub fn begin_drag(&mut self) -> EditResult<usize> {
        let vertices = self.affected_vertices();
        let result = if vertices.is_empty() {
            Err(EditError::NothingSelected { what: "vertices to drag" })
        } else {
            let origins: Vec<(usize, DVec3)> = vertices
                .into_iter()
                .map(|v| (v, self.store.position(v)))
                .collect();
            let count = origins.len();
            self.drag = Some(DragState { origins });
            Ok(count)
        };
        self.report("Begin drag", result)
    }

    /// Places the dragged vertices at their start plus `total_delta`, a
    /// world-space displacement.
    pub fn update_drag(&mut self, total_delta: DVec3) -> EditResult<()> {
        let Some(drag) = &self.drag else {
            return Err(EditError::NothingSelected { what: "drag" });
        };
        if !total_delta.is_finite() {
            return Err(EditError::invalid_parameter(format!(
                "displacement must be finite: {total_delta:?}"
            )));
        }
        let local = self.transform.delta_to_local(total_delta);
        for &(v, origin) in &drag.origins {
            self.store.set_position(v, origin + local);
        }
        Ok(())
    }

    /// Keeps the dragged positions.
    pub fn end_drag(&mut self) -> EditResult<usize> {
        let result = self
            .drag
            .take()
            .map(|drag| drag.origins.len())
            .ok_or(EditError::NothingSelected { what: "drag" });
        self.report("Move", result)
    }

    /// Restores the positions recorded at drag start.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            for (v, origin) in drag.origins {
                self.store.set_position(v, origin);
            }
            self.status = "Move cancelled".to_string();
        }
    }
}
