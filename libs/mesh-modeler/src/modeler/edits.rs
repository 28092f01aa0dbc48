//! Face, edge and vertex edits on the session.
//!
//! Each entry point resolves indices against the live topology, runs the
//! kernel operation through [`MeshModeler::edit`] and reselects the result
//! through the compaction table.

use super::MeshModeler;
use crate::error::{EditError, EditResult};
use crate::ops::edge::{self as edge_ops, EdgeBevel};
use crate::ops::face::{self as face_ops, CutAxis};
use crate::selection::EditMode;
use crate::topology::{find_edge, Edge, RemapTable};
use config::constants::BevelSettings;
use glam::DVec3;

impl MeshModeler {
    fn selected_face(&self) -> EditResult<usize> {
        self.selection
            .selected_face
            .ok_or(EditError::NothingSelected { what: "face" })
    }

    fn selected_edge(&self) -> EditResult<usize> {
        self.selection
            .selected_edge
            .ok_or(EditError::NothingSelected { what: "edge" })
    }

    /// Active edges resolved to endpoint pairs, so batched edits keep
    /// their operands while the edge list grows.
    fn active_edge_pairs(&self) -> EditResult<Vec<Edge>> {
        let active = self.selection.active_edges();
        if active.is_empty() {
            return Err(EditError::NothingSelected { what: "edges" });
        }
        let edges = self.store.build_edges();
        active
            .into_iter()
            .map(|index| crate::ops::edge_at(&edges, index))
            .collect()
    }

    /// Index of `edge` after a compaction, looked up by endpoints.
    fn remapped_edge(&self, table: &RemapTable, edge: Edge) -> Option<usize> {
        let a = table.vertex(edge.a)?;
        let b = table.vertex(edge.b)?;
        find_edge(&self.store.build_edges(), a, b)
    }

    /// Makes `edges` the active loop set, selecting the last one.
    fn select_edge_set(&mut self, table: &RemapTable, edges: &[Edge]) {
        let indices: Vec<usize> = edges
            .iter()
            .filter_map(|&e| self.remapped_edge(table, e))
            .collect();
        if let Some(&last) = indices.last() {
            self.selection.select_edge(last);
        }
        self.selection.loop_edges = indices;
    }

    // =========================================================================
    // Face edits
    // =========================================================================

    /// Extrudes a quad along its normal and selects the cap.
    pub fn extrude_face(&mut self, face: usize, distance: f64) -> EditResult<usize> {
        let (result, table) = self.edit("Extrude face", |store| face_ops::extrude_face(store, face, distance))?;
        let cap = table.face(result.cap).unwrap_or(result.cap);
        self.selection.select_face(cap);
        self.selection.face_selection = vec![cap];
        Ok(cap)
    }

    /// Subdivides a quad into four and selects the first corner quad.
    pub fn subdivide_face(&mut self, face: usize) -> EditResult<[usize; 4]> {
        let (faces, table) = self.edit("Subdivide face", |store| face_ops::subdivide_face(store, face))?;
        let faces = faces.map(|f| table.face(f).unwrap_or(f));
        self.selection.select_face(faces[0]);
        Ok(faces)
    }

    /// Cuts a quad in half across `axis`.
    pub fn cut_face(&mut self, face: usize, axis: CutAxis) -> EditResult<[usize; 2]> {
        let (faces, table) = self.edit("Cut face", |store| face_ops::cut_face(store, face, axis))?;
        let faces = faces.map(|f| table.face(f).unwrap_or(f));
        self.selection.select_face(faces[0]);
        Ok(faces)
    }

    /// Deletes a face. Vertices it alone used are compacted away.
    pub fn delete_face(&mut self, face: usize) -> EditResult<()> {
        self.edit("Delete face", |store| face_ops::delete_face(store, face))
            .map(|_| ())
    }

    /// Merges a face with its most coplanar neighbor.
    pub fn dissolve_face(&mut self, face: usize) -> EditResult<Vec<usize>> {
        let (faces, table) = self.edit("Dissolve face", |store| face_ops::dissolve_face(store, face))?;
        let faces: Vec<usize> = faces.into_iter().filter_map(|f| table.face(f)).collect();
        if let Some(&first) = faces.first() {
            self.selection.select_face(first);
        }
        Ok(faces)
    }

    /// Extrudes the selected face by the configured distance.
    pub fn extrude_selected_face(&mut self) -> EditResult<usize> {
        let face = self.selected_face();
        let face = self.report("Extrude face", face)?;
        self.extrude_face(face, self.config.extrude_distance)
    }

    pub fn subdivide_selected_face(&mut self) -> EditResult<[usize; 4]> {
        let face = self.selected_face();
        let face = self.report("Subdivide face", face)?;
        self.subdivide_face(face)
    }

    pub fn cut_selected_face(&mut self, axis: CutAxis) -> EditResult<[usize; 2]> {
        let face = self.selected_face();
        let face = self.report("Cut face", face)?;
        self.cut_face(face, axis)
    }

    pub fn delete_selected_face(&mut self) -> EditResult<()> {
        let face = self.selected_face();
        let face = self.report("Delete face", face)?;
        self.delete_face(face)
    }

    pub fn dissolve_selected_face(&mut self) -> EditResult<Vec<usize>> {
        let face = self.selected_face();
        let face = self.report("Dissolve face", face)?;
        self.dissolve_face(face)
    }

    // =========================================================================
    // Edge edits
    // =========================================================================

    /// Extrudes an edge of the current edge list and selects the outer
    /// edge.
    pub fn extrude_edge(&mut self, index: usize, distance: f64) -> EditResult<usize> {
        let edge = self.edge(index);
        let edge = self.report("Extrude edge", edge)?;
        let (result, table) = self.edit("Extrude edge", |store| edge_ops::extrude_edge(store, edge, distance))?;
        let outer = self
            .remapped_edge(&table, result.outer)
            .ok_or_else(|| EditError::unsatisfiable("extruded edge did not survive compaction"))?;
        self.selection.select_edge(outer);
        Ok(outer)
    }

    /// Extrudes every active edge; the outer edges become the new active
    /// set.
    pub fn extrude_active_edges(&mut self, distance: f64) -> EditResult<Vec<usize>> {
        let pairs = self.active_edge_pairs();
        let pairs = self.report("Extrude edges", pairs)?;
        let (outers, table) = self.edit("Extrude edges", |store| {
            pairs
                .iter()
                .map(|&edge| edge_ops::extrude_edge(store, edge, distance).map(|r| r.outer))
                .collect::<EditResult<Vec<Edge>>>()
        })?;
        self.select_edge_set(&table, &outers);
        Ok(self.selection.loop_edges.clone())
    }

    /// Bevels an edge of the current edge list.
    pub fn bevel_edge(&mut self, index: usize, settings: &BevelSettings) -> EditResult<Vec<usize>> {
        let edge = self.edge(index);
        let edge = self.report("Bevel edge", edge)?;
        let (result, table) = self.edit("Bevel edge", |store| edge_ops::bevel_edge(store, edge, settings))?;
        if let Some(outer) = self.remapped_edge(&table, result.outer) {
            self.selection.select_edge(outer);
        }
        Ok(result.faces.into_iter().filter_map(|f| table.face(f)).collect())
    }

    /// Bevels every active edge with the configured profile and miter
    /// settings.
    pub fn bevel_active_edges(&mut self, distance: f64, segments: u32) -> EditResult<Vec<usize>> {
        let settings = BevelSettings {
            distance,
            segments,
            ..self.config.bevel
        };
        let pairs = self.active_edge_pairs();
        let pairs = self.report("Bevel edges", pairs)?;
        let (bevels, table) = self.edit("Bevel edges", |store| {
            pairs
                .iter()
                .map(|&edge| edge_ops::bevel_edge(store, edge, &settings))
                .collect::<EditResult<Vec<EdgeBevel>>>()
        })?;
        let outers: Vec<Edge> = bevels.iter().map(|b| b.outer).collect();
        self.select_edge_set(&table, &outers);
        Ok(bevels
            .into_iter()
            .flat_map(|b| b.faces)
            .filter_map(|f| table.face(f))
            .collect())
    }

    /// Cuts the quad loop through an edge at `ratio` along each crossed
    /// side.
    pub fn loop_cut(&mut self, index: usize, ratio: f64) -> EditResult<usize> {
        let edge = self.edge(index);
        let edge = self.report("Loop cut", edge)?;
        let (result, _) = self.edit("Loop cut", |store| edge_ops::loop_cut(store, edge, ratio))?;
        Ok(result.cut_faces.len())
    }

    /// Selects the edge loop through `index`.
    pub fn select_edge_loop(&mut self, index: usize) -> EditResult<Vec<usize>> {
        let edges = self.store.build_edges();
        let result = edge_ops::select_loop(&self.store, &edges, index).map(|selected| {
            self.selection.select_edge(index);
            self.selection.ring_edges.clear();
            self.selection.loop_edges = selected.clone();
            selected
        });
        self.report("Select loop", result)
    }

    /// Selects the edge ring through `index`.
    pub fn select_edge_ring(&mut self, index: usize) -> EditResult<Vec<usize>> {
        let edges = self.store.build_edges();
        let result = edge_ops::select_ring(&self.store, &edges, index).map(|selected| {
            self.selection.select_edge(index);
            self.selection.loop_edges.clear();
            self.selection.ring_edges = selected.clone();
            selected
        });
        self.report("Select ring", result)
    }

    /// Removes an edge shared by two faces, merging them.
    pub fn dissolve_edge(&mut self, index: usize) -> EditResult<Vec<usize>> {
        let edge = self.edge(index);
        let edge = self.report("Dissolve edge", edge)?;
        let (faces, table) = self.edit("Dissolve edge", |store| edge_ops::dissolve_edge(store, edge))?;
        let faces: Vec<usize> = faces.into_iter().filter_map(|f| table.face(f)).collect();
        if let Some(&first) = faces.first() {
            self.selection.select_face(first);
        }
        Ok(faces)
    }

    /// Connects two edges with a quad and selects it.
    pub fn bridge_edges(&mut self, first: usize, second: usize) -> EditResult<usize> {
        let edges = self.edge(first).and_then(|a| Ok((a, self.edge(second)?)));
        let (a, b) = self.report("Bridge edges", edges)?;
        let (face, table) = self.edit("Bridge edges", |store| edge_ops::bridge_edges(store, a, b))?;
        let face = table.face(face).unwrap_or(face);
        self.selection.select_face(face);
        self.selection.bridge_edges = [None, None];
        Ok(face)
    }

    pub fn extrude_selected_edge(&mut self) -> EditResult<usize> {
        let edge = self.selected_edge();
        let edge = self.report("Extrude edge", edge)?;
        self.extrude_edge(edge, self.config.extrude_distance)
    }

    pub fn loop_cut_selected(&mut self) -> EditResult<usize> {
        let edge = self.selected_edge();
        let edge = self.report("Loop cut", edge)?;
        self.loop_cut(edge, self.config.loop_cut_ratio)
    }

    pub fn dissolve_selected_edge(&mut self) -> EditResult<Vec<usize>> {
        let edge = self.selected_edge();
        let edge = self.report("Dissolve edge", edge)?;
        self.dissolve_edge(edge)
    }

    /// Bridges the two bridge operands.
    pub fn bridge_selected(&mut self) -> EditResult<usize> {
        let operands = match self.selection.bridge_edges {
            [Some(a), Some(b)] => Ok((a, b)),
            _ => Err(EditError::NothingSelected { what: "bridge edges" }),
        };
        let (a, b) = self.report("Bridge edges", operands)?;
        self.bridge_edges(a, b)
    }

    // =========================================================================
    // Mode-aware shortcuts
    // =========================================================================

    /// Extrudes the selected face in face mode, or the active edges in edge
    /// mode, by the configured distance.
    pub fn extrude_selected(&mut self) -> EditResult<()> {
        match self.mode {
            EditMode::Edge => self.extrude_active_edges(self.config.extrude_distance).map(|_| ()),
            _ => self.extrude_selected_face().map(|_| ()),
        }
    }

    /// Bevels the active edges with the configured settings.
    pub fn bevel_selected(&mut self) -> EditResult<Vec<usize>> {
        let BevelSettings { distance, segments, .. } = self.config.bevel;
        self.bevel_active_edges(distance, segments)
    }

    // =========================================================================
    // Vertex edits
    // =========================================================================

    /// Welds `remove` into `keep` and selects the survivor.
    pub fn merge_vertices(&mut self, keep: usize, remove: usize) -> EditResult<usize> {
        let (collapsed, table) = self.edit("Merge vertices", |store| edge_ops::merge_vertices(store, keep, remove))?;
        let keep = table.vertex(keep).unwrap_or(keep);
        self.selection.select_vertex(keep);
        self.selection.merge_keep = None;
        self.selection.merge_remove = None;
        Ok(collapsed)
    }

    /// Merges the merge operands.
    pub fn merge_selected(&mut self) -> EditResult<usize> {
        let operands = match (self.selection.merge_keep, self.selection.merge_remove) {
            (Some(keep), Some(remove)) => Ok((keep, remove)),
            _ => Err(EditError::NothingSelected { what: "merge vertices" }),
        };
        let (keep, remove) = self.report("Merge vertices", operands)?;
        self.merge_vertices(keep, remove)
    }

    /// Gives `face` its own copy of `vertex` and selects the copy.
    pub fn split_vertex(&mut self, vertex: usize, face: usize) -> EditResult<usize> {
        let (copy, table) = self.edit("Split vertex", |store| edge_ops::split_vertex(store, vertex, face))?;
        let copy = table.vertex(copy).unwrap_or(copy);
        self.selection.select_vertex(copy);
        self.selection.vertex_selection = vec![copy];
        Ok(copy)
    }

    /// Splits the selected vertex off the first selected face using it, or
    /// off the first face using it when no such face is selected.
    pub fn split_selected_vertex(&mut self) -> EditResult<usize> {
        let operands = self
            .selection
            .selected_vertex
            .ok_or(EditError::NothingSelected { what: "vertex" })
            .and_then(|vertex| {
                let uses = |f: &usize| self.store.live_face(*f).is_ok_and(|face| face.contains(vertex));
                self.selection
                    .face_selection
                    .iter()
                    .copied()
                    .find(uses)
                    .or_else(|| self.store.faces_with_vertex(vertex).first().copied())
                    .map(|face| (vertex, face))
                    .ok_or_else(|| EditError::unsatisfiable(format!("vertex {vertex} is not used by any face")))
            });
        let (vertex, face) = self.report("Split vertex", operands)?;
        self.split_vertex(vertex, face)
    }

    /// Moves one vertex by a world-space displacement.
    pub fn move_vertex(&mut self, vertex: usize, world_delta: DVec3) -> EditResult<()> {
        let result = self.store.live_vertex(vertex).map(|v| v.position).and_then(|position| {
            if !world_delta.is_finite() {
                return Err(EditError::invalid_parameter(format!("displacement must be finite: {world_delta:?}")));
            }
            self.store
                .set_position(vertex, position + self.transform.delta_to_local(world_delta));
            Ok(())
        });
        self.report("Move vertex", result)
    }

    /// Moves every vertex the current selection covers by a world-space
    /// displacement.
    pub fn move_selection(&mut self, world_delta: DVec3) -> EditResult<usize> {
        let vertices = self.affected_vertices();
        let result = if vertices.is_empty() {
            Err(EditError::NothingSelected { what: "vertices" })
        } else if !world_delta.is_finite() {
            Err(EditError::invalid_parameter(format!("displacement must be finite: {world_delta:?}")))
        } else {
            let local = self.transform.delta_to_local(world_delta);
            for &v in &vertices {
                self.store.set_position(v, self.store.position(v) + local);
            }
            Ok(vertices.len())
        };
        self.report("Move selection", result)
    }
}
