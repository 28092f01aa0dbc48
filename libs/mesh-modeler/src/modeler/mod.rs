//! # Modeler Session
//!
//! [`MeshModeler`] owns one topology and everything that indexes into it:
//! selection, knife anchor and preview, and in-flight drags.
//!
//! ## Edit flow
//!
//! Every mutating entry point runs through [`MeshModeler::edit`]:
//!
//! 1. The operation runs against the store. An error restores the store
//!    from a snapshot taken just before, so partially applied batches never
//!    leak out.
//! 2. The store is compacted and checked against the configured limits.
//! 3. Selection is remapped through the compaction; knife and drag state
//!    are positional and are dropped.
//!
//! Every outcome, accepted or rejected, is written to [`MeshModeler::status`].
//! The host snapshots the session by value if it wants undo.

mod drag;
mod edits;
mod knife;


pub use knife::{KnifeAnchor, KnifeClick, KnifeState};

use crate::error::{EditError, EditResult};
use crate::export::{render_triangles, IndexedMesh, RenderTriangle};
use crate::primitives::Primitive;
use crate::raycast::{hover_edge, hover_vertex, raycast, Ray};
use crate::selection::{EditMode, SelectionState};
use crate::topology::{compact, Edge, RemapTable, TopologyStore};
use crate::transform::ObjectTransform;
use config::constants::ModelerConfig;
use drag::DragState;
use glam::DVec3;
use tracing::{info, warn};

/// An editing session over a single mesh.
///
/// # Example
///
/// ```rust
/// use mesh_modeler::MeshModeler;
///
/// let mut modeler = MeshModeler::default();
/// modeler.extrude_face(1, 1.0).unwrap();
/// assert_eq!(modeler.store().live_face_count(), 10);
/// assert_eq!(modeler.selection().selected_face, Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct MeshModeler {
    store: TopologyStore,
    transform: ObjectTransform,
    config: ModelerConfig,
    mode: EditMode,
    selection: SelectionState,
    knife: KnifeState,
    drag: Option<DragState>,
    status: String,
}

impl Default for MeshModeler {
    /// A default cube with the default configuration.
    fn default() -> Self {
        let store = Primitive::cube().build().unwrap_or_default();
        Self::from_store(store, ModelerConfig::default())
    }
}

impl MeshModeler {
    /// Creates a session starting from `primitive`.
    pub fn new(primitive: Primitive, config: ModelerConfig) -> EditResult<Self> {
        Self::validate_config(&config)?;
        let mut modeler = Self::from_store(TopologyStore::new(), config);
        modeler.reset_to(primitive)?;
        Ok(modeler)
    }

    /// Creates a session over an existing store, validating both first.
    pub fn with_store(store: TopologyStore, config: ModelerConfig) -> EditResult<Self> {
        Self::validate_config(&config)?;
        store.validate()?;
        let mut modeler = Self::from_store(store, config);
        compact(&mut modeler.store);
        modeler.check_limits()?;
        Ok(modeler)
    }

    fn validate_config(config: &ModelerConfig) -> EditResult<()> {
        config
            .validate()
            .map_err(|e| EditError::invalid_parameter(e.to_string()))
    }

    fn from_store(store: TopologyStore, config: ModelerConfig) -> Self {
        Self {
            store,
            transform: ObjectTransform::default(),
            config,
            mode: EditMode::default(),
            selection: SelectionState::default(),
            knife: KnifeState::default(),
            drag: None,
            status: String::new(),
        }
    }

    /// Replaces the mesh with a fresh primitive and resets every
    /// selection, knife and drag slot.
    pub fn reset_to(&mut self, primitive: Primitive) -> EditResult<()> {
        let result = primitive.build().and_then(|store| {
            Self::limit(store.vertex_count(), self.config.max_vertices, "vertices")?;
            Self::limit(store.face_count(), self.config.max_faces, "faces")?;
            Ok(store)
        });
        let result = result.map(|store| {
            self.store = store;
            self.selection.clear();
            self.knife.reset();
            self.drag = None;
        });
        self.report(&format!("Reset to {}", primitive.name()), result)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The topology, for drawing and inspection.
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// Current edge list. Edge indices used by the session refer to it.
    pub fn edges(&self) -> Vec<Edge> {
        self.store.build_edges()
    }

    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    /// Moves or scales the object.
    pub fn set_transform(&mut self, position: DVec3, scale: DVec3) -> EditResult<()> {
        let result = ObjectTransform::new(position, scale).map(|t| self.transform = t);
        self.report("Set transform", result)
    }

    pub fn config(&self) -> &ModelerConfig {
        &self.config
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switches the element kind picking works on and clears hover.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.selection.clear_hover();
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Outcome of the last edit, for the status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Loop, ring and selected edges.
    pub fn active_edges(&self) -> Vec<usize> {
        self.selection.active_edges()
    }

    // =========================================================================
    // Picking
    // =========================================================================

    /// Resolves the hovered element for the current mode.
    pub fn update_hover(&mut self, ray: &Ray) -> Option<usize> {
        self.selection.clear_hover();
        match self.mode {
            EditMode::Face => {
                self.selection.hovered_face = raycast(&self.store, &self.transform, ray).map(|hit| hit.face);
                self.selection.hovered_face
            }
            EditMode::Edge => {
                let edges = self.store.build_edges();
                self.selection.hovered_edge =
                    hover_edge(&self.store, &edges, &self.transform, ray, self.config.hover_radius)
                        .map(|hit| hit.index);
                self.selection.hovered_edge
            }
            EditMode::Vertex => {
                self.selection.hovered_vertex =
                    hover_vertex(&self.store, &self.transform, ray, self.config.hover_radius)
                        .map(|hit| hit.index);
                self.selection.hovered_vertex
            }
        }
    }

    /// Promotes the hovered element under `ray` to the selection.
    ///
    /// With `additive`, faces and vertices toggle in the multi-selection
    /// lists and edges toggle in the loop set. A miss without `additive`
    /// clears the selection of the current kind.
    pub fn pick(&mut self, ray: &Ray, additive: bool) -> Option<usize> {
        let hit = self.update_hover(ray);
        let sel = &mut self.selection;
        match (self.mode, hit) {
            (EditMode::Face, Some(face)) => {
                toggle_or_replace(&mut sel.face_selection, face, additive);
                sel.select_face(face);
            }
            (EditMode::Edge, Some(edge)) => {
                if additive {
                    toggle(&mut sel.loop_edges, edge);
                } else {
                    sel.loop_edges.clear();
                    sel.ring_edges.clear();
                }
                sel.select_edge(edge);
            }
            (EditMode::Vertex, Some(vertex)) => {
                toggle_or_replace(&mut sel.vertex_selection, vertex, additive);
                sel.select_vertex(vertex);
            }
            (_, None) if !additive => match self.mode {
                EditMode::Face => {
                    sel.selected_face = None;
                    sel.face_selection.clear();
                }
                EditMode::Edge => {
                    sel.selected_edge = None;
                    sel.loop_edges.clear();
                    sel.ring_edges.clear();
                }
                EditMode::Vertex => {
                    sel.selected_vertex = None;
                    sel.vertex_selection.clear();
                }
            },
            (_, None) => {}
        }
        hit
    }

    /// Selects a face by index.
    pub fn select_face(&mut self, face: usize) -> EditResult<()> {
        let result = self.store.live_face(face).map(|_| {
            self.selection.select_face(face);
            self.selection.face_selection = vec![face];
        });
        self.report("Select face", result)
    }

    /// Selects an edge of the current edge list.
    pub fn select_edge(&mut self, edge: usize) -> EditResult<()> {
        let result = self.edge(edge).map(|_| self.selection.select_edge(edge));
        self.report("Select edge", result)
    }

    /// Selects a vertex by index.
    pub fn select_vertex(&mut self, vertex: usize) -> EditResult<()> {
        let result = self.store.live_vertex(vertex).map(|_| {
            self.selection.select_vertex(vertex);
            self.selection.vertex_selection = vec![vertex];
        });
        self.report("Select vertex", result)
    }

    /// Drops every selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Fills bridge operand `slot` (0 or 1) with an edge.
    pub fn set_bridge_operand(&mut self, slot: usize, edge: usize) -> EditResult<()> {
        let result = if slot > 1 {
            Err(EditError::invalid_parameter(format!("bridge slot must be 0 or 1: {slot}")))
        } else {
            self.edge(edge).map(|_| self.selection.bridge_edges[slot] = Some(edge))
        };
        self.report("Set bridge edge", result)
    }

    /// Fills the merge operands.
    pub fn set_merge_operands(&mut self, keep: usize, remove: usize) -> EditResult<()> {
        let result = self
            .store
            .live_vertex(keep)
            .and_then(|_| self.store.live_vertex(remove))
            .map(|_| {
                self.selection.merge_keep = Some(keep);
                self.selection.merge_remove = Some(remove);
            });
        self.report("Set merge vertices", result)
    }

    // =========================================================================
    // Edit plumbing
    // =========================================================================

    /// Resolves an edge index against the current edge list.
    fn edge(&self, index: usize) -> EditResult<Edge> {
        crate::ops::edge_at(&self.store.build_edges(), index)
    }

    fn limit(count: usize, max: usize, what: &'static str) -> EditResult<()> {
        if count > max {
            return Err(EditError::LimitExceeded { what, count, max });
        }
        Ok(())
    }

    fn check_limits(&self) -> EditResult<()> {
        Self::limit(self.store.vertex_count(), self.config.max_vertices, "vertices")?;
        Self::limit(self.store.face_count(), self.config.max_faces, "faces")
    }

    /// Runs a mutating operation, compacts, enforces limits and remaps the
    /// selection. The store is restored on any error.
    fn edit<T>(
        &mut self,
        action: &str,
        op: impl FnOnce(&mut TopologyStore) -> EditResult<T>,
    ) -> EditResult<(T, RemapTable)> {
        let old_edges = self.store.build_edges();
        let snapshot = self.store.clone();

        let result = op(&mut self.store).and_then(|value| {
            let table = compact(&mut self.store);
            self.check_limits()?;
            Ok((value, table))
        });

        match result {
            Ok((value, table)) => {
                let new_edges = self.store.build_edges();
                self.selection.remap(&table, &old_edges, &new_edges);
                self.knife.reset();
                self.drag = None;
                self.report(action, Ok((value, table)))
            }
            Err(err) => {
                self.store = snapshot;
                self.report(action, Err(err))
            }
        }
    }

    /// Records the outcome of `action` in the status line and the log.
    fn report<T>(&mut self, action: &str, result: EditResult<T>) -> EditResult<T> {
        match &result {
            Ok(_) => {
                info!(
                    action,
                    vertices = self.store.vertex_count(),
                    faces = self.store.face_count(),
                    "Edit applied"
                );
                self.status = action.to_string();
            }
            Err(err) => {
                warn!(action, error = %err, "Edit rejected");
                self.status = format!("{action}: {err}");
            }
        }
        result
    }

    /// Vertices moved by the current mode and selection, sorted.
    fn affected_vertices(&self) -> Vec<usize> {
        let sel = &self.selection;
        let mut vertices: Vec<usize> = match self.mode {
            EditMode::Vertex => sel
                .vertex_selection
                .iter()
                .chain(sel.selected_vertex.iter())
                .copied()
                .collect(),
            EditMode::Edge => {
                let edges = self.store.build_edges();
                sel.active_edges()
                    .into_iter()
                    .filter_map(|e| edges.get(e))
                    .flat_map(|e| [e.a, e.b])
                    .collect()
            }
            EditMode::Face => sel
                .face_selection
                .iter()
                .chain(sel.selected_face.iter())
                .filter_map(|&f| self.store.live_face(f).ok())
                .flat_map(|f| f.corners().to_vec())
                .collect(),
        };
        vertices.retain(|&v| self.store.is_live_vertex(v));
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Indexed triangle mesh of the live faces, in local space.
    pub fn export_mesh(&self) -> IndexedMesh {
        IndexedMesh::from_store(&self.store)
    }

    /// OBJ text of the live faces, in local space.
    pub fn to_obj(&self) -> String {
        self.export_mesh().to_obj()
    }

    /// Replaces the mesh with the triangles of an OBJ document.
    pub fn import_obj(&mut self, text: &str) -> EditResult<()> {
        let result = IndexedMesh::from_obj(text).and_then(|mesh| {
            let mut store = TopologyStore::from_indexed(&mesh)?;
            compact(&mut store);
            Self::limit(store.vertex_count(), self.config.max_vertices, "vertices")?;
            Self::limit(store.face_count(), self.config.max_faces, "faces")?;
            Ok(store)
        });
        let result = result.map(|store| {
            self.store = store;
            self.selection.clear();
            self.knife.reset();
            self.drag = None;
        });
        self.report("Import OBJ", result)
    }

    /// Flat-shaded triangles for the renderer, in local space.
    pub fn render_triangles(&self) -> Vec<RenderTriangle> {
        render_triangles(&self.store)
    }

    /// World-space centroid of the vertices the selection would move.
    pub fn selection_pivot(&self) -> Option<DVec3> {
        let vertices = self.affected_vertices();
        if vertices.is_empty() {
            return None;
        }
        let sum: DVec3 = vertices.iter().map(|&v| self.store.position(v)).sum();
        Some(self.transform.to_world(sum / vertices.len() as f64))
    }
}

fn toggle(list: &mut Vec<usize>, value: usize) {
    if let Some(at) = list.iter().position(|&v| v == value) {
        list.remove(at);
    } else {
        list.push(value);
    }
}

fn toggle_or_replace(list: &mut Vec<usize>, value: usize, additive: bool) {
    if additive {
        toggle(list, value);
    } else {
        list.clear();
        list.push(value);
    }
}
