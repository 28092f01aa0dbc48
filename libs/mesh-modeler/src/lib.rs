//! # Mesh Modeler
//!
//! Polygon mesh editing kernel for the level editor.
//! Holds one quad/triangle mesh and applies interactive topology edits to
//! it while keeping every index the editor holds valid.
//!
//! ## Architecture
//!
//! ```text
//! primitives → topology (arena + tombstones) ← ops (face, edge, knife)
//!                   │                               ↑
//!                   ├── compact → RemapTable → selection
//!                   └── export (IndexedMesh, OBJ, render triangles)
//!
//! modeler (session: picking, selection, knife protocol, drag, status)
//! ```
//!
//! ## Operations
//!
//! - **Face**: extrude, subdivide, axis cut, delete, dissolve
//! - **Edge**: extrude, bevel, loop cut, loop/ring select, dissolve, bridge
//! - **Vertex**: merge, split, move, drag
//! - **Knife**: two-click cut across any number of faces
//!
//! ## Usage
//!
//! ```rust
//! use mesh_modeler::{MeshModeler, Primitive};
//! use config::constants::ModelerConfig;
//!
//! let mut modeler = MeshModeler::new(Primitive::cube(), ModelerConfig::default()).unwrap();
//! modeler.select_face(1).unwrap();
//! modeler.extrude_selected_face().unwrap();
//!
//! let mesh = modeler.export_mesh();
//! assert_eq!(mesh.vertex_count(), 12);
//! assert_eq!(mesh.triangle_count(), 20);
//! ```

pub mod error;
pub mod export;
pub mod modeler;
pub mod ops;
pub mod primitives;
pub mod raycast;
pub mod selection;
pub mod topology;
pub mod transform;

pub use error::{EditError, EditResult};
pub use export::{IndexedMesh, RenderTriangle};
pub use modeler::{KnifeClick, MeshModeler};
pub use primitives::Primitive;
pub use raycast::Ray;
pub use selection::{EditMode, SelectionState};
pub use topology::{Edge, Face, TopologyStore};
pub use transform::ObjectTransform;
