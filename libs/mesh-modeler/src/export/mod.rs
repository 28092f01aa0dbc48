//! # Export
//!
//! Read-only views of the topology for collaborators:
//! - [`IndexedMesh`]: one record per surviving vertex plus triangle records,
//!   with OBJ text export and import
//! - [`render_triangles`]: flat-shaded triangle list for the renderer

pub mod mesh;
pub mod obj;

pub use mesh::{render_buffers, render_triangles, IndexedMesh, RenderTriangle};
