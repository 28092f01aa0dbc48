//! # Wavefront OBJ
//!
//! Text export and import of [`IndexedMesh`].
//!
//! Only `v` and `f` records are meaningful; other records are ignored.
//! Face tokens may carry texture and normal references (`v/vt/vn`), and
//! negative indices count back from the last vertex. Polygons are fanned
//! from their first corner.

use super::IndexedMesh;
use crate::error::{EditError, EditResult};
use glam::DVec3;
use std::fmt::Write;

impl IndexedMesh {
    /// Writes the mesh as OBJ text with 1-based indices.
    pub fn to_obj(&self) -> String {
        let mut out = String::with_capacity(self.vertex_count() * 32 + self.triangle_count() * 24);
        out.push_str("# mesh-modeler export\n");
        for v in self.vertices() {
            let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
        }
        for [a, b, c] in self.triangles() {
            let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
        }
        out
    }

    /// Parses OBJ text.
    pub fn from_obj(text: &str) -> EditResult<Self> {
        let mut mesh = IndexedMesh::new();

        for (number, raw) in text.lines().enumerate() {
            let line = number + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            let mut tokens = content.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let mut coords = [0.0; 3];
                    for coord in &mut coords {
                        let token = tokens
                            .next()
                            .ok_or_else(|| EditError::obj_parse(line, "vertex needs 3 coordinates"))?;
                        *coord = token
                            .parse()
                            .map_err(|_| EditError::obj_parse(line, format!("bad coordinate '{token}'")))?;
                    }
                    mesh.add_vertex(DVec3::from_array(coords));
                }
                Some("f") => {
                    let corners = tokens
                        .map(|token| resolve_index(token, mesh.vertex_count(), line))
                        .collect::<EditResult<Vec<u32>>>()?;
                    if corners.len() < 3 {
                        return Err(EditError::obj_parse(line, "face needs at least 3 vertices"));
                    }
                    for i in 1..corners.len() - 1 {
                        mesh.add_triangle(corners[0], corners[i], corners[i + 1]);
                    }
                }
                _ => {}
            }
        }
        Ok(mesh)
    }
}

/// Resolves one face token to a 0-based vertex index.
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> EditResult<u32> {
    let head = token.split('/').next().unwrap_or_default();
    let value: i64 = head
        .parse()
        .map_err(|_| EditError::obj_parse(line, format!("bad face index '{token}'")))?;
    let resolved = match value {
        0 => None,
        v if v > 0 => Some(v - 1),
        v => Some(vertex_count as i64 + v),
    };
    resolved
        .filter(|&i| i >= 0 && (i as usize) < vertex_count)
        .map(|i| i as u32)
        .ok_or_else(|| EditError::obj_parse(line, format!("face index {value} out of range")))
}
