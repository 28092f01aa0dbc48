//! # Edit Errors
//!
//! Error types for mesh editing operations.
//!
//! Every operation either completes or returns one of these errors without
//! touching the topology. The session renders the error's `Display` output
//! as its status line.

use thiserror::Error;

/// Result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can occur while editing a mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Face index out of range or tombstoned
    #[error("Invalid face {index}")]
    InvalidFace { index: usize },

    /// Edge index not present in the current edge list
    #[error("Invalid edge {index} (mesh has {edge_count} edges)")]
    InvalidEdge { index: usize, edge_count: usize },

    /// Vertex index out of range or tombstoned
    #[error("Invalid vertex {index}")]
    InvalidVertex { index: usize },

    /// Quad-only operation given a triangle
    #[error("Face {face} has {vertex_count} vertices; operation requires a quad")]
    NotQuad { face: usize, vertex_count: usize },

    /// Near-zero normals, edges or strokes
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Request cannot be satisfied by the current topology
    #[error("Cannot apply: {message}")]
    Unsatisfiable { message: String },

    /// Out-of-range tool parameter
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Vertex or face budget would be exceeded
    #[error("Too many {what}: {count} (max: {max})")]
    LimitExceeded {
        what: &'static str,
        count: usize,
        max: usize,
    },

    /// Operation needs a selection that is not set
    #[error("Nothing selected: {what}")]
    NothingSelected { what: &'static str },

    /// Malformed OBJ input
    #[error("OBJ parse error on line {line}: {message}")]
    ObjParse { line: usize, message: String },
}

impl EditError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an unsatisfiable topology error.
    pub fn unsatisfiable(message: impl Into<String>) -> Self {
        Self::Unsatisfiable {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates an OBJ parse error.
    pub fn obj_parse(line: usize, message: impl Into<String>) -> Self {
        Self::ObjParse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_status_text() {
        let err = EditError::NotQuad {
            face: 3,
            vertex_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Face 3 has 3 vertices; operation requires a quad"
        );
    }

    #[test]
    fn test_helpers_build_variants() {
        assert!(matches!(
            EditError::degenerate("zero normal"),
            EditError::DegenerateGeometry { .. }
        ));
        assert!(matches!(
            EditError::unsatisfiable("no neighbor"),
            EditError::Unsatisfiable { .. }
        ));
        assert_eq!(
            EditError::obj_parse(7, "bad index").to_string(),
            "OBJ parse error on line 7: bad index"
        );
    }
}
