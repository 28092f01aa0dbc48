//! # Primitives
//!
//! Initial topology for the shapes the editor can spawn. Every primitive is
//! built in local space, Y up, with outward-facing counter-clockwise faces.
//!
//! Round shapes are stacks of rings stitched together by [`rings`]: a
//! single-vertex ring is a pole and is fanned, equal-count rings are joined
//! with quads.

pub mod capsule;
pub mod circle;
pub mod cube;
pub mod cylinder;
pub mod plane;
pub mod rings;
pub mod sphere;

pub use capsule::create_capsule;
pub use circle::create_circle;
pub use cube::create_cube;
pub use cylinder::{create_cone, create_cylinder};
pub use plane::create_plane;
pub use sphere::create_sphere;

use crate::error::{EditError, EditResult};
use crate::topology::TopologyStore;
use config::constants::{
    DEFAULT_CAPSULE_CYLINDER_RINGS, DEFAULT_CAPSULE_HEMI_RINGS, DEFAULT_CAPSULE_SEGMENTS,
    DEFAULT_CIRCLE_SEGMENTS, DEFAULT_PRIMITIVE_HEIGHT, DEFAULT_PRIMITIVE_RADIUS,
    DEFAULT_PRIMITIVE_SIZE, DEFAULT_SPHERE_LAT_SEGMENTS, DEFAULT_SPHERE_LON_SEGMENTS,
    MAX_PRIMITIVE_SEGMENTS, MIN_PRIMITIVE_SEGMENTS,
};
use serde::{Deserialize, Serialize};

/// A parameterized primitive shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Cube {
        size: f64,
    },
    Plane {
        size: f64,
    },
    Circle {
        segments: u32,
        radius: f64,
    },
    Sphere {
        lat_segments: u32,
        lon_segments: u32,
        radius: f64,
    },
    Capsule {
        segments: u32,
        hemi_rings: u32,
        cylinder_rings: u32,
        radius: f64,
        height: f64,
    },
    Cylinder {
        segments: u32,
        radius: f64,
        height: f64,
    },
    Cone {
        segments: u32,
        radius: f64,
        height: f64,
    },
}

impl Primitive {
    /// Cube with the editor's default size.
    pub fn cube() -> Self {
        Self::Cube {
            size: DEFAULT_PRIMITIVE_SIZE,
        }
    }

    /// Plane with the editor's default size.
    pub fn plane() -> Self {
        Self::Plane {
            size: DEFAULT_PRIMITIVE_SIZE,
        }
    }

    /// Circle with the editor's default resolution.
    pub fn circle() -> Self {
        Self::Circle {
            segments: DEFAULT_CIRCLE_SEGMENTS,
            radius: DEFAULT_PRIMITIVE_RADIUS,
        }
    }

    /// Sphere with the editor's default resolution.
    pub fn sphere() -> Self {
        Self::Sphere {
            lat_segments: DEFAULT_SPHERE_LAT_SEGMENTS,
            lon_segments: DEFAULT_SPHERE_LON_SEGMENTS,
            radius: DEFAULT_PRIMITIVE_RADIUS,
        }
    }

    /// Capsule with the editor's default resolution.
    pub fn capsule() -> Self {
        Self::Capsule {
            segments: DEFAULT_CAPSULE_SEGMENTS,
            hemi_rings: DEFAULT_CAPSULE_HEMI_RINGS,
            cylinder_rings: DEFAULT_CAPSULE_CYLINDER_RINGS,
            radius: DEFAULT_PRIMITIVE_RADIUS,
            height: DEFAULT_PRIMITIVE_HEIGHT,
        }
    }

    /// Display name used in status messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cube { .. } => "cube",
            Self::Plane { .. } => "plane",
            Self::Circle { .. } => "circle",
            Self::Sphere { .. } => "sphere",
            Self::Capsule { .. } => "capsule",
            Self::Cylinder { .. } => "cylinder",
            Self::Cone { .. } => "cone",
        }
    }

    /// Builds the topology.
    pub fn build(&self) -> EditResult<TopologyStore> {
        match *self {
            Self::Cube { size } => create_cube(size),
            Self::Plane { size } => create_plane(size),
            Self::Circle { segments, radius } => create_circle(segments, radius),
            Self::Sphere {
                lat_segments,
                lon_segments,
                radius,
            } => create_sphere(lat_segments, lon_segments, radius),
            Self::Capsule {
                segments,
                hemi_rings,
                cylinder_rings,
                radius,
                height,
            } => create_capsule(segments, hemi_rings, cylinder_rings, radius, height),
            Self::Cylinder {
                segments,
                radius,
                height,
            } => create_cylinder(segments, radius, height),
            Self::Cone {
                segments,
                radius,
                height,
            } => create_cone(segments, radius, height),
        }
    }
}

/// Rejects non-positive or non-finite lengths.
pub(crate) fn require_positive(name: &str, value: f64) -> EditResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EditError::invalid_parameter(format!(
            "{name} must be positive: {value}"
        )));
    }
    Ok(())
}

/// Rejects segment counts outside the supported range.
pub(crate) fn require_segments(name: &str, value: u32, min: u32) -> EditResult<()> {
    let min = min.max(1);
    if value < min || value > MAX_PRIMITIVE_SEGMENTS {
        return Err(EditError::invalid_parameter(format!(
            "{name} must be in {min}..={MAX_PRIMITIVE_SEGMENTS}: {value}"
        )));
    }
    Ok(())
}

/// Ring segment counts share the polygon minimum.
pub(crate) fn require_ring_segments(value: u32) -> EditResult<()> {
    require_segments("segments", value, MIN_PRIMITIVE_SEGMENTS)
}
