//! # Object Transform
//!
//! Places the local-space mesh in the world. The kernel stores and edits
//! local positions; rays and drag deltas arrive in world space and are
//! mapped through this transform.

use crate::error::{EditError, EditResult};
use config::constants::{DEFAULT_OBJECT_POSITION, NORMAL_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Translation and per-axis scale of the edited object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub position: DVec3,
    pub scale: DVec3,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            position: DVec3::from_array(DEFAULT_OBJECT_POSITION),
            scale: DVec3::ONE,
        }
    }
}

impl ObjectTransform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        scale: DVec3::ONE,
    };

    /// Creates a transform, rejecting scales that cannot be inverted.
    pub fn new(position: DVec3, scale: DVec3) -> EditResult<Self> {
        if !position.is_finite() || !scale.is_finite() || scale.abs().min_element() < NORMAL_EPSILON
        {
            return Err(EditError::invalid_parameter(format!(
                "object scale must be finite and non-zero: {scale:?}"
            )));
        }
        Ok(Self { position, scale })
    }

    /// Local point to world.
    #[inline]
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        local * self.scale + self.position
    }

    /// World point to local.
    #[inline]
    pub fn to_local(&self, world: DVec3) -> DVec3 {
        (world - self.position) / self.scale
    }

    /// World displacement to local.
    #[inline]
    pub fn delta_to_local(&self, delta: DVec3) -> DVec3 {
        delta / self.scale
    }

    /// World direction to local, without renormalizing so ray parameters
    /// stay comparable in both spaces.
    #[inline]
    pub fn direction_to_local(&self, direction: DVec3) -> DVec3 {
        direction / self.scale
    }

    /// Local-space normal to a unit world-space normal.
    pub fn normal_to_world(&self, normal: DVec3) -> DVec3 {
        (normal / self.scale).try_normalize().unwrap_or(DVec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip() {
        let transform = ObjectTransform::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(2.0, 1.0, 0.5)).unwrap();
        let local = DVec3::new(0.25, -1.0, 4.0);
        let back = transform.to_local(transform.to_world(local));
        assert_relative_eq!(back.x, local.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, local.y, epsilon = 1e-12);
        assert_relative_eq!(back.z, local.z, epsilon = 1e-12);
    }

    #[test]
    fn test_default_lifts_object() {
        let transform = ObjectTransform::default();
        assert_eq!(transform.to_world(DVec3::ZERO), DVec3::new(0.0, 1.1, 0.0));
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(ObjectTransform::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_normal_follows_nonuniform_scale() {
        let transform = ObjectTransform::new(DVec3::ZERO, DVec3::new(1.0, 2.0, 1.0)).unwrap();
        let n = transform.normal_to_world(DVec3::new(1.0, 1.0, 0.0).normalize());
        assert!(n.x > n.y);
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
    }
}
