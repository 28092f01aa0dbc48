//! # Configuration Constants
//!
//! Centralized constants for the mesh modeler. All geometric tolerances,
//! tool thresholds, editor defaults and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tool Thresholds**: Dissolve, bevel and knife decision values
//! - **Hover**: Picking radii and scoring weights
//! - **Defaults**: Values the editor panels start with
//! - **Limits**: Maximum values for safety bounds

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for ray/triangle determinants, segment intersection denominators and
/// any "is this value zero" decision inside the kernel.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum length of a cross product before it is treated as degenerate.
///
/// Face normals, edge directions and bevel side vectors shorter than this
/// fall back to safe defaults instead of being normalized.
///
/// # Example
///
/// ```rust
/// use config::constants::NORMAL_EPSILON;
///
/// let cross_length = 1e-12;
/// assert!(cross_length < NORMAL_EPSILON);
/// ```
pub const NORMAL_EPSILON: f64 = 1e-8;

/// Parameter distance from an edge endpoint at which a knife crossing
/// reuses the endpoint instead of creating a new vertex.
///
/// # Example
///
/// ```rust
/// use config::constants::KNIFE_ENDPOINT_EPSILON;
///
/// let s = 0.99995;
/// assert!(1.0 - s < KNIFE_ENDPOINT_EPSILON);
/// ```
pub const KNIFE_ENDPOINT_EPSILON: f64 = 1e-4;

/// Minimum world distance between two knife clicks.
pub const KNIFE_MIN_STROKE_LENGTH: f64 = 1e-5;

// =============================================================================
// TOOL THRESHOLDS
// =============================================================================

/// Minimum dot product between face normals for a neighbor to be merged
/// by face dissolve.
///
/// # Example
///
/// ```rust
/// use config::constants::DISSOLVE_COPLANAR_MIN_DOT;
///
/// let perpendicular = 0.0;
/// assert!(perpendicular < DISSOLVE_COPLANAR_MIN_DOT);
/// ```
pub const DISSOLVE_COPLANAR_MIN_DOT: f64 = 0.75;

/// Absolute dot product above which two bevel side directions are treated
/// as the same side.
pub const BEVEL_SIDE_PARALLEL_DOT: f64 = 0.98;

/// Upper clamp of the bevel miter factor.
///
/// # Example
///
/// ```rust
/// use config::constants::BEVEL_MITER_MAX;
///
/// let sharp_corner = 1.0 / (0.05_f64 / 2.0).sin();
/// assert_eq!(sharp_corner.clamp(1.0, BEVEL_MITER_MAX), BEVEL_MITER_MAX);
/// ```
pub const BEVEL_MITER_MAX: f64 = 3.5;

/// Fraction of the shortest neighboring edge a mitered bevel offset may
/// reach before it is capped.
pub const BEVEL_MITER_EDGE_FRACTION: f64 = 0.45;

/// Smallest loop-cut ratio accepted; the ratio is clamped to
/// `[LOOP_CUT_MIN_RATIO, 1 - LOOP_CUT_MIN_RATIO]`.
pub const LOOP_CUT_MIN_RATIO: f64 = 0.01;

// =============================================================================
// HOVER CONSTANTS
// =============================================================================

/// Maximum perpendicular distance (world units) between the pointer ray and
/// a vertex or edge for it to be hover-eligible.
pub const HOVER_LATERAL_RADIUS: f64 = 0.12;

/// Weight applied to the lateral distance when scoring hover candidates
/// (`along_ray + weight * lateral`).
///
/// # Example
///
/// ```rust
/// use config::constants::HOVER_LATERAL_WEIGHT;
///
/// let score = 2.0 + HOVER_LATERAL_WEIGHT * 0.1;
/// assert!((score - 2.3).abs() < 1e-12);
/// ```
pub const HOVER_LATERAL_WEIGHT: f64 = 3.0;

// =============================================================================
// EDITOR DEFAULTS
// =============================================================================

/// Default face/edge extrusion distance.
pub const DEFAULT_EXTRUDE_DISTANCE: f64 = 0.6;

/// Default bevel width.
pub const DEFAULT_BEVEL_DISTANCE: f64 = 0.15;

/// Default number of bevel segments.
pub const DEFAULT_BEVEL_SEGMENTS: u32 = 2;

/// Default bevel profile exponent (1.0 is linear spacing).
pub const DEFAULT_BEVEL_PROFILE: f64 = 1.0;

/// Whether bevels apply the miter correction by default.
pub const DEFAULT_BEVEL_USE_MITER: bool = true;

/// Default loop-cut position along the parallel rails.
pub const DEFAULT_LOOP_CUT_RATIO: f64 = 0.5;

/// Default edge length of the cube and plane primitives.
pub const DEFAULT_PRIMITIVE_SIZE: f64 = 1.0;

/// Default radius of round primitives.
pub const DEFAULT_PRIMITIVE_RADIUS: f64 = 0.75;

/// Default total height of capsules, cylinders and cones.
pub const DEFAULT_PRIMITIVE_HEIGHT: f64 = 1.8;

/// Default ring segment count of circles.
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 24;

/// Default latitude band count of UV spheres.
pub const DEFAULT_SPHERE_LAT_SEGMENTS: u32 = 18;

/// Default longitude segment count of UV spheres.
pub const DEFAULT_SPHERE_LON_SEGMENTS: u32 = 32;

/// Default ring segment count of capsules, cylinders and cones.
pub const DEFAULT_CAPSULE_SEGMENTS: u32 = 24;

/// Default ring count of each capsule hemisphere.
pub const DEFAULT_CAPSULE_HEMI_RINGS: u32 = 8;

/// Default ring count of the capsule's cylindrical section.
pub const DEFAULT_CAPSULE_CYLINDER_RINGS: u32 = 4;

/// Default world position of a freshly reset mesh object.
pub const DEFAULT_OBJECT_POSITION: [f64; 3] = [0.0, 1.1, 0.0];

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertex slots (live or tombstoned) in the modeler.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_MODELER_VERTICES;
///
/// let requested = 70_000;
/// assert!(requested > MAX_MODELER_VERTICES);
/// ```
pub const MAX_MODELER_VERTICES: usize = 65_536;

/// Maximum number of face slots (live or tombstoned) in the modeler.
pub const MAX_MODELER_FACES: usize = 65_536;

/// Maximum bevel segment count.
pub const MAX_BEVEL_SEGMENTS: u32 = 16;

/// Maximum ring/band count of any round primitive.
pub const MAX_PRIMITIVE_SEGMENTS: u32 = 256;

/// Minimum ring segment count of any round primitive.
pub const MIN_PRIMITIVE_SEGMENTS: u32 = 3;

// =============================================================================
// MODELER CONFIG
// =============================================================================

/// Bevel tool settings.
///
/// # Examples
/// ```
/// use config::constants::BevelSettings;
/// let bevel = BevelSettings::default();
/// assert_eq!(bevel.segments, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BevelSettings {
    /// Offset distance of the outermost bevel row.
    pub distance: f64,
    /// Number of rows per side.
    pub segments: u32,
    /// Exponent shaping the row spacing.
    pub profile: f64,
    /// Apply the per-endpoint miter correction.
    pub use_miter: bool,
}

impl Default for BevelSettings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_BEVEL_DISTANCE,
            segments: DEFAULT_BEVEL_SEGMENTS,
            profile: DEFAULT_BEVEL_PROFILE,
            use_miter: DEFAULT_BEVEL_USE_MITER,
        }
    }
}

/// Immutable snapshot of the modeler's tool settings and limits.
///
/// # Examples
/// ```
/// use config::constants::ModelerConfig;
/// let config = ModelerConfig::default();
/// assert!(config.extrude_distance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelerConfig {
    /// Distance used by extrude when the host passes none.
    pub extrude_distance: f64,
    /// Bevel tool settings.
    pub bevel: BevelSettings,
    /// Loop-cut rail ratio.
    pub loop_cut_ratio: f64,
    /// Hover pick radius around the pointer ray.
    pub hover_radius: f64,
    /// Vertex slot budget.
    pub max_vertices: usize,
    /// Face slot budget.
    pub max_faces: usize,
}

impl ModelerConfig {
    /// Builds a configuration, validating every tool setting.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{BevelSettings, ModelerConfig};
    /// let cfg = ModelerConfig::new(0.5, BevelSettings::default(), 0.5).expect("valid config");
    /// assert_eq!(cfg.extrude_distance, 0.5);
    /// ```
    pub fn new(
        extrude_distance: f64,
        bevel: BevelSettings,
        loop_cut_ratio: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            extrude_distance,
            bevel,
            loop_cut_ratio,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.extrude_distance.is_finite() || self.extrude_distance.abs() < EPSILON {
            return Err(ConfigError::InvalidDistance(self.extrude_distance));
        }
        if !self.bevel.distance.is_finite() || self.bevel.distance <= 0.0 {
            return Err(ConfigError::InvalidDistance(self.bevel.distance));
        }
        if self.bevel.segments == 0 || self.bevel.segments > MAX_BEVEL_SEGMENTS {
            return Err(ConfigError::InvalidSegments(self.bevel.segments));
        }
        if !self.bevel.profile.is_finite() || self.bevel.profile <= 0.0 {
            return Err(ConfigError::InvalidProfile(self.bevel.profile));
        }
        if !(self.loop_cut_ratio > 0.0 && self.loop_cut_ratio < 1.0) {
            return Err(ConfigError::InvalidRatio(self.loop_cut_ratio));
        }
        if !self.hover_radius.is_finite() || self.hover_radius <= 0.0 {
            return Err(ConfigError::InvalidDistance(self.hover_radius));
        }
        if self.max_vertices == 0 || self.max_faces == 0 {
            return Err(ConfigError::InvalidLimit);
        }
        Ok(())
    }
}

impl Default for ModelerConfig {
    fn default() -> Self {
        Self {
            extrude_distance: DEFAULT_EXTRUDE_DISTANCE,
            bevel: BevelSettings::default(),
            loop_cut_ratio: DEFAULT_LOOP_CUT_RATIO,
            hover_radius: HOVER_LATERAL_RADIUS,
            max_vertices: MAX_MODELER_VERTICES,
            max_faces: MAX_MODELER_FACES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a distance is zero, negative or non-finite.
    InvalidDistance(f64),
    /// Raised when the bevel segment count is outside `1..=MAX_BEVEL_SEGMENTS`.
    InvalidSegments(u32),
    /// Raised when the bevel profile is not a positive finite exponent.
    InvalidProfile(f64),
    /// Raised when a ratio is outside the open interval (0, 1).
    InvalidRatio(f64),
    /// Raised when a vertex or face budget is zero.
    InvalidLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDistance(value) => {
                write!(f, "distance must be positive and finite: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "bevel segments must be in 1..={MAX_BEVEL_SEGMENTS}: {value}")
            }
            ConfigError::InvalidProfile(value) => {
                write!(f, "bevel profile must be positive: {value}")
            }
            ConfigError::InvalidRatio(value) => {
                write!(f, "ratio must be inside (0, 1): {value}")
            }
            ConfigError::InvalidLimit => write!(f, "vertex and face limits must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Clamps a loop-cut ratio into the accepted open range.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_loop_cut_ratio;
///
/// assert_eq!(clamp_loop_cut_ratio(0.5), 0.5);
/// assert!(clamp_loop_cut_ratio(1.5) < 1.0);
/// ```
#[inline]
pub fn clamp_loop_cut_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return DEFAULT_LOOP_CUT_RATIO;
    }
    ratio.clamp(LOOP_CUT_MIN_RATIO, 1.0 - LOOP_CUT_MIN_RATIO)
}

#[cfg(test)]
mod tests;
