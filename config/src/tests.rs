//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_normal_epsilon_larger_than_epsilon() {
    assert!(
        NORMAL_EPSILON >= EPSILON,
        "NORMAL_EPSILON should be >= EPSILON"
    );
}

#[test]
fn test_knife_endpoint_epsilon_is_small() {
    assert!(KNIFE_ENDPOINT_EPSILON > 0.0);
    assert!(KNIFE_ENDPOINT_EPSILON < 0.01);
}

// =============================================================================
// THRESHOLD TESTS
// =============================================================================

#[test]
fn test_dissolve_threshold_is_a_cosine() {
    assert!(DISSOLVE_COPLANAR_MIN_DOT > 0.0 && DISSOLVE_COPLANAR_MIN_DOT < 1.0);
}

#[test]
fn test_bevel_side_dot_is_a_cosine() {
    assert!(BEVEL_SIDE_PARALLEL_DOT > 0.9 && BEVEL_SIDE_PARALLEL_DOT < 1.0);
}

#[test]
fn test_miter_bounds() {
    assert!(BEVEL_MITER_MAX > 1.0);
    assert!(BEVEL_MITER_EDGE_FRACTION > 0.0 && BEVEL_MITER_EDGE_FRACTION < 0.5);
}

// =============================================================================
// DEFAULT TESTS
// =============================================================================

#[test]
fn test_defaults_match_editor_panels() {
    assert_eq!(DEFAULT_EXTRUDE_DISTANCE, 0.6);
    assert_eq!(DEFAULT_BEVEL_DISTANCE, 0.15);
    assert_eq!(DEFAULT_BEVEL_SEGMENTS, 2);
    assert_eq!(DEFAULT_LOOP_CUT_RATIO, 0.5);
    assert_eq!(DEFAULT_CIRCLE_SEGMENTS, 24);
}

#[test]
fn test_primitive_segment_defaults_within_limits() {
    for segments in [
        DEFAULT_CIRCLE_SEGMENTS,
        DEFAULT_SPHERE_LAT_SEGMENTS,
        DEFAULT_SPHERE_LON_SEGMENTS,
        DEFAULT_CAPSULE_SEGMENTS,
    ] {
        assert!(segments >= MIN_PRIMITIVE_SEGMENTS);
        assert!(segments <= MAX_PRIMITIVE_SEGMENTS);
    }
}

// =============================================================================
// HELPER FUNCTION TESTS
// =============================================================================

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(1e-11));
    assert!(!approx_zero(1e-5));
}

#[test]
fn test_clamp_loop_cut_ratio() {
    assert_eq!(clamp_loop_cut_ratio(0.25), 0.25);
    assert_eq!(clamp_loop_cut_ratio(-3.0), LOOP_CUT_MIN_RATIO);
    assert_eq!(clamp_loop_cut_ratio(3.0), 1.0 - LOOP_CUT_MIN_RATIO);
    assert_eq!(clamp_loop_cut_ratio(f64::NAN), DEFAULT_LOOP_CUT_RATIO);
}
