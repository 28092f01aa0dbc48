//! Tests for the modeler configuration snapshot.

use super::*;

/// Ensures default settings pass their own validation.
///
/// # Examples
/// ```
/// use config::constants::ModelerConfig;
/// assert!(ModelerConfig::default().validate().is_ok());
/// ```
#[test]
fn default_config_is_valid() {
    let cfg = ModelerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.bevel, BevelSettings::default());
    assert_eq!(cfg.loop_cut_ratio, DEFAULT_LOOP_CUT_RATIO);
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        ModelerConfig::new(0.0, BevelSettings::default(), 0.5).unwrap_err(),
        ConfigError::InvalidDistance(0.0)
    );
    assert_eq!(
        ModelerConfig::new(0.6, BevelSettings::default(), 1.0).unwrap_err(),
        ConfigError::InvalidRatio(1.0)
    );

    let bevel = BevelSettings {
        segments: 0,
        ..BevelSettings::default()
    };
    assert_eq!(
        ModelerConfig::new(0.6, bevel, 0.5).unwrap_err(),
        ConfigError::InvalidSegments(0)
    );

    let bevel = BevelSettings {
        profile: -1.0,
        ..BevelSettings::default()
    };
    assert_eq!(
        ModelerConfig::new(0.6, bevel, 0.5).unwrap_err(),
        ConfigError::InvalidProfile(-1.0)
    );
}

#[test]
fn negative_extrude_distance_is_allowed() {
    // Extruding inward is a valid edit.
    assert!(ModelerConfig::new(-0.3, BevelSettings::default(), 0.5).is_ok());
}

#[test]
fn errors_render_human_readable() {
    let message = ConfigError::InvalidRatio(2.0).to_string();
    assert!(message.contains("ratio"));
    assert!(message.contains('2'));
}
