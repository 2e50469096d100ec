//! Field validators for KML value types
//!
//! Every validator returns the accepted value or a [`KmlError::Validation`]
//! naming the field. Nothing is coerced.

use crate::error::KmlError;

/// Length of a KML color string (`aabbggrr`)
pub const COLOR_LEN: usize = 8;

pub const ALTITUDE_MODES: &[&str] = &["clampToGround", "relativeToGround", "absolute"];
pub const COLOR_MODES: &[&str] = &["normal", "random"];
pub const DISPLAY_MODES: &[&str] = &["default", "hide"];

/// Validate a color: exactly 8 hex digits in alpha-blue-green-red order
pub fn color(field: &str, value: &str) -> Result<String, KmlError> {
    let len = value.chars().count();
    if len != COLOR_LEN {
        return Err(KmlError::validation(
            field,
            format!(
                "color must have exactly {} characters, got {} ('{}')",
                COLOR_LEN, len, value
            ),
        ));
    }
    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(KmlError::validation(
            field,
            format!("color '{}' contains non-hexadecimal characters", value),
        ));
    }
    Ok(value.to_string())
}

/// Validate that `value` is one of `choices`
pub fn choice(field: &str, value: &str, choices: &[&str]) -> Result<String, KmlError> {
    if choices.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(KmlError::validation(
            field,
            format!("'{}' must be one of {}", value, choices.join(", ")),
        ))
    }
}

/// Validate a numeric boolean, which KML only accepts as 0 or 1
pub fn num_boolean(field: &str, value: i64) -> Result<u8, KmlError> {
    match value {
        0 => Ok(0),
        1 => Ok(1),
        other => Err(KmlError::validation(
            field,
            format!("expected 0 or 1, got {}", other),
        )),
    }
}

/// Finite number that is not negative (line widths)
pub fn non_negative(field: &str, value: f64) -> Result<f64, KmlError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(KmlError::validation(
            field,
            format!("expected a finite, non-negative number, got {}", value),
        ))
    }
}

fn angle_in(field: &str, value: f64, min: f64, max: f64) -> Result<f64, KmlError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(KmlError::validation(
            field,
            format!("angle {} is outside [{}, {}]", value, min, max),
        ))
    }
}

/// Angle in [-90, 90]
pub fn angle90(field: &str, value: f64) -> Result<f64, KmlError> {
    angle_in(field, value, -90.0, 90.0)
}

/// Angle in [0, 90]
pub fn anglepos90(field: &str, value: f64) -> Result<f64, KmlError> {
    angle_in(field, value, 0.0, 90.0)
}

/// Angle in [-180, 180]
pub fn angle180(field: &str, value: f64) -> Result<f64, KmlError> {
    angle_in(field, value, -180.0, 180.0)
}

/// Angle in [-360, 360]
pub fn angle360(field: &str, value: f64) -> Result<f64, KmlError> {
    angle_in(field, value, -360.0, 360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative("width", 0.0).unwrap(), 0.0);
        assert_eq!(non_negative("width", 2.5).unwrap(), 2.5);
        assert!(non_negative("width", -1.0).is_err());
        assert!(non_negative("width", f64::NAN).is_err());
        assert!(non_negative("width", f64::INFINITY).is_err());
    }

    #[test]
    fn test_color_accepts_eight_hex_digits() {
        assert_eq!(color("color", "ff0000ff").unwrap(), "ff0000ff");
        assert_eq!(color("color", "A1B2C3D4").unwrap(), "A1B2C3D4");
    }

    #[test]
    fn test_color_rejects_wrong_length() {
        for bad in ["", "123", "ff0000f", "ff0000ff0"] {
            let err = color("bgColor", bad).unwrap_err();
            assert_eq!(err.field(), Some("bgColor"));
        }
    }

    #[test]
    fn test_color_rejects_non_hex() {
        assert!(color("color", "ff0000zz").is_err());
    }

    #[test]
    fn test_choice() {
        assert!(choice("altitudeMode", "absolute", ALTITUDE_MODES).is_ok());
        assert!(choice("altitudeMode", "relativeToSeaFloor", ALTITUDE_MODES).is_err());
        assert!(choice("colorMode", "random", COLOR_MODES).is_ok());
        assert!(choice("displayMode", "show", DISPLAY_MODES).is_err());
    }

    #[test]
    fn test_num_boolean() {
        assert_eq!(num_boolean("fill", 0).unwrap(), 0);
        assert_eq!(num_boolean("fill", 1).unwrap(), 1);
        assert!(num_boolean("fill", 2).is_err());
        assert!(num_boolean("fill", -1).is_err());
    }

    #[test]
    fn test_angle_bounds_are_inclusive() {
        assert!(angle90("tilt", 90.0).is_ok());
        assert!(angle90("tilt", -90.0).is_ok());
        assert!(angle90("tilt", 90.5).is_err());
        assert!(anglepos90("tilt", -0.1).is_err());
        assert!(angle180("rotation", -180.0).is_ok());
        assert!(angle180("rotation", 181.0).is_err());
        assert!(angle360("heading", 360.0).is_ok());
        assert!(angle360("heading", f64::NAN).is_err());
    }
}
