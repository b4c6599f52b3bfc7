//! Course level and enrollment period vocabularies.
//!
//! The API stores both as single-letter codes (matching the legacy wire
//! format) and exposes the spelled-out form on read endpoints that need it.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Course levels
-------------------------------------------------------------------------- */

/// Basic level course.
pub const LEVEL_BASIC: &str = "B";

/// Intermediate level course.
pub const LEVEL_INTERMEDIATE: &str = "I";

/// Advanced level course.
pub const LEVEL_ADVANCED: &str = "A";

/// All valid course level codes.
pub const VALID_COURSE_LEVELS: &[&str] = &[LEVEL_BASIC, LEVEL_INTERMEDIATE, LEVEL_ADVANCED];

/// Validate that a course level code is one of the accepted values.
pub fn validate_course_level(level: &str) -> Result<(), CoreError> {
    if VALID_COURSE_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid course level '{level}'. Must be one of: {}",
            VALID_COURSE_LEVELS.join(", ")
        )))
    }
}

/// Spelled-out form of a course level code, if valid.
pub fn course_level_display(level: &str) -> Option<&'static str> {
    match level {
        LEVEL_BASIC => Some("básico"),
        LEVEL_INTERMEDIATE => Some("intermediário"),
        LEVEL_ADVANCED => Some("avançado"),
        _ => None,
    }
}

/* --------------------------------------------------------------------------
Enrollment periods
-------------------------------------------------------------------------- */

/// Morning period.
pub const PERIOD_MORNING: &str = "M";

/// Afternoon period.
pub const PERIOD_AFTERNOON: &str = "V";

/// Evening period.
pub const PERIOD_EVENING: &str = "N";

/// All valid enrollment period codes.
pub const VALID_ENROLLMENT_PERIODS: &[&str] =
    &[PERIOD_MORNING, PERIOD_AFTERNOON, PERIOD_EVENING];

/// Validate that an enrollment period code is one of the accepted values.
pub fn validate_enrollment_period(period: &str) -> Result<(), CoreError> {
    if VALID_ENROLLMENT_PERIODS.contains(&period) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid enrollment period '{period}'. Must be one of: {}",
            VALID_ENROLLMENT_PERIODS.join(", ")
        )))
    }
}

/// Spelled-out form of an enrollment period code, if valid.
///
/// Enrollment listings serialize the period in this form rather than as
/// the stored single-letter code.
pub fn enrollment_period_display(period: &str) -> Option<&'static str> {
    match period {
        PERIOD_MORNING => Some("matutino"),
        PERIOD_AFTERNOON => Some("vespertino"),
        PERIOD_EVENING => Some("noturno"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_levels_accepted() {
        for level in VALID_COURSE_LEVELS {
            assert!(validate_course_level(level).is_ok());
        }
    }

    #[test]
    fn test_unknown_level_rejected() {
        let err = validate_course_level("X").unwrap_err();
        assert!(err.to_string().contains("Invalid course level 'X'"));
    }

    #[test]
    fn test_period_display_names() {
        assert_eq!(enrollment_period_display("M"), Some("matutino"));
        assert_eq!(enrollment_period_display("V"), Some("vespertino"));
        assert_eq!(enrollment_period_display("N"), Some("noturno"));
        assert_eq!(enrollment_period_display("Z"), None);
    }

    #[test]
    fn test_lowercase_codes_rejected() {
        assert!(validate_enrollment_period("m").is_err());
        assert!(validate_course_level("b").is_err());
    }
}
