//! Grade validation rules.
//!
//! The grading endpoint is the only business-rule gate in the platform, so
//! its rules live here as pure functions the API handler sequences in
//! order (first failing rule wins):
//!
//! 1. value present and numerically parseable
//! 2. value within [`GRADE_MIN`, `GRADE_MAX`]
//! 3. date, when present, not before today
//! 4. an enrollment for (student, course) exists  -- repository check
//! 5. (student, course, evaluation, date) unique  -- repository check
//!
//! Rules 4 and 5 need the database; the handler consults the enrollment
//! and grade repositories and maps the outcome onto [`GradeRuleError`] so
//! every rejection renders the same field-keyed shape.

use chrono::NaiveDate;

/// Lowest accepted grade value.
pub const GRADE_MIN: f64 = 0.0;

/// Highest accepted grade value.
pub const GRADE_MAX: f64 = 10.0;

/// Evaluation label applied when the payload omits one.
pub const DEFAULT_EVALUATION: &str = "Prova";

/// A grade write rejection. Each variant maps to one payload field so the
/// API can mirror the submitted shape in its error body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradeRuleError {
    /// No value was supplied.
    #[error("grade is required")]
    Missing,

    /// The supplied value is not a number (or a numeric string).
    #[error("invalid grade")]
    Unparseable,

    /// The value falls outside the closed [0, 10] interval.
    #[error("grade must be between 0 and 10")]
    OutOfBounds,

    /// The date lies strictly before today.
    #[error("date cannot be retroactive")]
    RetroactiveDate,

    /// No enrollment links the student to the course.
    #[error("student is not enrolled in this course")]
    NotEnrolled,

    /// A grade already exists for (student, course, evaluation, date).
    #[error("a grade for this evaluation and date already exists")]
    Duplicate,
}

impl GradeRuleError {
    /// The payload field this rejection belongs to. Cross-field rules
    /// report under `non_field_errors`, matching the wire contract the
    /// form layer expects.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing | Self::Unparseable | Self::OutOfBounds => "valor",
            Self::RetroactiveDate => "data",
            Self::NotEnrolled | Self::Duplicate => "non_field_errors",
        }
    }
}

/// Rule 1: extract a numeric grade value from the raw JSON field.
///
/// Accepts a JSON number or a numeric string (the legacy API accepted
/// both). `None` and JSON `null` are "missing"; anything else that fails
/// to parse is "invalid".
pub fn parse_value(raw: Option<&serde_json::Value>) -> Result<f64, GradeRuleError> {
    match raw {
        None | Some(serde_json::Value::Null) => Err(GradeRuleError::Missing),
        Some(serde_json::Value::Number(n)) => n.as_f64().ok_or(GradeRuleError::Unparseable),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(GradeRuleError::Missing);
            }
            trimmed.parse::<f64>().map_err(|_| GradeRuleError::Unparseable)
        }
        Some(_) => Err(GradeRuleError::Unparseable),
    }
}

/// Rule 2: the closed-interval bounds check. NaN never passes.
pub fn validate_value(value: f64) -> Result<(), GradeRuleError> {
    if value.is_nan() || !(GRADE_MIN..=GRADE_MAX).contains(&value) {
        return Err(GradeRuleError::OutOfBounds);
    }
    Ok(())
}

/// Rule 3: a grade date may not lie in the past. `today` is injected so
/// the rule stays deterministic under test.
pub fn validate_date(date: Option<NaiveDate>, today: NaiveDate) -> Result<(), GradeRuleError> {
    match date {
        Some(d) if d < today => Err(GradeRuleError::RetroactiveDate),
        _ => Ok(()),
    }
}
