//! Input validation for match runs.
//!
//! Checks structural integrity of the platform input before any matrix is
//! allocated. Detects:
//! - Duplicate reviewer, paper and score type ids
//! - Non-finite score weights, defaults, edge values and label translations
//! - Probability limits outside `[0, 1]`
//!
//! Edges that point at reviewers or papers outside the match are not
//! errors: the platform sends group-wide edges and the encoder skips them.

use crate::models::MatchInput;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A score type appears twice.
    DuplicateScoreType,
    /// A weight or default is NaN or infinite.
    NonFiniteValue,
    /// A probability limit lies outside `[0, 1]`.
    InvalidProbability,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a match run.
///
/// Checks:
/// 1. No duplicate reviewer IDs
/// 2. No duplicate paper IDs
/// 3. No duplicate score type names
/// 4. Finite score weights, defaults, edge values and label translations
/// 5. Probability limits within `[0, 1]`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &MatchInput) -> ValidationResult {
    let mut errors = Vec::new();

    let mut reviewer_ids = HashSet::new();
    for r in &input.reviewers {
        if !reviewer_ids.insert(r.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate reviewer ID: {r}"),
            ));
        }
    }

    let mut paper_ids = HashSet::new();
    for p in &input.papers {
        if !paper_ids.insert(p.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate paper ID: {p}"),
            ));
        }
    }

    let mut score_names = HashSet::new();
    for spec in &input.scores {
        if !score_names.insert(spec.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateScoreType,
                format!("Duplicate score type: {}", spec.name),
            ));
        }
        let default_ok = spec.default.map_or(true, f64::is_finite);
        if !spec.weight.is_finite() || !default_ok {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Score type '{}' has a non-finite weight or default", spec.name),
            ));
        }
        for (label, value) in &spec.translate_map {
            if !value.is_finite() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonFiniteValue,
                    format!("Score type '{}' translates '{label}' to {value}", spec.name),
                ));
            }
        }
        for edge in &spec.edges {
            if let Some(w) = edge.weight.filter(|w| !w.is_finite()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonFiniteValue,
                    format!(
                        "Score type '{}' has value {w} for ({}, {})",
                        spec.name, edge.paper, edge.reviewer
                    ),
                ));
            }
        }
    }

    for limit in &input.probability_limits {
        if !(0.0..=1.0).contains(&limit.limit) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProbability,
                format!(
                    "Probability limit {} for ({}, {}) is outside [0, 1]",
                    limit.limit, limit.paper, limit.reviewer
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProbabilityLimit, ScoreSpec};

    fn sample_input() -> MatchInput {
        MatchInput::new(["R1", "R2"], ["P1", "P2"])
            .with_score(ScoreSpec::new("affinity", 1.0).with_edge("P1", "R1", 0.5))
            .with_score(ScoreSpec::new("bid", 0.5).with_default(0.1))
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_input()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut input = sample_input();
        input.reviewers.push("R1".into());
        input.papers.push("P2".into());

        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_duplicate_score_type() {
        let input = sample_input().with_score(ScoreSpec::new("bid", 2.0));
        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateScoreType));
    }

    #[test]
    fn test_non_finite_weight() {
        let input = sample_input().with_score(ScoreSpec::new("nan", f64::NAN));
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonFiniteValue);
    }

    #[test]
    fn test_non_finite_edge_values() {
        let input = sample_input()
            .with_score(
                ScoreSpec::new("expertise", 1.0)
                    .with_edge("P1", "R1", f64::INFINITY)
                    .with_edge("P2", "R1", f64::NAN)
                    .with_edge("P2", "R2", 0.3),
            )
            .with_score(ScoreSpec::new("recommendation", 1.0).with_translation("Yes", f64::NAN));
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::NonFiniteValue));
    }

    #[test]
    fn test_probability_out_of_range() {
        let input = sample_input().with_probability_limit(ProbabilityLimit::new("P1", "R1", 1.2));
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidProbability);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut input = sample_input()
            .with_score(ScoreSpec::new("affinity", 1.0))
            .with_probability_limit(ProbabilityLimit::new("P1", "R1", -0.1));
        input.reviewers.push("R2".into());

        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
