//! Error taxonomy of a match run.
//!
//! | Kind | Examples | Status |
//! |------|----------|--------|
//! | Configuration | empty reviewer list, duplicate ids, bad precision | Error |
//! | Infeasibility | Σmax < demand, constraints leave a paper uncovered | No Solution |
//! | Solver | negative cycle, unexpected solver state | Error |
//! | Internal | decoded solution breaks a hard constraint | Error |
//!
//! Every error terminates the current run. Nothing is retried here.

use thiserror::Error;

use crate::models::MatchStatus;
use crate::validation::ValidationError;

/// Input problems found while building the cost and constraint matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncoderError {
    #[error("reviewers list can not be empty")]
    EmptyReviewers,
    #[error("papers list can not be empty")]
    EmptyPapers,
    #[error("score type '{0}' is declared more than once")]
    DuplicateScoreType(String),
    #[error("score type '{score}' has a non-finite weight or default")]
    NonFiniteWeight { score: String },
    #[error("score type '{score}' has a non-finite value for ({paper}, {reviewer})")]
    NonFiniteScore {
        score: String,
        paper: String,
        reviewer: String,
    },
    #[error("score type '{score}' translates label '{label}' to a non-finite value")]
    NonFiniteTranslation { score: String, label: String },
    #[error("aggregate score of ({paper}, {reviewer}) is not finite")]
    NonFiniteAggregate { paper: String, reviewer: String },
    #[error("score type '{score}' has no translation for label '{label}'")]
    UntranslatedLabel { score: String, label: String },
}

/// Category of a [`MatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, detected before solving.
    Configuration,
    /// No feasible assignment exists.
    Infeasibility,
    /// The flow solver failed without a clear cause.
    Solver,
    /// A result broke an invariant the engine guarantees.
    Internal,
}

/// Error terminating a match run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Encoder(#[from] EncoderError),
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(
        "Total demand ({demand}) is out of range when min review supply is ({min_supply}) and max review supply is ({max_supply})"
    )]
    SupplyDemandMismatch {
        demand: usize,
        min_supply: usize,
        max_supply: usize,
    },
    #[error("no feasible assignment: {0}")]
    Infeasible(String),
    #[error("solver failure: {0}")]
    Solver(String),
    #[error("internal invariant violated: {0}")]
    Invariant(String),
    #[error("match has not completed")]
    NotReady,
}

impl MatchError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoder(_) | Self::InvalidInput(_) | Self::InvalidConfig(_) | Self::NotReady => {
                ErrorKind::Configuration
            }
            Self::SupplyDemandMismatch { .. } | Self::Infeasible(_) => ErrorKind::Infeasibility,
            Self::Solver(_) => ErrorKind::Solver,
            Self::Invariant(_) => ErrorKind::Internal,
        }
    }

    /// Terminal status a run reports for this error.
    pub fn status(&self) -> MatchStatus {
        match self.kind() {
            ErrorKind::Infeasibility => MatchStatus::NoSolution,
            _ => MatchStatus::Error,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_message_contains_totals() {
        let err = MatchError::SupplyDemandMismatch {
            demand: 12,
            min_supply: 0,
            max_supply: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("(12)"));
        assert!(msg.contains("(0)"));
        assert!(msg.contains("(8)"));
        assert_eq!(err.status(), MatchStatus::NoSolution);
    }

    #[test]
    fn test_encoder_error_is_configuration() {
        let err = MatchError::from(EncoderError::EmptyReviewers);
        assert_eq!(err.to_string(), "reviewers list can not be empty");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.status(), MatchStatus::Error);
    }

    #[test]
    fn test_invariant_is_internal() {
        let err = MatchError::Invariant("veto violated".into());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.status(), MatchStatus::Error);
    }
}
