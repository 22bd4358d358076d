//! End-to-end match runs.
//!
//! # Pipeline
//! 1. Check configuration and input structure.
//! 2. Encode scores and constraints into matrices.
//! 3. Solve with the configured strategy.
//! 4. Verify the solution against every hard requirement.
//! 5. Decode assignments and alternates, compute KPIs.
//!
//! A run either completes with a full assignment or ends in `Error` /
//! `No Solution` with a message. Partial assignments are never returned.

use crate::config::MatchConfig;
use crate::encoder::{Encoder, SolutionMatrix};
use crate::error::MatchError;
use crate::models::{MatchInput, MatchStatus, PaperAlternates, PaperAssignments};
use crate::solvers::MatchKpi;
use crate::validation::validate_input;

/// Output of a completed run.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Assigned reviewers per paper, in paper input order.
    pub assignments: Vec<PaperAssignments>,
    /// Ranked runner-up reviewers per paper.
    pub alternates: Vec<PaperAlternates>,
    pub kpi: MatchKpi,
    /// Name of the solver that produced the result.
    pub solver: &'static str,
    /// Raw reviewer×paper solution.
    pub solution: SolutionMatrix,
}

/// Runs matches and tracks their status.
///
/// # Example
/// ```
/// use u_match::config::MatchConfig;
/// use u_match::matcher::Matcher;
/// use u_match::models::{MatchInput, MatchStatus, ScoreSpec};
///
/// let input = MatchInput::new(["R1", "R2"], ["P1", "P2"]).with_score(
///     ScoreSpec::new("affinity", 1.0)
///         .with_edge("P1", "R1", 0.9)
///         .with_edge("P2", "R2", 0.8),
/// );
/// let mut matcher = Matcher::new(MatchConfig::new().with_loads(0, 1));
/// let result = matcher.run(&input).unwrap();
/// assert!(result.assignments[0].contains("R1"));
/// assert_eq!(matcher.status(), MatchStatus::Complete);
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatchConfig,
    status: MatchStatus,
    message: Option<String>,
    result: Option<MatchResult>,
}

impl Matcher {
    /// Creates a matcher in the `Initialized` state.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            status: MatchStatus::Initialized,
            message: None,
            result: None,
        }
    }

    /// Run configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Message of the last failed run.
    pub fn error_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Result of the last successful run.
    pub fn result(&self) -> Result<&MatchResult, MatchError> {
        self.result.as_ref().ok_or(MatchError::NotReady)
    }

    /// Runs a match on `input`.
    ///
    /// On failure the status becomes `Error` or `No Solution` and the error
    /// message is kept.
    pub fn run(&mut self, input: &MatchInput) -> Result<&MatchResult, MatchError> {
        self.status = MatchStatus::Running;
        self.message = None;
        self.result = None;

        match self.execute(input) {
            Ok(result) => {
                self.status = MatchStatus::Complete;
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                self.status = e.status();
                self.message = Some(e.to_string());
                tracing::warn!(status = %self.status, error = %e, "match failed");
                Err(e)
            }
        }
    }

    fn execute(&self, input: &MatchInput) -> Result<MatchResult, MatchError> {
        self.config.validate()?;
        validate_input(input).map_err(MatchError::InvalidInput)?;

        let encoder = Encoder::from_input(input, &self.config)?;
        let solver = self.config.solver.build(&self.config);
        tracing::info!(
            reviewers = encoder.reviewers().len(),
            papers = encoder.papers().len(),
            demand = encoder.total_demand(),
            solver = solver.name(),
            "match started"
        );

        let solution = solver.solve(&encoder)?;
        encoder.verify_solution(&solution)?;

        let kpi = MatchKpi::calculate(&solution, encoder.cost_matrix());
        let assignments = encoder.decode_assignments(&solution);
        let alternates = encoder.decode_alternates(&solution, self.config.alternates);
        tracing::info!(
            total_score = kpi.total_score,
            min_paper_score = kpi.min_paper_score,
            filled_slots = kpi.filled_slots,
            "match complete"
        );

        Ok(MatchResult {
            assignments,
            alternates,
            kpi,
            solver: solver.name(),
            solution,
        })
    }
}
