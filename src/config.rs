//! Match configuration.
//!
//! Global parameters of one match run. Values arrive from the platform
//! already parsed; this module only defines the shape, the defaults and a
//! consistency check.

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::solvers::SolverKind;

/// Parameters of a match run.
///
/// # Example
/// ```
/// use u_match::config::MatchConfig;
/// use u_match::solvers::SolverKind;
///
/// let config = MatchConfig::new()
///     .with_loads(1, 3)
///     .with_user_demand(2)
///     .with_solver(SolverKind::FairFlow);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Global minimum papers per reviewer.
    pub min_papers: usize,
    /// Global maximum papers per reviewer.
    pub max_papers: usize,
    /// Reviews required per paper.
    pub user_demand: usize,
    /// Alternates retained per paper.
    pub alternates: usize,
    /// Solver strategy.
    pub solver: SolverKind,
    /// Score resolution of the integer cost scaling: cost = round(-score / precision).
    pub precision: f64,
    /// When false, unlocked pairs with an aggregate score of exactly 0 are vetoed.
    pub allow_zero_score_assignments: bool,
    /// Default per-pair probability cap.
    pub probability_limit: f64,
    /// Upper bound on edge-thinning binary-search steps.
    pub thinning_max_iterations: usize,
    /// FairFlow parameters.
    pub fairflow: FairFlowConfig,
}

/// Parameters of the FairFlow makespan search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairFlowConfig {
    /// Binary-search steps over the makespan target.
    pub outer_iterations: usize,
    /// Refinement rounds per makespan candidate.
    pub max_refinements: usize,
    /// Build the initial solution on a thinned arc set.
    pub thinning: bool,
}

impl MatchConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global load bounds.
    pub fn with_loads(mut self, min_papers: usize, max_papers: usize) -> Self {
        self.min_papers = min_papers;
        self.max_papers = max_papers;
        self
    }

    /// Sets reviews required per paper.
    pub fn with_user_demand(mut self, demand: usize) -> Self {
        self.user_demand = demand;
        self
    }

    /// Sets alternates retained per paper.
    pub fn with_alternates(mut self, alternates: usize) -> Self {
        self.alternates = alternates;
        self
    }

    /// Sets the solver strategy.
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the cost scaling precision.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Allows or forbids zero-score assignments.
    pub fn with_zero_score_assignments(mut self, allow: bool) -> Self {
        self.allow_zero_score_assignments = allow;
        self
    }

    /// Sets the default probability cap.
    pub fn with_probability_limit(mut self, limit: f64) -> Self {
        self.probability_limit = limit;
        self
    }

    /// Sets the FairFlow parameters.
    pub fn with_fairflow(mut self, fairflow: FairFlowConfig) -> Self {
        self.fairflow = fairflow;
        self
    }

    /// Checks that the parameters are usable.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(MatchError::InvalidConfig(format!(
                "precision must be positive, got {}",
                self.precision
            )));
        }
        if self.min_papers > self.max_papers {
            return Err(MatchError::InvalidConfig(format!(
                "min_papers ({}) exceeds max_papers ({})",
                self.min_papers, self.max_papers
            )));
        }
        if !(0.0..=1.0).contains(&self.probability_limit) {
            return Err(MatchError::InvalidConfig(format!(
                "probability_limit must lie in [0, 1], got {}",
                self.probability_limit
            )));
        }
        if self.fairflow.outer_iterations == 0 {
            return Err(MatchError::InvalidConfig(
                "fairflow.outer_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_papers: 0,
            max_papers: 1,
            user_demand: 1,
            alternates: 10,
            solver: SolverKind::MinMax,
            precision: 0.01,
            allow_zero_score_assignments: true,
            probability_limit: 1.0,
            thinning_max_iterations: 64,
            fairflow: FairFlowConfig::default(),
        }
    }
}

impl Default for FairFlowConfig {
    fn default() -> Self {
        Self {
            outer_iterations: 10,
            max_refinements: 50,
            thinning: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = MatchConfig::default();
        assert_eq!(c.user_demand, 1);
        assert_eq!(c.solver, SolverKind::MinMax);
        assert!((c.precision - 0.01).abs() < 1e-12);
        assert_eq!(c.fairflow.outer_iterations, 10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{ "max_papers": 4, "user_demand": 3, "solver": "FairFlow",
                        "fairflow": { "outer_iterations": 6 } }"#;
        let c: MatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.max_papers, 4);
        assert_eq!(c.user_demand, 3);
        assert_eq!(c.solver, SolverKind::FairFlow);
        assert_eq!(c.fairflow.outer_iterations, 6);
        assert_eq!(c.fairflow.max_refinements, 50);
        assert_eq!(c.alternates, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MatchConfig::new().with_precision(0.0).validate().is_err());
        assert!(MatchConfig::new().with_loads(3, 2).validate().is_err());
        assert!(MatchConfig::new().with_probability_limit(1.5).validate().is_err());

        let mut c = MatchConfig::new();
        c.fairflow.outer_iterations = 0;
        assert!(c.validate().is_err());
    }
}
