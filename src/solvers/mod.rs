//! Assignment solvers and quality metrics.
//!
//! Two strategies share one [`Solver`] contract:
//!
//! - [`MinMaxSolver`]: one min-cost flow over every allowed pair. Maximizes
//!   the total aggregate score under load bounds.
//! - [`FairFlowSolver`]: min-cost flow on a thinned arc set, then iterative
//!   makespan refinement raising the weakest paper's score. A heuristic
//!   that trades total score for fairness and runs slower than a single flow.
//!
//! Solvers are chosen through [`SolverKind`] or by name through
//! [`registry`]. Adding a solver is a code change.
//!
//! # Usage
//!
//! ```
//! use u_match::config::MatchConfig;
//! use u_match::solvers::SolverKind;
//!
//! let config = MatchConfig::new();
//! let solver = SolverKind::FairFlow.build(&config);
//! assert_eq!(solver.name(), "FairFlow");
//! ```
//!
//! # References
//!
//! - Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 9
//! - Kobren, Saha & McCallum (2019), "Paper Matching with Local Fairness Constraints"

mod fairflow;
mod kpi;
mod minmax;

pub use fairflow::FairFlowSolver;
pub use kpi::{paper_scores, MatchKpi};
pub use minmax::MinMaxSolver;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::config::MatchConfig;
use crate::encoder::{Encoder, SolutionMatrix};
use crate::error::MatchError;

/// An assignment strategy.
pub trait Solver: Send + Sync + Debug {
    /// Solver name (e.g., "MinMax").
    fn name(&self) -> &'static str;

    /// Computes a reviewer×paper solution for an encoded problem.
    ///
    /// The solution satisfies every hard requirement, or an error is
    /// returned. Infeasible problems yield an infeasibility error.
    fn solve(&self, encoder: &Encoder) -> Result<SolutionMatrix, MatchError>;
}

/// Known solver strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverKind {
    /// Total-score maximization under load bounds.
    MinMax,
    /// Makespan refinement for per-paper fairness.
    FairFlow,
}

impl SolverKind {
    /// All known kinds.
    pub const ALL: [SolverKind; 2] = [SolverKind::MinMax, SolverKind::FairFlow];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            Self::MinMax => "MinMax",
            Self::FairFlow => "FairFlow",
        }
    }

    /// Instantiates the solver with parameters from `config`.
    pub fn build(self, config: &MatchConfig) -> Box<dyn Solver> {
        match self {
            Self::MinMax => Box::new(MinMaxSolver::from_config(config)),
            Self::FairFlow => Box::new(FairFlowSolver::from_config(config)),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = MatchError;

    /// Parses a solver name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MatchError::InvalidConfig(format!("unknown solver '{s}'")))
    }
}

/// Constructor stored in the registry.
pub type SolverFactory = fn(&MatchConfig) -> Box<dyn Solver>;

/// Solver name → constructor.
pub fn registry() -> HashMap<&'static str, SolverFactory> {
    let mut map: HashMap<&'static str, SolverFactory> = HashMap::new();
    map.insert(SolverKind::MinMax.name(), |c| SolverKind::MinMax.build(c));
    map.insert(SolverKind::FairFlow.name(), |c| SolverKind::FairFlow.build(c));
    map
}
