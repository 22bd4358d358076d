//! Pairwise constraints.
//!
//! A constraint overrides normal costing for one (paper, reviewer) pair.
//! Vetoes and conflicts forbid the pair, locks force it. When both apply to
//! the same pair the veto wins.

use serde::{Deserialize, Serialize};

/// Kind of a pairwise override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintValue {
    /// The pair must not be assigned (platform weight `-inf`).
    Veto,
    /// The pair must be assigned whenever feasible (platform weight `+inf`).
    Lock,
    /// Conflict of interest. Forbids the pair like a veto.
    Conflict,
}

/// A hard override for one (paper, reviewer) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEdge {
    /// Paper id.
    pub paper: String,
    /// Reviewer id.
    pub reviewer: String,
    /// Override kind.
    pub value: ConstraintValue,
}

/// Per-pair cap on the assignment probability, for randomized variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityLimit {
    /// Paper id.
    pub paper: String,
    /// Reviewer id.
    pub reviewer: String,
    /// Cap in `[0, 1]`.
    pub limit: f64,
}

impl ConstraintValue {
    /// Decodes a platform constraint weight.
    ///
    /// `-inf` and `-1` mean veto, `+inf` and `1` mean lock. Anything else is
    /// not a constraint.
    pub fn from_weight(weight: f64) -> Option<Self> {
        if weight == f64::NEG_INFINITY || weight == -1.0 {
            Some(Self::Veto)
        } else if weight == f64::INFINITY || weight == 1.0 {
            Some(Self::Lock)
        } else {
            None
        }
    }

    /// Matrix marker: -1 forbidden, 1 forced.
    #[inline]
    pub fn marker(self) -> i8 {
        match self {
            Self::Veto | Self::Conflict => -1,
            Self::Lock => 1,
        }
    }

    /// Whether this value forbids the pair.
    #[inline]
    pub fn forbids(self) -> bool {
        self.marker() < 0
    }
}

impl ConstraintEdge {
    /// Creates a constraint edge.
    pub fn new(paper: impl Into<String>, reviewer: impl Into<String>, value: ConstraintValue) -> Self {
        Self {
            paper: paper.into(),
            reviewer: reviewer.into(),
            value,
        }
    }

    /// Creates a veto.
    pub fn veto(paper: impl Into<String>, reviewer: impl Into<String>) -> Self {
        Self::new(paper, reviewer, ConstraintValue::Veto)
    }

    /// Creates a lock.
    pub fn lock(paper: impl Into<String>, reviewer: impl Into<String>) -> Self {
        Self::new(paper, reviewer, ConstraintValue::Lock)
    }

    /// Creates a conflict.
    pub fn conflict(paper: impl Into<String>, reviewer: impl Into<String>) -> Self {
        Self::new(paper, reviewer, ConstraintValue::Conflict)
    }
}

impl ProbabilityLimit {
    /// Creates a probability limit.
    pub fn new(paper: impl Into<String>, reviewer: impl Into<String>, limit: f64) -> Self {
        Self {
            paper: paper.into(),
            reviewer: reviewer.into(),
            limit,
        }
    }
}
