//! Decoded match output.
//!
//! Records are rebuilt from scratch on every run. They carry the per-type
//! scores alongside the aggregate so the platform can show why a pair was
//! chosen.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One filled review slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Assigned reviewer id.
    pub reviewer: String,
    /// Aggregate (weighted) score of the pair.
    pub aggregate_score: f64,
    /// Effective raw value per score type (edge value or type default).
    pub scores: BTreeMap<String, f64>,
    /// Whether the pair was locked.
    pub locked: bool,
}

/// One runner-up reviewer for a paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateRecord {
    /// Alternate reviewer id.
    pub reviewer: String,
    /// Aggregate score of the pair.
    pub aggregate_score: f64,
    /// Effective raw value per score type.
    pub scores: BTreeMap<String, f64>,
}

/// All reviewers assigned to a paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperAssignments {
    /// Paper id.
    pub paper: String,
    /// Assigned reviewers, in reviewer input order.
    pub reviewers: Vec<AssignmentRecord>,
}

/// Ranked alternates of a paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperAlternates {
    /// Paper id.
    pub paper: String,
    /// Alternates by descending aggregate score.
    pub reviewers: Vec<AlternateRecord>,
}

impl PaperAssignments {
    /// Sum of the aggregate scores of the assigned reviewers.
    pub fn total_score(&self) -> f64 {
        self.reviewers.iter().map(|r| r.aggregate_score).sum()
    }

    /// Whether a reviewer is assigned to this paper.
    pub fn contains(&self, reviewer: &str) -> bool {
        self.reviewers.iter().any(|r| r.reviewer == reviewer)
    }
}
