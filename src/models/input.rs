//! Raw match input as delivered by the platform.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    ConstraintEdge, CustomDemand, CustomLoad, Paper, ProbabilityLimit, Reviewer, ScoreSpec,
};

/// Everything the platform supplies for one match run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchInput {
    /// Reviewer ids, in the order used for tie-breaking.
    pub reviewers: Vec<String>,
    /// Paper ids.
    pub papers: Vec<String>,
    /// Score types with their edges.
    pub scores: Vec<ScoreSpec>,
    /// Vetoes, locks and conflicts.
    pub constraints: Vec<ConstraintEdge>,
    /// Per-reviewer maximum load overrides.
    pub custom_loads: Vec<CustomLoad>,
    /// Per-paper demand overrides.
    pub custom_demands: Vec<CustomDemand>,
    /// Per-pair probability caps.
    pub probability_limits: Vec<ProbabilityLimit>,
}

impl MatchInput {
    /// Creates an input over the given reviewers and papers.
    pub fn new<R, P>(reviewers: R, papers: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            reviewers: reviewers.into_iter().map(Into::into).collect(),
            papers: papers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Adds a score type.
    pub fn with_score(mut self, score: ScoreSpec) -> Self {
        self.scores.push(score);
        self
    }

    /// Adds a constraint.
    pub fn with_constraint(mut self, constraint: ConstraintEdge) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a custom load.
    pub fn with_custom_load(mut self, load: CustomLoad) -> Self {
        self.custom_loads.push(load);
        self
    }

    /// Adds a custom demand.
    pub fn with_custom_demand(mut self, demand: CustomDemand) -> Self {
        self.custom_demands.push(demand);
        self
    }

    /// Adds a probability limit.
    pub fn with_probability_limit(mut self, limit: ProbabilityLimit) -> Self {
        self.probability_limits.push(limit);
        self
    }

    /// Builds reviewers with global bounds and custom loads applied.
    ///
    /// Overrides for unknown reviewers are skipped.
    pub fn resolve_reviewers(&self, min_papers: usize, max_papers: usize) -> Vec<Reviewer> {
        let overrides: HashMap<&str, usize> = self
            .custom_loads
            .iter()
            .map(|c| (c.reviewer.as_str(), c.max))
            .collect();
        for c in &self.custom_loads {
            if !self.reviewers.iter().any(|r| *r == c.reviewer) {
                tracing::warn!(reviewer = %c.reviewer, "custom load for unknown reviewer ignored");
            }
        }

        self.reviewers
            .iter()
            .map(|id| {
                let mut reviewer = Reviewer::new(id.clone(), min_papers, max_papers);
                if let Some(&max) = overrides.get(id.as_str()) {
                    reviewer.apply_custom_load(max);
                }
                reviewer
            })
            .collect()
    }

    /// Builds papers with the global demand and custom demands applied.
    pub fn resolve_papers(&self, user_demand: usize) -> Vec<Paper> {
        let overrides: HashMap<&str, usize> = self
            .custom_demands
            .iter()
            .map(|c| (c.paper.as_str(), c.demand))
            .collect();
        for c in &self.custom_demands {
            if !self.papers.iter().any(|p| *p == c.paper) {
                tracing::warn!(paper = %c.paper, "custom demand for unknown paper ignored");
            }
        }

        self.papers
            .iter()
            .map(|id| {
                let demand = overrides.get(id.as_str()).copied().unwrap_or(user_demand);
                Paper::new(id.clone(), demand)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_applies_overrides() {
        let input = MatchInput::new(["R1", "R2"], ["P1", "P2"])
            .with_custom_load(CustomLoad::new("R2", 1))
            .with_custom_load(CustomLoad::new("ghost", 7))
            .with_custom_demand(CustomDemand::new("P2", 3));

        let reviewers = input.resolve_reviewers(2, 4);
        assert_eq!(reviewers[0], Reviewer::new("R1", 2, 4));
        assert_eq!(reviewers[1], Reviewer::new("R2", 1, 1));

        let papers = input.resolve_papers(2);
        assert_eq!(papers[0].demand, 2);
        assert_eq!(papers[1].demand, 3);
    }
}
