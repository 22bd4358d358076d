//! Encoding of raw platform scores into solver matrices, and decoding back.
//!
//! The encoder owns the index space of a run: reviewers are rows, papers
//! are columns. It produces
//!
//! - `cost_matrix`: aggregate score per pair (higher is better),
//! - `constraint_matrix`: -1 forbidden, 0 free, 1 forced,
//! - `prob_limit_matrix`: per-pair probability cap (1.0 = no limit),
//!
//! and turns a solution matrix back into assignment and alternate records.
//!
//! # Constraint precedence
//! Conflicts and vetoes beat locks. A pair carrying both ends up at -1, no
//! matter in which order the edges arrive.

mod aggregate;

pub use aggregate::CostAggregator;

use ndarray::Array2;
use std::collections::{BTreeMap, HashMap};

use crate::config::MatchConfig;
use crate::error::{EncoderError, MatchError};
use crate::flow::{restorable_lock, LoadBounds};
use crate::models::{
    AlternateRecord, AssignmentRecord, ConstraintEdge, MatchInput, Paper, PaperAlternates,
    PaperAssignments, ProbabilityLimit, Reviewer, ScoreSpec,
};

/// Reviewer × paper assignment counts. 1 iff the pair is assigned.
pub type SolutionMatrix = Array2<u32>;

/// Encoder switches that do not come from the input edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderOptions {
    /// Probability cap for pairs without an explicit limit.
    pub probability_limit: f64,
    /// When false, unlocked zero-score pairs are vetoed.
    pub allow_zero_score_assignments: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            probability_limit: 1.0,
            allow_zero_score_assignments: true,
        }
    }
}

impl From<&MatchConfig> for EncoderOptions {
    fn from(config: &MatchConfig) -> Self {
        Self {
            probability_limit: config.probability_limit,
            allow_zero_score_assignments: config.allow_zero_score_assignments,
        }
    }
}

/// Numeric view of one match problem.
#[derive(Debug, Clone)]
pub struct Encoder {
    reviewers: Vec<Reviewer>,
    papers: Vec<Paper>,
    aggregator: CostAggregator,
    score_names: Vec<String>,
    /// Raw edge values per score type, in `score_names` order.
    score_values: Vec<Array2<Option<f64>>>,
    cost_matrix: Array2<f64>,
    constraint_matrix: Array2<i8>,
    prob_limit_matrix: Array2<f64>,
}

impl Encoder {
    /// Encodes reviewers, papers, scores and constraints.
    ///
    /// # Errors
    /// - empty reviewer or paper list (checked before any allocation)
    /// - duplicate score types, non-finite weights, defaults, edge values or
    ///   label translations
    /// - a pair whose aggregate score overflows to infinity
    /// - a labeled edge whose label has no translation
    pub fn new(
        reviewers: Vec<Reviewer>,
        papers: Vec<Paper>,
        scores: &[ScoreSpec],
        constraints: &[ConstraintEdge],
        probability_limits: &[ProbabilityLimit],
        options: EncoderOptions,
    ) -> Result<Self, EncoderError> {
        if reviewers.is_empty() {
            return Err(EncoderError::EmptyReviewers);
        }
        if papers.is_empty() {
            return Err(EncoderError::EmptyPapers);
        }
        check_score_specs(scores)?;

        let shape = (reviewers.len(), papers.len());
        let reviewer_index: HashMap<&str, usize> = reviewers
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();
        let paper_index: HashMap<&str, usize> = papers
            .iter()
            .enumerate()
            .map(|(j, p)| (p.id.as_str(), j))
            .collect();
        let locate = |paper: &str, reviewer: &str| -> Option<(usize, usize)> {
            Some((*reviewer_index.get(reviewer)?, *paper_index.get(paper)?))
        };

        let aggregator = CostAggregator::from_specs(scores);
        let score_names: Vec<String> = aggregator.names().map(str::to_string).collect();
        let by_name: HashMap<&str, &ScoreSpec> =
            scores.iter().map(|s| (s.name.as_str(), s)).collect();

        let mut score_values = Vec::with_capacity(score_names.len());
        let mut skipped = 0usize;
        for name in &score_names {
            let spec = by_name[name.as_str()];
            let mut values: Array2<Option<f64>> = Array2::from_elem(shape, None);
            for edge in &spec.edges {
                let value = spec.edge_value(edge).ok_or_else(|| EncoderError::UntranslatedLabel {
                    score: spec.name.clone(),
                    label: edge.label.clone().unwrap_or_default(),
                })?;
                match locate(&edge.paper, &edge.reviewer) {
                    Some(idx) => values[idx] = Some(value),
                    None => skipped += 1,
                }
            }
            score_values.push(values);
        }
        if skipped > 0 {
            tracing::debug!(skipped, "score edges outside the match were ignored");
        }

        let mut cost_matrix = Array2::<f64>::zeros(shape);
        let mut pair_values = vec![None; score_values.len()];
        for ((i, j), cost) in cost_matrix.indexed_iter_mut() {
            for (slot, values) in pair_values.iter_mut().zip(&score_values) {
                *slot = values[(i, j)];
            }
            *cost = aggregator.combine(&pair_values);
            if !cost.is_finite() {
                return Err(EncoderError::NonFiniteAggregate {
                    paper: papers[j].id.clone(),
                    reviewer: reviewers[i].id.clone(),
                });
            }
        }

        let mut constraint_matrix = Array2::<i8>::zeros(shape);
        let (forbidding, forcing): (Vec<&ConstraintEdge>, Vec<&ConstraintEdge>) =
            constraints.iter().partition(|c| c.value.forbids());
        for edge in forcing.into_iter().chain(forbidding) {
            match locate(&edge.paper, &edge.reviewer) {
                Some(idx) => constraint_matrix[idx] = edge.value.marker(),
                None => tracing::warn!(
                    paper = %edge.paper,
                    reviewer = %edge.reviewer,
                    "constraint outside the match ignored"
                ),
            }
        }
        if !options.allow_zero_score_assignments {
            for (idx, c) in constraint_matrix.indexed_iter_mut() {
                if *c == 0 && cost_matrix[idx] == 0.0 {
                    *c = -1;
                }
            }
        }

        let mut prob_limit_matrix = Array2::from_elem(shape, options.probability_limit);
        for limit in probability_limits {
            if let Some(idx) = locate(&limit.paper, &limit.reviewer) {
                prob_limit_matrix[idx] = limit.limit;
            }
        }

        Ok(Self {
            reviewers,
            papers,
            aggregator,
            score_names,
            score_values,
            cost_matrix,
            constraint_matrix,
            prob_limit_matrix,
        })
    }

    /// Encodes a platform input under a configuration.
    pub fn from_input(input: &MatchInput, config: &MatchConfig) -> Result<Self, EncoderError> {
        Self::new(
            input.resolve_reviewers(config.min_papers, config.max_papers),
            input.resolve_papers(config.user_demand),
            &input.scores,
            &input.constraints,
            &input.probability_limits,
            EncoderOptions::from(config),
        )
    }

    /// Reviewers, in row order.
    pub fn reviewers(&self) -> &[Reviewer] {
        &self.reviewers
    }

    /// Papers, in column order.
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// Aggregate score per pair.
    pub fn cost_matrix(&self) -> &Array2<f64> {
        &self.cost_matrix
    }

    /// Constraint marker per pair.
    pub fn constraint_matrix(&self) -> &Array2<i8> {
        &self.constraint_matrix
    }

    /// Probability cap per pair.
    pub fn prob_limit_matrix(&self) -> &Array2<f64> {
        &self.prob_limit_matrix
    }

    /// The aggregator used to build `cost_matrix`.
    pub fn aggregator(&self) -> &CostAggregator {
        &self.aggregator
    }

    /// Demand per paper.
    pub fn demands(&self) -> Vec<usize> {
        self.papers.iter().map(|p| p.demand).collect()
    }

    /// Total demand across papers.
    pub fn total_demand(&self) -> usize {
        self.papers.iter().map(|p| p.demand).sum()
    }

    /// Effective per-type values of a pair.
    fn pair_scores(&self, i: usize, j: usize) -> BTreeMap<String, f64> {
        self.score_names
            .iter()
            .zip(&self.score_values)
            .map(|(name, values)| (name.clone(), self.aggregator.effective(name, values[(i, j)])))
            .collect()
    }

    /// Collects, for every paper, the reviewers with positive flow.
    pub fn decode_assignments(&self, solution: &SolutionMatrix) -> Vec<PaperAssignments> {
        self.papers
            .iter()
            .enumerate()
            .map(|(j, paper)| PaperAssignments {
                paper: paper.id.clone(),
                reviewers: (0..self.reviewers.len())
                    .filter(|&i| solution[(i, j)] > 0)
                    .map(|i| AssignmentRecord {
                        reviewer: self.reviewers[i].id.clone(),
                        aggregate_score: self.cost_matrix[(i, j)],
                        scores: self.pair_scores(i, j),
                        locked: self.constraint_matrix[(i, j)] == 1,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Top-`n` unassigned, unforbidden reviewers per paper.
    ///
    /// Ordered by descending aggregate score; equal scores keep reviewer
    /// input order.
    pub fn decode_alternates(&self, solution: &SolutionMatrix, n: usize) -> Vec<PaperAlternates> {
        let selection: Vec<Vec<usize>> = (0..self.papers.len())
            .map(|j| {
                let mut candidates: Vec<usize> = (0..self.reviewers.len())
                    .filter(|&i| solution[(i, j)] == 0 && self.constraint_matrix[(i, j)] != -1)
                    .collect();
                candidates.sort_by(|&a, &b| {
                    self.cost_matrix[(b, j)].total_cmp(&self.cost_matrix[(a, j)])
                });
                candidates.truncate(n);
                candidates
            })
            .collect();
        self.decode_selected_alternates(&selection)
    }

    /// Builds alternate records from reviewer indices chosen by the caller.
    ///
    /// `selection[j]` lists reviewer indices for paper `j`, in the order they
    /// should appear. Out-of-range indices are skipped.
    pub fn decode_selected_alternates(&self, selection: &[Vec<usize>]) -> Vec<PaperAlternates> {
        self.papers
            .iter()
            .zip(selection)
            .enumerate()
            .map(|(j, (paper, chosen))| PaperAlternates {
                paper: paper.id.clone(),
                reviewers: chosen
                    .iter()
                    .filter(|&&i| i < self.reviewers.len())
                    .map(|&i| AlternateRecord {
                        reviewer: self.reviewers[i].id.clone(),
                        aggregate_score: self.cost_matrix[(i, j)],
                        scores: self.pair_scores(i, j),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Checks a solution against every hard requirement of the problem.
    ///
    /// Locks may be dropped only when the load bounds force it; a dropped
    /// lock that one swap would restore is reported.
    ///
    /// A failure here means a solver produced a wrong answer, so it is an
    /// invariant violation rather than an infeasibility.
    pub fn verify_solution(&self, solution: &SolutionMatrix) -> Result<(), MatchError> {
        if solution.dim() != self.cost_matrix.dim() {
            return Err(MatchError::Invariant(format!(
                "solution shape {:?} does not match problem shape {:?}",
                solution.dim(),
                self.cost_matrix.dim()
            )));
        }
        for ((i, j), &flow) in solution.indexed_iter() {
            if flow > 1 {
                return Err(MatchError::Invariant(format!(
                    "reviewer '{}' assigned {} times to paper '{}'",
                    self.reviewers[i].id, flow, self.papers[j].id
                )));
            }
            if flow > 0 && self.constraint_matrix[(i, j)] == -1 {
                return Err(MatchError::Invariant(format!(
                    "forbidden pair ({}, {}) was assigned",
                    self.papers[j].id, self.reviewers[i].id
                )));
            }
        }
        for (j, paper) in self.papers.iter().enumerate() {
            let covered = solution.column(j).sum() as usize;
            if covered != paper.demand {
                return Err(MatchError::Invariant(format!(
                    "paper '{}' has {} reviewers, needs {}",
                    paper.id, covered, paper.demand
                )));
            }
        }
        for (i, reviewer) in self.reviewers.iter().enumerate() {
            let load = solution.row(i).sum() as usize;
            if !reviewer.accepts_load(load) {
                return Err(MatchError::Invariant(format!(
                    "reviewer '{}' has load {}, bounds are [{}, {}]",
                    reviewer.id, load, reviewer.min_papers, reviewer.max_papers
                )));
            }
        }
        let bounds = LoadBounds::from_reviewers(&self.reviewers);
        if let Some((i, j)) = restorable_lock(solution, &self.constraint_matrix, &bounds) {
            return Err(MatchError::Invariant(format!(
                "locked pair ({}, {}) was dropped although a swap restores it",
                self.papers[j].id, self.reviewers[i].id
            )));
        }
        Ok(())
    }
}

fn check_score_specs(scores: &[ScoreSpec]) -> Result<(), EncoderError> {
    let mut seen = std::collections::HashSet::new();
    for spec in scores {
        if !seen.insert(spec.name.as_str()) {
            return Err(EncoderError::DuplicateScoreType(spec.name.clone()));
        }
        if !spec.weight.is_finite() || !spec.default.map_or(true, f64::is_finite) {
            return Err(EncoderError::NonFiniteWeight {
                score: spec.name.clone(),
            });
        }
        if let Some((label, _)) = spec.translate_map.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EncoderError::NonFiniteTranslation {
                score: spec.name.clone(),
                label: label.clone(),
            });
        }
        if let Some(edge) = spec
            .edges
            .iter()
            .find(|e| e.weight.is_some_and(|w| !w.is_finite()))
        {
            return Err(EncoderError::NonFiniteScore {
                score: spec.name.clone(),
                paper: edge.paper.clone(),
                reviewer: edge.reviewer.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConstraintEdge, ScoreEdge};
    use ndarray::array;

    fn reviewers(n: usize) -> Vec<Reviewer> {
        (0..n).map(|i| Reviewer::new(format!("R{i}"), 0, 2)).collect()
    }

    fn papers(n: usize) -> Vec<Paper> {
        (0..n).map(|j| Paper::new(format!("P{j}"), 1)).collect()
    }

    fn affinity() -> ScoreSpec {
        ScoreSpec::new("affinity", 1.0)
            .with_edge("P0", "R0", 0.9)
            .with_edge("P0", "R1", 0.4)
            .with_edge("P1", "R1", 0.7)
            .with_edge("P1", "R2", 0.7)
            .with_edge("P9", "R0", 1.0)
    }

    fn encode(constraints: &[ConstraintEdge]) -> Encoder {
        let bid = ScoreSpec::new("bid", 0.5)
            .with_default(0.2)
            .with_translation("High", 1.0)
            .with_score_edge(ScoreEdge::labeled("P0", "R2", "High"));
        Encoder::new(
            reviewers(3),
            papers(2),
            &[affinity(), bid],
            constraints,
            &[],
            EncoderOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_reviewers() {
        let err = Encoder::new(vec![], papers(1), &[], &[], &[], EncoderOptions::default())
            .unwrap_err();
        assert_eq!(err, EncoderError::EmptyReviewers);
        assert_eq!(err.to_string(), "reviewers list can not be empty");
    }

    #[test]
    fn test_empty_papers() {
        let err = Encoder::new(reviewers(1), vec![], &[], &[], &[], EncoderOptions::default())
            .unwrap_err();
        assert_eq!(err, EncoderError::EmptyPapers);
    }

    #[test]
    fn test_cost_matrix_aggregates_with_defaults() {
        let enc = encode(&[]);
        let c = enc.cost_matrix();
        assert_eq!(c.dim(), (3, 2));
        // R0/P0: 0.9 + 0.5 * 0.2
        assert!((c[(0, 0)] - 1.0).abs() < 1e-12);
        // R2/P0: affinity default 0 + 0.5 * translated 1.0
        assert!((c[(2, 0)] - 0.5).abs() < 1e-12);
        // R0/P1: only bid default
        assert!((c[(0, 1)] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_untranslated_label() {
        let bid = ScoreSpec::new("bid", 1.0).with_score_edge(ScoreEdge::labeled("P0", "R0", "Meh"));
        let err = Encoder::new(reviewers(1), papers(1), &[bid], &[], &[], EncoderOptions::default())
            .unwrap_err();
        assert!(matches!(err, EncoderError::UntranslatedLabel { .. }));
    }

    #[test]
    fn test_duplicate_score_type() {
        let err = Encoder::new(
            reviewers(1),
            papers(1),
            &[affinity(), ScoreSpec::new("affinity", 2.0)],
            &[],
            &[],
            EncoderOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, EncoderError::DuplicateScoreType("affinity".into()));
    }

    #[test]
    fn test_constraints_veto_beats_lock() {
        // Order of edges must not matter.
        let enc = encode(&[
            ConstraintEdge::conflict("P0", "R0"),
            ConstraintEdge::lock("P0", "R0"),
            ConstraintEdge::lock("P1", "R2"),
            ConstraintEdge::lock("P1", "R0"),
            ConstraintEdge::veto("P1", "R0"),
        ]);
        let m = enc.constraint_matrix();
        assert_eq!(m[(0, 0)], -1);
        assert_eq!(m[(2, 1)], 1);
        assert_eq!(m[(0, 1)], -1);
        assert_eq!(m[(1, 0)], 0);
    }

    #[test]
    fn test_zero_score_exclusion() {
        let options = EncoderOptions {
            allow_zero_score_assignments: false,
            ..EncoderOptions::default()
        };
        let enc = Encoder::new(
            reviewers(3),
            papers(2),
            &[affinity()],
            &[ConstraintEdge::lock("P1", "R0")],
            &[],
            options,
        )
        .unwrap();
        let m = enc.constraint_matrix();
        assert_eq!(m[(2, 0)], -1);
        assert_eq!(m[(0, 0)], 0);
        // Locked zero-score pair stays locked.
        assert_eq!(m[(0, 1)], 1);
    }

    #[test]
    fn test_prob_limit_matrix() {
        let options = EncoderOptions {
            probability_limit: 0.5,
            ..EncoderOptions::default()
        };
        let enc = Encoder::new(
            reviewers(2),
            papers(2),
            &[affinity()],
            &[],
            &[ProbabilityLimit::new("P1", "R1", 0.25)],
            options,
        )
        .unwrap();
        let m = enc.prob_limit_matrix();
        assert_eq!(m[(0, 0)], 0.5);
        assert_eq!(m[(1, 1)], 0.25);
    }

    #[test]
    fn test_decode_assignments_carries_scores() {
        let enc = encode(&[]);
        let solution: SolutionMatrix = array![[1, 0], [0, 1], [0, 0]];
        let decoded = enc.decode_assignments(&solution);

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].paper, "P0");
        assert_eq!(decoded[0].reviewers.len(), 1);
        let record = &decoded[0].reviewers[0];
        assert_eq!(record.reviewer, "R0");
        assert_eq!(record.aggregate_score, enc.cost_matrix()[(0, 0)]);
        assert_eq!(record.scores["affinity"], 0.9);
        assert_eq!(record.scores["bid"], 0.2);
        assert!(decoded[1].contains("R1"));
    }

    #[test]
    fn test_decode_alternates_excludes_assigned_and_forbidden() {
        let enc = encode(&[ConstraintEdge::veto("P1", "R2")]);
        let solution: SolutionMatrix = array![[1, 0], [0, 1], [0, 0]];
        let alternates = enc.decode_alternates(&solution, 5);

        let p0: Vec<&str> = alternates[0].reviewers.iter().map(|r| r.reviewer.as_str()).collect();
        // R2 = 0.5, R1 = 0.4 + 0.1
        assert_eq!(p0, vec!["R1", "R2"]);

        let p1: Vec<&str> = alternates[1].reviewers.iter().map(|r| r.reviewer.as_str()).collect();
        assert_eq!(p1, vec!["R0"]);
    }

    #[test]
    fn test_decode_alternates_stable_ties() {
        let enc = Encoder::new(
            reviewers(4),
            papers(1),
            &[ScoreSpec::new("affinity", 1.0).with_default(0.3)],
            &[],
            &[],
            EncoderOptions::default(),
        )
        .unwrap();
        let solution = SolutionMatrix::zeros((4, 1));
        let alternates = enc.decode_alternates(&solution, 3);
        let ids: Vec<&str> = alternates[0].reviewers.iter().map(|r| r.reviewer.as_str()).collect();
        assert_eq!(ids, vec!["R0", "R1", "R2"]);
    }

    #[test]
    fn test_decode_selected_alternates() {
        let enc = encode(&[]);
        let alternates = enc.decode_selected_alternates(&[vec![2, 7], vec![0]]);
        assert_eq!(alternates[0].reviewers.len(), 1);
        assert_eq!(alternates[0].reviewers[0].reviewer, "R2");
        assert_eq!(alternates[1].reviewers[0].reviewer, "R0");
    }

    #[test]
    fn test_verify_solution() {
        let enc = encode(&[ConstraintEdge::veto("P1", "R2")]);
        assert!(enc.verify_solution(&array![[1, 0], [0, 1], [0, 0]]).is_ok());
        // Uncovered paper.
        assert!(enc.verify_solution(&array![[1, 0], [0, 0], [0, 0]]).is_err());
        // Vetoed pair.
        assert!(enc.verify_solution(&array![[1, 0], [0, 0], [0, 1]]).is_err());
    }

    #[test]
    fn test_verify_solution_minimum_load() {
        let reviewers = vec![
            Reviewer::new("R0", 1, 2),
            Reviewer::new("R1", 0, 2),
            Reviewer::new("R2", 0, 2),
        ];
        let enc = Encoder::new(reviewers, papers(2), &[affinity()], &[], &[], EncoderOptions::default())
            .unwrap();
        assert!(enc.verify_solution(&array![[1, 0], [0, 1], [0, 0]]).is_ok());
        let err = enc.verify_solution(&array![[0, 0], [1, 0], [0, 1]]).unwrap_err();
        assert!(matches!(err, MatchError::Invariant(_)));
    }

    #[test]
    fn test_verify_solution_locks() {
        let enc = encode(&[ConstraintEdge::lock("P0", "R2")]);
        assert!(enc.verify_solution(&array![[0, 0], [0, 1], [1, 0]]).is_ok());
        // R2 has room and R0 could hand P0 over.
        let err = enc.verify_solution(&array![[1, 0], [0, 1], [0, 0]]).unwrap_err();
        assert!(matches!(err, MatchError::Invariant(_)));

        // With no capacity left for R2 the lock cannot be kept.
        let reviewers = vec![
            Reviewer::new("R0", 0, 2),
            Reviewer::new("R1", 0, 2),
            Reviewer::new("R2", 0, 0),
        ];
        let enc = Encoder::new(
            reviewers,
            papers(2),
            &[affinity()],
            &[ConstraintEdge::lock("P0", "R2")],
            &[],
            EncoderOptions::default(),
        )
        .unwrap();
        assert!(enc.verify_solution(&array![[1, 0], [0, 1], [0, 0]]).is_ok());
    }

    #[test]
    fn test_non_finite_edge_values() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let spec = ScoreSpec::new("affinity", 1.0).with_edge("P0", "R0", value);
            let err = Encoder::new(reviewers(1), papers(1), &[spec], &[], &[], EncoderOptions::default())
                .unwrap_err();
            assert_eq!(
                err,
                EncoderError::NonFiniteScore {
                    score: "affinity".into(),
                    paper: "P0".into(),
                    reviewer: "R0".into(),
                }
            );
        }
    }

    #[test]
    fn test_non_finite_translation() {
        let bid = ScoreSpec::new("bid", 1.0)
            .with_translation("High", f64::NAN)
            .with_score_edge(ScoreEdge::labeled("P0", "R0", "High"));
        let err = Encoder::new(reviewers(1), papers(1), &[bid], &[], &[], EncoderOptions::default())
            .unwrap_err();
        assert!(matches!(err, EncoderError::NonFiniteTranslation { .. }));
    }

    #[test]
    fn test_aggregate_overflow() {
        let spec = ScoreSpec::new("affinity", 10.0).with_edge("P0", "R0", 1e308);
        let err = Encoder::new(reviewers(1), papers(1), &[spec], &[], &[], EncoderOptions::default())
            .unwrap_err();
        assert!(matches!(err, EncoderError::NonFiniteAggregate { .. }));
    }
}
