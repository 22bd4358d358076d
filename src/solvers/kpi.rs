//! Assignment quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total score | Σ aggregate score over assigned pairs |
//! | Min / mean / max paper score | Per-paper Σ aggregate score of its reviewers |
//! | Load spread | Smallest and largest reviewer load |
//! | Filled slots | Number of assigned pairs |
//!
//! The minimum paper score is the fairness objective FairFlow raises.

use ndarray::Array2;

use crate::encoder::SolutionMatrix;

/// Σ score of each paper's assigned reviewers.
pub fn paper_scores(solution: &SolutionMatrix, scores: &Array2<f64>) -> Vec<f64> {
    (0..solution.ncols())
        .map(|p| {
            solution
                .column(p)
                .iter()
                .zip(scores.column(p))
                .filter(|&(&flow, _)| flow > 0)
                .map(|(_, &s)| s)
                .sum::<f64>()
        })
        .collect()
}

/// Assignment performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchKpi {
    pub total_score: f64,
    pub min_paper_score: f64,
    pub mean_paper_score: f64,
    pub max_paper_score: f64,
    /// Score per paper, in column order.
    pub paper_scores: Vec<f64>,
    pub min_load: usize,
    pub max_load: usize,
    pub filled_slots: usize,
}

impl MatchKpi {
    /// Computes KPIs from a solution and the aggregate score matrix.
    pub fn calculate(solution: &SolutionMatrix, scores: &Array2<f64>) -> Self {
        let paper_scores = paper_scores(solution, scores);
        let total_score: f64 = paper_scores.iter().sum();

        let (min_paper_score, max_paper_score) = if paper_scores.is_empty() {
            (0.0, 0.0)
        } else {
            paper_scores
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                    (lo.min(s), hi.max(s))
                })
        };
        let mean_paper_score = if paper_scores.is_empty() {
            0.0
        } else {
            total_score / paper_scores.len() as f64
        };

        let loads: Vec<usize> = solution
            .rows()
            .into_iter()
            .map(|row| row.iter().filter(|&&f| f > 0).count())
            .collect();

        Self {
            total_score,
            min_paper_score,
            mean_paper_score,
            max_paper_score,
            paper_scores,
            min_load: loads.iter().copied().min().unwrap_or(0),
            max_load: loads.iter().copied().max().unwrap_or(0),
            filled_slots: loads.iter().sum(),
        }
    }
}
